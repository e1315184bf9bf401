//! Spider Web entry point
//!
//! On the web, drives the simulation from `requestAnimationFrame` onto a
//! 2D canvas. On native, runs the frame loop headless and logs stats.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

    use spider_web::sim::Simulation;
    use spider_web::{Color, Settings, Surface};

    /// Canvas element id the background draws into
    const CANVAS_ID: &str = "spiderCanvas";

    /// Canvas 2D context as a drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
    }

    impl Surface for CanvasSurface {
        fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
            self.ctx
                .clear_rect(x as f64, y as f64, width as f64, height as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.begin_path();
            if let Err(e) = self
                .ctx
                .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            {
                log::warn!("Dot at {} not drawn: {:?}", center, e);
                return;
            }
            self.ctx.fill();
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
        }
    }

    /// Background instance holding all state
    struct Background {
        sim: Simulation,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
    }

    impl Background {
        /// Match the canvas to the window and regenerate the field
        fn fit_to_window(&mut self) {
            let (width, height) = window_size();
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.sim.resize(width, height);
        }
    }

    fn window_size() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (0, 0);
        };
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok()
                .and_then(|v| v.as_f64())
                .map(|v| v.max(0.0) as u32)
                .unwrap_or(0)
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Spider Web starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let (width, height) = window_size();
        canvas.set_width(width);
        canvas.set_height(height);

        let background = Rc::new(RefCell::new(Background {
            sim: Simulation::new(&settings, width, height, seed),
            surface: CanvasSurface { ctx },
            canvas,
        }));

        log::info!("Background initialized with seed: {}", seed);

        setup_input_handlers(&window, background.clone())?;
        request_animation_frame(background);

        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        background: Rc<RefCell<Background>>,
    ) -> Result<(), JsValue> {
        // Pointer position
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                background
                    .borrow_mut()
                    .sim
                    .pointer
                    .move_to(event.client_x() as f32, event.client_y() as f32);
            });
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer leaves the window
        {
            let background = background.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.related_target().is_none() {
                    background.borrow_mut().sim.pointer.clear();
                }
            });
            window
                .add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize regenerates the field wholesale
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                background.borrow_mut().fit_to_window();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(background: Rc<RefCell<Background>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone, animation stopped");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame(background);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(background: Rc<RefCell<Background>>) {
        {
            let mut bg = background.borrow_mut();
            let Background { sim, surface, .. } = &mut *bg;
            sim.tick(surface);
        }

        request_animation_frame(background);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_host::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;

    use clap::Parser;

    use spider_web::sim::Simulation;
    use spider_web::{Color, FrameLoop, IntervalClock, QualityPreset, Settings, Surface};

    /// Counts draw calls without keeping them
    #[derive(Debug, Default)]
    pub struct CountingSurface {
        pub clears: u64,
        pub circles: u64,
        pub lines: u64,
    }

    impl Surface for CountingSurface {
        fn clear_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {
            self.clears += 1;
        }

        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
            self.circles += 1;
        }

        fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _color: Color, _width: f32) {
            self.lines += 1;
        }
    }

    /// Headless particle web run
    #[derive(clap::Parser, Debug)]
    #[command(version, about)]
    pub struct Options {
        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<String>,
        /// Quality preset (low, medium, high); overrides the settings file
        #[arg(long, value_parser = parse_quality)]
        pub quality: Option<QualityPreset>,
        /// Viewport size as WxH
        #[arg(long, value_parser = parse_size, default_value = "1200x800")]
        pub size: (u32, u32),
        /// Number of frames to run
        #[arg(long, default_value_t = 600)]
        pub frames: u64,
    }

    fn parse_size(s: &str) -> Result<(u32, u32), String> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| format!("size must be WxH, got {}", s))?;
        let w = w.parse().map_err(|_| format!("bad width {}", w))?;
        let h = h.parse().map_err(|_| format!("bad height {}", h))?;
        Ok((w, h))
    }

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::from_str(s).ok_or_else(|| format!("unknown quality {}", s))
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let opts = Options::parse();
        let mut settings = match &opts.settings {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        if let Some(preset) = opts.quality {
            settings.apply_preset(preset);
        }
        let (width, height) = opts.size;
        let seed = settings.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        log::info!(
            "Running {} frames at {}x{}, {} quality (seed {})",
            opts.frames,
            width,
            height,
            settings.quality.as_str(),
            seed
        );

        let sim = Simulation::new(&settings, width, height, seed);
        let mut frame_loop = FrameLoop::new(sim, CountingSurface::default(), IntervalClock::default());

        // Park the pointer in the middle so both connection passes run
        frame_loop
            .handle()
            .pointer_moved(width as f32 / 2.0, height as f32 / 2.0);

        let frames = frame_loop.run(Some(opts.frames));
        let surface = &frame_loop.surface;
        log::info!(
            "{} frames ({} clears): {} dots, {} lines ({:.1} lines/frame)",
            frames,
            surface.clears,
            surface.circles,
            surface.lines,
            surface.lines as f64 / frames.max(1) as f64
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Spider Web (native, headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
