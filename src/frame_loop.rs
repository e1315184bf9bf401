//! Explicit frame scheduling loop
//!
//! `loop { drain events; tick(); wait for next frame }`, stopped through a
//! shared flag. Host input (resize, pointer) arrives over a channel from
//! any thread and is applied only between ticks, so a tick always sees
//! either the old particle set or the new one, never a mix.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::consts::FRAME_INTERVAL_MS;
use crate::sim::{RenderStats, Simulation};
use crate::surface::Surface;

/// Input pushed by the host environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Resize { width: u32, height: u32 },
    PointerMoved { x: f32, y: f32 },
    PointerLeft,
}

/// Suspends the loop until the next frame is due
pub trait FrameClock {
    fn wait_for_next_frame(&mut self);
}

/// Paces frames to a fixed interval by sleeping off the remainder
#[derive(Debug)]
pub struct IntervalClock {
    interval: Duration,
    last: Instant,
}

impl IntervalClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(FRAME_INTERVAL_MS))
    }
}

impl FrameClock for IntervalClock {
    fn wait_for_next_frame(&mut self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.interval {
            std::thread::sleep(self.interval - elapsed);
        }
        self.last = Instant::now();
    }
}

/// Never waits; frames run back to back
#[derive(Debug, Default)]
pub struct ManualClock {
    pub waits: u64,
}

impl FrameClock for ManualClock {
    fn wait_for_next_frame(&mut self) {
        self.waits += 1;
    }
}

/// Cloneable, thread-safe handle for feeding and stopping a [`FrameLoop`]
#[derive(Debug, Clone)]
pub struct LoopHandle {
    events: Sender<HostEvent>,
    stop: Arc<AtomicBool>,
}

impl LoopHandle {
    /// Queue an event; returns false once the loop has been dropped
    pub fn send(&self, event: HostEvent) -> bool {
        self.events.send(event).is_ok()
    }

    pub fn resize(&self, width: u32, height: u32) -> bool {
        self.send(HostEvent::Resize { width, height })
    }

    pub fn pointer_moved(&self, x: f32, y: f32) -> bool {
        self.send(HostEvent::PointerMoved { x, y })
    }

    pub fn pointer_left(&self) -> bool {
        self.send(HostEvent::PointerLeft)
    }

    /// Ask the loop to exit before its next tick
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// Owner of the simulation, its surface and its pacing
pub struct FrameLoop<S: Surface, C: FrameClock> {
    pub sim: Simulation,
    pub surface: S,
    clock: C,
    events: Receiver<HostEvent>,
    handle: LoopHandle,
    /// Stats from the most recent tick
    pub last_stats: RenderStats,
}

impl<S: Surface, C: FrameClock> FrameLoop<S, C> {
    pub fn new(sim: Simulation, surface: S, clock: C) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            sim,
            surface,
            clock,
            events: rx,
            handle: LoopHandle {
                events: tx,
                stop: Arc::new(AtomicBool::new(false)),
            },
            last_stats: RenderStats::default(),
        }
    }

    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Apply all queued host events
    ///
    /// Consecutive resizes collapse into one regeneration.
    fn drain_events(&mut self) {
        let mut pending_resize = None;
        for event in self.events.try_iter() {
            match event {
                HostEvent::Resize { width, height } => pending_resize = Some((width, height)),
                HostEvent::PointerMoved { x, y } => self.sim.pointer.move_to(x, y),
                HostEvent::PointerLeft => self.sim.pointer.clear(),
            }
        }
        if let Some((width, height)) = pending_resize {
            self.sim.resize(width, height);
        }
    }

    /// Apply pending events and run a single tick
    pub fn step(&mut self) -> RenderStats {
        self.drain_events();
        self.last_stats = self.sim.tick(&mut self.surface);
        self.last_stats
    }

    /// Run until stopped, or until `max_frames` ticks when given
    ///
    /// Returns the number of ticks run.
    pub fn run(&mut self, max_frames: Option<u64>) -> u64 {
        let mut frames = 0u64;
        log::info!("Frame loop started");

        while !self.handle.is_stopped() {
            if max_frames.is_some_and(|max| frames >= max) {
                break;
            }

            let stats = self.step();
            frames += 1;

            if self.sim.frame % 60 == 0 {
                log::debug!(
                    "frame {}: {} particles, {} links, {} pointer links",
                    self.sim.frame,
                    self.sim.field.len(),
                    stats.particle_links,
                    stats.pointer_links
                );
            }

            self.clock.wait_for_next_frame();
        }

        log::info!("Frame loop stopped after {} frames", frames);
        frames
    }
}
