//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing for the animation engine. `tick` only
//! computes timing so it can be driven by any timer; `run` is the async
//! loop used on the device.

use embassy_time::{Duration, Instant, Timer};

use crate::engine::AnimationEngine;
use crate::output::OutputDriver;

/// Default frame duration (25 FPS).
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(40);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Frame scheduler with drift correction.
///
/// If the caller falls more than two frames behind, the backlog is skipped
/// instead of being caught up in a burst.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(engine);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     Timer::at(result.next_deadline).await;
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver> {
    engine: AnimationEngine<'a, O>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver> FrameScheduler<'a, O> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` for frame timing.
    pub fn new(engine: AnimationEngine<'a, O>) -> Self {
        Self::with_frame_duration(engine, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(engine: AnimationEngine<'a, O>, frame_duration: Duration) -> Self {
        Self {
            engine,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Run one engine tick and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.engine.tick();

        self.next_frame += self.frame_duration;
        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Drive the engine forever at the configured frame rate
    pub async fn run(&mut self) {
        loop {
            let result = self.tick(Instant::now());
            Timer::at(result.next_deadline).await;
        }
    }

    pub fn engine(&self) -> &AnimationEngine<'a, O> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AnimationEngine<'a, O> {
        &mut self.engine
    }

    /// Stop scheduling and hand back the engine
    pub fn into_engine(self) -> AnimationEngine<'a, O> {
        self.engine
    }
}
