//! Fixed-timestep clock and frame telemetry.
//!
//! Each rendered frame feeds its wall-clock duration into an accumulator;
//! `should_step()` then hands out `fixed_dt` slices until less than one slice
//! remains. Slow frames trigger several catch-up steps, fast frames may trigger
//! none.

use std::time::Instant;

pub const FIXED_DT: f64 = 0.01;
pub const MAX_FRAME_TIME: f64 = 0.25;
pub const REPORT_INTERVAL: f64 = 1.0;

/// Periodic frame-timing summary. Observational only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Duration of the most recent frame, in milliseconds.
    pub frame_time_ms: f64,
    /// Frames rendered since the previous report.
    pub frames: u32,
}

pub struct TimeState {
    pub fixed_dt: f64,
    pub max_frame_time: f64,
    accumulator: f64,
    pub total_time: f64,
    pub fixed_step_count: u64,
    pub frame_count: u64,
    pub steps_this_frame: u32,
    pub real_dt: f64,

    origin: Instant,
    last_time: f64,
    last_report_time: f64,
    frames_since_report: u32,
}

impl TimeState {
    pub fn new() -> Self {
        Self {
            fixed_dt: FIXED_DT,
            max_frame_time: MAX_FRAME_TIME,
            accumulator: 0.0,
            total_time: 0.0,
            fixed_step_count: 0,
            frame_count: 0,
            steps_this_frame: 0,
            real_dt: 0.0,
            origin: Instant::now(),
            last_time: 0.0,
            last_report_time: 0.0,
            frames_since_report: 0,
        }
    }

    /// Seconds since this clock was created.
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    /// Start a frame using the wall clock.
    pub fn begin_frame(&mut self) -> Option<FrameReport> {
        let now = self.now();
        self.begin_frame_at(now)
    }

    /// Start a frame at `now` seconds on this clock's timeline.
    pub fn begin_frame_at(&mut self, now: f64) -> Option<FrameReport> {
        let frame_time = (now - self.last_time).max(0.0);
        self.last_time = now;
        self.frame_count += 1;
        self.frames_since_report += 1;

        let report = if now - self.last_report_time >= REPORT_INTERVAL {
            let report = FrameReport {
                frame_time_ms: frame_time * 1000.0,
                frames: self.frames_since_report,
            };
            self.last_report_time = now;
            self.frames_since_report = 0;
            Some(report)
        } else {
            None
        };

        self.advance(frame_time);
        report
    }

    /// Feed `frame_time` seconds into the accumulator and reset the per-frame
    /// step counter.
    pub fn advance(&mut self, frame_time: f64) {
        self.real_dt = frame_time;

        // Spiral-of-death cap
        if self.real_dt > self.max_frame_time {
            log::warn!(
                "Frame took {:.1}ms, capping accumulator input to {}ms",
                self.real_dt * 1000.0,
                self.max_frame_time * 1000.0
            );
            self.real_dt = self.max_frame_time;
        }

        self.accumulator += self.real_dt;
        self.steps_this_frame = 0;
    }

    pub fn should_step(&mut self) -> bool {
        if self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            self.total_time += self.fixed_dt;
            self.fixed_step_count += 1;
            self.steps_this_frame += 1;
            true
        } else {
            false
        }
    }

    /// Unconsumed simulation time, always in `[0, fixed_dt)` after stepping.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}
