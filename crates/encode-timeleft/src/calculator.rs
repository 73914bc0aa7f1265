//! Sliding-window time-left calculator.
//!
//! Each [`TimeLeftCalculator::update`] records a `(now, frames)` sample. The
//! throughput is measured between the oldest and newest sample still in the
//! window, and the remaining frames are divided by it. A longer window
//! averages over more samples, so the estimate reacts more slowly to short
//! bursts or stalls in the encoder.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::config::DEFAULT_HISTORY_LENGTH;
use crate::error::{TimeLeftError, TimeLeftResult};
use crate::progress::FfmpegProgress;

/// A single progress observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSample {
    /// When the sample was taken
    pub timestamp: Instant,
    /// Cumulative frames completed at `timestamp`
    pub frames_completed: i64,
}

/// Estimates the time left for a frame-based encoding job.
///
/// Owned by whoever drives the job's progress reporting; wrap it in a mutex
/// if updates arrive from more than one thread.
pub struct TimeLeftCalculator {
    clock: Arc<dyn Clock>,
    frame_count: i64,
    history_length: usize,
    history: VecDeque<ProgressSample>,
    start_time: Instant,
}

impl TimeLeftCalculator {
    /// Create a calculator keeping the default number of samples.
    pub fn new(clock: Arc<dyn Clock>, frame_count: i64) -> TimeLeftResult<Self> {
        Self::with_history(clock, frame_count, DEFAULT_HISTORY_LENGTH)
    }

    /// Create a calculator keeping at most `history_length` samples.
    pub fn with_history(
        clock: Arc<dyn Clock>,
        frame_count: i64,
        history_length: usize,
    ) -> TimeLeftResult<Self> {
        if frame_count < 0 {
            return Err(TimeLeftError::invalid_argument(
                "frame_count",
                format!("must be >= 0, got {}", frame_count),
            ));
        }
        if history_length < 1 {
            return Err(TimeLeftError::invalid_argument(
                "history_length",
                format!("must be >= 1, got {}", history_length),
            ));
        }

        let start_time = clock.now();
        Ok(Self {
            clock,
            frame_count,
            history_length,
            history: VecDeque::with_capacity(history_length),
            start_time,
        })
    }

    /// Record `frames_completed` at the current clock time and return the
    /// new estimate.
    ///
    /// `frames_completed` is cumulative and must not decrease between calls.
    /// `None` means no estimate is available: not enough elapsed time in the
    /// window, no forward progress, or nothing left to encode.
    pub fn update(&mut self, frames_completed: i64) -> Option<Duration> {
        let now = self.clock.now();
        if self.history.len() >= self.history_length {
            self.history.pop_front();
        }
        self.history.push_back(ProgressSample {
            timestamp: now,
            frames_completed,
        });

        self.time_left()
    }

    /// Feed the frame number of an FFmpeg progress snapshot.
    pub fn update_from_progress(&mut self, progress: &FfmpegProgress) -> Option<Duration> {
        self.update(i64::try_from(progress.frame).unwrap_or(i64::MAX))
    }

    /// Estimate from the current window without recording a sample.
    pub fn time_left(&self) -> Option<Duration> {
        let latest = self.history.back()?;
        let remaining = self.frame_count.saturating_sub(latest.frames_completed);
        if remaining <= 0 {
            return None;
        }

        let rate = self.rate()?;
        let secs = remaining as f64 / rate;
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// Frames per second between the oldest and newest sample in the window.
    ///
    /// `None` while the window spans no time or shows no forward progress.
    pub fn rate(&self) -> Option<f64> {
        let earliest = self.history.front()?;
        let latest = self.history.back()?;

        let elapsed = latest
            .timestamp
            .saturating_duration_since(earliest.timestamp)
            .as_secs_f64();
        if elapsed <= 0.0 {
            return None;
        }

        let frames = latest
            .frames_completed
            .saturating_sub(earliest.frames_completed) as f64;
        let rate = frames / elapsed;
        (rate > 0.0).then_some(rate)
    }

    /// Percentage of frames completed as of the last sample.
    pub fn percent_complete(&self) -> Option<f64> {
        if self.frame_count == 0 {
            return None;
        }
        let frames = self.last_frame()?;
        Some((frames as f64 / self.frame_count as f64 * 100.0).clamp(0.0, 100.0))
    }

    /// Forget all samples and restart the elapsed time.
    pub fn reset(&mut self) {
        self.history.clear();
        self.start_time = self.clock.now();
    }

    /// Total frames in the job.
    pub fn frame_count(&self) -> i64 {
        self.frame_count
    }

    /// Maximum samples kept in the window.
    pub fn history_length(&self) -> usize {
        self.history_length
    }

    /// When the calculator was created or last reset.
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// Time since [`start_time`](Self::start_time).
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start_time)
    }

    /// Frames completed as of the last sample.
    pub fn last_frame(&self) -> Option<i64> {
        self.history.back().map(|s| s.frames_completed)
    }

    /// Samples in the window, oldest first.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &ProgressSample> + '_ {
        self.history.iter()
    }
}

impl fmt::Debug for TimeLeftCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeLeftCalculator")
            .field("frame_count", &self.frame_count)
            .field("history_length", &self.history_length)
            .field("history", &self.history)
            .field("start_time", &self.start_time)
            .finish_non_exhaustive()
    }
}
