//! Time-left estimation for frame-based encoding jobs.
//!
//! This crate provides:
//! - A sliding-window calculator turning `(time, frames)` samples into an
//!   estimated remaining duration
//! - A factory that hands calculators a shared, injectable clock
//! - A deterministic clock for tests
//! - Parsing of FFmpeg `-progress` output into frame counts

pub mod calculator;
pub mod clock;
pub mod config;
pub mod error;
pub mod factory;
pub mod progress;

pub use calculator::{ProgressSample, TimeLeftCalculator};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TimeLeftConfig, DEFAULT_HISTORY_LENGTH, HISTORY_LENGTH_ENV};
pub use error::{TimeLeftError, TimeLeftResult};
pub use factory::{DefaultTimeLeftCalculatorFactory, TimeLeftCalculatorFactory};
pub use progress::{FfmpegProgress, FfmpegProgressParser};
