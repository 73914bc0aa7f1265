//! Calculator factory.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::calculator::TimeLeftCalculator;
use crate::clock::{Clock, SystemClock};
use crate::config::TimeLeftConfig;
use crate::error::TimeLeftResult;

/// Creates time-left calculators for encoding jobs.
#[cfg_attr(test, mockall::automock)]
pub trait TimeLeftCalculatorFactory: Send + Sync {
    /// Create a calculator for `frame_count` frames using the default
    /// history length.
    fn create(&self, frame_count: i64) -> TimeLeftResult<TimeLeftCalculator>;

    /// Create a calculator keeping `history_length` samples. The larger the
    /// number, the slower the time left changes.
    fn create_with_history(
        &self,
        frame_count: i64,
        history_length: usize,
    ) -> TimeLeftResult<TimeLeftCalculator>;
}

/// Factory handing every calculator the same clock.
#[derive(Clone)]
pub struct DefaultTimeLeftCalculatorFactory {
    clock: Arc<dyn Clock>,
    config: TimeLeftConfig,
}

impl DefaultTimeLeftCalculatorFactory {
    /// Create a factory using the system clock and default config.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a factory using `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            config: TimeLeftConfig::default(),
        }
    }

    /// Override the config used by [`create`](TimeLeftCalculatorFactory::create).
    pub fn with_config(mut self, config: TimeLeftConfig) -> Self {
        self.config = config;
        self
    }

    /// Active config.
    pub fn config(&self) -> &TimeLeftConfig {
        &self.config
    }
}

impl Default for DefaultTimeLeftCalculatorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DefaultTimeLeftCalculatorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultTimeLeftCalculatorFactory")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TimeLeftCalculatorFactory for DefaultTimeLeftCalculatorFactory {
    fn create(&self, frame_count: i64) -> TimeLeftResult<TimeLeftCalculator> {
        self.create_with_history(frame_count, self.config.history_length)
    }

    fn create_with_history(
        &self,
        frame_count: i64,
        history_length: usize,
    ) -> TimeLeftResult<TimeLeftCalculator> {
        debug!(frame_count, history_length, "Creating time-left calculator");
        TimeLeftCalculator::with_history(self.clock.clone(), frame_count, history_length)
    }
}
