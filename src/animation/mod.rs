mod count_up;

use std::time::Duration;

use crate::format::NumberFormat;

pub use count_up::{CountUp, Tick};

/// How the per-tick increment is derived from the target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stepping {
    /// `target / steps`, exactly
    #[default]
    Exact,
    /// `target / steps` rounded up in magnitude to a whole number, for
    /// counters that should only ever show integers
    Whole,
}

/// Configuration for a count-up run
#[derive(Clone, Debug, PartialEq)]
pub struct CountUpOptions {
    /// Number of discrete updates over the run
    pub step_count: u32,
    /// Total wall-clock time of the run
    pub duration: Duration,
    /// How each intermediate value is rendered
    pub format: NumberFormat,
    /// How the increment is derived
    pub stepping: Stepping,
}

impl CountUpOptions {
    pub fn new(step_count: u32, duration: Duration, format: NumberFormat) -> Self {
        Self {
            step_count,
            duration,
            format,
            stepping: Stepping::Exact,
        }
    }

    /// Account balances: 50 steps over 1.5s, currency
    pub fn balance() -> Self {
        Self::new(50, Duration::from_millis(1500), NumberFormat::Currency)
    }

    /// Financial aid amounts: 40 steps over 1.2s, currency
    pub fn aid_amount() -> Self {
        Self::new(40, Duration::from_millis(1200), NumberFormat::Currency)
    }

    /// Cumulative GPA: 50 steps over 1.5s, two decimals
    pub fn gpa() -> Self {
        Self::new(50, Duration::from_millis(1500), NumberFormat::Decimal2)
    }

    /// Earned credits: 40 whole-number steps over 1.5s
    pub fn credits() -> Self {
        Self::new(40, Duration::from_millis(1500), NumberFormat::Integer).stepping(Stepping::Whole)
    }

    pub fn steps(mut self, step_count: u32) -> Self {
        self.step_count = step_count;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    pub fn stepping(mut self, stepping: Stepping) -> Self {
        self.stepping = stepping;
        self
    }

    /// Step count actually used; zero steps or zero duration collapse to a
    /// single tick that lands on the target.
    pub(crate) fn effective_steps(&self) -> u32 {
        if self.step_count == 0 || self.duration.is_zero() {
            1
        } else {
            self.step_count
        }
    }
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self::balance()
    }
}
