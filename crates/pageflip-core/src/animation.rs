#![forbid(unsafe_code)]

//! Easing tuning for flip progress.
//!
//! Progress follows a first-order exponential approach toward its target:
//! each tick closes `rate` of the remaining distance. With the default rate
//! of 0.2 the time constant is about five ticks.

/// Tuning for the per-tick easing step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EasingConfig {
    /// Fraction of the remaining distance covered per tick. Default: 0.2.
    pub rate: f64,
    /// `|progress|` at or above which a flip is visually at rest. Default: 0.997.
    pub settle_threshold: f64,
    /// Minimum progress change since the last redraw worth painting. Default: 0.001.
    pub redraw_epsilon: f64,
}

impl Default for EasingConfig {
    fn default() -> Self {
        Self {
            rate: 0.2,
            settle_threshold: 0.997,
            redraw_epsilon: 0.001,
        }
    }
}

impl EasingConfig {
    /// One easing step from `progress` toward `target`.
    #[inline]
    #[must_use]
    pub fn ease(&self, progress: f64, target: f64) -> f64 {
        progress + (target - progress) * self.rate
    }

    /// Whether `progress` is close enough to a resting side.
    #[inline]
    #[must_use]
    pub fn is_settled(&self, progress: f64) -> bool {
        progress.abs() >= self.settle_threshold
    }

    /// Validate ranges; an empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.rate > 0.0 && self.rate <= 1.0) {
            errors.push(format!("easing.rate must be in (0, 1], got {}", self.rate));
        }
        if !(self.settle_threshold > 0.0 && self.settle_threshold < 1.0) {
            errors.push(format!(
                "easing.settle_threshold must be in (0, 1), got {}",
                self.settle_threshold
            ));
        }
        if !(self.redraw_epsilon >= 0.0) {
            errors.push(format!(
                "easing.redraw_epsilon must be >= 0, got {}",
                self.redraw_epsilon
            ));
        }
        errors
    }
}

/// Clamp a signed ratio into the flip range `[-1, 1]`. NaN maps to 0.
#[inline]
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
