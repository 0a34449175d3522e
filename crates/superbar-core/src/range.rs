//! Value mapping between pointer coordinates, bar values and fill lengths.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// The domain of values a bar can represent.
///
/// Always satisfies `min < max` with both bounds finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct BarRange {
    min: f64,
    max: f64,
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for BarRange {
    type Error = ConfigError;

    fn try_from(raw: RawRange) -> ConfigResult<Self> {
        BarRange::new(raw.min, raw.max)
    }
}

impl From<BarRange> for RawRange {
    fn from(range: BarRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

impl Default for BarRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl BarRange {
    /// Create a range, rejecting empty, inverted or non-finite bounds.
    pub fn new(min: f64, max: f64) -> ConfigResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Distance between the bounds (always positive).
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a value into `[min, max]`, inclusive on both ends.
    ///
    /// NaN collapses to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    /// Normalized position (0.0..=1.0) of a value inside the range.
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

/// Snapping granularity for values picked by touch.
///
/// Values snap to `min + k * interval`. An interval of zero or less disables
/// snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantization {
    interval: f64,
}

impl Default for Quantization {
    fn default() -> Self {
        Self { interval: 1.0 }
    }
}

impl Quantization {
    /// Create a quantization step. Non-finite intervals are rejected.
    pub fn new(interval: f64) -> ConfigResult<Self> {
        if !interval.is_finite() {
            return Err(ConfigError::InvalidInterval(interval));
        }
        Ok(Self { interval })
    }

    /// No snapping.
    pub fn none() -> Self {
        Self { interval: 0.0 }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Check if snapping is enabled.
    pub fn is_enabled(&self) -> bool {
        self.interval > 0.0
    }

    /// Snap a value to the nearest step above `range.min`.
    ///
    /// A remainder of exactly half an interval rounds down.
    pub fn quantize(&self, value: f64, range: &BarRange) -> f64 {
        if !self.is_enabled() {
            return value;
        }
        let steps = (value - range.min) / self.interval;
        let lower = steps.floor();
        let snapped = if steps - lower <= 0.5 {
            lower
        } else {
            lower + 1.0
        };
        range.min + snapped * self.interval
    }
}

/// Map a pointer x coordinate to a value inside `range`.
///
/// `width` must be positive. Coordinates left of the bar pin to `min` and
/// coordinates past its right edge pin to `max`, unquantized. Inside the bar
/// the interpolated value is quantized, then clamped because rounding up can
/// overshoot `max` when the span is not a multiple of the interval.
pub fn position_to_value(x: f64, width: f64, range: &BarRange, quantization: &Quantization) -> f64 {
    if x <= 0.0 {
        return range.min;
    }
    if x > width {
        return range.max;
    }
    let raw = range.min + range.span() * (x / width);
    range.clamp(quantization.quantize(raw, range))
}

/// Length of the fill segment for `value` along a track of `track_length`.
pub fn value_to_fill_length(value: f64, range: &BarRange, track_length: f64) -> f64 {
    track_length * range.fraction(value)
}
