//! Bar configuration document.
//!
//! `SuperBarConfig` holds every plain-data option of a bar. It can be built in
//! code or loaded from JSON, and it is validated on load. Color formatters and
//! callbacks are not plain data; they live on [`crate::SuperBar`].

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::ConfigResult;
use crate::range::{BarRange, Quantization};

/// Default fill color.
pub const DEFAULT_BAR_COLOR: HexColor = HexColor::rgb(0, 0, 255);
/// Default track color.
pub const DEFAULT_BACKGROUND_COLOR: HexColor = HexColor::rgb(0, 255, 0);
/// Default overlay color.
pub const DEFAULT_OVERLAY_COLOR: HexColor = HexColor::rgb(255, 0, 0);
/// Default knob color.
pub const DEFAULT_CONTROL_COLOR: HexColor = HexColor::rgb(255, 255, 0);
/// Default knob shadow color (half-transparent black).
pub const DEFAULT_CONTROL_SHADOW_COLOR: HexColor = HexColor::new(0, 0, 0, 127);

/// Plain-data options of a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuperBarConfig {
    /// Representable values.
    pub bar_range: BarRange,
    /// Snapping step for touch input.
    pub bar_interval: Quantization,
    /// Initial bar value (clamped into `bar_range`).
    pub bar_value: f64,
    /// Initial overlay value (clamped into `bar_range`).
    pub overlay_value: f64,
    /// Solid fill color.
    pub bar_color: HexColor,
    /// Solid overlay color.
    pub overlay_color: HexColor,
    /// Track color.
    pub background_color: HexColor,
    /// Knob color.
    pub control_color: HexColor,
    /// Knob radius in pixels; zero or anything not below the view height
    /// falls back to half the height.
    pub control_radius: f64,
    /// Shadow blur reserved inside the knob radius.
    pub control_shadow_radius: f64,
    pub control_shadow_color: HexColor,
    /// Bar thickness in pixels; zero or anything not below the view height
    /// falls back to the full height.
    pub bar_height: f64,
    /// Vertical inset of the bar, split evenly above and below.
    pub bar_margin: f64,
    pub touch_enabled: bool,
}

impl Default for SuperBarConfig {
    fn default() -> Self {
        Self {
            bar_range: BarRange::default(),
            bar_interval: Quantization::default(),
            bar_value: 10.0,
            overlay_value: 80.0,
            bar_color: DEFAULT_BAR_COLOR,
            overlay_color: DEFAULT_OVERLAY_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            control_color: DEFAULT_CONTROL_COLOR,
            control_radius: 0.0,
            control_shadow_radius: 6.0,
            control_shadow_color: DEFAULT_CONTROL_SHADOW_COLOR,
            bar_height: 0.0,
            bar_margin: 12.0,
            touch_enabled: true,
        }
    }
}

impl SuperBarConfig {
    /// Load a configuration from JSON.
    ///
    /// Missing fields take their defaults. The range is validated during
    /// parsing; initial values are clamped into it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.bar_value = config.bar_range.clamp(config.bar_value);
        config.overlay_value = config.bar_range.clamp(config.overlay_value);
        log::debug!(
            "Loaded bar config: range {}..{}, interval {}",
            config.bar_range.min(),
            config.bar_range.max(),
            config.bar_interval.interval()
        );
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Knob radius for a view of the given height.
    pub fn effective_control_radius(&self, view_height: f64) -> f64 {
        if self.control_radius > 0.0 && self.control_radius < view_height {
            self.control_radius
        } else {
            view_height / 2.0
        }
    }

    /// Bar thickness for a view of the given height.
    pub fn effective_bar_height(&self, view_height: f64) -> f64 {
        if self.bar_height > 0.0 && self.bar_height < view_height {
            self.bar_height
        } else {
            view_height
        }
    }
}
