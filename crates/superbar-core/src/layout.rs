//! Per-frame geometry of a bar.
//!
//! A [`BarLayout`] is a plain value computed fresh for every frame from the
//! view size and the bar state. Renderers paint it; nothing is cached between
//! frames.

use kurbo::{Circle, Point, Rect, Size};
use peniko::Color;

use crate::range::{BarRange, value_to_fill_length};

/// Inputs of the layout that come from configuration.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    pub range: BarRange,
    /// Knob radius reserved at both ends of the track.
    pub control_radius: f64,
    /// Shadow blur reserved inside the knob radius.
    pub shadow_radius: f64,
    /// Bar thickness before margins.
    pub bar_height: f64,
    pub bar_margin: f64,
}

/// A filled, rounded bar segment.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub rect: Rect,
    pub color: Color,
}

/// The draggable knob.
#[derive(Debug, Clone, Copy)]
pub struct Control {
    pub circle: Circle,
    pub color: Color,
    pub shadow_blur: f64,
    pub shadow_color: Color,
}

/// Colors applied to the layout's parts.
#[derive(Debug, Clone, Copy)]
pub struct LayoutColors {
    pub background: Color,
    pub bar: Color,
    pub overlay: Color,
    pub control: Color,
    pub control_shadow: Color,
}

/// Geometry of every layer, back to front.
#[derive(Debug, Clone, Copy)]
pub struct BarLayout {
    pub background: Segment,
    pub fill: Segment,
    pub overlay: Segment,
    pub control: Control,
    /// Corner radius shared by all segments.
    pub corner_radius: f64,
}

impl BarLayout {
    /// Lay out a bar of `size` showing `value` and `overlay_value`.
    pub fn compute(
        size: Size,
        params: &LayoutParams,
        colors: &LayoutColors,
        value: f64,
        overlay_value: f64,
    ) -> Self {
        let r = params.control_radius;
        let center_y = size.height / 2.0;
        let track = track_length(size.width, r);

        let half_thickness = params.bar_height / 2.0;
        let inset = params.bar_margin / 2.0;
        let top = (center_y - half_thickness + inset).min(center_y);
        let bottom = (center_y + half_thickness - inset).max(center_y);

        let fill_len = value_to_fill_length(value, &params.range, track);
        let overlay_len = value_to_fill_length(overlay_value, &params.range, track);
        let track_end = r + track;

        Self {
            background: Segment {
                rect: Rect::new(r, top, track_end, bottom),
                color: colors.background,
            },
            fill: Segment {
                rect: Rect::new(r, top, r + fill_len, bottom),
                color: colors.bar,
            },
            overlay: Segment {
                rect: Rect::new(r + overlay_len, top, track_end, bottom),
                color: colors.overlay,
            },
            control: Control {
                circle: Circle::new(
                    Point::new(r + fill_len, center_y),
                    (r - params.shadow_radius).max(0.0),
                ),
                color: colors.control,
                shadow_blur: params.shadow_radius,
                shadow_color: colors.control_shadow,
            },
            corner_radius: (bottom - top) / 2.0,
        }
    }

    /// Knob center, in view coordinates.
    pub fn control_center(&self) -> Point {
        self.control.circle.center
    }
}

/// Usable track length for a view of `width` with knob radius `r`.
pub fn track_length(width: f64, control_radius: f64) -> f64 {
    (width - 2.0 * control_radius).max(0.0)
}
