//! egui integration for the SuperBar value bar.
//!
//! - **SuperBar**: [`SuperBarWidget`] routes pointer input, ticks transitions and paints
//! - **Colors**: conversions between peniko/kurbo and egui types

pub mod colors;
pub mod superbar;

pub use colors::{fade, from_color32, to_color32, to_screen_pos, to_screen_rect};
pub use superbar::SuperBarWidget;

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Default bar width
    pub const BAR_WIDTH: f32 = 300.0;
    /// Default bar height
    pub const BAR_HEIGHT: f32 = 40.0;
    /// Spacing between a bar and its controls
    pub const SPACING: f32 = 12.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
}
