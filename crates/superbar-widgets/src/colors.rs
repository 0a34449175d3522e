//! Conversions between the core's color and geometry types and egui's.

use egui::{Color32, Pos2, Rect, pos2};
use peniko::Color;

/// Convert a peniko color to egui.
pub fn to_color32(color: Color) -> Color32 {
    let rgba = color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Convert an egui color to peniko.
pub fn from_color32(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

/// Same color with its alpha scaled by `factor` (0.0..=1.0).
pub fn fade(color: Color32, factor: f32) -> Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = (f32::from(a) * factor.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

/// Place a kurbo rect, given in view coordinates, at `origin` on screen.
pub fn to_screen_rect(origin: Pos2, rect: kurbo::Rect) -> Rect {
    Rect::from_min_max(
        pos2(origin.x + rect.x0 as f32, origin.y + rect.y0 as f32),
        pos2(origin.x + rect.x1 as f32, origin.y + rect.y1 as f32),
    )
}

/// Place a kurbo point, given in view coordinates, at `origin` on screen.
pub fn to_screen_pos(origin: Pos2, point: kurbo::Point) -> Pos2 {
    pos2(origin.x + point.x as f32, origin.y + point.y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_roundtrip() {
        let color = Color32::from_rgb(39, 140, 230);
        assert_eq!(to_color32(from_color32(color)), color);
    }

    #[test]
    fn test_translucent_keeps_alpha() {
        let color = to_color32(Color::from_rgba8(0, 0, 0, 127));
        assert_eq!(color.to_srgba_unmultiplied()[3], 127);
    }

    #[test]
    fn test_fade() {
        let color = Color32::from_rgba_unmultiplied(10, 20, 30, 200);
        assert_eq!(fade(color, 0.5).a(), 100);
        assert_eq!(fade(color, 2.0).a(), 200);
        assert_eq!(fade(color, 0.0).a(), 0);
    }

    #[test]
    fn test_screen_rect_offset() {
        let rect = to_screen_rect(pos2(100.0, 50.0), kurbo::Rect::new(20.0, 6.0, 70.0, 34.0));
        assert_eq!(rect.min, pos2(120.0, 56.0));
        assert_eq!(rect.max, pos2(170.0, 84.0));
    }
}
