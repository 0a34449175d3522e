//! egui adapter for [`SuperBar`].

use egui::{CornerRadius, Pos2, Rect, Response, Sense, Ui, Vec2, vec2};
use superbar_core::{BarLayout, Instant, SuperBar, TouchEvent};

use crate::colors::{fade, to_color32, to_screen_pos, to_screen_rect};
use crate::sizing;

/// Number of rings used to fake the knob's blurred shadow.
const SHADOW_RINGS: usize = 6;

/// Shows a [`SuperBar`] and feeds it pointer input and frame ticks.
pub struct SuperBarWidget<'a> {
    bar: &'a mut SuperBar,
    size: Vec2,
}

impl<'a> SuperBarWidget<'a> {
    /// Create a widget for `bar` with the default size.
    pub fn new(bar: &'a mut SuperBar) -> Self {
        Self {
            bar,
            size: vec2(sizing::BAR_WIDTH, sizing::BAR_HEIGHT),
        }
    }

    /// Set the width; `f32::INFINITY` fills the available width.
    pub fn width(mut self, width: f32) -> Self {
        self.size.x = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.size.y = height;
        self
    }

    /// Show the bar and return its response.
    ///
    /// The response is marked changed when touch input moved the value.
    pub fn show(self, ui: &mut Ui) -> Response {
        let size = vec2(self.size.x.min(ui.available_width()), self.size.y);
        let (rect, mut response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let before = self.bar.value();
        let frame = PointerFrame::read(&response, rect, ui);
        route_pointer(self.bar, frame, f64::from(rect.width()));
        if (self.bar.value() - before).abs() > f64::EPSILON {
            response.mark_changed();
        }

        self.bar.tick(Instant::now());
        if self.bar.is_animating() || self.bar.needs_redraw() {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            let layout = self
                .bar
                .layout(kurbo::Size::new(f64::from(rect.width()), f64::from(rect.height())));
            paint(ui, rect.min, &layout);
        }
        // Painted this frame.
        self.bar.take_redraw_request();

        response
    }
}

impl egui::Widget for SuperBarWidget<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui)
    }
}

/// Pointer state of one frame, relative to the bar's left edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct PointerFrame {
    x: Option<f64>,
    /// The primary button is held on the bar.
    pressed: bool,
    /// The pointer moved this frame.
    moved: bool,
    /// A press on the bar ended this frame.
    released: bool,
}

impl PointerFrame {
    fn read(response: &Response, rect: Rect, ui: &Ui) -> Self {
        let (latest, delta) = ui.input(|i| (i.pointer.latest_pos(), i.pointer.delta()));
        let pointer = response.interact_pointer_pos().or(latest);
        Self {
            x: pointer.map(|pos| f64::from(pos.x - rect.left())),
            pressed: response.is_pointer_button_down_on(),
            moved: delta != Vec2::ZERO,
            released: response.drag_stopped() || response.clicked(),
        }
    }
}

/// Translate one frame of pointer state into touch events.
///
/// Press and move are told apart by the bar's gesture phase, which advances
/// even when a gesture detector claims the event.
fn route_pointer(bar: &mut SuperBar, frame: PointerFrame, width: f64) {
    let Some(x) = frame.x else {
        if bar.phase().is_active() && !frame.pressed {
            bar.handle_touch(TouchEvent::Cancel, width);
        }
        return;
    };

    if frame.pressed {
        if !bar.phase().is_active() {
            bar.handle_touch(TouchEvent::Down { x }, width);
        } else if frame.moved {
            bar.handle_touch(TouchEvent::Move { x }, width);
        }
    }

    if frame.released {
        // A press and release within one frame still gets its press.
        if !bar.phase().is_active() {
            bar.handle_touch(TouchEvent::Down { x }, width);
        }
        bar.handle_touch(TouchEvent::Up { x }, width);
    } else if !frame.pressed && bar.phase().is_active() {
        log::debug!("Pointer released outside the bar; cancelling gesture");
        bar.handle_touch(TouchEvent::Cancel, width);
    }
}

/// Paint a layout whose coordinates are relative to `origin`.
fn paint(ui: &Ui, origin: Pos2, layout: &BarLayout) {
    let painter = ui.painter();
    let corner = CornerRadius::same(layout.corner_radius.round().clamp(0.0, 255.0) as u8);

    for segment in [&layout.background, &layout.fill, &layout.overlay] {
        let rect = to_screen_rect(origin, segment.rect);
        if rect.width() > 0.0 && rect.height() > 0.0 {
            painter.rect_filled(rect, corner, to_color32(segment.color));
        }
    }

    let control = &layout.control;
    let center = to_screen_pos(origin, control.circle.center);
    let radius = control.circle.radius as f32;
    let blur = control.shadow_blur as f32;
    if blur > 0.0 {
        let shadow = to_color32(control.shadow_color);
        // Outermost ring first; each ring adds a little opacity towards the knob.
        for ring in (1..=SHADOW_RINGS).rev() {
            let t = ring as f32 / SHADOW_RINGS as f32;
            painter.circle_filled(
                center,
                radius + blur * t,
                fade(shadow, 1.0 / SHADOW_RINGS as f32),
            );
        }
    }
    if radius > 0.0 {
        painter.circle_filled(center, radius, to_color32(control.color));
    }
}
