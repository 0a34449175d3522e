//! The bar itself: state, configuration, touch handling and transitions.

use std::fmt;

use kurbo::Size;
use peniko::Color;

use crate::color::{ColorFormatter, HexColor, Solid};
use crate::config::SuperBarConfig;
use crate::error::ConfigResult;
use crate::input::{GestureDetector, GesturePhase, TouchEvent, TouchResponse};
use crate::layout::{BarLayout, LayoutColors, LayoutParams};
use crate::range::{BarRange, Quantization, position_to_value};
use crate::transition::{Duration, Instant, Transition, TransitionController};

/// Observer of user selections: `(value, max, min, bar)`.
pub type SelectionCallback = Box<dyn FnMut(f64, f64, f64, &SuperBar)>;

/// Current values of a bar. Both always lie inside the bar's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarState {
    pub value: f64,
    pub overlay_value: f64,
}

/// A horizontal value bar with a draggable knob and an overlay marker.
///
/// The bar does not draw. Hosts feed it touch events and frame ticks, poll
/// [`SuperBar::take_redraw_request`], and paint [`SuperBar::layout`].
pub struct SuperBar {
    config: SuperBarConfig,
    state: BarState,
    bar_color: Box<dyn ColorFormatter>,
    overlay_color: Box<dyn ColorFormatter>,
    gesture_detector: Option<Box<dyn GestureDetector>>,
    on_selection_moved: Option<SelectionCallback>,
    on_selection_changed: Option<SelectionCallback>,
    transition: TransitionController,
    phase: GesturePhase,
    redraw_requested: bool,
}

impl fmt::Debug for SuperBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperBar")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("transition", &self.transition)
            .field("phase", &self.phase)
            .field("redraw_requested", &self.redraw_requested)
            .finish_non_exhaustive()
    }
}

impl Default for SuperBar {
    fn default() -> Self {
        Self::new(SuperBarConfig::default())
    }
}

impl SuperBar {
    /// Create a bar from a configuration. Initial values are clamped.
    pub fn new(config: SuperBarConfig) -> Self {
        let range = config.bar_range;
        Self {
            state: BarState {
                value: range.clamp(config.bar_value),
                overlay_value: range.clamp(config.overlay_value),
            },
            bar_color: Box::new(Solid(config.bar_color.into())),
            overlay_color: Box::new(Solid(config.overlay_color.into())),
            gesture_detector: None,
            on_selection_moved: None,
            on_selection_changed: None,
            transition: TransitionController::new(),
            phase: GesturePhase::Idle,
            redraw_requested: true,
            config,
        }
    }

    /// Load a bar from a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(Self::new(SuperBarConfig::from_json(json)?))
    }

    /// Snapshot of the configuration, with the current values.
    pub fn to_config(&self) -> SuperBarConfig {
        SuperBarConfig {
            bar_value: self.state.value,
            overlay_value: self.state.overlay_value,
            ..self.config.clone()
        }
    }

    pub fn state(&self) -> BarState {
        self.state
    }

    pub fn value(&self) -> f64 {
        self.state.value
    }

    pub fn overlay_value(&self) -> f64 {
        self.state.overlay_value
    }

    pub fn range(&self) -> BarRange {
        self.config.bar_range
    }

    pub fn min(&self) -> f64 {
        self.config.bar_range.min()
    }

    pub fn max(&self) -> f64 {
        self.config.bar_range.max()
    }

    pub fn interval(&self) -> Quantization {
        self.config.bar_interval
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_touch_enabled(&self) -> bool {
        self.config.touch_enabled
    }

    // --- Redraw signalling ---

    fn invalidate(&mut self) {
        self.redraw_requested = true;
    }

    /// Check if state changed since the last [`SuperBar::take_redraw_request`].
    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Consume the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    // --- Values ---

    /// Set the value immediately, cancelling any running transition.
    pub fn set_value(&mut self, value: f64) {
        self.transition.cancel();
        self.state.value = self.config.bar_range.clamp(value);
        self.invalidate();
    }

    /// Set the value, animating over `duration` when one is given.
    ///
    /// `from` defaults to the current value. Both ends are clamped into the
    /// range independently.
    pub fn set_value_with(&mut self, value: f64, from: Option<f64>, duration: Option<Duration>) {
        match duration {
            None => self.set_value(value),
            Some(duration) => self.animate_value(value, from, duration, Instant::now()),
        }
    }

    /// Start a transition to `value` at `now`, superseding any running one.
    pub fn animate_value(&mut self, value: f64, from: Option<f64>, duration: Duration, now: Instant) {
        let range = self.config.bar_range;
        let from = range.clamp(from.unwrap_or(self.state.value));
        let to = range.clamp(value);
        self.transition.start(Transition::new(from, to, duration), now);
        self.state.value = from;
        self.invalidate();
    }

    /// Check if a transition is running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_active()
    }

    /// The running transition, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.current()
    }

    /// Advance the running transition to `now`.
    ///
    /// Returns `true` if the value was updated.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.transition.tick(now) {
            Some(value) => {
                self.state.value = self.config.bar_range.clamp(value);
                self.invalidate();
                true
            }
            None => false,
        }
    }

    /// Set the overlay marker, clamped into the range.
    pub fn set_overlay_value(&mut self, value: f64) {
        self.state.overlay_value = self.config.bar_range.clamp(value);
        self.invalidate();
    }

    // --- Configuration ---

    /// Change the bounds. Current values are clamped into the new range.
    pub fn set_range(&mut self, min: f64, max: f64) -> ConfigResult<()> {
        let range = BarRange::new(min, max)?;
        self.config.bar_range = range;
        self.state.value = range.clamp(self.state.value);
        self.state.overlay_value = range.clamp(self.state.overlay_value);
        log::debug!("Bar range set to {}..{}", min, max);
        self.invalidate();
        Ok(())
    }

    /// Change the snapping step; zero or less disables snapping.
    pub fn set_interval(&mut self, interval: f64) -> ConfigResult<()> {
        self.config.bar_interval = Quantization::new(interval)?;
        Ok(())
    }

    /// Use a solid fill color.
    pub fn set_color(&mut self, color: Color) {
        self.config.bar_color = HexColor::from(color);
        self.set_color_formatter(Solid(color));
    }

    /// Derive the fill color from the bar's state.
    pub fn set_color_formatter(&mut self, formatter: impl ColorFormatter + 'static) {
        self.bar_color = Box::new(formatter);
        self.invalidate();
    }

    /// Go back to the configured solid fill color.
    pub fn reset_color_formatter(&mut self) {
        self.set_color_formatter(Solid(self.config.bar_color.into()));
    }

    /// Use a solid overlay color.
    pub fn set_overlay_color(&mut self, color: Color) {
        self.config.overlay_color = HexColor::from(color);
        self.set_overlay_color_formatter(Solid(color));
    }

    /// Derive the overlay color from the overlay value.
    pub fn set_overlay_color_formatter(&mut self, formatter: impl ColorFormatter + 'static) {
        self.overlay_color = Box::new(formatter);
        self.invalidate();
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.config.background_color = color.into();
        self.invalidate();
    }

    pub fn set_control_color(&mut self, color: Color) {
        self.config.control_color = color.into();
        self.invalidate();
    }

    pub fn set_control_radius(&mut self, radius: f64) {
        self.config.control_radius = radius;
        self.invalidate();
    }

    pub fn set_control_shadow_radius(&mut self, radius: f64) {
        self.config.control_shadow_radius = radius;
        self.invalidate();
    }

    pub fn set_control_shadow_color(&mut self, color: Color) {
        self.config.control_shadow_color = color.into();
        self.invalidate();
    }

    pub fn set_bar_height(&mut self, height: f64) {
        self.config.bar_height = height;
        self.invalidate();
    }

    pub fn set_bar_margin(&mut self, margin: f64) {
        self.config.bar_margin = margin;
        self.invalidate();
    }

    /// Enable or disable touch handling. Disabled bars ignore all events.
    pub fn set_touch_enabled(&mut self, enabled: bool) {
        self.config.touch_enabled = enabled;
        if !enabled {
            self.phase = GesturePhase::Idle;
        }
    }

    /// Install a detector that sees every event first and may claim it.
    pub fn set_gesture_detector(&mut self, detector: impl GestureDetector + 'static) {
        self.gesture_detector = Some(Box::new(detector));
    }

    pub fn clear_gesture_detector(&mut self) {
        self.gesture_detector = None;
    }

    /// Called on every press and move with the new value.
    pub fn set_on_selection_moved(&mut self, callback: impl FnMut(f64, f64, f64, &SuperBar) + 'static) {
        self.on_selection_moved = Some(Box::new(callback));
    }

    /// Called when the finger is released, with the final value.
    pub fn set_on_selection_changed(
        &mut self,
        callback: impl FnMut(f64, f64, f64, &SuperBar) + 'static,
    ) {
        self.on_selection_changed = Some(Box::new(callback));
    }

    pub fn clear_selection_callbacks(&mut self) {
        self.on_selection_moved = None;
        self.on_selection_changed = None;
    }

    // --- Touch ---

    /// Handle a touch event on a view `width` pixels wide.
    pub fn handle_touch(&mut self, event: TouchEvent, width: f64) -> TouchResponse {
        if !self.config.touch_enabled {
            return TouchResponse::Ignored;
        }

        // A claimed event skips the value update but still moves the gesture along.
        if let Some(detector) = self.gesture_detector.as_mut() {
            if detector.on_touch_event(&event) {
                self.set_phase(self.phase.next(&event));
                return TouchResponse::Consumed;
            }
        }

        let Some(x) = event.x() else {
            self.set_phase(GesturePhase::Idle);
            return TouchResponse::Consumed;
        };

        if width <= 0.0 || width.is_nan() {
            log::warn!("Ignoring touch on a bar with width {}", width);
            return TouchResponse::Ignored;
        }

        self.transition.cancel();
        self.state.value = position_to_value(
            x,
            width,
            &self.config.bar_range,
            &self.config.bar_interval,
        );
        self.invalidate();
        self.set_phase(self.phase.next(&event));

        match event {
            TouchEvent::Up { .. } => self.notify_selection_changed(),
            _ => self.notify_selection_moved(),
        }

        TouchResponse::Consumed
    }

    fn set_phase(&mut self, phase: GesturePhase) {
        if phase != self.phase {
            log::debug!("Gesture {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn notify_selection_moved(&mut self) {
        if let Some(mut callback) = self.on_selection_moved.take() {
            callback(self.state.value, self.max(), self.min(), self);
            self.on_selection_moved = Some(callback);
        }
    }

    fn notify_selection_changed(&mut self) {
        if let Some(mut callback) = self.on_selection_changed.take() {
            callback(self.state.value, self.max(), self.min(), self);
            self.on_selection_changed = Some(callback);
        }
    }

    // --- Geometry ---

    /// Lay out the bar for a view of `size`.
    pub fn layout(&self, size: Size) -> BarLayout {
        let config = &self.config;
        let range = config.bar_range;
        let params = LayoutParams {
            range,
            control_radius: config.effective_control_radius(size.height),
            shadow_radius: config.control_shadow_radius,
            bar_height: config.effective_bar_height(size.height),
            bar_margin: config.bar_margin,
        };
        let colors = LayoutColors {
            background: config.background_color.into(),
            bar: self.bar_color.color(self.state.value, range.max(), range.min()),
            overlay: self
                .overlay_color
                .color(self.state.overlay_value, range.max(), range.min()),
            control: config.control_color.into(),
            control_shadow: config.control_shadow_color.into(),
        };
        BarLayout::compute(size, &params, &colors, self.state.value, self.state.overlay_value)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::error::ConfigError;

    fn scenario_bar() -> SuperBar {
        let mut bar = SuperBar::default();
        bar.set_range(0.0, 100.0).unwrap();
        bar.set_interval(1.0).unwrap();
        bar
    }

    type Log = Rc<RefCell<Vec<(&'static str, f64)>>>;

    fn record(bar: &mut SuperBar) -> Log {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let moved = Rc::clone(&log);
        bar.set_on_selection_moved(move |value, _, _, _| moved.borrow_mut().push(("moved", value)));
        let changed = Rc::clone(&log);
        bar.set_on_selection_changed(move |value, _, _, _| {
            changed.borrow_mut().push(("changed", value))
        });
        log
    }

    #[test]
    fn test_new_clamps_initial_values() {
        let config = SuperBarConfig {
            bar_value: 500.0,
            overlay_value: -3.0,
            ..SuperBarConfig::default()
        };
        let bar = SuperBar::new(config);
        assert!((bar.value() - 100.0).abs() < f64::EPSILON);
        assert!(bar.overlay_value().abs() < f64::EPSILON);
    }

    #[test]
    fn test_touch_scenario() {
        let mut bar = scenario_bar();
        bar.handle_touch(TouchEvent::Down { x: 50.0 }, 200.0);
        assert!((bar.value() - 25.0).abs() < f64::EPSILON);
        bar.handle_touch(TouchEvent::Move { x: 0.0 }, 200.0);
        assert!(bar.value().abs() < f64::EPSILON);
        bar.handle_touch(TouchEvent::Up { x: 250.0 }, 200.0);
        assert!((bar.value() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_callbacks_per_phase() {
        let mut bar = scenario_bar();
        let log = record(&mut bar);

        bar.handle_touch(TouchEvent::Down { x: 20.0 }, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Pressed);
        bar.handle_touch(TouchEvent::Move { x: 40.0 }, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Dragging);
        bar.handle_touch(TouchEvent::Up { x: 60.0 }, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Idle);

        assert_eq!(
            *log.borrow(),
            vec![("moved", 10.0), ("moved", 20.0), ("changed", 30.0)]
        );
    }

    #[test]
    fn test_callback_receives_bounds_and_bar() {
        let mut bar = scenario_bar();
        bar.set_range(-10.0, 10.0).unwrap();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        bar.set_on_selection_changed(move |value, max, min, bar| {
            *sink.borrow_mut() = Some((value, max, min, bar.value()));
        });
        bar.handle_touch(TouchEvent::Up { x: 100.0 }, 200.0);
        assert_eq!(*seen.borrow(), Some((0.0, 10.0, -10.0, 0.0)));
    }

    #[test]
    fn test_touch_disabled_is_ignored() {
        let mut bar = scenario_bar();
        let log = record(&mut bar);
        bar.set_value(40.0);
        bar.set_touch_enabled(false);
        let response = bar.handle_touch(TouchEvent::Down { x: 0.0 }, 200.0);
        assert_eq!(response, TouchResponse::Ignored);
        assert!((bar.value() - 40.0).abs() < f64::EPSILON);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_gesture_detector_claims_event() {
        let mut bar = scenario_bar();
        let log = record(&mut bar);
        bar.set_value(40.0);
        bar.set_gesture_detector(|event: &TouchEvent| matches!(event, TouchEvent::Down { .. }));

        let response = bar.handle_touch(TouchEvent::Down { x: 0.0 }, 200.0);
        assert!(response.is_consumed());
        assert!((bar.value() - 40.0).abs() < f64::EPSILON);
        assert!(log.borrow().is_empty());
        assert_eq!(bar.phase(), GesturePhase::Pressed);

        bar.handle_touch(TouchEvent::Move { x: 200.0 }, 200.0);
        assert!((bar.value() - 100.0).abs() < f64::EPSILON);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_claimed_events_still_track_gesture() {
        let mut bar = scenario_bar();
        bar.set_gesture_detector(|_: &TouchEvent| true);

        bar.handle_touch(TouchEvent::Down { x: 20.0 }, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Pressed);
        bar.handle_touch(TouchEvent::Move { x: 60.0 }, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Dragging);
        bar.handle_touch(TouchEvent::Up { x: 60.0 }, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Idle);
        bar.handle_touch(TouchEvent::Down { x: 20.0 }, 200.0);
        bar.handle_touch(TouchEvent::Cancel, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_zero_width_touch_is_ignored() {
        let mut bar = scenario_bar();
        bar.set_value(40.0);
        let response = bar.handle_touch(TouchEvent::Move { x: 10.0 }, 0.0);
        assert_eq!(response, TouchResponse::Ignored);
        assert!((bar.value() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancel_fires_nothing() {
        let mut bar = scenario_bar();
        let log = record(&mut bar);
        bar.handle_touch(TouchEvent::Down { x: 20.0 }, 200.0);
        bar.handle_touch(TouchEvent::Cancel, 200.0);
        assert_eq!(bar.phase(), GesturePhase::Idle);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_set_value_without_duration() {
        let mut bar = scenario_bar();
        let log = record(&mut bar);
        bar.take_redraw_request();
        bar.set_value_with(90.0, Some(0.0), None);
        assert!((bar.value() - 90.0).abs() < f64::EPSILON);
        assert!(!bar.is_animating());
        assert!(bar.take_redraw_request());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_animate_clamps_both_ends() {
        let mut bar = scenario_bar();
        bar.animate_value(150.0, Some(-20.0), Duration::from_millis(100), Instant::now());
        let transition = bar.transition().unwrap();
        assert!((transition.to() - 100.0).abs() < f64::EPSILON);
        assert!(transition.from().abs() < f64::EPSILON);
        assert!(bar.value().abs() < f64::EPSILON);
    }

    #[test]
    fn test_superseded_transition_never_completes() {
        let mut bar = scenario_bar();
        let start = Instant::now();
        bar.animate_value(100.0, Some(0.0), Duration::from_millis(1000), start);
        bar.animate_value(0.0, Some(100.0), Duration::from_millis(500), start);

        let mut seen_hundred_after_start = false;
        for ms in (16..=1600).step_by(16) {
            bar.tick(start + Duration::from_millis(ms));
            if (bar.value() - 100.0).abs() < f64::EPSILON {
                seen_hundred_after_start = true;
            }
        }
        assert!(!seen_hundred_after_start);
        assert!(bar.value().abs() < f64::EPSILON);
        assert!(!bar.is_animating());
    }

    #[test]
    fn test_touch_cancels_transition() {
        let mut bar = scenario_bar();
        let start = Instant::now();
        bar.animate_value(100.0, Some(0.0), Duration::from_millis(1000), start);
        bar.handle_touch(TouchEvent::Down { x: 100.0 }, 200.0);
        assert!(!bar.is_animating());
        assert!(!bar.tick(start + Duration::from_millis(2000)));
        assert!((bar.value() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_range_rejects_and_reclamps() {
        let mut bar = scenario_bar();
        bar.set_value(80.0);
        bar.set_overlay_value(90.0);
        assert!(matches!(
            bar.set_range(10.0, 10.0),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!((bar.max() - 100.0).abs() < f64::EPSILON);

        bar.set_range(0.0, 50.0).unwrap();
        assert!((bar.value() - 50.0).abs() < f64::EPSILON);
        assert!((bar.overlay_value() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlay_clamped() {
        let mut bar = scenario_bar();
        bar.set_overlay_value(-1.0);
        assert!(bar.overlay_value().abs() < f64::EPSILON);
    }

    #[test]
    fn test_color_formatter_drives_layout() {
        let mut bar = scenario_bar();
        bar.set_color_formatter(|value: f64, max: f64, _min: f64| {
            if value >= max / 2.0 {
                Color::from_rgba8(255, 0, 0, 255)
            } else {
                Color::from_rgba8(0, 0, 255, 255)
            }
        });
        bar.set_value(75.0);
        let layout = bar.layout(Size::new(240.0, 40.0));
        assert_eq!(layout.fill.color.to_rgba8().r, 255);

        bar.reset_color_formatter();
        let layout = bar.layout(Size::new(240.0, 40.0));
        assert_eq!(HexColor::from(layout.fill.color), bar.to_config().bar_color);
    }

    #[test]
    fn test_layout_uses_effective_radius() {
        let mut bar = scenario_bar();
        bar.set_value(50.0);
        let layout = bar.layout(Size::new(240.0, 40.0));
        // Radius falls back to half the height: track 200, knob at 20 + 100.
        assert!((layout.control_center().x - 120.0).abs() < f64::EPSILON);

        bar.set_control_radius(10.0);
        let layout = bar.layout(Size::new(240.0, 40.0));
        assert!((layout.control_center().x - 120.0).abs() < f64::EPSILON);
        assert!((layout.background.rect.x0 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_config_carries_current_values() {
        let mut bar = scenario_bar();
        bar.set_value(33.0);
        bar.set_overlay_value(66.0);
        let config = bar.to_config();
        assert!((config.bar_value - 33.0).abs() < f64::EPSILON);
        assert!((config.overlay_value - 66.0).abs() < f64::EPSILON);
    }
}
