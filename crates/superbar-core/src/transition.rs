//! Timed value transitions driven by the host's frame clock.
//!
//! Nothing here sleeps or spawns. The host calls
//! [`TransitionController::tick`] once per frame with the frame's instant and
//! gets back the interpolated value to store.

use std::f64::consts::PI;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, Instant};
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, Instant};

/// Accelerate-decelerate timing curve: slow start, fast middle, slow end.
///
/// Maps linear progress `t` in `0.0..=1.0` to eased progress in the same
/// interval.
pub fn accelerate_decelerate(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// A single interpolation from one value to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    duration: Duration,
}

impl Transition {
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress after `elapsed`, in `0.0..=1.0`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Interpolated value after `elapsed`.
    pub fn value_at(&self, elapsed: Duration) -> f64 {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * accelerate_decelerate(progress)
    }

    /// Check if the transition has reached its end after `elapsed`.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// Sample the transition every `step`, ending exactly on the target.
    ///
    /// The iterator is lazy and can be recreated at any time; a zero `step`
    /// yields only the final value.
    pub fn samples(&self, step: Duration) -> Samples {
        Samples {
            transition: *self,
            step,
            elapsed: Duration::ZERO,
            done: false,
        }
    }
}

/// Iterator over the values of a [`Transition`] at fixed time steps.
#[derive(Debug, Clone)]
pub struct Samples {
    transition: Transition,
    step: Duration,
    elapsed: Duration,
    done: bool,
}

impl Iterator for Samples {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        if self.step.is_zero() || self.transition.is_finished(self.elapsed) {
            self.done = true;
            return Some(self.transition.to);
        }
        let value = self.transition.value_at(self.elapsed);
        self.elapsed += self.step;
        Some(value)
    }
}

/// A transition together with the instant it started.
#[derive(Debug, Clone, Copy)]
struct Running {
    transition: Transition,
    started: Instant,
}

/// Runs at most one transition at a time.
///
/// Starting a new transition discards the running one without notice.
#[derive(Debug, Clone, Default)]
pub struct TransitionController {
    running: Option<Running>,
}

impl TransitionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `transition` at `now`, superseding any running one.
    pub fn start(&mut self, transition: Transition, now: Instant) {
        if let Some(previous) = self.running.take() {
            log::debug!(
                "Transition {} -> {} superseded",
                previous.transition.from,
                previous.transition.to
            );
        }
        log::debug!(
            "Transition {} -> {} over {:?}",
            transition.from,
            transition.to,
            transition.duration
        );
        self.running = Some(Running {
            transition,
            started: now,
        });
    }

    /// Drop the running transition, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.running.take() {
            log::debug!(
                "Transition {} -> {} cancelled",
                previous.transition.from,
                previous.transition.to
            );
        }
    }

    /// Check if a transition is running.
    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    /// The running transition, if any.
    pub fn current(&self) -> Option<&Transition> {
        self.running.as_ref().map(|r| &r.transition)
    }

    /// Advance to `now` and return the value to display.
    ///
    /// Returns `None` when idle. The tick that reaches the end returns the
    /// target value and leaves the controller idle.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let running = self.running?;
        let elapsed = now.saturating_duration_since(running.started);
        let value = running.transition.value_at(elapsed);
        if running.transition.is_finished(elapsed) {
            log::debug!("Transition reached {}", running.transition.to);
            self.running = None;
        } else {
            log::trace!("Transition tick: {}", value);
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_endpoints_and_midpoint() {
        assert!(accelerate_decelerate(0.0).abs() < 1e-12);
        assert!((accelerate_decelerate(1.0) - 1.0).abs() < 1e-12);
        assert!((accelerate_decelerate(0.5) - 0.5).abs() < 1e-12);
        // Slow start.
        assert!(accelerate_decelerate(0.1) < 0.1);
        // Slow end.
        assert!(accelerate_decelerate(0.9) > 0.9);
    }

    #[test]
    fn test_value_at() {
        let t = Transition::new(0.0, 100.0, Duration::from_millis(1000));
        assert!(t.value_at(Duration::ZERO).abs() < 1e-12);
        assert!((t.value_at(Duration::from_millis(500)) - 50.0).abs() < 1e-9);
        assert!((t.value_at(Duration::from_millis(1000)) - 100.0).abs() < f64::EPSILON);
        assert!((t.value_at(Duration::from_millis(5000)) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_samples_end_on_target() {
        let t = Transition::new(100.0, 0.0, Duration::from_millis(100));
        let values: Vec<f64> = t.samples(Duration::from_millis(10)).collect();
        assert_eq!(values.len(), 11);
        assert!((values[0] - 100.0).abs() < 1e-12);
        assert!(values.last().unwrap().abs() < f64::EPSILON);
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_samples_restartable() {
        let t = Transition::new(0.0, 10.0, Duration::from_millis(50));
        let first: Vec<f64> = t.samples(Duration::from_millis(10)).collect();
        let second: Vec<f64> = t.samples(Duration::from_millis(10)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let mut controller = TransitionController::new();
        let start = Instant::now();
        controller.start(Transition::new(0.0, 42.0, Duration::ZERO), start);
        assert_eq!(controller.tick(start), Some(42.0));
        assert!(!controller.is_active());
        assert_eq!(controller.tick(start), None);
    }

    #[test]
    fn test_tick_progression() {
        let mut controller = TransitionController::new();
        let start = Instant::now();
        controller.start(Transition::new(0.0, 100.0, Duration::from_millis(1000)), start);

        let mid = controller.tick(start + Duration::from_millis(500)).unwrap();
        assert!((mid - 50.0).abs() < 1e-9);
        assert!(controller.is_active());

        let end = controller.tick(start + Duration::from_millis(1200)).unwrap();
        assert!((end - 100.0).abs() < f64::EPSILON);
        assert!(!controller.is_active());
    }

    #[test]
    fn test_new_transition_supersedes() {
        let mut controller = TransitionController::new();
        let start = Instant::now();
        controller.start(Transition::new(0.0, 100.0, Duration::from_millis(1000)), start);
        controller.start(Transition::new(100.0, 0.0, Duration::from_millis(500)), start);

        let mut last = None;
        for ms in (0..=1500).step_by(16) {
            if let Some(value) = controller.tick(start + Duration::from_millis(ms)) {
                last = Some(value);
            }
        }
        assert_eq!(last, Some(0.0));
        assert!(!controller.is_active());
    }

    #[test]
    fn test_cancel() {
        let mut controller = TransitionController::new();
        let start = Instant::now();
        controller.start(Transition::new(0.0, 1.0, Duration::from_millis(10)), start);
        controller.cancel();
        assert!(controller.current().is_none());
        assert_eq!(controller.tick(start + Duration::from_millis(20)), None);
    }
}
