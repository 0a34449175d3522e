//! Touch input model for a single horizontal bar.

use serde::{Deserialize, Serialize};

/// Pointer event along the bar's horizontal axis.
///
/// `x` is relative to the left edge of the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TouchEvent {
    Down { x: f64 },
    Move { x: f64 },
    Up { x: f64 },
    /// The gesture was taken away (e.g. by a scrolling parent).
    Cancel,
}

impl TouchEvent {
    /// Horizontal coordinate, if the event carries one.
    pub fn x(&self) -> Option<f64> {
        match self {
            TouchEvent::Down { x } | TouchEvent::Move { x } | TouchEvent::Up { x } => Some(*x),
            TouchEvent::Cancel => None,
        }
    }
}

/// Whether the bar handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchResponse {
    /// The event was used; the host should not process it further.
    Consumed,
    /// The bar did not handle the event; the host's default handling applies.
    Ignored,
}

impl TouchResponse {
    pub fn is_consumed(self) -> bool {
        self == TouchResponse::Consumed
    }
}

/// Phase of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Finger down, not moved yet.
    Pressed,
    Dragging,
}

impl GesturePhase {
    /// Phase after `event`.
    pub fn next(self, event: &TouchEvent) -> Self {
        match event {
            TouchEvent::Down { .. } => GesturePhase::Pressed,
            TouchEvent::Move { .. } => GesturePhase::Dragging,
            TouchEvent::Up { .. } | TouchEvent::Cancel => GesturePhase::Idle,
        }
    }

    /// Check if a finger is on the bar.
    pub fn is_active(self) -> bool {
        self != GesturePhase::Idle
    }
}

/// Custom gesture handling that runs before the bar's own.
///
/// Returning `true` claims the event; the bar then leaves its value and
/// callbacks untouched.
pub trait GestureDetector {
    fn on_touch_event(&mut self, event: &TouchEvent) -> bool;
}

impl<F> GestureDetector for F
where
    F: FnMut(&TouchEvent) -> bool,
{
    fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        self(event)
    }
}
