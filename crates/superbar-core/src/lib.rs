//! SuperBar Core Library
//!
//! Renderer-agnostic logic for a horizontal value bar: mapping pointer
//! positions to quantized values, laying out the bar's layers, and running
//! timed value transitions. Hosts adapt it to their own draw and event APIs.

pub mod bar;
pub mod color;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod range;
pub mod transition;

pub use bar::{BarState, SelectionCallback, SuperBar};
pub use color::{ColorFormatter, HexColor, Solid};
pub use config::SuperBarConfig;
pub use error::{ConfigError, ConfigResult};
pub use input::{GestureDetector, GesturePhase, TouchEvent, TouchResponse};
pub use layout::{BarLayout, Control, LayoutColors, LayoutParams, Segment, track_length};
pub use range::{BarRange, Quantization, position_to_value, value_to_fill_length};
pub use transition::{Duration, Instant, Transition, TransitionController, accelerate_decelerate};
