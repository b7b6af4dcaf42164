//! Value types for colors, light state and button events.

mod button;
mod color;
mod color_mode;
mod kelvin;
mod light_state;

pub use button::{ButtonEvent, ButtonEventKind};
pub use color::Color;
pub use color_mode::ColorMode;
pub use kelvin::{KELVIN_MAX, KELVIN_MIN};
pub use light_state::LightState;
