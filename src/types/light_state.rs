//! Logical light state.

use serde::{Deserialize, Serialize};

use super::Color;

/// A full snapshot of what a light shows, independent of hardware encoding.
///
/// `brightness` is in `0.0..=1.0`.
///
/// # Examples
///
/// ```
/// use bridge_lights_rs::{Color, LightState};
///
/// let state = LightState::new(true, 0.5, Color::from_kelvin(2700));
/// assert!(state.power);
/// assert_eq!(state.color.kelvin(), 2700);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    pub power: bool,
    pub brightness: f64,
    pub color: Color,
}

impl LightState {
    pub fn new(power: bool, brightness: f64, color: Color) -> Self {
        LightState {
            power,
            brightness: brightness.clamp(0.0, 1.0),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip_uses_hex_color() {
        let state = LightState::new(true, 1.0, Color::rgb8(255, 0, 0));
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["color"], "ff0000");
        assert_eq!(json["power"], true);

        let back: LightState = serde_json::from_value(json).unwrap();
        assert_eq!(back.color.hex(), "ff0000");
        assert_eq!(back.brightness, 1.0);
    }

    #[test]
    fn test_brightness_is_clamped() {
        assert_eq!(LightState::new(true, 1.5, Color::default()).brightness, 1.0);
        assert_eq!(LightState::new(true, -0.5, Color::default()).brightness, 0.0);
    }
}
