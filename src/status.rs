//! Physical light state in device-native units.

use serde::{Deserialize, Serialize};

use crate::payload::LightStateUpdate;
use crate::types::ColorMode;

/// Effect name reported by a light that is not running an effect.
pub const EFFECT_NONE: &str = "none";

/// The last known hardware state of a light.
///
/// Brightness and saturation are on a `0..=254` scale, hue on `0..=65535`
/// (covering 0-360°) and color temperature in mireds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PhysicalLightState {
    pub on: bool,
    pub bri: u8,
    pub hue: u16,
    pub sat: u8,
    pub ct: u16,
    #[serde(rename = "colormode")]
    pub color_mode: ColorMode,
    pub effect: String,
}

impl Default for PhysicalLightState {
    fn default() -> Self {
        PhysicalLightState {
            on: false,
            bri: 0,
            hue: 0,
            sat: 0,
            ct: 0,
            color_mode: ColorMode::Hs,
            effect: EFFECT_NONE.to_string(),
        }
    }
}

impl PhysicalLightState {
    /// Whether the light is running an effect.
    pub fn has_effect(&self) -> bool {
        self.effect != EFFECT_NONE
    }

    /// Fold a successfully written update into this snapshot.
    ///
    /// Writing hue/saturation switches the light into [`ColorMode::Hs`],
    /// writing a color temperature into [`ColorMode::Ct`].
    pub fn apply(&mut self, update: &LightStateUpdate) {
        if let Some(on) = update.on {
            self.on = on;
        }
        if let Some(bri) = update.bri {
            self.bri = bri;
        }
        if let Some(hue) = update.hue {
            self.hue = hue;
            self.color_mode = ColorMode::Hs;
        }
        if let Some(sat) = update.sat {
            self.sat = sat;
            self.color_mode = ColorMode::Hs;
        }
        if let Some(ct) = update.ct {
            self.ct = ct;
            self.color_mode = ColorMode::Ct;
        }
        if let Some(effect) = &update.effect {
            self.effect.clone_from(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_switches_mode() {
        let mut state = PhysicalLightState::default();

        let mut update = LightStateUpdate::new();
        update.set_color_temperature(250);
        state.apply(&update);
        assert_eq!(state.color_mode, ColorMode::Ct);
        assert_eq!(state.ct, 250);

        let mut update = LightStateUpdate::new();
        update.set_hue_saturation(100, 200);
        state.apply(&update);
        assert_eq!(state.color_mode, ColorMode::Hs);
        assert_eq!((state.hue, state.sat), (100, 200));
        assert_eq!(state.ct, 250);
    }

    #[test]
    fn test_apply_power_off_keeps_other_fields() {
        let mut state = PhysicalLightState {
            on: true,
            bri: 120,
            effect: "colorloop".to_string(),
            ..PhysicalLightState::default()
        };
        assert!(state.has_effect());

        state.apply(&LightStateUpdate::power_off());
        assert!(!state.on);
        assert_eq!(state.bri, 120);
        assert!(state.has_effect());
    }

    #[test]
    fn test_deserialize_bridge_shape() {
        let state: PhysicalLightState = serde_json::from_str(
            r#"{"on":true,"bri":254,"hue":8000,"sat":140,"ct":366,"colormode":"ct","effect":"none"}"#,
        )
        .unwrap();
        assert_eq!(state.color_mode, ColorMode::Ct);
        assert_eq!(state.ct, 366);
        assert!(!state.has_effect());
    }
}
