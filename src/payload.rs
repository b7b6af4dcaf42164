//! Partial light state writes.

use serde::{Deserialize, Serialize};

use crate::status::EFFECT_NONE;

/// A partial write to send to a light, in device-native units.
///
/// Only the fields that are set are sent; the serialized form uses the
/// bridge field names (`on`, `bri`, `hue`, `sat`, `ct`, `effect`).
///
/// # Examples
///
/// ```
/// use bridge_lights_rs::LightStateUpdate;
///
/// let update = LightStateUpdate::power_off();
/// assert!(update.is_valid());
/// assert_eq!(update.on(), Some(false));
/// assert_eq!(update.brightness(), None);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LightStateUpdate {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<u8>,
    pub(crate) hue: Option<u16>,
    pub(crate) sat: Option<u8>,
    pub(crate) ct: Option<u16>,
    pub(crate) effect: Option<String>,
}

impl LightStateUpdate {
    /// Create a new empty update.
    ///
    /// At least one field must be set for the update to be valid.
    pub fn new() -> Self {
        Self::default()
    }

    /// An update that only carries the off flag.
    pub fn power_off() -> Self {
        LightStateUpdate {
            on: Some(false),
            ..Self::default()
        }
    }

    /// Check if this update contains at least one field.
    pub fn is_valid(&self) -> bool {
        self.on.is_some()
            || self.bri.is_some()
            || self.hue.is_some()
            || self.sat.is_some()
            || self.ct.is_some()
            || self.effect.is_some()
    }

    /// Power flag, if it is written.
    pub fn on(&self) -> Option<bool> {
        self.on
    }

    /// Brightness on the `0..=254` scale.
    pub fn brightness(&self) -> Option<u8> {
        self.bri
    }

    /// Hue on the `0..=65535` scale.
    pub fn hue(&self) -> Option<u16> {
        self.hue
    }

    /// Saturation on the `0..=254` scale.
    pub fn saturation(&self) -> Option<u8> {
        self.sat
    }

    /// Color temperature in mireds.
    pub fn color_temperature(&self) -> Option<u16> {
        self.ct
    }

    /// Effect name, if it is written.
    pub fn effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }

    pub fn set_power(&mut self, on: bool) {
        self.on = Some(on);
    }

    pub fn set_brightness(&mut self, bri: u8) {
        self.bri = Some(bri);
    }

    pub fn set_hue_saturation(&mut self, hue: u16, sat: u8) {
        self.hue = Some(hue);
        self.sat = Some(sat);
    }

    pub fn set_color_temperature(&mut self, mired: u16) {
        self.ct = Some(mired);
    }

    /// Ask the light to stop any running effect.
    pub fn clear_effect(&mut self) {
        self.effect = Some(EFFECT_NONE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_empty_update_is_invalid() {
        assert!(!LightStateUpdate::new().is_valid());
        assert_eq!(serde_json::to_value(LightStateUpdate::new()).unwrap(), json!({}));
    }

    #[test]
    fn test_serializes_only_set_fields() {
        let mut update = LightStateUpdate::new();
        update.set_power(true);
        update.set_hue_saturation(1, 254);
        update.clear_effect();

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"on": true, "hue": 1, "sat": 254, "effect": "none"})
        );
    }

    #[test]
    fn test_power_off_carries_only_off_flag() {
        assert_eq!(
            serde_json::to_value(LightStateUpdate::power_off()).unwrap(),
            json!({"on": false})
        );
    }
}
