//! Translation between logical [`LightState`] and [`PhysicalLightState`].
//!
//! [`reconcile`] decides which hardware fields actually need writing to move
//! a light from its last known physical state to a desired logical state, so
//! that unchanged lights cost no network round trip and firmware that
//! flickers on redundant writes is left alone. [`project`] is the read-side
//! mirror.

use log::trace;

use crate::payload::LightStateUpdate;
use crate::status::PhysicalLightState;
use crate::types::{Color, ColorMode, LightState};

/// Top of the device brightness and saturation scales.
pub const BYTE_SCALE: f64 = 254.0;

/// Number of hue steps covering a full turn of the color wheel.
pub const HUE_SCALE: f64 = 65536.0;

/// Color temperature differences up to this many mireds are not written
/// while the light is already in color-temperature mode.
pub const MIRED_HYSTERESIS: i32 = 75;

/// Compute the write needed to bring `physical` to `desired`.
///
/// Returns `None` when the light already shows the desired state.
///
/// Powering off only ever sends the off flag, and a light that is already
/// off needs no write at all. This holds even when the light reports a
/// running effect: effects are only cleared by writes that keep or turn the
/// light on, so the first power-on after that clears it.
///
/// # Examples
///
/// ```
/// use bridge_lights_rs::{Color, LightState, PhysicalLightState, reconcile};
///
/// let physical = PhysicalLightState::default();
/// let desired = LightState::new(true, 1.0, Color::from_hsv(0.0, 1.0, 1.0));
///
/// let update = reconcile(&desired, &physical).unwrap();
/// assert_eq!(update.on(), Some(true));
/// assert_eq!(update.brightness(), Some(254));
/// assert_eq!(update.hue(), Some(1));
/// assert_eq!(update.saturation(), Some(254));
/// ```
pub fn reconcile(desired: &LightState, physical: &PhysicalLightState) -> Option<LightStateUpdate> {
    if !desired.power {
        return physical.on.then(LightStateUpdate::power_off);
    }

    let mut update = LightStateUpdate::new();
    let mut changed = !physical.on;
    update.set_power(true);

    let bri = encode_byte(desired.brightness);
    changed |= bri != physical.bri;
    update.set_brightness(bri);

    let color = &desired.color;
    if color.is_temperature() {
        let mired = kelvin_to_mired(color.kelvin());
        let diff = i32::from(mired) - i32::from(physical.ct);
        if physical.color_mode != ColorMode::Ct || diff.abs() > MIRED_HYSTERESIS {
            changed = true;
            update.set_color_temperature(mired);
        } else {
            trace!("skipping ct {mired}, within {diff} mireds of {}", physical.ct);
        }
    } else {
        let (h, s, _) = color.hsv();
        let hue = encode_hue(h);
        let sat = encode_byte(s).max(1);

        // Switching into hue/saturation mode always resends both fields.
        changed |= physical.color_mode != ColorMode::Hs || hue != physical.hue || sat != physical.sat;
        update.set_hue_saturation(hue, sat);
    }

    if physical.has_effect() {
        changed = true;
        update.clear_effect();
    }

    changed.then_some(update)
}

/// Project a physical snapshot onto a logical [`LightState`].
///
/// Lights in color-temperature mode yield a temperature color; every other
/// mode is read back through hue, saturation and brightness.
pub fn project(physical: &PhysicalLightState) -> LightState {
    let brightness = f64::from(physical.bri) / BYTE_SCALE;

    let color = match physical.color_mode {
        ColorMode::Ct if physical.ct > 0 => Color::from_kelvin(mired_to_kelvin(physical.ct)),
        _ => Color::from_hsv(
            f64::from(physical.hue) * 360.0 / HUE_SCALE,
            f64::from(physical.sat) / BYTE_SCALE,
            brightness,
        ),
    };

    LightState {
        power: physical.on,
        brightness,
        color,
    }
}

/// `1,000,000 / kelvin`, saturating at `u16::MAX` for tiny temperatures.
pub fn kelvin_to_mired(kelvin: u32) -> u16 {
    u16::try_from(1_000_000 / kelvin.max(1)).unwrap_or(u16::MAX)
}

pub fn mired_to_kelvin(mired: u16) -> u32 {
    1_000_000 / u32::from(mired.max(1))
}

fn encode_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * BYTE_SCALE).round() as u8
}

/// Hue 0 is reserved by the firmware, so it is sent as 1.
fn encode_hue(degrees: f64) -> u16 {
    let steps = (degrees.rem_euclid(360.0) * HUE_SCALE / 360.0).round();
    steps.clamp(1.0, f64::from(u16::MAX)) as u16
}
