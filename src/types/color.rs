//! RGB color with HSV, hex and color temperature conversions.

use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use super::kelvin::{clamp_kelvin, kelvin_to_rgb};
use crate::errors::ColorError;

/// A color with red, green and blue channels in `0.0..=1.0`.
///
/// When the color was last set from a temperature, [`Color::kelvin`] returns
/// that temperature; any RGB or HSV mutation resets it to 0. Lights use this
/// to pick color-temperature mode over hue/saturation mode.
///
/// Colors serialize as a lowercase 6-digit hex string and deserialize from
/// anything [`Color::from_str`] accepts.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bridge_lights_rs::Color;
///
/// assert_eq!(Color::from_str("rgb(255, 255, 0)").unwrap().hex(), "ffff00");
/// assert_eq!(Color::from_str("hsv(344,0.221,0.871)").unwrap().hex(), "deadba");
/// assert_eq!(Color::from_str("6000k").unwrap().hex(), "fff3ef");
/// assert_eq!(Color::from_str("abc").unwrap().hex(), "aabbcc");
/// assert!(Color::from_str("rgb(256, 0, 0)").is_err());
/// ```
#[derive(Default, Debug, Clone, Copy, PartialEq, SerializeDisplay, DeserializeFromStr)]
pub struct Color {
    pub(crate) red: f64,
    pub(crate) green: f64,
    pub(crate) blue: f64,
    pub(crate) kelvin: u32,
}

impl Color {
    /// Create a color from channels in `0.0..=1.0`. Values outside are clamped.
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        let mut color = Self::default();
        color.set_rgb(red, green, blue);
        color
    }

    /// Create a color from 8-bit channels.
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Create a color from hue in degrees and saturation/value in `0.0..=1.0`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let mut color = Self::default();
        color.set_hsv(hue, saturation, value);
        color
    }

    /// Create a color from a temperature, clamped to 1000K..=12000K.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridge_lights_rs::Color;
    ///
    /// assert_eq!(Color::from_kelvin(500), Color::from_kelvin(1000));
    /// assert_eq!(Color::from_kelvin(20000).kelvin(), 12000);
    /// ```
    pub fn from_kelvin(kelvin: u32) -> Self {
        let mut color = Self::default();
        color.set_kelvin(i64::from(kelvin));
        color
    }

    /// Red channel in `0.0..=1.0`.
    pub fn red(&self) -> f64 {
        self.red
    }

    /// Green channel in `0.0..=1.0`.
    pub fn green(&self) -> f64 {
        self.green
    }

    /// Blue channel in `0.0..=1.0`.
    pub fn blue(&self) -> f64 {
        self.blue
    }

    /// The temperature this color was set from, or 0 if it was set as RGB/HSV.
    pub fn kelvin(&self) -> u32 {
        self.kelvin
    }

    /// Whether the color was last set from a temperature.
    pub fn is_temperature(&self) -> bool {
        self.kelvin != 0
    }

    /// Set the channels, clamped to `0.0..=1.0`. Clears the temperature.
    pub fn set_rgb(&mut self, red: f64, green: f64, blue: f64) {
        self.red = red.clamp(0.0, 1.0);
        self.green = green.clamp(0.0, 1.0);
        self.blue = blue.clamp(0.0, 1.0);
        self.kelvin = 0;
    }

    /// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
    pub fn hsv(&self) -> (f64, f64, f64) {
        let (r, g, b) = (self.red, self.green, self.blue);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max > 0.0 { delta / max } else { 0.0 };
        if delta == 0.0 {
            return (0.0, saturation, max);
        }

        let mut hue = 60.0
            * if max == r {
                ((g - b) / delta) % 6.0
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };
        if hue < 0.0 {
            hue += 360.0;
        }

        (hue, saturation, max)
    }

    /// Set from hue in degrees and saturation/value in `0.0..=1.0`.
    /// Clears the temperature.
    pub fn set_hsv(&mut self, hue: f64, saturation: f64, value: f64) {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);

        let i = h.floor();
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match i as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        self.set_rgb(r, g, b);
    }

    /// Keep hue and saturation, raise the value to full.
    pub fn full_bright(&mut self) {
        let (h, s, _) = self.hsv();
        self.set_hsv(h, s, 1.0);
    }

    /// Set from a temperature; values outside 1000K..=12000K are clamped.
    pub fn set_kelvin(&mut self, kelvin: i64) {
        let kelvin = clamp_kelvin(kelvin);
        let [r, g, b] = kelvin_to_rgb(kelvin);

        self.red = f64::from(r) / 255.0;
        self.green = f64::from(g) / 255.0;
        self.blue = f64::from(b) / 255.0;
        self.kelvin = kelvin;
    }

    /// The 8-bit channels, rounded.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }

    /// Lowercase 6-digit hex without a leading `#`.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("{r:02x}{g:02x}{b:02x}")
    }

    /// Set from `rrggbb` or `rgb`, with or without a leading `#`.
    pub fn set_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.is_empty() {
            return Err(ColorError::Empty);
        }

        // abc -> aabbcc
        let expanded: String;
        let hex = if hex.chars().count() == 3 {
            expanded = hex.chars().flat_map(|c| [c, c]).collect();
            expanded.as_str()
        } else {
            hex
        };

        let bytes = decode_hex(hex)?;
        let [r, g, b] = <[u8; 3]>::try_from(bytes.as_slice())
            .map_err(|_| ColorError::ByteCount(bytes.len()))?;

        *self = Self::rgb8(r, g, b);
        Ok(())
    }

    /// Set from any supported textual form:
    ///
    /// - `rgb(r, g, b)` with channels in `0..=255`
    /// - `hsv(h, s, v)` with hue in `[0, 360)` and saturation/value in `[0, 1]`
    /// - `<n>k` or `<n>K` for a temperature in Kelvin
    /// - `#rrggbb`, `rrggbb`, `#rgb` or `rgb` hex
    ///
    /// On error the color is left unchanged.
    pub fn set_from_str(&mut self, s: &str) -> Result<(), ColorError> {
        let s = s.trim();

        if let Some((func, args)) = parse_function(s) {
            let [a, b, c] = parse_arguments(func, args)?;
            match func {
                "rgb" => {
                    check_range("red", a, 0.0..=255.0, "0..255")?;
                    check_range("green", b, 0.0..=255.0, "0..255")?;
                    check_range("blue", c, 0.0..=255.0, "0..255")?;
                    self.set_rgb(a / 255.0, b / 255.0, c / 255.0);
                }
                _ => {
                    if !(0.0..360.0).contains(&a) {
                        return Err(ColorError::OutOfRange {
                            field: "hue",
                            value: a,
                            range: "0..360",
                        });
                    }
                    check_range("sat", b, 0.0..=1.0, "0..1")?;
                    check_range("value", c, 0.0..=1.0, "0..1")?;
                    self.set_hsv(a, b, c);
                }
            }
            return Ok(());
        }

        if let Some(digits) = s.strip_suffix(|c| c == 'k' || c == 'K') {
            let kelvin: i64 = digits
                .trim()
                .parse()
                .map_err(|_| ColorError::Number(digits.to_string()))?;
            self.set_kelvin(kelvin);
            return Ok(());
        }

        self.set_hex(s)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, ColorError> {
        let mut color = Color::default();
        color.set_from_str(s)?;
        Ok(color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

fn channel_to_u8(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Split `rgb(...)`/`hsv(...)` into the function name and the raw argument list.
fn parse_function(s: &str) -> Option<(&'static str, &str)> {
    let inner = s.strip_suffix(')')?;
    if let Some(args) = inner.strip_prefix("rgb(") {
        Some(("rgb", args))
    } else {
        inner.strip_prefix("hsv(").map(|args| ("hsv", args))
    }
}

fn parse_arguments(func: &'static str, args: &str) -> Result<[f64; 3], ColorError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ColorError::ArgumentCount {
            func,
            got: parts.len(),
        });
    }

    let mut values = [0.0; 3];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part
            .parse()
            .map_err(|_| ColorError::Number(part.to_string()))?;
    }
    Ok(values)
}

fn check_range(
    field: &'static str,
    value: f64,
    allowed: std::ops::RangeInclusive<f64>,
    range: &'static str,
) -> Result<(), ColorError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ColorError::OutOfRange { field, value, range })
    }
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, ColorError> {
    let invalid = || ColorError::Hex(hex.to_string());
    if !hex.is_ascii() || hex.len() % 2 != 0 {
        return Err(invalid());
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid()))
        .collect()
}
