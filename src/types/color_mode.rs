//! Hardware color modes.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The encoding a light is currently rendering its color from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorMode {
    /// Hue and saturation.
    #[default]
    Hs,
    /// CIE xy chromaticity.
    Xy,
    /// Color temperature in mireds.
    Ct,
}
