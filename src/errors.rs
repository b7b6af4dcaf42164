/// All error types that can occur when talking to a lighting bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or out-of-range input, such as an unparsable color string.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ColorError),

    /// The bridge client failed to reach or talk to the hardware.
    #[error("device {action} error: {source}")]
    DeviceIo {
        action: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to serialize data to JSON.
    ///
    /// For [`crate::BridgeClient`] implementations encoding a
    /// [`crate::LightStateUpdate`] into a request body.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to deserialize JSON data.
    ///
    /// For [`crate::BridgeClient`] implementations decoding bridge replies
    /// into [`crate::PhysicalLightState`], [`crate::LightInfo`] and the like.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// The bridge does not know a light with this ID.
    #[error("light not found: {0}")]
    LightNotFound(String),

    /// The bridge does not know a sensor with this ID.
    #[error("sensor not found: {0}")]
    SensorNotFound(String),

    /// No bridge with this ID is registered.
    #[error("bridge not found: {0}")]
    BridgeNotFound(String),

    /// The operation has no hardware equivalent for this device.
    #[error("operation not supported for this driver")]
    Unsupported,
}

impl Error {
    /// Create a new device I/O error
    pub fn device_io<E>(action: &str, err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::DeviceIo {
            action: action.to_string(),
            source: err.into(),
        }
    }

    /// Whether this is the [`Error::Unsupported`] sentinel rather than a
    /// transient failure.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported)
    }
}

/// Reasons a color string can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// The string was empty.
    #[error("empty color string")]
    Empty,

    /// `rgb(...)` or `hsv(...)` without exactly three arguments.
    #[error("expected 3 arguments in {func}(...), got {got}")]
    ArgumentCount { func: &'static str, got: usize },

    /// A numeric literal could not be parsed.
    #[error("invalid number: {0:?}")]
    Number(String),

    /// A channel, hue, saturation or value outside its range.
    #[error("invalid {field}: {value} ({range})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    /// A hex color that is not a valid hex string.
    #[error("invalid hex digits: {0:?}")]
    Hex(String),

    /// A hex color that did not decode to exactly 3 bytes.
    #[error("hex color must decode to 3 bytes, got {0}")]
    ByteCount(usize),
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
