use thiserror::Error;
use crate::bus::PortHandle;

/// Boxed error handed up unchanged from a transport implementation
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by vision sensor operations
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Object query id must be positive, got {0}")]
    InvalidObjectId(i16),

    #[error("Signature id must be in 1..=7, got {0}")]
    InvalidSignatureId(u8),

    #[error("I2C transport failed on {port}: {source}")]
    Transport {
        port: PortHandle,
        #[source]
        source: TransportError,
    },

    #[error("Register {register:#04x} returned unexpected value {value:#04x}")]
    InvalidResponse { register: u8, value: u8 },
}

impl VisionError {
    /// True for argument errors that were caught before any bus access
    pub fn is_rejection(&self) -> bool {
        matches!(self, VisionError::InvalidObjectId(_) | VisionError::InvalidSignatureId(_))
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type aliases for convenience
pub type VisionResult<T> = Result<T, VisionError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
