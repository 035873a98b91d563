//! Error types for encoding, compositing and logo handling.

use thiserror::Error;

/// Result type alias for compositor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The matrix provider could not turn the content into a QR symbol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Nothing to encode.
    #[error("content is empty")]
    EmptyContent,

    /// The content exceeds the capacity of the largest symbol at the requested level.
    #[error("content is too long for a QR symbol at the requested error correction level")]
    DataTooLong,

    /// Any other refusal from the encoder.
    #[error("content cannot be encoded: {0}")]
    Unsupported(String),
}

/// A single render was aborted. No partial image is produced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("resolution must be greater than zero, got {0}")]
    InvalidResolution(u32),

    #[error("resolution {requested}px exceeds the configured maximum of {max}px")]
    ResolutionTooLarge { requested: u32, max: u32 },

    /// The grid for this many entries would exceed the configured canvas limit.
    #[error("a batch of {entries} entries does not fit within {max}px")]
    BatchTooLarge { entries: usize, max: u32 },

    /// The matrix handle is empty or its module buffer does not match its width.
    #[error("QR matrix is unreadable: width {width}, {modules} modules")]
    InvalidMatrix { width: usize, modules: usize },

    #[error("failed to decode logo image: {0}")]
    LogoDecode(#[source] image::ImageError),

    #[error("failed to encode output image: {0}")]
    ImageEncode(#[source] image::ImageError),
}

/// A logo payload could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LogoError {
    #[error("not a base64 image data URI: {0}")]
    InvalidDataUri(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Errors surfaced to callers of this crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// No batch entry survived filtering and encoding.
    #[error("batch contains no encodable entries")]
    EmptyBatch,

    #[error(transparent)]
    Logo(#[from] LogoError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
