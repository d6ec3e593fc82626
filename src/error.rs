//! Error type shared by the buffer, filters, pipeline and host bindings.

/// Errors that can occur while acquiring, transforming or presenting an image.
#[derive(Debug, thiserror::Error)]
pub enum TranslucifyError {
    /// A seed or access coordinate lies outside the buffer.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} buffer")]
    InvalidBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// The argument is neither a single image, a collection nor an iterable.
    #[error("unsupported input kind: {0}")]
    UnsupportedInputKind(String),

    /// The pixel source could not produce decoded pixel data.
    #[error("pixel source `{id}` unavailable: {reason}")]
    SourceUnavailable { id: String, reason: String },

    /// Raw pixel data does not hold exactly `width * height * 4` bytes.
    #[error("{len} bytes cannot hold a {width}x{height} RGBA buffer")]
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },

    /// The presenter could not take the transformed buffer.
    #[error("could not present `{id}`: {reason}")]
    PresentationFailed { id: String, reason: String },

    /// Configuration file unreadable or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TranslucifyError>;
