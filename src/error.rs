//! Error types for the pano-canvas crate.

/// Errors that can occur while normalizing a canvas and synthesizing its mask.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No decodable input images were supplied, or a buffer has a zero dimension.
    #[error("no usable input images: {0}")]
    EmptyInput(String),

    /// Canvas and mask stages disagree about dimensions. This is a programming
    /// fault in the caller, not a user-facing condition.
    #[error("canvas/mask dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The inpaint service replied with a non-success status.
    #[error("inpaint service error ({status}): {message}")]
    ExternalService {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body or status text from the service.
        message: String,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during image processing (load, save, encode).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The HTTP transport to the inpaint service failed (connect, timeout, TLS).
    #[error("inpaint transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
