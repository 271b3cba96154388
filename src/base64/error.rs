use thiserror::Error;

/// Failure modes of the slice-based encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Destination slice cannot hold the output.
    #[error("destination too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// Text is not well-formed Base64.
    #[error("invalid input")]
    Malformed,
}
