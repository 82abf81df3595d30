use alloc::string::String;
use enough::StopReason;

/// Errors from XPM decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XpmError {
    #[error("no XPM string data found")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for XpmError {
    fn from(r: StopReason) -> Self {
        XpmError::Cancelled(r)
    }
}
