use crate::pixel::PixelLayout;

/// Errors from bitmap decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a bitmap: signature {signature:#06x}, expected 0x4d42 (\"BM\")")]
    InvalidFormat { signature: u16 },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("out of memory: cannot allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: PixelLayout,
        actual: PixelLayout,
    },

    #[error("no image loaded")]
    NotLoaded,
}

/// Coarse classification of a [`BitmapError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source unreadable or truncated.
    Io,
    /// Signature mismatch.
    InvalidFormat,
    /// A buffer could not be allocated.
    OutOfMemory,
    /// Header is malformed or describes something this decoder does not handle.
    Unsupported,
    /// Caller-imposed [`crate::Limits`] or address-space limits were hit.
    Limit,
    /// Pixel data was requested before anything was decoded.
    NotLoaded,
}

impl BitmapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedEof => ErrorKind::Io,
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::InvalidHeader(_) | Self::UnsupportedVariant(_) | Self::LayoutMismatch { .. } => {
                ErrorKind::Unsupported
            }
            Self::DimensionsTooLarge { .. } | Self::LimitExceeded(_) => ErrorKind::Limit,
            Self::NotLoaded => ErrorKind::NotLoaded,
        }
    }
}
