//! # dibloader
//!
//! Decoder for uncompressed device-independent bitmaps (`.bmp`) with
//! 32 bits per pixel, producing a padding-free buffer of 4-byte pixels
//! ready to hand to a texture upload.
//!
//! ## Output contract
//!
//! - Width and height are always positive; the sign of the stored height
//!   only selects the [`RowOrder`].
//! - Rows stay in the order the file stores them. For the common
//!   bottom-up file the first buffer row is the bottom of the picture,
//!   which matches texture APIs whose origin is the lower-left corner.
//! - Bottom-up files come out as [`PixelLayout::Rgba8`]. Top-down files are
//!   copied without touching channel order and come out as
//!   [`PixelLayout::Bgra8`].
//! - Palettes are read for depths below 24 and exposed by [`probe`];
//!   decoding pixels of any depth other than 32 is rejected.
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, bitfield) bitmaps
//! - Expanding palette indices to colors
//! - Encoding
//!
//! ## Usage
//!
//! ```no_run
//! use dibloader::{BitmapLoader, DecodeRequest, Permissiveness};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let header = dibloader::probe(data)?;
//! println!("{}x{} {:?}", header.width(), header.height(), header.row_order());
//!
//! // One-shot decode
//! let image = DecodeRequest::new(data)
//!     .with_permissiveness(Permissiveness::Strict)
//!     .decode()?;
//! let alpha = image.alpha_channel();
//! # let _ = alpha;
//!
//! // Reusable loader
//! let mut loader = BitmapLoader::new();
//! loader.load_file("clock.bmp")?;
//! if let Some(pixels) = loader.pixels() {
//!     println!("{} bytes", pixels.len());
//! }
//! # Ok::<(), dibloader::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod limits;
mod loader;
mod pixel;
mod source;

mod bmp;

mod decode;

// Re-exports
pub use bmp::decode::Permissiveness;
pub use bmp::header::{
    BITMAP_SIGNATURE, BitmapHeader, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader,
    PaletteEntry, RowOrder,
};
pub use decode::{DecodeRequest, DecodedImage};
pub use error::{BitmapError, ErrorKind};
pub use limits::Limits;
pub use loader::BitmapLoader;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
pub use source::{decode_bmp_file, decode_bmp_reader};

/// Decode bitmap bytes with default options.
pub fn decode_bmp(data: &[u8]) -> Result<DecodedImage, BitmapError> {
    DecodeRequest::new(data).decode()
}

/// Read headers and palette without decoding pixels.
pub fn probe(data: &[u8]) -> Result<BitmapHeader, BitmapError> {
    DecodeRequest::new(data).probe()
}
