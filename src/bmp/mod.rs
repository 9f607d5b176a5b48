//! Uncompressed 32-bit bitmap decoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::probe`] or [`crate::DecodeRequest`].

pub(crate) mod decode;
pub(crate) mod header;

use crate::decode::DecodedImage;
use crate::error::BitmapError;
use crate::limits::Limits;
use decode::Permissiveness;
use header::BitmapHeader;

/// Parse headers and palette only.
pub(crate) fn probe(
    data: &[u8],
    permissiveness: Permissiveness,
) -> Result<BitmapHeader, BitmapError> {
    header::parse_header(data, permissiveness)
}

/// Decode into the canonical buffer.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    permissiveness: Permissiveness,
) -> Result<DecodedImage, BitmapError> {
    let header = header::parse_header(data, permissiveness)?;
    decode::check_depth(&header)?;
    check_limits(limits, &header)?;
    let pixels = decode::decode_pixels(data, &header, permissiveness)?;
    let layout = decode::output_layout(header.row_order());
    Ok(DecodedImage::new(header, pixels, layout))
}

fn check_limits(limits: Option<&Limits>, header: &BitmapHeader) -> Result<(), BitmapError> {
    if let Some(limits) = limits {
        limits.check(header.width(), header.height())?;
        limits.check_memory(decode::output_buf_size(header)?)?;
    }
    Ok(())
}
