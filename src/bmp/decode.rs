//! Pixel block extraction and row normalization.
//!
//! Rows on disk are padded to a 4-byte boundary and stored as B,G,R,A.
//! The canonical buffer drops the padding. Bottom-up files are converted
//! to R,G,B,A pixel by pixel in file row order (rows are not flipped);
//! top-down files are copied row by row with no channel change.

use std::borrow::Cow;

use log::{trace, warn};

use super::header::{BitmapHeader, RowOrder};
use crate::error::BitmapError;
use crate::pixel::PixelLayout;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Also reject a declared file size that differs from the input length,
    /// `planes != 1` and any non-zero compression field.
    Strict,

    /// Default behavior. Only the signature and the fields needed to stay
    /// in bounds are validated; deviations elsewhere are logged.
    #[default]
    Standard,

    /// Zero-pad a pixel block that is shorter than the geometry requires
    /// instead of failing.
    Permissive,
}

/// The only depth whose pixels can be reconstructed.
const SUPPORTED_DEPTH: u16 = 32;

// ── Row geometry ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowGeometry {
    /// Bytes of pixel data per row.
    unpadded: usize,
    /// `unpadded` rounded up to a multiple of 4.
    padded: usize,
    rows: usize,
}

impl RowGeometry {
    fn new(header: &BitmapHeader) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge {
            width: header.width(),
            height: header.height(),
        };
        let row_bits = u64::from(header.width()) * u64::from(header.bits_per_pixel());
        let unpadded = usize::try_from(row_bits / 8).map_err(|_| too_large())?;
        let padded = unpadded.checked_add(3).ok_or_else(too_large)? & !3;
        let rows = header.height() as usize;
        if unpadded == 0 || rows == 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "empty image: {}x{}",
                header.width(),
                header.height()
            )));
        }
        // Both buffers are indexed with these products below.
        unpadded.checked_mul(rows).ok_or_else(too_large)?;
        padded.checked_mul(rows).ok_or_else(too_large)?;
        Ok(Self {
            unpadded,
            padded,
            rows,
        })
    }

    /// Canonical buffer size.
    fn output_size(&self) -> usize {
        self.unpadded * self.rows
    }

    /// Source bytes needed; the last row needs no trailing pad.
    fn required_input(&self) -> usize {
        self.padded * (self.rows - 1) + self.unpadded
    }
}

/// Layout of the canonical buffer produced for a given row order.
pub(crate) fn output_layout(order: RowOrder) -> PixelLayout {
    match order {
        RowOrder::BottomUp => PixelLayout::Rgba8,
        RowOrder::TopDown => PixelLayout::Bgra8,
    }
}

/// Reject depths the pixel path cannot reconstruct.
pub(crate) fn check_depth(header: &BitmapHeader) -> Result<(), BitmapError> {
    if header.bits_per_pixel() != SUPPORTED_DEPTH {
        return Err(BitmapError::UnsupportedVariant(format!(
            "{}-bit pixels (only 32-bit pixel data can be decoded)",
            header.bits_per_pixel()
        )));
    }
    Ok(())
}

/// Size in bytes of the canonical buffer `decode_pixels` will allocate.
pub(crate) fn output_buf_size(header: &BitmapHeader) -> Result<usize, BitmapError> {
    RowGeometry::new(header).map(|g| g.output_size())
}

/// Locate the raw pixel block and normalize it into the canonical buffer.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BitmapHeader,
    permissiveness: Permissiveness,
) -> Result<Vec<u8>, BitmapError> {
    check_depth(header)?;
    let geometry = RowGeometry::new(header)?;
    let order = header.row_order();

    trace!("Row order: {order:?}");
    trace!(
        "Row bytes: {} (padded {}), rows: {}",
        geometry.unpadded, geometry.padded, geometry.rows
    );

    let block = pixel_block(data, header, permissiveness)?;
    let block = fit_block(block, &geometry, permissiveness)?;

    let mut out = Vec::new();
    out.try_reserve_exact(geometry.output_size())
        .map_err(|_| BitmapError::OutOfMemory {
            bytes: geometry.output_size(),
        })?;
    out.resize(geometry.output_size(), 0);

    match order {
        RowOrder::BottomUp => swap_red_blue_rows(&block, &mut out, &geometry),
        RowOrder::TopDown => copy_rows(&block, &mut out, &geometry),
    }

    Ok(out)
}

/// `file_size - pixel_data_offset` bytes starting at `pixel_data_offset`,
/// cut short only in permissive mode.
fn pixel_block<'a>(
    data: &'a [u8],
    header: &BitmapHeader,
    permissiveness: Permissiveness,
) -> Result<&'a [u8], BitmapError> {
    let size = header.file.pixel_block_size()?;
    let start = header.file.pixel_data_offset as usize;
    let end = start.checked_add(size).ok_or(BitmapError::UnexpectedEof)?;

    match data.get(start..end) {
        Some(block) => Ok(block),
        None if permissiveness == Permissiveness::Permissive => {
            let available = data.get(start..).unwrap_or(&[]);
            warn!(
                "pixel block truncated: {} of {size} bytes present",
                available.len()
            );
            Ok(available)
        }
        None => Err(BitmapError::UnexpectedEof),
    }
}

/// Make sure the block covers every row, zero-padding in permissive mode.
fn fit_block<'a>(
    block: &'a [u8],
    geometry: &RowGeometry,
    permissiveness: Permissiveness,
) -> Result<Cow<'a, [u8]>, BitmapError> {
    let required = geometry.required_input();
    if block.len() >= required {
        if block.len() > geometry.padded * geometry.rows {
            warn!(
                "ignoring {} trailing bytes after pixel rows",
                block.len() - geometry.padded * geometry.rows
            );
        }
        return Ok(Cow::Borrowed(block));
    }

    if permissiveness != Permissiveness::Permissive {
        return Err(BitmapError::UnexpectedEof);
    }

    warn!(
        "zero-padding pixel block from {} to {required} bytes",
        block.len()
    );
    let mut padded = Vec::new();
    padded
        .try_reserve_exact(required)
        .map_err(|_| BitmapError::OutOfMemory { bytes: required })?;
    padded.extend_from_slice(block);
    padded.resize(required, 0);
    Ok(Cow::Owned(padded))
}

/// B,G,R,A → R,G,B,A per pixel, rows kept in file order.
fn swap_red_blue_rows(block: &[u8], out: &mut [u8], geometry: &RowGeometry) {
    for (src_row, dst_row) in block
        .chunks(geometry.padded)
        .zip(out.chunks_exact_mut(geometry.unpadded))
    {
        for (src, dst) in src_row[..geometry.unpadded]
            .chunks_exact(4)
            .zip(dst_row.chunks_exact_mut(4))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
            dst[3] = src[3];
        }
    }
}

/// Straight copy with padding removed.
fn copy_rows(block: &[u8], out: &mut [u8], geometry: &RowGeometry) {
    for (src_row, dst_row) in block
        .chunks(geometry.padded)
        .zip(out.chunks_exact_mut(geometry.unpadded))
    {
        dst_row.copy_from_slice(&src_row[..geometry.unpadded]);
    }
}
