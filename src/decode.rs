#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::bmp;
use crate::bmp::decode::Permissiveness;
use crate::bmp::header::{BitmapHeader, PaletteEntry, RowOrder};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// A successfully decoded bitmap.
///
/// The pixel buffer holds `width * height` 4-byte entries with no row
/// padding. Rows keep the order they had in the file: for
/// [`RowOrder::BottomUp`] the first row in the buffer is the bottom row of
/// the picture. Channel order is reported by [`DecodedImage::layout`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    header: BitmapHeader,
    pixels: Vec<u8>,
    layout: PixelLayout,
}

impl DecodedImage {
    pub(crate) fn new(header: BitmapHeader, pixels: Vec<u8>, layout: PixelLayout) -> Self {
        Self {
            header,
            pixels,
            layout,
        }
    }

    pub fn width(&self) -> u32 {
        self.header.width()
    }

    /// Always positive, whatever the sign stored in the file.
    pub fn height(&self) -> u32 {
        self.header.height()
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.header.bits_per_pixel()
    }

    pub fn row_order(&self) -> RowOrder {
        self.header.row_order()
    }

    /// Channel order of each pixel: `Rgba8` for bottom-up files, `Bgra8`
    /// for top-down files, which are copied without swizzling.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Always `None`: only 32-bit images decode. Palettes of lower depths
    /// are read by [`crate::probe`] into [`BitmapHeader::palette`].
    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        self.header.palette()
    }

    pub fn header(&self) -> &BitmapHeader {
        &self.header
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// One stored row, `None` past the last one.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let stride = self.width() as usize * self.layout.bytes_per_pixel();
        let start = (y as usize).checked_mul(stride)?;
        self.pixels.get(start..start.checked_add(stride)?)
    }

    /// The alpha byte of every pixel, in buffer order.
    pub fn alpha_channel(&self) -> Vec<u8> {
        let offset = self.layout.alpha_offset();
        self.pixels
            .chunks_exact(self.layout.bytes_per_pixel())
            .map(|px| px[offset])
            .collect()
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(BitmapError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width() as usize,
            self.height() as usize,
        ))
    }
}

/// Builder for a configured decode of in-memory bitmap bytes.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: Permissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Parse headers and palette without touching pixel data.
    pub fn probe(&self) -> Result<BitmapHeader, BitmapError> {
        bmp::probe(self.data, self.permissiveness)
    }

    pub fn decode(&self) -> Result<DecodedImage, BitmapError> {
        bmp::decode(self.data, self.limits, self.permissiveness)
    }
}
