/// Byte order of each 4-byte entry in a decoded pixel buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 8-bit BGRA (file order, no swizzle).
    Bgra8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Byte offset of the alpha channel within one pixel.
    pub fn alpha_offset(&self) -> usize {
        match self {
            Self::Rgba8 | Self::Bgra8 => 3,
        }
    }
}

/// Typed pixels a decoded buffer can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    /// Buffer layout this pixel type matches byte for byte.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::Rgba<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::alt::BGRA<u8> {
    fn layout() -> PixelLayout {
        PixelLayout::Bgra8
    }
}
