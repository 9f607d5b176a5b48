//! Reusable decoder that owns the most recently loaded image.

use std::path::Path;

use log::debug;

use crate::bmp::decode::Permissiveness;
use crate::bmp::header::PaletteEntry;
use crate::decode::{DecodeRequest, DecodedImage};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::source;

/// Holds at most one decoded image and can be loaded again and again.
///
/// Every load first releases the current image, so after a failed load
/// [`BitmapLoader::is_loaded`] is `false` and no stale pixels are visible.
#[derive(Debug, Default)]
pub struct BitmapLoader {
    image: Option<DecodedImage>,
    limits: Option<Limits>,
    permissiveness: Permissiveness,
}

impl BitmapLoader {
    /// An empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Decode `data`, replacing whatever was loaded before.
    pub fn load(&mut self, data: &[u8]) -> Result<(), BitmapError> {
        self.image = None;
        let mut request = DecodeRequest::new(data).with_permissiveness(self.permissiveness);
        if let Some(limits) = &self.limits {
            request = request.with_limits(limits);
        }
        let result = request.decode();
        self.install(result)
    }

    /// Decode with a caller-built request, ignoring this loader's settings.
    pub fn load_with(&mut self, request: &DecodeRequest<'_>) -> Result<(), BitmapError> {
        self.image = None;
        let result = request.decode();
        self.install(result)
    }

    /// Read and decode a file.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BitmapError> {
        self.image = None;
        let data = source::read_file(path.as_ref())?;
        self.load(&data)
    }

    fn install(&mut self, result: Result<DecodedImage, BitmapError>) -> Result<(), BitmapError> {
        match result {
            Ok(image) => {
                debug!("loaded {}x{} bitmap", image.width(), image.height());
                self.image = Some(image);
                Ok(())
            }
            Err(err) => {
                debug!("bitmap load failed: {err}");
                Err(err)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    /// Hand the loaded image to the caller, leaving the loader empty.
    pub fn take(&mut self) -> Option<DecodedImage> {
        self.image.take()
    }

    /// Release the loaded image.
    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn width(&self) -> Option<u32> {
        self.image.as_ref().map(DecodedImage::width)
    }

    pub fn height(&self) -> Option<u32> {
        self.image.as_ref().map(DecodedImage::height)
    }

    pub fn bits_per_pixel(&self) -> Option<u16> {
        self.image.as_ref().map(DecodedImage::bits_per_pixel)
    }

    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        self.image.as_ref().and_then(DecodedImage::palette)
    }

    pub fn pixels(&self) -> Option<&[u8]> {
        self.image.as_ref().map(DecodedImage::pixels)
    }

    /// Alpha bytes of the loaded image; [`BitmapError::NotLoaded`] when empty.
    pub fn alpha_channel(&self) -> Result<Vec<u8>, BitmapError> {
        self.image
            .as_ref()
            .map(DecodedImage::alpha_channel)
            .ok_or(BitmapError::NotLoaded)
    }
}
