//! Decoding from files and readers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::trace;

use crate::decode::DecodedImage;
use crate::error::BitmapError;

/// Read everything `reader` yields.
pub(crate) fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>, BitmapError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    trace!("read {} bytes", data.len());
    Ok(data)
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, BitmapError> {
    trace!("opening {}", path.display());
    read_all(File::open(path)?)
}

/// Decode a bitmap from any reader with default options.
pub fn decode_bmp_reader<R: Read>(reader: R) -> Result<DecodedImage, BitmapError> {
    let data = read_all(reader)?;
    crate::decode_bmp(&data)
}

/// Decode a bitmap file with default options.
pub fn decode_bmp_file<P: AsRef<Path>>(path: P) -> Result<DecodedImage, BitmapError> {
    let data = read_file(path.as_ref())?;
    crate::decode_bmp(&data)
}
