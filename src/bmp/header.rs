//! Bitmap file header, info header and palette parsing.
//!
//! All fields are little-endian. Only the 40-byte info header layout is
//! read; the `header_size` field is recorded but does not change where the
//! palette is looked for (immediately after the 40 bytes).

use log::{trace, warn};

use super::decode::Permissiveness;
use crate::error::BitmapError;

/// `"BM"` read as a little-endian `u16`.
pub const BITMAP_SIGNATURE: u16 = 0x4D42;

/// Size in bytes of the file header on disk.
pub const FILE_HEADER_SIZE: usize = 14;

/// Size in bytes of the info header on disk.
pub const INFO_HEADER_SIZE: usize = 40;

/// Bit depths at or above this value carry no palette.
const PALETTE_MAX_DEPTH: u16 = 24;

// ── Cursor for reading from &[u8] ───────────────────────────────────

pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let end = self.pos.checked_add(N).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes::<2>().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes::<4>().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes::<4>().map(i32::from_le_bytes)
    }
}

// ── Header records ──────────────────────────────────────────────────

/// Leading 14-byte record: identifies the file and locates the pixel data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u16,
    /// Total file size as declared by the file.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the pixel block.
    pub pixel_data_offset: u32,
}

impl FileHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, BitmapError> {
        Ok(Self {
            signature: cursor.get_u16_le()?,
            file_size: cursor.get_u32_le()?,
            reserved1: cursor.get_u16_le()?,
            reserved2: cursor.get_u16_le()?,
            pixel_data_offset: cursor.get_u32_le()?,
        })
    }

    /// Size of the raw pixel block, `file_size - pixel_data_offset`.
    pub fn pixel_block_size(&self) -> Result<usize, BitmapError> {
        self.file_size
            .checked_sub(self.pixel_data_offset)
            .map(|n| n as usize)
            .ok_or_else(|| {
                BitmapError::InvalidHeader(format!(
                    "pixel data offset ({}) is past the declared file size ({})",
                    self.pixel_data_offset, self.file_size
                ))
            })
    }
}

/// 40-byte geometry and encoding record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Signed; the sign selects the row storage order.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, BitmapError> {
        Ok(Self {
            header_size: cursor.get_u32_le()?,
            width: cursor.get_i32_le()?,
            height: cursor.get_i32_le()?,
            planes: cursor.get_u16_le()?,
            bits_per_pixel: cursor.get_u16_le()?,
            compression: cursor.get_u32_le()?,
            image_size: cursor.get_u32_le()?,
            x_pixels_per_meter: cursor.get_u32_le()?,
            y_pixels_per_meter: cursor.get_u32_le()?,
            colors_used: cursor.get_u32_le()?,
            colors_important: cursor.get_u32_le()?,
        })
    }
}

/// One indexed color, stored blue first as on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

/// How pixel rows are stored in the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowOrder {
    /// Positive height: the first stored row is the bottom of the image.
    BottomUp,
    /// Zero or negative height: the first stored row is the top of the image.
    TopDown,
}

impl RowOrder {
    pub fn from_height(height: i32) -> Self {
        if height > 0 {
            Self::BottomUp
        } else {
            Self::TopDown
        }
    }
}

/// Everything read before the pixel block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
    /// `Some` with exactly `2^bits_per_pixel` entries when the depth is below 24.
    pub palette: Option<Vec<PaletteEntry>>,
}

impl BitmapHeader {
    pub fn width(&self) -> u32 {
        self.info.width.unsigned_abs()
    }

    /// Row count with the order-encoding sign removed.
    pub fn height(&self) -> u32 {
        self.info.height.unsigned_abs()
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.info.bits_per_pixel
    }

    pub fn row_order(&self) -> RowOrder {
        RowOrder::from_height(self.info.height)
    }

    pub fn palette(&self) -> Option<&[PaletteEntry]> {
        self.palette.as_deref()
    }
}

/// Parse file header, info header and (for depths below 24) the palette.
pub(crate) fn parse_header(
    data: &[u8],
    permissiveness: Permissiveness,
) -> Result<BitmapHeader, BitmapError> {
    let is_strict = permissiveness == Permissiveness::Strict;
    let mut cursor = Cursor::new(data);

    let file = FileHeader::read(&mut cursor)?;
    if file.signature != BITMAP_SIGNATURE {
        return Err(BitmapError::InvalidFormat {
            signature: file.signature,
        });
    }

    let info = InfoHeader::read(&mut cursor)?;

    if file.file_size as usize != data.len() {
        if is_strict {
            return Err(BitmapError::InvalidHeader(format!(
                "declared file size ({}) doesn't match actual size ({})",
                file.file_size,
                data.len()
            )));
        }
        warn!(
            "declared file size ({}) doesn't match actual size ({})",
            file.file_size,
            data.len()
        );
    }

    if info.width <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "width must be positive, got {}",
            info.width
        )));
    }
    if info.height == 0 {
        return Err(BitmapError::InvalidHeader("height is zero".into()));
    }

    if is_strict && info.planes != 1 {
        return Err(BitmapError::InvalidHeader(format!(
            "planes field is {}, expected 1",
            info.planes
        )));
    }

    if info.compression != 0 {
        if is_strict {
            return Err(BitmapError::UnsupportedVariant(format!(
                "compression scheme {} (only uncompressed data is supported)",
                info.compression
            )));
        }
        warn!(
            "ignoring compression field {}; data is read as uncompressed",
            info.compression
        );
    }

    trace!("Width: {}", info.width);
    trace!("Height: {}", info.height);
    trace!("Bit depth: {}", info.bits_per_pixel);

    let palette = if info.bits_per_pixel < PALETTE_MAX_DEPTH {
        Some(read_palette(&mut cursor, info.bits_per_pixel)?)
    } else {
        None
    };

    Ok(BitmapHeader {
        file,
        info,
        palette,
    })
}

fn read_palette(cursor: &mut Cursor<'_>, depth: u16) -> Result<Vec<PaletteEntry>, BitmapError> {
    let count = 1usize << depth;
    trace!("Palette entries: {count} at offset {}", cursor.position());

    let bytes = count * core::mem::size_of::<PaletteEntry>();
    if cursor.remaining() < bytes {
        return Err(BitmapError::UnexpectedEof);
    }

    let mut palette = Vec::new();
    palette
        .try_reserve_exact(count)
        .map_err(|_| BitmapError::OutOfMemory { bytes })?;

    for _ in 0..count {
        let [blue, green, red, reserved] = cursor.read_fixed_bytes::<4>()?;
        palette.push(PaletteEntry {
            blue,
            green,
            red,
            reserved,
        });
    }
    Ok(palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(bpp: u16, height: i32, file_size: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&3i32.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bpp.to_le_bytes());
        out.extend_from_slice(&[0; 24]);
        out
    }

    #[test]
    fn field_offsets() {
        let mut data = headers(32, -7, 54);
        data[6] = 0xAA;
        data[8] = 0xBB;
        let header = parse_header(&data, Permissiveness::Standard).unwrap();
        assert_eq!(header.file.signature, BITMAP_SIGNATURE);
        assert_eq!(header.file.file_size, 54);
        assert_eq!(header.file.reserved1, 0xAA);
        assert_eq!(header.file.reserved2, 0xBB);
        assert_eq!(header.file.pixel_data_offset, 54);
        assert_eq!(header.info.header_size, 40);
        assert_eq!(header.info.width, 3);
        assert_eq!(header.info.height, -7);
        assert_eq!(header.height(), 7);
        assert_eq!(header.row_order(), RowOrder::TopDown);
        assert!(header.palette().is_none());
    }

    #[test]
    fn row_order_from_sign() {
        assert_eq!(RowOrder::from_height(1), RowOrder::BottomUp);
        assert_eq!(RowOrder::from_height(-1), RowOrder::TopDown);
        assert_eq!(RowOrder::from_height(0), RowOrder::TopDown);
    }

    #[test]
    fn palette_read_in_file_order() {
        let mut data = headers(1, 1, 62);
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let header = parse_header(&data, Permissiveness::Standard).unwrap();
        let palette = header.palette().unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(
            palette[1],
            PaletteEntry {
                blue: 5,
                green: 6,
                red: 7,
                reserved: 8
            }
        );
    }

    #[test]
    fn truncated_palette_is_eof() {
        let mut data = headers(4, 1, 100);
        data.extend_from_slice(&[0; 20]);
        assert!(matches!(
            parse_header(&data, Permissiveness::Standard),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    #[test]
    fn deep_palette_needs_its_bytes_up_front() {
        let data = headers(23, 1, 54);
        assert!(matches!(
            parse_header(&data, Permissiveness::Permissive),
            Err(BitmapError::UnexpectedEof)
        ));

        let mut data = headers(16, 1, 54 + 1024);
        data.extend_from_slice(&[0; 1024]);
        assert!(matches!(
            parse_header(&data, Permissiveness::Standard),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    #[test]
    fn cursor_remaining() {
        let data = [0u8; 6];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.remaining(), 6);
        cursor.get_u32_le().unwrap();
        assert_eq!(cursor.remaining(), 2);
        assert!(cursor.get_u32_le().is_err());
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn offset_past_file_size() {
        let file = FileHeader {
            file_size: 10,
            pixel_data_offset: 54,
            ..Default::default()
        };
        assert!(matches!(
            file.pixel_block_size(),
            Err(BitmapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn strict_checks_file_size_and_planes() {
        let data = headers(32, 1, 999);
        assert!(parse_header(&data, Permissiveness::Standard).is_ok());
        assert!(matches!(
            parse_header(&data, Permissiveness::Strict),
            Err(BitmapError::InvalidHeader(_))
        ));

        let mut data = headers(32, 1, 54);
        data[26] = 2;
        assert!(parse_header(&data, Permissiveness::Standard).is_ok());
        assert!(parse_header(&data, Permissiveness::Strict).is_err());
    }

    #[test]
    fn non_positive_width_rejected() {
        let mut data = headers(32, 1, 54);
        data[18..22].copy_from_slice(&0i32.to_le_bytes());
        assert!(matches!(
            parse_header(&data, Permissiveness::Permissive),
            Err(BitmapError::InvalidHeader(_))
        ));
        data[18..22].copy_from_slice(&(-4i32).to_le_bytes());
        assert!(parse_header(&data, Permissiveness::Permissive).is_err());
    }
}
