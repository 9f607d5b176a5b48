//! In-memory bitmap builder for tests.

#![allow(dead_code)]

pub struct BmpBuilder {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub palette: Vec<[u8; 4]>,
    /// Raw pixel block exactly as stored on disk.
    pub pixel_block: Vec<u8>,
    /// Overrides the computed `file_size` field.
    pub file_size: Option<u32>,
    /// Overrides the computed `pixel_data_offset` field.
    pub pixel_data_offset: Option<u32>,
    pub compression: u32,
}

impl BmpBuilder {
    pub fn rgba32(width: i32, height: i32, pixel_block: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bits_per_pixel: 32,
            palette: Vec::new(),
            pixel_block,
            file_size: None,
            pixel_data_offset: None,
            compression: 0,
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let offset = self
            .pixel_data_offset
            .unwrap_or(54 + 4 * self.palette.len() as u32);
        let file_size = self
            .file_size
            .unwrap_or(offset + self.pixel_block.len() as u32);

        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&file_size.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());

        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(self.pixel_block.len() as u32).to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());

        for entry in &self.palette {
            out.extend_from_slice(entry);
        }
        out.resize(offset as usize, 0);
        out.extend_from_slice(&self.pixel_block);
        out
    }
}

/// Deterministic B,G,R,A bytes for `count` pixels.
pub fn noise_pixels(count: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; count * 4];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}
