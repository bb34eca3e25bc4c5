use image::Rgb;

use crate::SheetError;

pub const BACKGROUND_INDEX: u8 = 0;
/// Reserved for the font author; only ever reached through glyph toggling.
pub const FONT_INDEX: u8 = 1;
pub const GRID_INDEX: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb<u8>; 3],
}

impl Palette {
    pub fn new(background: Rgb<u8>, font: Rgb<u8>, grid: Rgb<u8>) -> Self {
        Self { colors: [background, font, grid] }
    }

    pub fn colors(&self) -> &[Rgb<u8>; 3] {
        &self.colors
    }

    pub fn color(&self, index: u8) -> Rgb<u8> {
        self.colors[usize::from(index)]
    }

    /// Packed RGB triplets in slot order, as stored in a GIF color table.
    pub fn to_rgb_bytes(&self) -> [u8; 9] {
        let mut bytes = [0; 9];
        for (chunk, color) in bytes.chunks_exact_mut(3).zip(self.colors.iter()) {
            chunk.copy_from_slice(&color.0);
        }
        bytes
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Rgb([0xff, 0xff, 0xff]), Rgb([0x00, 0x00, 0x00]), Rgb([0xcc, 0xcc, 0xcc]))
    }
}

/// Parse an `RRGGBB` hex string into an opaque color.
pub fn parse_hex_color(text: &str) -> Result<Rgb<u8>, SheetError> {
    let invalid = || SheetError::InvalidColorFormat(text.to_owned());
    if text.len() != 6 || !text.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(text, 16).map_err(|_| invalid())?;
    Ok(Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8]))
}
