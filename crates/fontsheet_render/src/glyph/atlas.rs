use std::io::Read;

use image::{GrayImage, Luma};
use log::debug;

use super::{builtin, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::SheetError;

pub const FIRST_CODE: u32 = 32;
pub const LAST_CODE: u32 = 127;
pub const ATLAS_COLUMNS: u32 = 16;
pub const ATLAS_ROWS: u32 = 6;

const ATLAS_WIDTH: u32 = ATLAS_COLUMNS * GLYPH_WIDTH;
const ATLAS_HEIGHT: u32 = ATLAS_ROWS * GLYPH_HEIGHT;

const BACKGROUND: u8 = 0;
const FOREGROUND: u8 = 1;

/// Atlas rectangle holding one glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphCell {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Immutable monochrome bitmap font laid out as a 16x6 grid of glyph cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphAtlas {
    bitmap: GrayImage,
}

impl GlyphAtlas {
    /// Expand the compiled-in font into an atlas.
    pub fn builtin() -> Result<Self, SheetError> {
        let mut bitmap = GrayImage::from_pixel(ATLAS_WIDTH, ATLAS_HEIGHT, Luma([BACKGROUND]));
        for slot in 0..builtin::GLYPH_COUNT {
            let Some(cell) = Self::glyph_cell(FIRST_CODE + slot as u32) else {
                return Err(SheetError::AtlasLoad(format!("no atlas cell for glyph {slot}")));
            };
            for y in 0..cell.height {
                for x in 0..cell.width {
                    if builtin::is_lit(slot, x, y) {
                        bitmap.put_pixel(cell.x + x, cell.y + y, Luma([FOREGROUND]));
                    }
                }
            }
        }

        debug!("loaded built-in glyph atlas");
        Self::from_bitmap(bitmap)
    }

    /// Build an atlas from row-major palette indices where 1 marks a glyph pixel.
    pub fn from_indexed(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SheetError> {
        let bitmap = GrayImage::from_raw(width, height, pixels).ok_or_else(|| {
            SheetError::AtlasLoad(format!("pixel buffer does not match {width}x{height}"))
        })?;
        Self::from_bitmap(bitmap)
    }

    /// Decode the first frame of an indexed GIF as an atlas.
    pub fn from_gif<R: Read>(reader: R) -> Result<Self, SheetError> {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder =
            options.read_info(reader).map_err(|err| SheetError::AtlasLoad(err.to_string()))?;

        let width = u32::from(decoder.width());
        let height = u32::from(decoder.height());
        let frame = decoder
            .read_next_frame()
            .map_err(|err| SheetError::AtlasLoad(err.to_string()))?
            .ok_or_else(|| SheetError::AtlasLoad("GIF contains no frames".into()))?;

        let mut bitmap = GrayImage::from_pixel(width, height, Luma([BACKGROUND]));
        let frame_width = usize::from(frame.width.max(1));
        for (offset, &index) in frame.buffer.iter().enumerate() {
            let x = u32::from(frame.left) + (offset % frame_width) as u32;
            let y = u32::from(frame.top) + (offset / frame_width) as u32;
            if x < width && y < height {
                bitmap.put_pixel(x, y, Luma([index]));
            }
        }

        debug!("decoded {}x{} glyph atlas from GIF", width, height);
        Self::from_bitmap(bitmap)
    }

    fn from_bitmap(bitmap: GrayImage) -> Result<Self, SheetError> {
        let (width, height) = bitmap.dimensions();
        if width < ATLAS_WIDTH || height < ATLAS_HEIGHT {
            return Err(SheetError::AtlasLoad(format!(
                "atlas is {width}x{height}, expected at least {ATLAS_WIDTH}x{ATLAS_HEIGHT}"
            )));
        }
        if !bitmap.pixels().any(|pixel| pixel.0[0] == FOREGROUND) {
            return Err(SheetError::AtlasLoad("atlas has no foreground pixels".into()));
        }
        Ok(Self { bitmap })
    }

    /// Locate the atlas cell for `code`, or `None` outside `32..=127`.
    pub fn glyph_cell(code: u32) -> Option<GlyphCell> {
        if !(FIRST_CODE..=LAST_CODE).contains(&code) {
            return None;
        }
        let slot = code - FIRST_CODE;
        Some(GlyphCell {
            x: GLYPH_WIDTH * (slot % ATLAS_COLUMNS),
            y: GLYPH_HEIGHT * (slot / ATLAS_COLUMNS),
            width: GLYPH_WIDTH,
            height: GLYPH_HEIGHT,
        })
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.bitmap.get_pixel(x, y).0[0] == FOREGROUND
    }

    /// Offsets of the lit pixels of `code` within its cell, row by row.
    pub fn glyph_pixels(&self, code: u32) -> Vec<(u32, u32)> {
        let Some(cell) = Self::glyph_cell(code) else {
            return Vec::new();
        };
        let mut pixels = Vec::new();
        for y in 0..cell.height {
            for x in 0..cell.width {
                if self.is_foreground(cell.x + x, cell.y + y) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    fn encode_atlas_gif(atlas: &GlyphAtlas, left: u16, top: u16) -> Vec<u8> {
        let (width, height) = atlas.bitmap.dimensions();
        let mut bytes = Vec::new();
        {
            let palette = [0xff, 0xff, 0xff, 0x00, 0x00, 0x00];
            let mut encoder = gif::Encoder::new(
                &mut bytes,
                width as u16 + left,
                height as u16 + top,
                &palette,
            )
            .unwrap();
            let frame = gif::Frame {
                left,
                top,
                width: width as u16,
                height: height as u16,
                buffer: Cow::Borrowed(atlas.bitmap.as_raw()),
                ..gif::Frame::default()
            };
            encoder.write_frame(&frame).unwrap();
        }
        bytes
    }

    #[test]
    fn glyph_cells_follow_row_major_grid() {
        assert_eq!(
            GlyphAtlas::glyph_cell(32),
            Some(GlyphCell { x: 0, y: 0, width: 6, height: 9 })
        );
        assert_eq!(GlyphAtlas::glyph_cell(65).map(|cell| (cell.x, cell.y)), Some((6, 18)));
        assert_eq!(GlyphAtlas::glyph_cell(127).map(|cell| (cell.x, cell.y)), Some((90, 45)));
    }

    #[test]
    fn glyph_cells_stay_inside_atlas() {
        for code in FIRST_CODE..=LAST_CODE {
            let cell = GlyphAtlas::glyph_cell(code).unwrap();
            assert!(cell.x + cell.width <= ATLAS_WIDTH);
            assert!(cell.y + cell.height <= ATLAS_HEIGHT);
        }
    }

    #[test]
    fn codes_outside_range_have_no_cell() {
        for code in [0, 31, 128, 255, u32::MAX] {
            assert_eq!(GlyphAtlas::glyph_cell(code), None);
        }
    }

    #[test]
    fn builtin_atlas_shapes() {
        let atlas = GlyphAtlas::builtin().unwrap();
        assert!(atlas.glyph_pixels(u32::from(b' ')).is_empty());
        assert_eq!(atlas.glyph_pixels(u32::from(b'A')).len(), 18);
        assert_eq!(atlas.glyph_pixels(u32::from(b'|')), (1..8).map(|y| (2, y)).collect::<Vec<_>>());
        assert!(!atlas.glyph_pixels(127).is_empty());
        assert!(atlas.glyph_pixels(128).is_empty());
    }

    #[test]
    fn builtin_atlas_keeps_spacing_column_blank() {
        let atlas = GlyphAtlas::builtin().unwrap();
        for code in FIRST_CODE..=LAST_CODE {
            assert!(atlas.glyph_pixels(code).iter().all(|&(x, _)| x < GLYPH_WIDTH - 1));
        }
    }

    #[test]
    fn descenders_reach_last_row() {
        let atlas = GlyphAtlas::builtin().unwrap();
        for ch in [b'g', b'j', b'p', b'q', b'y'] {
            let pixels = atlas.glyph_pixels(u32::from(ch));
            assert!(pixels.iter().any(|&(_, y)| y == GLYPH_HEIGHT - 1), "{}", ch as char);
        }
    }

    #[test]
    fn rejects_undersized_bitmap() {
        let err = GlyphAtlas::from_indexed(10, 10, vec![1; 100]).unwrap_err();
        assert!(matches!(err, SheetError::AtlasLoad(_)));
    }

    #[test]
    fn rejects_mismatched_buffer() {
        let err = GlyphAtlas::from_indexed(ATLAS_WIDTH, ATLAS_HEIGHT, vec![1; 3]).unwrap_err();
        assert!(matches!(err, SheetError::AtlasLoad(_)));
    }

    #[test]
    fn rejects_blank_bitmap() {
        let pixels = vec![0; (ATLAS_WIDTH * ATLAS_HEIGHT) as usize];
        let err = GlyphAtlas::from_indexed(ATLAS_WIDTH, ATLAS_HEIGHT, pixels).unwrap_err();
        assert!(matches!(err, SheetError::AtlasLoad(_)));
    }

    #[test]
    fn loads_gif_atlas() {
        let builtin = GlyphAtlas::builtin().unwrap();
        let bytes = encode_atlas_gif(&builtin, 0, 0);
        let decoded = GlyphAtlas::from_gif(bytes.as_slice()).unwrap();
        assert_eq!(decoded, builtin);
    }

    #[test]
    fn gif_frame_offset_is_honored() {
        let builtin = GlyphAtlas::builtin().unwrap();
        let bytes = encode_atlas_gif(&builtin, 2, 1);
        let decoded = GlyphAtlas::from_gif(bytes.as_slice()).unwrap();
        assert_eq!(decoded.bitmap.dimensions(), (ATLAS_WIDTH + 2, ATLAS_HEIGHT + 1));
        assert!(!decoded.is_foreground(0, 0));
        let (x, y) = builtin.glyph_pixels(u32::from(b'A'))[0];
        let cell = GlyphAtlas::glyph_cell(u32::from(b'A')).unwrap();
        assert!(decoded.is_foreground(cell.x + x + 2, cell.y + y + 1));
    }

    #[test]
    fn rejects_garbage_gif() {
        let err = GlyphAtlas::from_gif(&b"not a gif"[..]).unwrap_err();
        assert!(matches!(err, SheetError::AtlasLoad(_)));
    }
}
