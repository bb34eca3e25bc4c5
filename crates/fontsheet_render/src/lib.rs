mod encode;
mod glyph;
mod sheet;

use std::path::Path;

use log::{debug, warn};

pub use encode::gif::{encode_gif, write_gif};
pub use glyph::{
    atlas::{GlyphAtlas, GlyphCell, ATLAS_COLUMNS, ATLAS_ROWS, FIRST_CODE, LAST_CODE},
    composite::composite_glyph,
    GLYPH_HEIGHT, GLYPH_WIDTH,
};
pub use sheet::{
    canvas::IndexedCanvas,
    geometry::SheetGeometry,
    lines::{draw_horizontal, draw_vertical},
    palette::{parse_hex_color, Palette, BACKGROUND_INDEX, FONT_INDEX, GRID_INDEX},
};

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("not an RRGGBB value: {0:?}")]
    InvalidColorFormat(String),
    #[error("last character {last} precedes first character {first}")]
    InvalidCharRange { first: u32, last: u32 },
    #[error("cell size {width}x{height} must be non-zero")]
    InvalidCell { width: u32, height: u32 },
    #[error("baseline {baseline} must be less than the cell height {height}")]
    InvalidBaseline { baseline: u32, height: u32 },
    #[error("sheet of {width}x{height} pixels exceeds the supported image size")]
    TooLarge { width: u64, height: u64 },
    #[error("malformed glyph atlas: {0}")]
    AtlasLoad(String),
    #[error("failed to write output: {0}")]
    OutputIo(#[from] std::io::Error),
    #[error("failed to encode GIF: {0}")]
    Encode(#[from] gif::EncodingError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetConfig {
    pub first_char: u32,
    pub last_char: u32,
    /// Maximum number of columns; zero places every character on a single row.
    pub columns: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Distance of the text baseline from the bottom of each cell.
    pub baseline: u32,
    /// Omit the top and left border along with its one pixel offset.
    pub strip: bool,
    /// Draw placeholder glyph outlines into each cell.
    pub draw_glyphs: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            first_char: 32,
            last_char: 127,
            columns: 16,
            cell_width: 10,
            cell_height: 16,
            baseline: 4,
            strip: false,
            draw_glyphs: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderedSheet {
    pub canvas: IndexedCanvas,
    pub palette: Palette,
    pub geometry: SheetGeometry,
}

impl RenderedSheet {
    /// Expand the palette indices into an RGB image.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let (width, height) = self.canvas.dimensions();
        image::RgbImage::from_fn(width, height, |x, y| {
            self.palette.color(self.canvas.get_index(x, y))
        })
    }

    /// Write the sheet to `path` as an indexed GIF, whatever the file is called.
    ///
    /// The whole image is encoded before the file is created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SheetError> {
        let bytes = encode_gif(self)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

pub struct SheetRenderer<'a> {
    atlas: &'a GlyphAtlas,
}

impl<'a> SheetRenderer<'a> {
    pub fn new(atlas: &'a GlyphAtlas) -> Self {
        Self { atlas }
    }

    pub fn render(
        &self,
        config: &SheetConfig,
        palette: Palette,
    ) -> Result<RenderedSheet, SheetError> {
        let geometry = SheetGeometry::derive(config)?;
        debug!(
            "sheet layout: {}x{} cells, {}x{} pixels",
            geometry.columns, geometry.rows, geometry.total_width, geometry.total_height
        );

        let mut canvas = IndexedCanvas::new(geometry.total_width, geometry.total_height);
        self.draw_grid(&mut canvas, config, &geometry);

        if config.draw_glyphs {
            if fits_glyphs(config) {
                self.draw_glyphs(&mut canvas, config, &geometry);
            } else {
                warn!(
                    "cell {}x{} with baseline {} is too small for {}x{} glyphs, skipping text",
                    config.cell_width,
                    config.cell_height,
                    config.baseline,
                    GLYPH_WIDTH,
                    GLYPH_HEIGHT
                );
            }
        }

        Ok(RenderedSheet { canvas, palette, geometry })
    }

    /// Grid lines must be in place before any glyph is toggled on top of them.
    fn draw_grid(
        &self,
        canvas: &mut IndexedCanvas,
        config: &SheetConfig,
        geometry: &SheetGeometry,
    ) {
        let SheetGeometry { columns, rows, total_width, total_height, offset_x, offset_y, .. } =
            *geometry;

        if !config.strip {
            draw_horizontal(canvas, 0, 0, total_width, GRID_INDEX);
            draw_vertical(canvas, 0, 0, total_height, GRID_INDEX);
        }

        for column in 0..columns {
            let right_x = offset_x + (column + 1) * config.cell_width - 1;
            draw_vertical(canvas, right_x, 0, total_height, GRID_INDEX);
        }

        for row in 0..rows {
            let bottom_y = offset_y + (row + 1) * config.cell_height - 1;
            draw_horizontal(canvas, 0, bottom_y, total_width, GRID_INDEX);
            if config.baseline > 0 {
                draw_horizontal(canvas, 0, bottom_y - config.baseline, total_width, GRID_INDEX);
            }
        }
    }

    fn draw_glyphs(
        &self,
        canvas: &mut IndexedCanvas,
        config: &SheetConfig,
        geometry: &SheetGeometry,
    ) {
        let char_offset_x = (config.cell_width - GLYPH_WIDTH) / 2;
        let char_offset_y = (config.cell_height - config.baseline) - GLYPH_HEIGHT;

        for index in 0..geometry.chars {
            let (column, row) = geometry.cell_position(index);
            let x = geometry.offset_x + config.cell_width * column + char_offset_x;
            let y = geometry.offset_y + config.cell_height * row + char_offset_y;
            composite_glyph(canvas, self.atlas, config.first_char + index, x, y, GRID_INDEX);
        }
    }
}

fn fits_glyphs(config: &SheetConfig) -> bool {
    config.cell_width >= GLYPH_WIDTH && config.cell_height - config.baseline >= GLYPH_HEIGHT
}
