use log::trace;

use super::atlas::GlyphAtlas;
use crate::sheet::canvas::IndexedCanvas;

/// Toggle the outline of `code` onto the canvas with its cell origin at `(x, y)`.
///
/// Every lit atlas pixel flips the canvas index by `mask`, so drawing the same
/// glyph twice restores the canvas and glyph pixels crossing a grid line
/// cancel it out. Returns `false` without touching the canvas when the atlas
/// has no glyph for `code`.
pub fn composite_glyph(
    canvas: &mut IndexedCanvas,
    atlas: &GlyphAtlas,
    code: u32,
    x: u32,
    y: u32,
    mask: u8,
) -> bool {
    let Some(cell) = GlyphAtlas::glyph_cell(code) else {
        trace!("no glyph for character code {code}");
        return false;
    };

    for row in 0..cell.height {
        for column in 0..cell.width {
            if atlas.is_foreground(cell.x + column, cell.y + row) {
                canvas.toggle_index(x + column, y + row, mask);
            }
        }
    }
    true
}
