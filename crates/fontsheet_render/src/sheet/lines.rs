use super::canvas::IndexedCanvas;

/// Set `length` pixels from `(x0, y0)` towards +x to `index`.
pub fn draw_horizontal(canvas: &mut IndexedCanvas, x0: u32, y0: u32, length: u32, index: u8) {
    for x in x0..x0 + length {
        canvas.set_index(x, y0, index);
    }
}

/// Set `length` pixels from `(x0, y0)` towards +y to `index`.
pub fn draw_vertical(canvas: &mut IndexedCanvas, x0: u32, y0: u32, length: u32, index: u8) {
    for y in y0..y0 + length {
        canvas.set_index(x0, y, index);
    }
}
