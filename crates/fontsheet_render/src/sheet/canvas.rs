use image::{GrayImage, Luma};

use super::palette::BACKGROUND_INDEX;

/// Rectangular buffer of palette indices.
///
/// Coordinates outside the canvas are a caller bug and panic rather than clip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedCanvas {
    pixels: GrayImage,
}

impl IndexedCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { pixels: GrayImage::from_pixel(width, height, Luma([BACKGROUND_INDEX])) }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn get_index(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y).0[0]
    }

    pub fn set_index(&mut self, x: u32, y: u32, index: u8) {
        self.pixels.put_pixel(x, y, Luma([index]));
    }

    /// Flip the pixel's index by exclusive-or with `mask`.
    pub fn toggle_index(&mut self, x: u32, y: u32, mask: u8) {
        let current = self.get_index(x, y);
        self.set_index(x, y, current ^ mask);
    }

    /// Row-major palette indices, one byte per pixel.
    pub fn indices(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::palette::{FONT_INDEX, GRID_INDEX};

    #[test]
    fn starts_as_background() {
        let canvas = IndexedCanvas::new(4, 3);
        assert_eq!(canvas.dimensions(), (4, 3));
        assert!(canvas.indices().iter().all(|&index| index == BACKGROUND_INDEX));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut canvas = IndexedCanvas::new(4, 3);
        canvas.set_index(3, 2, GRID_INDEX);
        assert_eq!(canvas.get_index(3, 2), GRID_INDEX);
        assert_eq!(canvas.indices()[2 * 4 + 3], GRID_INDEX);
    }

    #[test]
    fn toggle_flips_between_background_and_grid() {
        let mut canvas = IndexedCanvas::new(1, 1);
        canvas.toggle_index(0, 0, GRID_INDEX);
        assert_eq!(canvas.get_index(0, 0), GRID_INDEX);
        canvas.toggle_index(0, 0, GRID_INDEX);
        assert_eq!(canvas.get_index(0, 0), BACKGROUND_INDEX);

        canvas.set_index(0, 0, FONT_INDEX);
        canvas.toggle_index(0, 0, GRID_INDEX);
        assert_eq!(canvas.get_index(0, 0), FONT_INDEX ^ GRID_INDEX);
    }

    #[test]
    #[should_panic]
    fn out_of_range_panics() {
        let canvas = IndexedCanvas::new(2, 2);
        canvas.get_index(2, 0);
    }
}
