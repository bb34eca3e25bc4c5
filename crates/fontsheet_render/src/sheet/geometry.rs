use crate::{SheetConfig, SheetError};

/// Largest width or height an output sheet may have.
const MAX_DIMENSION: u64 = u16::MAX as u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetGeometry {
    /// Number of characters placed on the sheet.
    pub chars: u32,
    pub columns: u32,
    pub rows: u32,
    pub total_width: u32,
    pub total_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

impl SheetGeometry {
    pub fn derive(config: &SheetConfig) -> Result<Self, SheetError> {
        if config.last_char < config.first_char {
            return Err(SheetError::InvalidCharRange {
                first: config.first_char,
                last: config.last_char,
            });
        }
        if config.cell_width == 0 || config.cell_height == 0 {
            return Err(SheetError::InvalidCell {
                width: config.cell_width,
                height: config.cell_height,
            });
        }
        if config.baseline >= config.cell_height {
            return Err(SheetError::InvalidBaseline {
                baseline: config.baseline,
                height: config.cell_height,
            });
        }

        let chars = u64::from(config.last_char) - u64::from(config.first_char) + 1;
        let (columns, rows) = match u64::from(config.columns) {
            0 => (chars, 1),
            columns => (columns, chars.div_ceil(columns)),
        };

        let border = if config.strip { 0 } else { 1 };
        let width = columns * u64::from(config.cell_width) + border;
        let height = rows * u64::from(config.cell_height) + border;
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SheetError::TooLarge { width, height });
        }

        // Both sides fit in u16, so the cell counts fit in u32.
        Ok(Self {
            chars: chars as u32,
            columns: columns as u32,
            rows: rows as u32,
            total_width: width as u32,
            total_height: height as u32,
            offset_x: border as u32,
            offset_y: border as u32,
        })
    }

    /// Grid position of the character at `index` within the range.
    pub fn cell_position(&self, index: u32) -> (u32, u32) {
        (index % self.columns, index / self.columns)
    }
}
