pub mod atlas;
mod builtin;
pub mod composite;

/// Width of one atlas glyph cell in pixels.
pub const GLYPH_WIDTH: u32 = 6;
/// Height of one atlas glyph cell in pixels.
pub const GLYPH_HEIGHT: u32 = 9;
