pub mod canvas;
pub mod geometry;
pub mod lines;
pub mod palette;
