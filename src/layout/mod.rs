pub mod fixed;
pub mod glyph;
