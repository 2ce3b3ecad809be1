pub mod clipboard;
pub mod pdf_render;
