//! Seam between the viewer core and the library that decodes and rasterizes pages

use crate::error::{LoadError, RenderError};

/// Output size of a page at a given scale, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    /// Page size in points scaled to pixels, rounded up so nothing is cropped
    pub fn from_points(width_pts: f32, height_pts: f32, scale: f32) -> Self {
        Self {
            width: (width_pts * scale).ceil().max(1.0) as i32,
            height: (height_pts * scale).ceil().max(1.0) as i32,
        }
    }
}

/// A rasterized page as tightly packed BGRA8 rows
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub width: i32,
    pub height: i32,
    pub stride: usize,
    pub pixels: Vec<u8>,
}

/// A decoded document that can report page geometry and draw pages.
///
/// Page indices are zero-based here; the controller does the one-based
/// translation.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Page width and height in PDF points
    fn page_size_points(&self, page_index: usize) -> Result<(f32, f32), RenderError>;

    fn rasterize(&self, page_index: usize, viewport: Viewport) -> Result<RenderedPage, RenderError>;
}

/// Turns raw file bytes into a [`PageSource`]
pub trait PdfBackend {
    type Document: PageSource;

    fn load(&self, bytes: Vec<u8>) -> Result<Self::Document, LoadError>;
}
