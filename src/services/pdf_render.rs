use pdfium_render::prelude::*;
use std::path::Path;

use crate::error::{LoadError, RenderError};
use crate::viewer::{PageSource, PdfBackend, RenderedPage, Viewport};

/// Locate and bind the PDFium shared library.
///
/// Tries `dir` first when given, then the working directory, then the
/// system library search path. The binding lives for the whole process.
pub fn bind_pdfium(dir: Option<&Path>) -> Result<&'static Pdfium, PdfiumError> {
    let bindings = match dir {
        Some(dir) => Pdfium::bind_to_library(dir.join(Pdfium::pdfium_platform_library_name()))
            .or_else(|e| {
                log::warn!("No PDFium library in {}: {}", dir.display(), e);
                bind_default_library()
            }),
        None => bind_default_library(),
    }?;

    log::info!("Bound PDFium library");
    Ok(Box::leak(Box::new(Pdfium::new(bindings))))
}

fn bind_default_library() -> Result<Box<dyn PdfiumLibraryBindings>, PdfiumError> {
    Pdfium::bind_to_library(Path::new(".").join(Pdfium::pdfium_platform_library_name()))
        .or_else(|_| Pdfium::bind_to_system_library())
}

/// [`PdfBackend`] backed by PDFium
pub struct PdfiumBackend {
    pdfium: &'static Pdfium,
}

impl PdfiumBackend {
    pub fn new(pdfium: &'static Pdfium) -> Self {
        Self { pdfium }
    }
}

impl PdfBackend for PdfiumBackend {
    type Document = PdfiumDocument;

    fn load(&self, bytes: Vec<u8>) -> Result<PdfiumDocument, LoadError> {
        let document = self
            .pdfium
            .load_pdf_from_byte_vec(bytes, None)
            .map_err(|e| LoadError::Rejected(e.to_string()))?;
        Ok(PdfiumDocument { document })
    }
}

pub struct PdfiumDocument {
    document: PdfDocument<'static>,
}

impl PdfiumDocument {
    fn page(&self, page_index: usize) -> Result<PdfPage<'_>, RenderError> {
        let page_count = self.page_count();
        if page_index >= page_count {
            return Err(RenderError::PageOutOfRange {
                page: page_index + 1,
                page_count,
            });
        }

        self.document
            .pages()
            .get(page_index as u16)
            .map_err(|e| RenderError::Backend(e.to_string()))
    }
}

impl PageSource for PdfiumDocument {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_size_points(&self, page_index: usize) -> Result<(f32, f32), RenderError> {
        let page = self.page(page_index)?;
        Ok((page.width().value, page.height().value))
    }

    fn rasterize(&self, page_index: usize, viewport: Viewport) -> Result<RenderedPage, RenderError> {
        let page = self.page(page_index)?;
        let config = create_render_config(viewport);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| RenderError::Backend(e.to_string()))?;

        Ok(bitmap_to_page(&bitmap))
    }
}

/// The viewport already carries the page's aspect ratio, so both edges are
/// pinned and the bitmap matches it pixel for pixel.
fn create_render_config(viewport: Viewport) -> PdfRenderConfig {
    PdfRenderConfig::new()
        .set_target_size(viewport.width, viewport.height)
        .set_format(PdfBitmapFormat::BGRA)
}

fn bitmap_to_page(bitmap: &PdfBitmap) -> RenderedPage {
    let width = bitmap.width() as i32;
    let height = bitmap.height() as i32;
    let pixels = bitmap.as_raw_bytes();
    RenderedPage {
        width,
        height,
        stride: row_stride(pixels.len(), width, height),
        pixels,
    }
}

/// PDFium may pad rows; derive the stride from the buffer rather than the width
fn row_stride(len: usize, width: i32, height: i32) -> usize {
    let packed = width.max(0) as usize * 4;
    if height <= 0 {
        return packed;
    }
    (len / height as usize).max(packed)
}
