//! Page navigation and render bookkeeping

use super::backend::{PageSource, PdfBackend, RenderedPage, Viewport};
use crate::error::{LoadError, RenderError};

pub const DEFAULT_RENDER_SCALE: f32 = 1.5;

/// Identifier of a render request; later requests get larger tickets
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket(pub u64);

/// Which page is on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerState {
    /// One-based page number
    pub current_page: usize,
    pub page_count: usize,
}

/// A page render that has been asked for but not yet applied
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderRequest {
    pub ticket: RenderTicket,
    /// One-based page number
    pub page: usize,
    pub scale: f32,
}

/// How a finished render should be handled by the display
#[derive(Debug)]
pub enum RenderOutcome {
    Drawn(RenderedPage),
    /// A newer request was issued after this one; the result was dropped
    Stale(RenderTicket),
    Failed(RenderError),
}

/// Owns the loaded document and the current page.
///
/// Rendering is split in two steps so the caller can defer the expensive
/// part: a navigation call hands out a [`RenderRequest`], and the caller
/// later runs [`PageController::render`] and feeds the result back through
/// [`PageController::complete_render`]. Only the most recent request is
/// allowed to reach the screen.
pub struct PageController<D: PageSource> {
    document: Option<D>,
    state: Option<ViewerState>,
    scale: f32,
    next_ticket: u64,
    latest: Option<RenderTicket>,
}

impl<D: PageSource> PageController<D> {
    pub fn new(scale: f32) -> Self {
        Self {
            document: None,
            state: None,
            scale,
            next_ticket: 1,
            latest: None,
        }
    }

    /// Replace the current document with one decoded from `bytes`.
    ///
    /// The controller is emptied first, so a failed load never leaves a
    /// half-loaded document behind.
    pub fn load_document<B>(&mut self, backend: &B, bytes: Vec<u8>) -> Result<RenderRequest, LoadError>
    where
        B: PdfBackend<Document = D>,
    {
        self.clear();

        let document = backend.load(bytes).inspect_err(|e| {
            log::error!("Failed to load document: {}", e);
        })?;

        let page_count = document.page_count();
        if page_count == 0 {
            log::error!("Failed to load document: {}", LoadError::NoPages);
            return Err(LoadError::NoPages);
        }

        log::info!("Loaded document with {} pages", page_count);
        self.document = Some(document);
        self.state = Some(ViewerState {
            current_page: 1,
            page_count,
        });

        Ok(self.issue_request(1))
    }

    /// Change the render scale. The viewer is emptied; tickets keep counting
    /// up so requests issued before the change can never be mistaken for
    /// new ones.
    pub fn set_scale(&mut self, scale: f32) {
        self.clear();
        self.scale = scale;
    }

    /// Drop the document and forget any render still in flight
    pub fn clear(&mut self) {
        self.document = None;
        self.state = None;
        self.latest = None;
    }

    /// Show page `page` (one-based). Out-of-range pages are ignored.
    pub fn goto_page(&mut self, page: usize) -> Option<RenderRequest> {
        let state = self.state.as_mut()?;
        if page < 1 || page > state.page_count {
            log::debug!("Ignoring navigation to page {} of {}", page, state.page_count);
            return None;
        }

        state.current_page = page;
        Some(self.issue_request(page))
    }

    pub fn next_page(&mut self) -> Option<RenderRequest> {
        let current = self.current_page()?;
        self.goto_page(current + 1)
    }

    pub fn previous_page(&mut self) -> Option<RenderRequest> {
        let current = self.current_page()?;
        if current <= 1 {
            return None;
        }
        self.goto_page(current - 1)
    }

    pub fn render_current_page(&mut self) -> Option<RenderRequest> {
        let current = self.current_page()?;
        Some(self.issue_request(current))
    }

    /// Rasterize the page named by `request` at its viewport size
    pub fn render(&self, request: &RenderRequest) -> Result<RenderedPage, RenderError> {
        let document = self.document.as_ref().ok_or(RenderError::NoDocument)?;
        let page_count = document.page_count();
        if request.page < 1 || request.page > page_count {
            return Err(RenderError::PageOutOfRange {
                page: request.page,
                page_count,
            });
        }

        let index = request.page - 1;
        let (width_pts, height_pts) = document.page_size_points(index)?;
        let viewport = Viewport::from_points(width_pts, height_pts, request.scale);
        document.rasterize(index, viewport)
    }

    /// Decide whether a finished render may be drawn
    pub fn complete_render(
        &self,
        request: &RenderRequest,
        result: Result<RenderedPage, RenderError>,
    ) -> RenderOutcome {
        if !self.is_latest(request.ticket) {
            log::debug!(
                "Discarding stale render of page {} ({:?})",
                request.page,
                request.ticket
            );
            return RenderOutcome::Stale(request.ticket);
        }

        match result {
            Ok(page) => {
                log::debug!(
                    "Rendered page {} at {}x{}",
                    request.page,
                    page.width,
                    page.height
                );
                RenderOutcome::Drawn(page)
            }
            Err(e) => {
                log::error!("Failed to render page {}: {}", request.page, e);
                RenderOutcome::Failed(e)
            }
        }
    }

    pub fn is_latest(&self, ticket: RenderTicket) -> bool {
        self.latest == Some(ticket)
    }

    pub fn state(&self) -> Option<ViewerState> {
        self.state
    }

    pub fn current_page(&self) -> Option<usize> {
        self.state.map(|s| s.current_page)
    }

    pub fn page_count(&self) -> Option<usize> {
        self.state.map(|s| s.page_count)
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn issue_request(&mut self, page: usize) -> RenderRequest {
        let ticket = RenderTicket(self.next_ticket);
        self.next_ticket += 1;
        self.latest = Some(ticket);

        RenderRequest {
            ticket,
            page,
            scale: self.scale,
        }
    }
}

impl<D: PageSource> Default for PageController<D> {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_SCALE)
    }
}
