pub mod backend;
pub mod page_controller;
pub mod selection;

pub use backend::{PageSource, PdfBackend, RenderedPage, Viewport};
pub use page_controller::{
    DEFAULT_RENDER_SCALE, PageController, RenderOutcome, RenderRequest, RenderTicket, ViewerState,
};
pub use selection::{GesturePhase, NormalizedRect, Point, Selection, SelectionTracker, SelectionUpdate};
