mod coordinate_bar;
mod page_canvas;
mod selection_overlay;
mod viewer_header_bar;
mod viewer_window;

pub use coordinate_bar::CoordinateBar;
pub use page_canvas::PageCanvas;
pub use selection_overlay::SelectionOverlay;
pub use viewer_header_bar::ViewerHeaderBar;
pub use viewer_window::ViewerWindow;
