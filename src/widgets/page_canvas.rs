use glib::subclass::Signal;
use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{GestureDrag, Overlay, Picture};
use pdfium_render::prelude::Pdfium;
use std::cell::RefCell;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::LoadError;
use crate::services::pdf_render::{PdfiumBackend, PdfiumDocument};
use crate::viewer::{
    PageController, Point, RenderOutcome, RenderRequest, RenderedPage, SelectionTracker,
};
use crate::widgets::SelectionOverlay;

mod imp {
    use super::*;

    pub struct PageCanvas {
        pub backend: RefCell<Option<PdfiumBackend>>,
        pub controller: RefCell<PageController<PdfiumDocument>>,
        pub tracker: RefCell<SelectionTracker>,
        pub overlay: Overlay,
        pub picture: Picture,
        pub selection_overlay: SelectionOverlay,
    }

    impl Default for PageCanvas {
        fn default() -> Self {
            Self {
                backend: RefCell::new(None),
                controller: RefCell::new(PageController::default()),
                tracker: RefCell::new(SelectionTracker::new()),
                overlay: Overlay::new(),
                picture: Picture::builder().can_shrink(false).build(),
                selection_overlay: SelectionOverlay::new(),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for PageCanvas {
        const NAME: &'static str = "SnipPageCanvas";
        type Type = super::PageCanvas;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for PageCanvas {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }

        fn signals() -> &'static [Signal] {
            static SIGNALS: OnceLock<Vec<Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![
                    // (current page, page count); both 0 when nothing is loaded
                    Signal::builder("page-changed")
                        .param_types([u32::static_type(), u32::static_type()])
                        .build(),
                    // coordinate label, empty when the selection was dropped
                    Signal::builder("selection-changed")
                        .param_types([String::static_type()])
                        .build(),
                ]
            })
        }
    }

    impl WidgetImpl for PageCanvas {}
    impl BoxImpl for PageCanvas {}
}

glib::wrapper! {
    /// Shows one rendered page and turns drags over it into a selection
    pub struct PageCanvas(ObjectSubclass<imp::PageCanvas>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl PageCanvas {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_widgets(&self) {
        let imp = self.imp();
        self.set_halign(gtk::Align::Center);
        self.set_valign(gtk::Align::Start);
        self.set_margin_top(10);
        self.set_margin_bottom(10);

        // The overlay is exactly as large as the page, so gesture
        // coordinates are page pixel coordinates.
        imp.overlay.set_halign(gtk::Align::Start);
        imp.overlay.set_valign(gtk::Align::Start);
        imp.overlay.set_child(Some(&imp.picture));
        imp.overlay.add_overlay(&imp.selection_overlay);
        self.append(&imp.overlay);

        self.setup_selection_gesture();
    }

    /// Attach the drag controller once; renders never touch it
    fn setup_selection_gesture(&self) {
        let drag = GestureDrag::new();
        drag.set_button(gtk::gdk::BUTTON_PRIMARY);

        let canvas_weak = self.downgrade();
        drag.connect_drag_begin(move |_, x, y| {
            if let Some(canvas) = canvas_weak.upgrade() {
                canvas.handle_press(Point::new(x, y));
            }
        });

        let canvas_weak = self.downgrade();
        drag.connect_drag_update(move |gesture, dx, dy| {
            if let (Some(canvas), Some((x, y))) = (canvas_weak.upgrade(), gesture.start_point()) {
                canvas.handle_motion(Point::new(x + dx, y + dy));
            }
        });

        let canvas_weak = self.downgrade();
        drag.connect_drag_end(move |_, _, _| {
            if let Some(canvas) = canvas_weak.upgrade() {
                canvas.handle_release();
            }
        });

        self.imp().overlay.add_controller(drag);
    }

    pub fn set_pdfium(&self, pdfium: &'static Pdfium) {
        self.imp().backend.replace(Some(PdfiumBackend::new(pdfium)));
    }

    /// Scale used for every render from now on. Resets the viewer.
    pub fn set_render_scale(&self, scale: f32) {
        self.clear();
        self.imp().controller.borrow_mut().set_scale(scale);
    }

    /// Read `path` and show its first page
    pub fn load_file(&self, path: &Path) -> Result<(), LoadError> {
        self.clear();
        log::info!("Opening {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| {
            let err = LoadError::Io {
                path: path.to_path_buf(),
                source,
            };
            log::error!("Failed to load document: {}", err);
            err
        })?;

        self.load_bytes(bytes)
    }

    pub fn load_bytes(&self, bytes: Vec<u8>) -> Result<(), LoadError> {
        self.clear();

        let request = {
            let backend = self.imp().backend.borrow();
            let backend = backend
                .as_ref()
                .ok_or_else(|| LoadError::Rejected("PDFium is not initialized".to_string()))?;
            self.imp()
                .controller
                .borrow_mut()
                .load_document(backend, bytes)?
        };

        self.notify_page_changed();
        self.schedule_render(request);
        Ok(())
    }

    /// Back to the empty state: no document, no page, no selection
    pub fn clear(&self) {
        let imp = self.imp();
        imp.controller.borrow_mut().clear();
        imp.tracker.borrow_mut().reset();
        imp.picture.set_paintable(gtk::gdk::Paintable::NONE);
        imp.picture.set_size_request(-1, -1);
        imp.selection_overlay.clear();

        self.notify_page_changed();
        self.emit_by_name::<()>("selection-changed", &[&String::new()]);
    }

    pub fn goto_page(&self, page: usize) {
        let request = self.imp().controller.borrow_mut().goto_page(page);
        self.navigate(request);
    }

    pub fn next_page(&self) {
        let request = self.imp().controller.borrow_mut().next_page();
        self.navigate(request);
    }

    pub fn previous_page(&self) {
        let request = self.imp().controller.borrow_mut().previous_page();
        self.navigate(request);
    }

    fn navigate(&self, request: Option<RenderRequest>) {
        if let Some(request) = request {
            self.notify_page_changed();
            self.schedule_render(request);
        }
    }

    /// Queue the render on the main loop; the call returns before anything is drawn
    fn schedule_render(&self, request: RenderRequest) {
        let canvas_weak = self.downgrade();
        glib::idle_add_local_once(move || {
            if let Some(canvas) = canvas_weak.upgrade() {
                canvas.finish_render(request);
            }
        });
    }

    fn finish_render(&self, request: RenderRequest) {
        let outcome = {
            let controller = self.imp().controller.borrow();
            if controller.is_latest(request.ticket) {
                let result = controller.render(&request);
                controller.complete_render(&request, result)
            } else {
                RenderOutcome::Stale(request.ticket)
            }
        };

        if let RenderOutcome::Drawn(page) = outcome {
            self.draw_page(page);
        }
    }

    fn draw_page(&self, page: RenderedPage) {
        let imp = self.imp();
        let bytes = glib::Bytes::from_owned(page.pixels);
        let texture = gtk::gdk::MemoryTexture::new(
            page.width,
            page.height,
            gtk::gdk::MemoryFormat::B8g8r8a8,
            &bytes,
            page.stride,
        );

        imp.picture.set_size_request(page.width, page.height);
        imp.picture.set_paintable(Some(&texture));
        imp.selection_overlay.set_content_width(page.width);
        imp.selection_overlay.set_content_height(page.height);
    }

    fn handle_press(&self, point: Point) {
        if !self.has_document() {
            return;
        }
        self.imp().tracker.borrow_mut().press(point);
    }

    fn handle_motion(&self, point: Point) {
        let update = self.imp().tracker.borrow_mut().motion(point);
        if let Some(update) = update {
            self.imp().selection_overlay.set_rect(Some(update.rect), true);
            self.emit_by_name::<()>("selection-changed", &[&update.label]);
        }
    }

    fn handle_release(&self) {
        // A click without movement commits an empty rectangle at the press
        // point. No motion means no new label, so the coordinate bar keeps
        // showing the previous drag until the next move.
        let committed = self.imp().tracker.borrow_mut().release();
        if let Some(rect) = committed {
            self.imp().selection_overlay.set_rect(Some(rect), false);
        }
    }

    fn notify_page_changed(&self) {
        let state = self.imp().controller.borrow().state();
        let (current, count) = state
            .map(|s| (s.current_page as u32, s.page_count as u32))
            .unwrap_or((0, 0));
        self.emit_by_name::<()>("page-changed", &[&current, &count]);
    }

    pub fn has_document(&self) -> bool {
        self.imp().controller.borrow().is_loaded()
    }
}

impl Default for PageCanvas {
    fn default() -> Self {
        Self::new()
    }
}
