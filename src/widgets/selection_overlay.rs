use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use std::cell::{Cell, RefCell};

use crate::viewer::NormalizedRect;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct SelectionOverlay {
        pub rect: RefCell<Option<NormalizedRect>>,
        /// Drawn with a dashed border while the gesture is still running
        pub dragging: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SelectionOverlay {
        const NAME: &'static str = "SnipSelectionOverlay";
        type Type = super::SelectionOverlay;
        type ParentType = gtk::DrawingArea;
    }

    impl ObjectImpl for SelectionOverlay {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_drawing();
        }
    }

    impl WidgetImpl for SelectionOverlay {}
    impl DrawingAreaImpl for SelectionOverlay {}
}

glib::wrapper! {
    /// Transparent layer over the page that paints the selection rectangle
    pub struct SelectionOverlay(ObjectSubclass<imp::SelectionOverlay>)
        @extends gtk::DrawingArea, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl SelectionOverlay {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_drawing(&self) {
        // Pointer events go to the page underneath
        self.set_can_target(false);

        let overlay_weak = self.downgrade();
        self.set_draw_func(move |_area, cr, _width, _height| {
            if let Some(overlay) = overlay_weak.upgrade() {
                overlay.draw(cr);
            }
        });
    }

    fn draw(&self, cr: &gtk::cairo::Context) {
        let Some(rect) = *self.imp().rect.borrow() else {
            return;
        };

        cr.set_source_rgba(0.2, 0.4, 0.8, 0.25);
        cr.rectangle(rect.left, rect.top, rect.width, rect.height);
        let _ = cr.fill();

        cr.set_source_rgba(0.2, 0.4, 0.8, 0.9);
        cr.set_line_width(1.0);
        if self.imp().dragging.get() {
            cr.set_dash(&[4.0, 3.0], 0.0);
        }
        // Half-pixel offset keeps the 1px border crisp
        cr.rectangle(rect.left + 0.5, rect.top + 0.5, rect.width, rect.height);
        let _ = cr.stroke();
    }

    pub fn set_rect(&self, rect: Option<NormalizedRect>, dragging: bool) {
        self.imp().rect.replace(rect);
        self.imp().dragging.set(dragging);
        self.queue_draw();
    }

    pub fn clear(&self) {
        self.set_rect(None, false);
    }
}

impl Default for SelectionOverlay {
    fn default() -> Self {
        Self::new()
    }
}
