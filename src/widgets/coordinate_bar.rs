use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;

const PLACEHOLDER: &str = "Drag over the page to select a region";

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct CoordinateBar {
        pub label: gtk::Label,
        pub copy_button: gtk::Button,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for CoordinateBar {
        const NAME: &'static str = "SnipCoordinateBar";
        type Type = super::CoordinateBar;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for CoordinateBar {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.set_orientation(gtk::Orientation::Horizontal);
            obj.set_spacing(8);
            obj.set_margin_start(12);
            obj.set_margin_end(12);
            obj.set_margin_top(6);
            obj.set_margin_bottom(6);

            self.label.set_hexpand(true);
            self.label.set_xalign(0.0);
            self.label.set_selectable(true);
            self.label.add_css_class("monospace");

            self.copy_button.set_label("Copy");
            self.copy_button.set_tooltip_text(Some("Copy coordinates to the clipboard"));

            obj.append(&self.label);
            obj.append(&self.copy_button);
            obj.clear();
        }
    }

    impl WidgetImpl for CoordinateBar {}
    impl BoxImpl for CoordinateBar {}
}

glib::wrapper! {
    /// Shows the raw corners of the current selection with a copy button.
    pub struct CoordinateBar(ObjectSubclass<imp::CoordinateBar>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl Default for CoordinateBar {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateBar {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    /// Show `text`; an empty string restores the placeholder and disables copying
    pub fn set_coordinates(&self, text: &str) {
        let imp = self.imp();
        if text.is_empty() {
            self.clear();
            return;
        }
        imp.label.set_text(text);
        imp.label.remove_css_class("dim-label");
        imp.copy_button.set_sensitive(true);
    }

    pub fn clear(&self) {
        let imp = self.imp();
        imp.label.set_text(PLACEHOLDER);
        imp.label.add_css_class("dim-label");
        imp.copy_button.set_sensitive(false);
    }

    /// The coordinate text, or `None` while the placeholder is shown
    pub fn coordinates(&self) -> Option<String> {
        let imp = self.imp();
        if !imp.copy_button.is_sensitive() {
            return None;
        }
        Some(imp.label.text().to_string())
    }

    pub fn copy_button(&self) -> &gtk::Button {
        &self.imp().copy_button
    }
}
