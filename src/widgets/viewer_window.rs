use gtk::gio;
use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{ApplicationWindow, Box, Orientation, PolicyType, ScrolledWindow};
use pdfium_render::prelude::Pdfium;
use std::path::Path;

use crate::services::clipboard;
use crate::widgets::{CoordinateBar, PageCanvas, ViewerHeaderBar};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ViewerWindow {
        pub header_bar: ViewerHeaderBar,
        pub canvas: PageCanvas,
        pub coordinate_bar: CoordinateBar,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ViewerWindow {
        const NAME: &'static str = "SnipViewerWindow";
        type Type = super::ViewerWindow;
        type ParentType = ApplicationWindow;
    }

    impl ObjectImpl for ViewerWindow {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }
    }

    impl WidgetImpl for ViewerWindow {}
    impl WindowImpl for ViewerWindow {}
    impl ApplicationWindowImpl for ViewerWindow {}
}

glib::wrapper! {
    pub struct ViewerWindow(ObjectSubclass<imp::ViewerWindow>)
        @extends ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gio::ActionGroup, gio::ActionMap, gtk::Accessible, gtk::Buildable,
                    gtk::ConstraintTarget, gtk::Native, gtk::Root, gtk::ShortcutManager;
}

impl ViewerWindow {
    pub fn new(app: &gtk::Application, pdfium: &'static Pdfium, render_scale: f32) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("title", "Snipview")
            .property("default-width", 1000)
            .property("default-height", 800)
            .build();

        let canvas = &window.imp().canvas;
        canvas.set_render_scale(render_scale);
        canvas.set_pdfium(pdfium);
        window
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        self.set_titlebar(Some(imp.header_bar.widget()));

        let scrolled_window = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Automatic)
            .vscrollbar_policy(PolicyType::Automatic)
            .vexpand(true)
            .hexpand(true)
            .child(&imp.canvas)
            .build();

        let main_box = Box::builder().orientation(Orientation::Vertical).build();
        main_box.append(&scrolled_window);
        main_box.append(&gtk::Separator::new(Orientation::Horizontal));
        main_box.append(&imp.coordinate_bar);
        self.set_child(Some(&main_box));

        self.setup_open_button();
        self.setup_navigation();
        self.setup_canvas_signals();
        self.setup_copy_button();
        self.setup_keyboard_controller();
    }

    fn setup_navigation(&self) {
        let imp = self.imp();

        let canvas = imp.canvas.clone();
        imp.header_bar.prev_button().connect_clicked(move |_| {
            canvas.previous_page();
        });

        let canvas = imp.canvas.clone();
        imp.header_bar.next_button().connect_clicked(move |_| {
            canvas.next_page();
        });

        let canvas = imp.canvas.clone();
        imp.header_bar.connect_closure(
            "page-selected",
            false,
            glib::closure_local!(move |_bar: &ViewerHeaderBar, page: u32| {
                canvas.goto_page(page as usize);
            }),
        );
    }

    fn setup_canvas_signals(&self) {
        let imp = self.imp();

        let header_bar = imp.header_bar.clone();
        imp.canvas.connect_closure(
            "page-changed",
            false,
            glib::closure_local!(move |_canvas: &PageCanvas, current: u32, count: u32| {
                header_bar.set_page_state(current, count);
            }),
        );

        let coordinate_bar = imp.coordinate_bar.clone();
        imp.canvas.connect_closure(
            "selection-changed",
            false,
            glib::closure_local!(move |_canvas: &PageCanvas, label: &str| {
                coordinate_bar.set_coordinates(label);
            }),
        );
    }

    fn setup_copy_button(&self) {
        let window_weak = self.downgrade();

        self.imp()
            .coordinate_bar
            .copy_button()
            .connect_clicked(move |_| {
                if let Some(window) = window_weak.upgrade() {
                    window.copy_coordinates();
                }
            });
    }

    fn copy_coordinates(&self) {
        let Some(text) = self.imp().coordinate_bar.coordinates() else {
            return;
        };

        let result = clipboard::copy_to_clipboard(&text);
        if let Err(e) = &result {
            log::warn!("{}", e);
        }

        let (message, detail) = clipboard::acknowledgment(&result);
        let dialog = gtk::AlertDialog::builder().message(message).modal(true).build();
        if let Some(detail) = detail {
            dialog.set_detail(&detail);
        }
        dialog.show(Some(self));
    }

    fn setup_keyboard_controller(&self) {
        let controller = gtk::EventControllerKey::new();
        let window_weak = self.downgrade();

        controller.connect_key_pressed(move |_, key, _, state| {
            let Some(window) = window_weak.upgrade() else {
                return glib::Propagation::Proceed;
            };
            let canvas = &window.imp().canvas;

            match key {
                gtk::gdk::Key::Left | gtk::gdk::Key::Page_Up => canvas.previous_page(),
                gtk::gdk::Key::Right | gtk::gdk::Key::Page_Down => canvas.next_page(),
                gtk::gdk::Key::o if state.contains(gtk::gdk::ModifierType::CONTROL_MASK) => {
                    window.show_open_dialog();
                }
                _ => return glib::Propagation::Proceed,
            }
            glib::Propagation::Stop
        });

        self.add_controller(controller);
    }

    fn setup_open_button(&self) {
        let window_weak = self.downgrade();

        self.imp()
            .header_bar
            .open_button()
            .connect_clicked(move |_| {
                if let Some(window) = window_weak.upgrade() {
                    window.show_open_dialog();
                }
            });
    }

    fn show_open_dialog(&self) {
        let pdf_filter = gtk::FileFilter::new();
        pdf_filter.set_name(Some("PDF documents"));
        pdf_filter.add_mime_type("application/pdf");
        pdf_filter.add_suffix("pdf");

        let any_filter = gtk::FileFilter::new();
        any_filter.set_name(Some("All files"));
        any_filter.add_pattern("*");

        let filters = gio::ListStore::new::<gtk::FileFilter>();
        filters.append(&pdf_filter);
        filters.append(&any_filter);

        let dialog = gtk::FileDialog::builder()
            .title("Select a PDF")
            .filters(&filters)
            .default_filter(&pdf_filter)
            .build();
        let window_weak = self.downgrade();

        dialog.open(Some(self), None::<&gio::Cancellable>, move |result| {
            if let Some(window) = window_weak.upgrade() {
                window.handle_file_dialog_result(result);
            }
        });
    }

    fn handle_file_dialog_result(&self, result: Result<gio::File, glib::Error>) {
        let file = match result {
            Ok(f) => f,
            Err(e) => {
                log::debug!("File dialog closed: {}", e);
                return;
            }
        };

        let Some(path) = file.path() else {
            log::warn!("Selected file has no local path");
            return;
        };

        self.open_file(&path, None);
    }

    /// Load `path`, then jump to `start_page` if it names a page of the document
    pub fn open_file(&self, path: &Path, start_page: Option<usize>) {
        let canvas = &self.imp().canvas;

        // Load failures are already logged; the viewer is left empty
        if canvas.load_file(path).is_err() {
            self.set_title(Some("Snipview"));
            return;
        }

        self.set_title(Some(&format!(
            "Snipview - {}",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        )));

        if let Some(page) = start_page.filter(|&p| p != 1) {
            canvas.goto_page(page);
        }
    }
}
