use glib::subclass::Signal;
use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{Button, DropDown, HeaderBar, StringList};
use std::cell::Cell;
use std::sync::OnceLock;

mod imp {
    use super::*;

    pub struct ViewerHeaderBar {
        pub header_bar: HeaderBar,
        pub open_button: Button,
        pub prev_button: Button,
        pub next_button: Button,
        pub page_dropdown: DropDown,
        pub page_list: StringList,
        pub page_count: Cell<u32>,
        /// Set while the dropdown is changed from code, so it does not echo back
        pub syncing: Cell<bool>,
    }

    impl Default for ViewerHeaderBar {
        fn default() -> Self {
            let page_list = StringList::new(&[]);
            let page_dropdown = DropDown::new(Some(page_list.clone()), None::<gtk::Expression>);

            Self {
                header_bar: HeaderBar::new(),
                open_button: Button::new(),
                prev_button: Button::new(),
                next_button: Button::new(),
                page_dropdown,
                page_list,
                page_count: Cell::new(0),
                syncing: Cell::new(false),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ViewerHeaderBar {
        const NAME: &'static str = "SnipViewerHeaderBar";
        type Type = super::ViewerHeaderBar;
        type ParentType = glib::Object;
    }

    impl ObjectImpl for ViewerHeaderBar {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }

        fn signals() -> &'static [Signal] {
            static SIGNALS: OnceLock<Vec<Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![Signal::builder("page-selected")
                    .param_types([u32::static_type()])
                    .build()]
            })
        }
    }
}

glib::wrapper! {
    pub struct ViewerHeaderBar(ObjectSubclass<imp::ViewerHeaderBar>);
}

impl ViewerHeaderBar {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        imp.header_bar
            .set_title_widget(Some(&gtk::Label::new(Some("Snipview"))));
        imp.header_bar.set_show_title_buttons(true);

        imp.open_button.set_label("Open PDF");
        imp.header_bar.pack_start(&imp.open_button);

        imp.prev_button.set_icon_name("go-previous-symbolic");
        imp.prev_button.set_tooltip_text(Some("Previous page"));
        imp.next_button.set_icon_name("go-next-symbolic");
        imp.next_button.set_tooltip_text(Some("Next page"));

        let nav_box = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        nav_box.add_css_class("linked");
        nav_box.append(&imp.prev_button);
        nav_box.append(&imp.page_dropdown);
        nav_box.append(&imp.next_button);
        imp.header_bar.pack_start(&nav_box);

        let bar_weak = self.downgrade();
        imp.page_dropdown.connect_selected_notify(move |dropdown| {
            let Some(bar) = bar_weak.upgrade() else {
                return;
            };
            let selected = dropdown.selected();
            if bar.imp().syncing.get() || selected == gtk::INVALID_LIST_POSITION {
                return;
            }
            bar.emit_by_name::<()>("page-selected", &[&(selected + 1)]);
        });

        self.set_page_state(0, 0);
    }

    /// Reflect the viewer's page in the dropdown and buttons.
    ///
    /// `page_count == 0` means no document is loaded.
    pub fn set_page_state(&self, current_page: u32, page_count: u32) {
        let imp = self.imp();
        imp.syncing.set(true);

        if imp.page_count.get() != page_count {
            let labels: Vec<String> = (1..=page_count).map(|i| format!("Page {}", i)).collect();
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            imp.page_list.splice(0, imp.page_list.n_items(), &labels);
            imp.page_count.set(page_count);
        }

        if page_count == 0 {
            imp.page_dropdown.set_selected(gtk::INVALID_LIST_POSITION);
        } else {
            imp.page_dropdown.set_selected(current_page.saturating_sub(1));
        }

        imp.page_dropdown.set_sensitive(page_count > 0);
        imp.prev_button.set_sensitive(current_page > 1);
        imp.next_button.set_sensitive(page_count > 0 && current_page < page_count);

        imp.syncing.set(false);
    }

    /// Returns the HeaderBar widget to be used with set_titlebar()
    pub fn widget(&self) -> &HeaderBar {
        &self.imp().header_bar
    }

    pub fn open_button(&self) -> &Button {
        &self.imp().open_button
    }

    pub fn prev_button(&self) -> &Button {
        &self.imp().prev_button
    }

    pub fn next_button(&self) -> &Button {
        &self.imp().next_button
    }
}

impl Default for ViewerHeaderBar {
    fn default() -> Self {
        Self::new()
    }
}
