//! The titlebar widget
//!
//! Owns the bar subtree and mediates every insertion into its three slots.
//! Only one titlebar per document is supported: a second instance does not
//! insert another bar, and its slots stay detached from the page.

use log::{debug, info, warn};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::config::TitlebarOptions;
use crate::dom::{Callback, Document, Element, ElementRef, Node};
use crate::error::TitlebarResult;
use crate::hotkey::ShortcutRegistrar;
use crate::menu::{Menu, MenuBuilder};
use crate::style::style_sheet;

/// Id of the bar element, used to detect a second instance
pub const TITLEBAR_ID: &str = "titlebar";

/// Attribute marking an element as a window drag handle
pub const DRAG_REGION: &str = "data-tauri-drag-region";

/// One of the three fixed slots of the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Start,
    Middle,
    End,
}

/// How to populate an icon or button body
#[derive(Debug, Clone)]
pub enum InnerContent {
    /// Image reference, rendered as `<img>`
    Src(String),
    /// Raw markup, inserted verbatim
    Html(String),
    /// Node owned by the caller; the titlebar only attaches it
    Element(ElementRef),
}

impl InnerContent {
    fn into_node(self) -> Node {
        match self {
            InnerContent::Src(src) => Element::new("img")
                .with_attr("src", &src)
                .with_attr("alt", "Icon")
                .into(),
            InnerContent::Html(markup) => Node::Html(markup),
            InnerContent::Element(el) => Node::Element(el),
        }
    }
}

/// Titlebar controller
pub struct Titlebar {
    options: TitlebarOptions,
    bar: ElementRef,
    start: ElementRef,
    middle: ElementRef,
    end: ElementRef,
    registrar: Rc<dyn ShortcutRegistrar>,
    menu_count: Cell<usize>,
}

impl Titlebar {
    /// Inject the style sheet and the bar into `document`.
    ///
    /// Global shortcuts declared by menus are registered through `registrar`.
    pub fn new(
        document: &Document,
        options: TitlebarOptions,
        registrar: Rc<dyn ShortcutRegistrar>,
    ) -> Self {
        if let Err(e) = options.validate() {
            warn!("{}; generated selectors will not match", e);
        }
        document
            .head
            .borrow_mut()
            .append_child(Node::Html(style_sheet(&options)));

        let section = || {
            Element::new("div")
                .with_class(&format!("{}-section", options.class_name))
                .with_attr(DRAG_REGION, "")
                .into_ref()
        };
        let (start, middle, end) = (section(), section(), section());

        let bar = Element::new("div")
            .with_class(&options.class_name)
            .with_id(TITLEBAR_ID)
            .with_attr(DRAG_REGION, "")
            .with_child(start.clone())
            .with_child(middle.clone())
            .with_child(end.clone())
            .into_ref();

        if document.get_element_by_id(TITLEBAR_ID).is_some() {
            warn!("A titlebar already exists in this document; the new bar is not inserted");
        } else {
            document.body.borrow_mut().prepend_child(bar.clone());
            info!(
                "Titlebar created (class {:?}, height {}px)",
                options.class_name, options.height
            );
        }

        Self {
            options,
            bar,
            start,
            middle,
            end,
            registrar,
            menu_count: Cell::new(0),
        }
    }

    pub fn options(&self) -> &TitlebarOptions {
        &self.options
    }

    /// The bar element
    pub fn bar(&self) -> &ElementRef {
        &self.bar
    }

    /// Container of a slot
    pub fn slot(&self, position: Position) -> &ElementRef {
        match position {
            Position::Start => &self.start,
            Position::Middle => &self.middle,
            Position::End => &self.end,
        }
    }

    fn subclass(&self, name: &str) -> String {
        format!("{}-{}", self.options.class_name, name)
    }

    fn append(&self, position: Position, el: Element) -> ElementRef {
        let el = el.into_ref();
        self.slot(position).borrow_mut().append_child(el.clone());
        el
    }

    /// Add an icon to the start slot
    pub fn add_icon(&self, content: InnerContent) -> ElementRef {
        self.add_icon_at(content, Position::Start)
    }

    pub fn add_icon_at(&self, content: InnerContent, position: Position) -> ElementRef {
        let icon = Element::new("div")
            .with_class(&self.subclass("icon"))
            .with_child(content.into_node());
        self.append(position, icon)
    }

    /// Add a text title to the middle slot
    pub fn add_title(&self, text: &str) -> ElementRef {
        self.add_title_at(text, Position::Middle)
    }

    pub fn add_title_at(&self, text: &str, position: Position) -> ElementRef {
        let title = Element::new("div")
            .with_class(&self.subclass("title"))
            .with_text(text);
        self.append(position, title)
    }

    /// Add a clickable button to the end slot.
    ///
    /// Ids are not de-duplicated; keeping them unique is up to the caller.
    pub fn add_button(&self, id: &str, content: InnerContent, on_click: Callback) -> ElementRef {
        self.add_button_at(id, content, on_click, Position::End)
    }

    pub fn add_button_at(
        &self,
        id: &str,
        content: InnerContent,
        on_click: Callback,
        position: Position,
    ) -> ElementRef {
        let button = Element::new("div")
            .with_id(id)
            .with_class(&self.subclass("button"))
            .on("click", on_click)
            .with_child(content.into_node());
        self.append(position, button)
    }

    /// Add a dropdown menu to the start slot
    pub fn add_menu(&self, menu: &Menu) -> impl Future<Output = TitlebarResult<()>> {
        self.add_menu_at(menu, Position::Start)
    }

    /// Add a dropdown menu to a slot.
    ///
    /// The menu is inserted before this returns. The returned future registers
    /// the shortcuts declared by the tree, in document order, and resolves
    /// once all of them are active. A failed registration ends the future with
    /// that error; shortcuts registered before it stay registered.
    pub fn add_menu_at(
        &self,
        menu: &Menu,
        position: Position,
    ) -> impl Future<Output = TitlebarResult<()>> {
        let index = self.menu_count.get() + 1;
        self.menu_count.set(index);
        let menu_id = format!("{}-{}", self.subclass("menu"), index);

        let built = MenuBuilder::new(&self.options.class_name, position).build(menu, &menu_id);
        self.slot(position).borrow_mut().append_child(built.element);

        let shortcuts = built.shortcuts;
        let registrar = self.registrar.clone();
        async move {
            for shortcut in shortcuts {
                debug!("Registering shortcut {}", shortcut.accelerator);
                registrar
                    .register(&shortcut.accelerator, shortcut.action)
                    .await?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{dispatch, find_by_class};
    use crate::error::TitlebarError;
    use crate::hotkey::{LocalRegistrar, Shortcut};
    use crate::menu::MenuItem;
    use crate::render::to_html;
    use async_trait::async_trait;
    use std::cell::RefCell;

    fn setup() -> (Document, Rc<LocalRegistrar>, Titlebar) {
        let doc = Document::new();
        let registrar = Rc::new(LocalRegistrar::new());
        let tb = Titlebar::new(&doc, TitlebarOptions::default(), registrar.clone());
        (doc, registrar, tb)
    }

    fn class_of(el: &ElementRef) -> String {
        el.borrow().class_name().unwrap_or_default().to_string()
    }

    #[test]
    fn construction_injects_style_and_bar() {
        let (doc, _, tb) = setup();

        let head = doc.head.borrow();
        assert_eq!(head.children().len(), 1);
        assert!(matches!(&head.children()[0], Node::Html(css) if css.contains(".titlebar {")));

        let bar = doc.get_element_by_id(TITLEBAR_ID).unwrap();
        assert!(Rc::ptr_eq(&bar, tb.bar()));
        assert_eq!(class_of(&bar), "titlebar");
        assert!(bar.borrow().attr(DRAG_REGION).is_some());

        let sections = bar.borrow().child_elements();
        assert_eq!(sections.len(), 3);
        for (section, position) in sections.iter().zip([Position::Start, Position::Middle, Position::End]) {
            assert!(Rc::ptr_eq(section, tb.slot(position)));
            assert_eq!(class_of(section), "titlebar-section");
            assert!(section.borrow().attr(DRAG_REGION).is_some());
        }
    }

    #[test]
    fn bar_is_inserted_first_in_body() {
        let doc = Document::new();
        doc.body.borrow_mut().append_child(Element::new("main"));
        let _tb = Titlebar::new(&doc, TitlebarOptions::default(), Rc::new(LocalRegistrar::new()));
        let first = doc.body.borrow().child_elements()[0].clone();
        assert_eq!(first.borrow().id(), Some(TITLEBAR_ID));
    }

    #[test]
    fn second_instance_does_not_insert_another_bar() {
        let (doc, registrar, first) = setup();
        let second = Titlebar::new(&doc, TitlebarOptions::default(), registrar);

        assert_eq!(doc.body.borrow().child_elements().len(), 1);
        second.add_title("detached");
        assert!(first.slot(Position::Middle).borrow().children().is_empty());
        assert!(!doc.body.borrow().text_content().contains("detached"));
    }

    #[test]
    fn defaults_place_items_in_their_slots() {
        let (_, _, tb) = setup();
        tb.add_icon(InnerContent::Src("icon.svg".into()));
        tb.add_title("My Application");
        tb.add_button("close", InnerContent::Html("<p>X</p>".into()), Callback::new(|| {}));

        let start = tb.slot(Position::Start).borrow().child_elements();
        let middle = tb.slot(Position::Middle).borrow().child_elements();
        let end = tb.slot(Position::End).borrow().child_elements();
        assert_eq!(class_of(&start[0]), "titlebar-icon");
        assert_eq!(middle[0].borrow().text_content(), "My Application");
        assert_eq!(end[0].borrow().id(), Some("close"));
    }

    #[test]
    fn slot_order_is_insertion_order() {
        let (_, _, tb) = setup();
        let a = tb.add_title_at("a", Position::End);
        let b = tb.add_button_at("b", InnerContent::Html("b".into()), Callback::new(|| {}), Position::End);
        let c = tb.add_icon_at(InnerContent::Html("c".into()), Position::End);

        let end = tb.slot(Position::End).borrow().child_elements();
        assert_eq!(end.len(), 3);
        assert!(Rc::ptr_eq(&end[0], &a));
        assert!(Rc::ptr_eq(&end[1], &b));
        assert!(Rc::ptr_eq(&end[2], &c));
    }

    #[test]
    fn inner_content_variants() {
        let (_, _, tb) = setup();
        let img = tb.add_icon(InnerContent::Src("https://example.com/globe.svg".into()));
        assert_eq!(
            to_html(&Node::Element(img)),
            "<div class=\"titlebar-icon\"><img src=\"https://example.com/globe.svg\" alt=\"Icon\"></div>"
        );

        let html = tb.add_icon(InnerContent::Html("<b>A</b>".into()));
        assert_eq!(
            to_html(&Node::Element(html)),
            "<div class=\"titlebar-icon\"><b>A</b></div>"
        );

        let owned = Element::new("svg").with_id("logo").into_ref();
        let wrapper = tb.add_icon(InnerContent::Element(owned.clone()));
        owned.borrow_mut().set_attr("width", "16");
        let attached = wrapper.borrow().child_elements()[0].clone();
        assert!(Rc::ptr_eq(&attached, &owned));
        assert_eq!(attached.borrow().attr("width"), Some("16"));
    }

    #[test]
    fn button_click_runs_handler_and_ids_are_not_deduplicated() {
        let (doc, _, tb) = setup();
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let button = tb.add_button(
            "close-button",
            InnerContent::Src("close.svg".into()),
            Callback::new(move || c.set(c.get() + 1)),
        );
        tb.add_button("close-button", InnerContent::Html("x".into()), Callback::new(|| {}));

        dispatch(&button, "click");
        assert_eq!(clicks.get(), 1);
        assert_eq!(find_by_class(&doc.body, "titlebar-button").len(), 2);
    }

    #[tokio::test]
    async fn add_menu_inserts_then_registers_shortcuts() {
        let (_, registrar, tb) = setup();
        let saved = Rc::new(Cell::new(false));
        let s = saved.clone();
        let menu = Menu::new("File")
            .with_item(MenuItem::item_with_shortcut(
                "Open",
                Callback::new(|| {}),
                Shortcut::new("o").unwrap().with_ctrl(),
            ))
            .with_item(MenuItem::divider())
            .with_item(MenuItem::submenu(Menu::new("Save as").with_item(
                MenuItem::item_with_shortcut(
                    "Copy",
                    Callback::new(move || s.set(true)),
                    Shortcut::new("s").unwrap().with_shift().with_alt(),
                ),
            )));

        let pending = tb.add_menu(&menu);
        // The DOM is updated before the registrations run
        assert_eq!(tb.slot(Position::Start).borrow().child_elements().len(), 1);
        assert!(registrar.is_empty());

        pending.await.unwrap();
        assert_eq!(registrar.accelerators(), ["CTRL+O", "SHIFT+ALT+S"]);
        assert!(registrar.trigger("SHIFT+ALT+S"));
        assert!(saved.get());
    }

    #[tokio::test]
    async fn menu_ids_are_unique_per_titlebar() {
        let (_, _, tb) = setup();
        tb.add_menu(&Menu::new("File")).await.unwrap();
        tb.add_menu_at(&Menu::new("Help"), Position::End).await.unwrap();

        let file = tb.slot(Position::Start).borrow().child_elements()[0].clone();
        let help = tb.slot(Position::End).borrow().child_elements()[0].clone();
        let trigger_id = |dropdown: &ElementRef| {
            let trigger = dropdown.borrow().child_elements()[0].clone();
            let id = trigger.borrow().id().unwrap_or_default().to_string();
            id
        };
        assert_eq!(trigger_id(&file), "titlebar-menu-1");
        assert_eq!(trigger_id(&help), "titlebar-menu-2");
    }

    struct FailingRegistrar {
        fail_on: &'static str,
        seen: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ShortcutRegistrar for FailingRegistrar {
        async fn register(&self, accelerator: &str, _handler: Callback) -> TitlebarResult<()> {
            if accelerator == self.fail_on {
                return Err(TitlebarError::ShortcutRegistration {
                    accelerator: accelerator.to_string(),
                    reason: "taken".to_string(),
                });
            }
            self.seen.borrow_mut().push(accelerator.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn registration_failure_propagates_without_rollback() {
        let doc = Document::new();
        let registrar = Rc::new(FailingRegistrar {
            fail_on: "CTRL+B",
            seen: RefCell::new(Vec::new()),
        });
        let tb = Titlebar::new(&doc, TitlebarOptions::default(), registrar.clone());
        let noop = Callback::new(|| {});
        let menu = Menu::new("Edit").with_items([
            MenuItem::item_with_shortcut("A", noop.clone(), Shortcut::new("a").unwrap().with_ctrl()),
            MenuItem::item_with_shortcut("B", noop.clone(), Shortcut::new("b").unwrap().with_ctrl()),
            MenuItem::item_with_shortcut("C", noop, Shortcut::new("c").unwrap().with_ctrl()),
        ]);

        let err = tb.add_menu(&menu).await.unwrap_err();
        assert!(matches!(err, TitlebarError::ShortcutRegistration { ref accelerator, .. } if accelerator == "CTRL+B"));
        assert_eq!(*registrar.seen.borrow(), ["CTRL+A"]);
        // The menu itself stays in place
        assert_eq!(tb.slot(Position::Start).borrow().child_elements().len(), 1);
    }
}
