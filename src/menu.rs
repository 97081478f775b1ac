//! Dropdown menus
//!
//! A [`Menu`] tree is expanded into markup following the dropdown library's
//! conventions (`dropdown`, `dropdown-menu`, `dropdown-item`,
//! `dropdown-divider`, `data-bs-toggle`). Shortcuts found while walking the
//! tree are collected so the caller can register them afterwards.

use log::debug;

use crate::dom::{Callback, Element, ElementRef};
use crate::hotkey::Shortcut;
use crate::titlebar::Position;

/// A labelled menu and its items
#[derive(Debug, Clone)]
pub struct Menu {
    pub label: String,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items.extend(items);
        self
    }
}

/// Menu entry
#[derive(Debug, Clone)]
pub enum MenuItem {
    /// Clickable action, optionally bound to a global shortcut
    Item {
        label: String,
        action: Callback,
        shortcut: Option<Shortcut>,
    },
    Divider,
    /// Nested menu, owned by value
    Submenu(Menu),
}

impl MenuItem {
    pub fn item(label: &str, action: Callback) -> Self {
        MenuItem::Item {
            label: label.to_string(),
            action,
            shortcut: None,
        }
    }

    pub fn item_with_shortcut(label: &str, action: Callback, shortcut: Shortcut) -> Self {
        MenuItem::Item {
            label: label.to_string(),
            action,
            shortcut: Some(shortcut),
        }
    }

    pub fn divider() -> Self {
        MenuItem::Divider
    }

    pub fn submenu(menu: Menu) -> Self {
        MenuItem::Submenu(menu)
    }
}

/// Shortcut found during expansion, still to be registered
#[derive(Debug, Clone)]
pub struct PendingShortcut {
    pub accelerator: String,
    pub action: Callback,
}

/// Result of expanding a menu
#[derive(Debug)]
pub struct BuiltMenu {
    /// The `div.dropdown` holding the trigger and the list
    pub element: ElementRef,
    /// Shortcuts in document order
    pub shortcuts: Vec<PendingShortcut>,
}

/// Class opening submenus away from the screen edge closest to the slot
pub fn submenu_direction(position: Position) -> &'static str {
    match position {
        Position::End => "dropstart",
        Position::Start | Position::Middle => "dropend",
    }
}

/// Expands menu trees for one titlebar
pub struct MenuBuilder<'a> {
    class_name: &'a str,
    direction: &'static str,
    // Shared by every submenu of one expansion pass so ids stay unique
    submenu_count: usize,
    shortcuts: Vec<PendingShortcut>,
}

impl<'a> MenuBuilder<'a> {
    pub fn new(class_name: &'a str, position: Position) -> Self {
        Self {
            class_name,
            direction: submenu_direction(position),
            submenu_count: 0,
            shortcuts: Vec::new(),
        }
    }

    /// Build the trigger button and its list; `menu_id` identifies the trigger
    pub fn build(mut self, menu: &Menu, menu_id: &str) -> BuiltMenu {
        let trigger = Element::new("div")
            .with_class(&format!("{}-menu", self.class_name))
            .with_id(menu_id)
            .with_attr("role", "button")
            .with_attr("data-bs-toggle", "dropdown")
            .with_attr("data-bs-auto-close", "outside")
            .with_attr("aria-expanded", "false")
            .with_text(&menu.label);
        let list = self.expand(menu, menu_id);

        let element = Element::new("div")
            .with_class("dropdown")
            .with_child(trigger)
            .with_child(list)
            .into_ref();

        debug!(
            "Built menu {:?} with {} shortcut(s)",
            menu.label,
            self.shortcuts.len()
        );
        BuiltMenu {
            element,
            shortcuts: self.shortcuts,
        }
    }

    fn expand(&mut self, menu: &Menu, labelled_by: &str) -> Element {
        let mut list = Element::new("ul")
            .with_class("dropdown-menu")
            .with_attr("aria-labelledby", labelled_by);

        for item in &menu.items {
            let entry = match item {
                MenuItem::Item {
                    label,
                    action,
                    shortcut,
                } => self.leaf(label, action, shortcut.as_ref()),
                MenuItem::Divider => {
                    Element::new("li").with_child(Element::new("hr").with_class("dropdown-divider"))
                }
                MenuItem::Submenu(submenu) => self.nested(submenu, labelled_by),
            };
            list.append_child(entry);
        }
        list
    }

    fn leaf(&mut self, label: &str, action: &Callback, shortcut: Option<&Shortcut>) -> Element {
        let mut link = Element::new("a")
            .with_class("dropdown-item")
            .with_attr("href", "#")
            .with_attr("role", "menuitem")
            .with_text(label)
            .on("click", action.clone());

        if let Some(shortcut) = shortcut {
            let accelerator = shortcut.trigger();
            link.append_child(
                Element::new("span")
                    .with_class(&format!("{}-shortcut", self.class_name))
                    .with_text(&accelerator),
            );
            self.shortcuts.push(PendingShortcut {
                accelerator,
                action: action.clone(),
            });
        }
        Element::new("li").with_child(link)
    }

    fn nested(&mut self, submenu: &Menu, parent_id: &str) -> Element {
        self.submenu_count += 1;
        let id = format!("{}-submenu-{}", parent_id, self.submenu_count);

        let toggle = Element::new("a")
            .with_class("dropdown-item dropdown-toggle")
            .with_id(&id)
            .with_attr("href", "#")
            .with_attr("role", "button")
            .with_attr("data-bs-toggle", "dropdown")
            .with_attr("data-bs-auto-close", "outside")
            .with_attr("aria-expanded", "false")
            .with_text(&submenu.label);
        let list = self.expand(submenu, &id);

        Element::new("li")
            .with_class(self.direction)
            .with_child(toggle)
            .with_child(list)
    }
}
