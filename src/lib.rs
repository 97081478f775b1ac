//! Decorative, draggable window titlebar for Tauri web-views
//!
//! The titlebar is built into a small virtual DOM ([`dom`]) with three slots
//! for icons, a title, buttons and dropdown menus. Menu items can declare
//! global keyboard shortcuts, registered through an injected
//! [`ShortcutRegistrar`]. The tree renders to HTML ([`render`]) or, with the
//! `web` feature, into a live browser DOM.

pub mod config;
pub mod dom;
pub mod error;
pub mod hotkey;
pub mod menu;
pub mod render;
pub mod style;
pub mod theme;
pub mod titlebar;

pub use config::TitlebarOptions;
pub use dom::{dispatch, Callback, Document, Element, ElementRef, Node};
pub use error::{TitlebarError, TitlebarResult};
pub use hotkey::{LocalRegistrar, Shortcut, ShortcutRegistrar};
pub use menu::{Menu, MenuItem};
pub use theme::{lighten, Color, Theme};
pub use titlebar::{InnerContent, Position, Titlebar};
