//! Keyboard shortcuts for menu items
//!
//! A [`Shortcut`] is serialized into the accelerator string understood by
//! the host's global-shortcut facility. Registration itself goes through the
//! injected [`ShortcutRegistrar`].

#[cfg(windows)]
pub mod win32;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use crate::dom::Callback;
use crate::error::{TitlebarError, TitlebarResult};

/// Modifier flags plus a trigger key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Shortcut {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    key: String,
}

impl Shortcut {
    /// Shortcut on `key` with no modifiers.
    ///
    /// The key must be a single non-empty token; `+` is stored as `PLUS` so
    /// the accelerator string stays parseable.
    pub fn new(key: &str) -> TitlebarResult<Self> {
        let key = key.trim();
        let key = if key == "+" { "PLUS" } else { key };
        if key.is_empty() || key.contains('+') || key.contains(char::is_whitespace) {
            return Err(TitlebarError::InvalidShortcut(key.to_string()));
        }
        Ok(Self {
            shift: false,
            ctrl: false,
            alt: false,
            key: key.to_string(),
        })
    }

    /// The trigger key, as given
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Accelerator string: present modifiers in SHIFT, CTRL, ALT order,
    /// then the upper-cased key, joined by `+`
    pub fn trigger(&self) -> String {
        let mut out = String::new();
        if self.shift {
            out.push_str("SHIFT+");
        }
        if self.ctrl {
            out.push_str("CTRL+");
        }
        if self.alt {
            out.push_str("ALT+");
        }
        out.push_str(&self.key.to_uppercase());
        out
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trigger())
    }
}

impl FromStr for Shortcut {
    type Err = TitlebarError;

    /// Parse strings like `"Ctrl+Shift+S"`; the last part is the key.
    /// A trailing `++` reads as the plus key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TitlebarError::InvalidShortcut(s.to_string());
        let text = s.trim();
        let (modifiers, key) = if text == "+" {
            (None, "+")
        } else if let Some(rest) = text.strip_suffix("++") {
            (Some(rest), "+")
        } else {
            match text.rsplit_once('+') {
                Some((rest, key)) => (Some(rest), key),
                None => (None, text),
            }
        };

        let mut shortcut = Shortcut::new(key).map_err(|_| invalid())?;
        for part in modifiers.map(|m| m.split('+')).into_iter().flatten() {
            match part.trim().to_uppercase().as_str() {
                "SHIFT" => shortcut.shift = true,
                "CTRL" | "CONTROL" => shortcut.ctrl = true,
                "ALT" => shortcut.alt = true,
                _ => return Err(invalid()),
            }
        }
        Ok(shortcut)
    }
}

impl TryFrom<String> for Shortcut {
    type Error = TitlebarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Shortcut> for String {
    fn from(shortcut: Shortcut) -> Self {
        shortcut.trigger()
    }
}

/// Host facility registering global hotkeys
#[async_trait(?Send)]
pub trait ShortcutRegistrar {
    /// Register `accelerator` so that pressing it runs `handler`
    async fn register(&self, accelerator: &str, handler: Callback) -> TitlebarResult<()>;
}

/// In-process registrar: keeps the accelerator table and dispatches on
/// [`LocalRegistrar::trigger`]
#[derive(Debug, Default)]
pub struct LocalRegistrar {
    entries: RefCell<Vec<(String, Callback)>>,
}

impl LocalRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the handler bound to `accelerator`; false when nothing is bound
    pub fn trigger(&self, accelerator: &str) -> bool {
        let handler = self
            .entries
            .borrow()
            .iter()
            .find(|(a, _)| a == accelerator)
            .map(|(_, h)| h.clone());
        match handler {
            Some(handler) => {
                debug!("Shortcut {} triggered", accelerator);
                handler.call();
                true
            }
            None => false,
        }
    }

    /// Registered accelerators in registration order
    pub fn accelerators(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|(a, _)| a.clone()).collect()
    }

    pub fn handler(&self, accelerator: &str) -> Option<Callback> {
        self.entries
            .borrow()
            .iter()
            .find(|(a, _)| a == accelerator)
            .map(|(_, h)| h.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[async_trait(?Send)]
impl ShortcutRegistrar for LocalRegistrar {
    async fn register(&self, accelerator: &str, handler: Callback) -> TitlebarResult<()> {
        let mut entries = self.entries.borrow_mut();
        if entries.iter().any(|(a, _)| a == accelerator) {
            return Err(TitlebarError::ShortcutRegistration {
                accelerator: accelerator.to_string(),
                reason: "already registered".to_string(),
            });
        }
        entries.push((accelerator.to_string(), handler));
        info!("Registered shortcut {}", accelerator);
        Ok(())
    }
}
