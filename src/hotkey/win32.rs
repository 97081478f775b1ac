//! Global hotkey registrar backed by `RegisterHotKey`
//!
//! Hotkeys are bound to a window (or to the calling thread when the window
//! handle is null); the owner forwards `WM_HOTKEY` messages to
//! [`Win32HotkeyRegistrar::handle_message`].

use async_trait::async_trait;
use log::{debug, info, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use windows::Win32::Foundation::{HWND, WPARAM};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT,
    MOD_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{MSG, WM_HOTKEY};

use super::{Shortcut, ShortcutRegistrar};
use crate::dom::Callback;
use crate::error::{TitlebarError, TitlebarResult};

/// Registrar for system-wide hotkeys on Windows
pub struct Win32HotkeyRegistrar {
    hwnd: HWND,
    hotkeys: RefCell<HashMap<i32, (String, Callback)>>,
    next_id: Cell<i32>,
}

impl Win32HotkeyRegistrar {
    /// Bind hotkeys to `hwnd`
    pub fn new(hwnd: HWND) -> Self {
        Self {
            hwnd,
            hotkeys: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    /// Run the handler for a `WM_HOTKEY` message; false for other messages
    pub fn handle_message(&self, msg: &MSG) -> bool {
        msg.message == WM_HOTKEY && self.dispatch(msg.wParam)
    }

    /// Run the handler registered under the hotkey id carried by `wparam`
    pub fn dispatch(&self, wparam: WPARAM) -> bool {
        let id = wparam.0 as i32;
        let handler = self.hotkeys.borrow().get(&id).map(|(_, h)| h.clone());
        match handler {
            Some(handler) => {
                handler.call();
                true
            }
            None => false,
        }
    }

    /// Unregister every hotkey
    pub fn unregister_all(&self) {
        for (id, (accelerator, _)) in self.hotkeys.borrow_mut().drain() {
            unsafe {
                if UnregisterHotKey(self.hwnd, id).is_err() {
                    warn!("Failed to unregister hotkey {}", accelerator);
                } else {
                    debug!("Unregistered hotkey {} ({})", id, accelerator);
                }
            }
        }
    }
}

#[async_trait(?Send)]
impl ShortcutRegistrar for Win32HotkeyRegistrar {
    async fn register(&self, accelerator: &str, handler: Callback) -> TitlebarResult<()> {
        let shortcut: Shortcut = accelerator.parse()?;
        let vk = virtual_key(&shortcut.key().to_uppercase())
            .ok_or_else(|| TitlebarError::InvalidShortcut(accelerator.to_string()))?;

        let mut modifiers = MOD_NOREPEAT.0;
        if shortcut.shift {
            modifiers |= MOD_SHIFT.0;
        }
        if shortcut.ctrl {
            modifiers |= MOD_CONTROL.0;
        }
        if shortcut.alt {
            modifiers |= MOD_ALT.0;
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let result = unsafe { RegisterHotKey(self.hwnd, id, HOT_KEY_MODIFIERS(modifiers), vk) };
        result.map_err(|e| TitlebarError::ShortcutRegistration {
            accelerator: accelerator.to_string(),
            reason: e.to_string(),
        })?;

        info!("Registered hotkey {} for {}", id, accelerator);
        self.hotkeys
            .borrow_mut()
            .insert(id, (accelerator.to_string(), handler));
        Ok(())
    }
}

impl Drop for Win32HotkeyRegistrar {
    fn drop(&mut self) {
        self.unregister_all();
    }
}

/// Virtual key code for an upper-cased key name
fn virtual_key(key: &str) -> Option<u32> {
    if key.len() == 1 {
        let c = key.chars().next()?;
        if c.is_ascii_alphanumeric() {
            return Some(c as u32);
        }
    }

    if let Some(n) = key.strip_prefix('F').and_then(|n| n.parse::<u32>().ok()) {
        if (1..=24).contains(&n) {
            return Some(0x6F + n);
        }
    }

    match key {
        "SPACE" => Some(0x20),
        "ENTER" | "RETURN" => Some(0x0D),
        "TAB" => Some(0x09),
        "ESCAPE" | "ESC" => Some(0x1B),
        "BACKSPACE" => Some(0x08),
        "DELETE" | "DEL" => Some(0x2E),
        "INSERT" | "INS" => Some(0x2D),
        "HOME" => Some(0x24),
        "END" => Some(0x23),
        "PAGEUP" | "PGUP" => Some(0x21),
        "PAGEDOWN" | "PGDN" => Some(0x22),
        "UP" => Some(0x26),
        "DOWN" => Some(0x28),
        "LEFT" => Some(0x25),
        "RIGHT" => Some(0x27),
        "PLUS" => Some(0xBB),
        _ => None,
    }
}
