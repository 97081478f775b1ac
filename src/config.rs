//! Titlebar options
//!
//! Options are plain serde data. Every field is optional in a TOML file and
//! falls back to its default, theme colors included, so a file overriding
//! only `bg_primary` keeps the default value of the three other colors.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{TitlebarError, TitlebarResult};
use crate::theme::{Color, Theme};

/// Default class-name prefix
pub const DEFAULT_CLASS_NAME: &str = "titlebar";
/// Default bar height in pixels
pub const DEFAULT_HEIGHT: u32 = 30;

/// Construction options of a titlebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlebarOptions {
    /// Prefix of every generated class name
    pub class_name: String,
    /// Bar height in pixels
    pub height: u32,
    /// Colors
    pub theme: Theme,
}

impl Default for TitlebarOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            height: DEFAULT_HEIGHT,
            theme: Theme::default(),
        }
    }
}

impl TitlebarOptions {
    /// Options from a flat background / foreground pair
    pub fn with_colors(background: &str, color: &str) -> TitlebarResult<Self> {
        Ok(Self {
            theme: Theme::from_pair(Color::from_hex(background)?, Color::from_hex(color)?),
            ..Self::default()
        })
    }

    /// Get the default options file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tauri-titlebar")
            .join("titlebar.toml")
    }

    /// Parse options from TOML, rejecting a class name that is not a plain
    /// CSS identifier
    pub fn from_toml_str(content: &str) -> TitlebarResult<Self> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that `class_name` can be used as-is in selectors and `class`
    /// attributes
    pub fn validate(&self) -> TitlebarResult<()> {
        if is_css_identifier(&self.class_name) {
            Ok(())
        } else {
            Err(TitlebarError::Config(format!(
                "class_name {:?} is not a CSS identifier",
                self.class_name
            )))
        }
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> TitlebarResult<Self> {
        info!("Loading titlebar options from: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load options, using defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(options) => options,
            Err(e) => {
                warn!("Failed to load titlebar options, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save options to a TOML file
    pub fn save(&self, path: &Path) -> TitlebarResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Titlebar options saved to: {:?}", path);
        Ok(())
    }
}

// ASCII subset of a CSS identifier: optional leading `-`, then a letter or
// `_`, then letters, digits, `-` or `_`
fn is_css_identifier(name: &str) -> bool {
    let rest = name.strip_prefix('-').unwrap_or(name);
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let options = TitlebarOptions::default();
        assert_eq!(options.class_name, "titlebar");
        assert_eq!(options.height, 30);
        assert_eq!(options.theme, Theme::default());
    }

    #[test]
    fn partial_theme_keeps_other_defaults() {
        let options = TitlebarOptions::from_toml_str(
            r##"
            height = 36

            [theme]
            bg_primary = "#202020"
            "##,
        )
        .unwrap();
        assert_eq!(options.class_name, "titlebar");
        assert_eq!(options.height, 36);
        assert_eq!(options.theme.bg_primary, Color::rgb(0x20, 0x20, 0x20));
        assert_eq!(options.theme.bg_secondary, Color::WHITE);
        assert_eq!(options.theme.font_primary, Color::BLACK);
        assert_eq!(options.theme.font_secondary, Color::BLACK);
    }

    #[test]
    fn invalid_color_is_a_config_error() {
        let err = TitlebarOptions::from_toml_str("[theme]\nbg_primary = \"#fff\"").unwrap_err();
        assert!(matches!(err, TitlebarError::Config(_)));
    }

    #[test]
    fn class_name_must_be_a_css_identifier() {
        for bad in ["my bar", "bar{color:red}", "", "9lives", "-", "a.b", "tb>x"] {
            let content = format!("class_name = {:?}", bad);
            let err = TitlebarOptions::from_toml_str(&content).unwrap_err();
            assert!(matches!(err, TitlebarError::Config(_)), "{bad} should be rejected");
        }
        for good in ["titlebar", "app-bar", "_tb", "-x9", "Bar_2"] {
            let content = format!("class_name = {:?}", good);
            assert_eq!(TitlebarOptions::from_toml_str(&content).unwrap().class_name, good);
        }
    }

    #[test]
    fn load_or_default_rejects_bad_class_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("titlebar.toml");
        std::fs::write(&path, "class_name = \"a b\"\nheight = 40").unwrap();
        assert_eq!(TitlebarOptions::load_or_default(&path), TitlebarOptions::default());
    }

    #[test]
    fn flat_color_pair() {
        let options = TitlebarOptions::with_colors("#aaaaaa", "#ffffff").unwrap();
        assert_eq!(options.theme.bg_primary, Color::rgb(0xaa, 0xaa, 0xaa));
        assert_eq!(options.theme.bg_secondary, Color::rgb(0xaa, 0xaa, 0xaa));
        assert_eq!(options.theme.font_primary, Color::WHITE);
        assert!(TitlebarOptions::with_colors("#aaa", "#fff").is_err());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("titlebar.toml");

        let mut options = TitlebarOptions::with_colors("#336699", "#eeeeee").unwrap();
        options.class_name = "app-bar".to_string();
        options.save(&path).unwrap();

        let loaded = TitlebarOptions::load(&path).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn load_or_default_tolerates_missing_and_broken_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(TitlebarOptions::load_or_default(&missing), TitlebarOptions::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "height = \"tall\"").unwrap();
        assert_eq!(TitlebarOptions::load_or_default(&broken), TitlebarOptions::default());
    }

    #[test]
    fn config_path_ends_with_file_name() {
        let path = TitlebarOptions::config_path();
        assert!(path.ends_with("tauri-titlebar/titlebar.toml"));
    }
}
