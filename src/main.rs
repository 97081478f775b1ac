//! Titlebar demo
//!
//! Builds the sample titlebar and prints the resulting page. Options are read
//! from the path given as first argument, or from the default config path.

use anyhow::Result;
use log::{info, LevelFilter};
use std::path::PathBuf;
use std::rc::Rc;

use tauri_titlebar::{
    Callback, Document, InnerContent, LocalRegistrar, Menu, MenuItem, Position, Shortcut,
    Titlebar, TitlebarOptions,
};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .init();

    info!("Starting titlebar demo v{}", env!("CARGO_PKG_VERSION"));

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(TitlebarOptions::config_path);
    let options = TitlebarOptions::load_or_default(&path);

    let document = Document::new();
    let registrar = Rc::new(LocalRegistrar::new());
    let titlebar = Titlebar::new(&document, options, registrar.clone());

    titlebar.add_title("My Application");
    titlebar.add_icon(InnerContent::Src(
        "https://api.iconify.design/ph:globe-hemisphere-west-bold.svg".to_string(),
    ));
    titlebar.add_button_at(
        "about-button",
        InnerContent::Html("<p>A</p>".to_string()),
        Callback::new(|| info!("about!")),
        Position::Start,
    );
    titlebar.add_button(
        "close-button",
        InnerContent::Src("https://api.iconify.design/mdi:close.svg".to_string()),
        Callback::new(|| info!("close!")),
    );

    let file = Menu::new("File")
        .with_item(MenuItem::item_with_shortcut(
            "Open",
            Callback::new(|| info!("open!")),
            Shortcut::new("o")?.with_ctrl(),
        ))
        .with_item(MenuItem::submenu(
            Menu::new("Open Recent")
                .with_item(MenuItem::item("notes.md", Callback::new(|| info!("notes.md"))))
                .with_item(MenuItem::item("todo.md", Callback::new(|| info!("todo.md")))),
        ))
        .with_item(MenuItem::divider())
        .with_item(MenuItem::item_with_shortcut(
            "Save",
            Callback::new(|| info!("save!")),
            Shortcut::new("s")?.with_ctrl(),
        ));

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(titlebar.add_menu(&file))?;
    info!(
        "{} active shortcut(s): {}",
        registrar.len(),
        registrar.accelerators().join(", ")
    );

    print!("{}", document.to_html());
    Ok(())
}
