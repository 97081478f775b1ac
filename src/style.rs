//! Style sheet generation
//!
//! Every rule is scoped by the configured class-name prefix. Hover and active
//! backgrounds are derived from the theme with [`Color::lighten`].

use crate::config::TitlebarOptions;

/// Build the `<style>` block for a titlebar. The caller injects it once.
pub fn style_sheet(options: &TitlebarOptions) -> String {
    let sections = [
        bar_rules(options),
        section_rules(options),
        title_rules(options),
        icon_rules(options),
        button_rules(options),
        dropdown_rules(options),
        util_rules(options),
    ];
    format!("<style>\n{}\n</style>", sections.join("\n"))
}

fn bar_rules(o: &TitlebarOptions) -> String {
    let c = &o.class_name;
    format!(
        ".{c} {{
    height: {height}px;
    background: {bg};
    color: {fg};
    user-select: none;
    display: flex;
    justify-content: space-between;
    position: fixed;
    top: 0;
    left: 0;
    right: 0;
}}",
        height = o.height,
        bg = o.theme.bg_primary,
        fg = o.theme.font_primary,
    )
}

fn section_rules(o: &TitlebarOptions) -> String {
    let c = &o.class_name;
    format!(
        ".{c}-section {{
    display: flex;
    align-items: center;
    width: 33%;
}}
.{c}-section:nth-of-type(1) {{
    justify-content: start;
}}
.{c}-section:nth-of-type(2) {{
    justify-content: center;
}}
.{c}-section:nth-of-type(3) {{
    justify-content: end;
    flex-direction: row-reverse;
}}"
    )
}

fn title_rules(o: &TitlebarOptions) -> String {
    let c = &o.class_name;
    format!(
        ".{c}-title {{
    cursor: default;
}}"
    )
}

fn icon_rules(o: &TitlebarOptions) -> String {
    let c = &o.class_name;
    let h = o.height;
    format!(
        ".{c}-icon {{
    height: {h}px;
    width: {h}px;
    display: flex;
    justify-content: center;
    align-items: center;
}}
.{c}-icon img {{
    height: calc({h}px - 6px);
    width: calc({h}px - 6px);
    padding: 3px;
}}"
    )
}

fn button_rules(o: &TitlebarOptions) -> String {
    let c = &o.class_name;
    let h = o.height;
    let bg = o.theme.bg_primary;
    format!(
        ".{c}-button,
.{c}-menu {{
    display: inline-flex;
    justify-content: center;
    align-items: center;
    height: {h}px;
    cursor: default;
}}
.{c}-button:hover,
.{c}-menu:hover {{
    background: {hover};
}}
.{c}-button:active,
.{c}-menu:active {{
    background: {active};
}}
.{c}-button {{
    width: {h}px;
}}
.{c}-menu {{
    padding: 0 6px;
}}",
        hover = bg.hover(),
        active = bg.active(),
    )
}

// Overrides for the dropdown library reused for menus
fn dropdown_rules(o: &TitlebarOptions) -> String {
    let c = &o.class_name;
    let bg = o.theme.bg_secondary;
    format!(
        ".{c} div.dropdown {{
    padding: 0 8px;
    cursor: pointer;
}}
.{c} ul.dropdown-menu {{
    background: {bg};
}}
.{c} .dropdown-item {{
    color: {fg};
}}
.{c} .dropdown-item:focus,
.{c} .dropdown-item:hover {{
    background: {hover};
}}
.{c} .dropdown-item:active {{
    background: {active};
}}
.{c}-shortcut {{
    float: right;
    margin-left: 2em;
    opacity: 0.6;
}}",
        fg = o.theme.font_secondary,
        hover = bg.hover(),
        active = bg.active(),
    )
}

fn util_rules(o: &TitlebarOptions) -> String {
    let c = &o.class_name;
    format!(
        ".{c}-vh {{
    height: calc(100vh - {h}px);
}}",
        h = o.height
    )
}
