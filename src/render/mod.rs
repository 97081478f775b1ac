//! Rendering of the virtual tree
//!
//! `to_html` serializes a tree to markup. With the `web` feature the tree can
//! also be materialized into a live browser DOM (see [`web`]).

#[cfg(feature = "web")]
pub mod web;

use crate::dom::{Document, Node};

/// Elements that never carry children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Serialize a node and its subtree. Listeners are not serialized.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a whole page
pub fn document_to_html(doc: &Document) -> String {
    let mut out = String::from("<!DOCTYPE html>\n<html>");
    write_node(&Node::Element(doc.head.clone()), &mut out);
    write_node(&Node::Element(doc.body.clone()), &mut out);
    out.push_str("</html>\n");
    out
}

impl Document {
    pub fn to_html(&self) -> String {
        document_to_html(self)
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => escape_into(text, false, out),
        Node::Html(markup) => out.push_str(markup),
        Node::Element(el) => {
            let el = el.borrow();
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in el.attributes() {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                return;
            }
            for child in el.children() {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
