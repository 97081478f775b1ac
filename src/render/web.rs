//! Materialize the virtual tree into a live browser DOM

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::dom::{Document, Node};

/// Create a real DOM node for `node` and its subtree, binding listeners.
///
/// Listener closures are leaked on purpose: the titlebar lives as long as the
/// page does.
pub fn materialize(doc: &web_sys::Document, node: &Node) -> Result<web_sys::Node, JsValue> {
    match node {
        Node::Text(text) => Ok(doc.create_text_node(text).into()),
        Node::Html(markup) => {
            let range = doc.create_range()?;
            Ok(range.create_contextual_fragment(markup)?.into())
        }
        Node::Element(el) => {
            let el = el.borrow();
            let out = doc.create_element(&el.tag)?;
            for (name, value) in el.attributes() {
                out.set_attribute(name, value)?;
            }
            for (event, callback) in el.listeners() {
                let callback = callback.clone();
                let closure = Closure::<dyn FnMut()>::new(move || callback.call());
                out.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            for child in el.children() {
                out.append_child(&materialize(doc, child)?)?;
            }
            Ok(out.into())
        }
    }
}

/// Append the virtual head children to the page head and prepend the virtual
/// body children to the page body, keeping their order.
pub fn mount(vdoc: &Document, doc: &web_sys::Document) -> Result<(), JsValue> {
    let head = doc
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    for child in vdoc.head.borrow().children() {
        head.append_child(&materialize(doc, child)?)?;
    }

    let body = doc
        .body()
        .ok_or_else(|| JsValue::from_str("document has no <body>"))?;
    let anchor = body.first_child();
    for child in vdoc.body.borrow().children() {
        body.insert_before(&materialize(doc, child)?, anchor.as_ref())?;
    }
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::dom::{Callback, Element};
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn page() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    #[wasm_bindgen_test]
    fn materialize_copies_attributes_text_and_markup() {
        let doc = page();
        let node: Node = Element::new("div")
            .with_id("wrapper")
            .with_attr("data-tauri-drag-region", "")
            .with_text("A < B")
            .with_child(Node::Html("<b>bold</b>".into()))
            .into();

        let el = materialize(&doc, &node)
            .unwrap()
            .dyn_into::<web_sys::Element>()
            .unwrap();
        assert_eq!(el.id(), "wrapper");
        assert!(el.has_attribute("data-tauri-drag-region"));
        assert_eq!(el.inner_html(), "A &lt; B<b>bold</b>");
    }

    #[wasm_bindgen_test]
    fn materialized_listeners_fire_on_click() {
        let doc = page();
        let clicks = Rc::new(Cell::new(0));
        let c = clicks.clone();
        let node: Node = Element::new("div")
            .on("click", Callback::new(move || c.set(c.get() + 1)))
            .into();

        let el = materialize(&doc, &node)
            .unwrap()
            .dyn_into::<web_sys::HtmlElement>()
            .unwrap();
        el.click();
        el.click();
        assert_eq!(clicks.get(), 2);
    }

    #[wasm_bindgen_test]
    fn mount_appends_head_and_prepends_body_in_order() {
        let doc = page();
        let body = doc.body().unwrap();
        body.append_child(&doc.create_element("main").unwrap()).unwrap();

        let vdoc = Document::new();
        vdoc.head
            .borrow_mut()
            .append_child(Node::Html("<style>.mounted-bar {}</style>".into()));
        {
            let mut vbody = vdoc.body.borrow_mut();
            vbody.append_child(Element::new("div").with_id("mounted-first"));
            vbody.append_child(Element::new("div").with_id("mounted-second"));
        }

        mount(&vdoc, &doc).unwrap();

        let style = doc.head().unwrap().last_element_child().unwrap();
        assert_eq!(style.tag_name(), "STYLE");
        assert_eq!(style.text_content().unwrap(), ".mounted-bar {}");

        let first = body.first_element_child().unwrap();
        assert_eq!(first.id(), "mounted-first");
        let second = first.next_element_sibling().unwrap();
        assert_eq!(second.id(), "mounted-second");
    }
}
