//! Minimal virtual DOM the titlebar is built into
//!
//! Elements are shared handles (`Rc<RefCell<_>>`) so a caller can keep a
//! reference to a node it hands over, and the titlebar can keep appending to
//! its slot containers after they were attached to the document.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared click / shortcut handler
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler
    pub fn call(&self) {
        (self.0)()
    }

    /// Whether both callbacks point at the same handler
    pub fn ptr_eq(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// Shared handle to an element
pub type ElementRef = Rc<RefCell<Element>>;

/// A node of the tree
#[derive(Debug, Clone)]
pub enum Node {
    Element(ElementRef),
    /// Text content, escaped when rendered
    Text(String),
    /// Raw markup, emitted verbatim
    Html(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&ElementRef> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el.into_ref())
    }
}

impl From<ElementRef> for Node {
    fn from(el: ElementRef) -> Self {
        Node::Element(el)
    }
}

/// An element with ordered attributes, children and event listeners
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    listeners: Vec<(String, Callback)>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Wrap into a shared handle
    pub fn into_ref(self) -> ElementRef {
        Rc::new(RefCell::new(self))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Bind a listener for `event`
    pub fn on(mut self, event: &str, callback: Callback) -> Self {
        self.listeners.push((event.to_string(), callback));
        self
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn class_name(&self) -> Option<&str> {
        self.attr("class")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name()
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements only, skipping text and markup nodes
    pub fn child_elements(&self) -> Vec<ElementRef> {
        self.children
            .iter()
            .filter_map(|n| n.as_element().cloned())
            .collect()
    }

    pub fn listeners(&self) -> &[(String, Callback)] {
        &self.listeners
    }

    /// Insert at the end (`beforeend`)
    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Insert at the start (`afterbegin`)
    pub fn prepend_child(&mut self, child: impl Into<Node>) {
        self.children.insert(0, child.into());
    }

    /// Concatenated text of this subtree; raw markup is not interpreted
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => out.push_str(&el.borrow().text_content()),
                Node::Html(_) => {}
            }
        }
        out
    }
}

/// Fire every listener of `el` bound to `event`; returns how many ran.
///
/// The element is not borrowed while the listeners run, so a handler may
/// mutate the element it is bound to.
pub fn dispatch(el: &ElementRef, event: &str) -> usize {
    let callbacks: Vec<Callback> = el
        .borrow()
        .listeners
        .iter()
        .filter(|(e, _)| e == event)
        .map(|(_, cb)| cb.clone())
        .collect();
    for cb in &callbacks {
        cb.call();
    }
    callbacks.len()
}

/// Depth-first search for an element with the given id, `root` included
pub fn find_by_id(root: &ElementRef, id: &str) -> Option<ElementRef> {
    if root.borrow().id() == Some(id) {
        return Some(root.clone());
    }
    let children = root.borrow().child_elements();
    children.iter().find_map(|child| find_by_id(child, id))
}

/// Depth-first collection of every element carrying `class`
pub fn find_by_class(root: &ElementRef, class: &str) -> Vec<ElementRef> {
    let mut found = Vec::new();
    collect_by_class(root, class, &mut found);
    found
}

fn collect_by_class(el: &ElementRef, class: &str, found: &mut Vec<ElementRef>) {
    if el.borrow().has_class(class) {
        found.push(el.clone());
    }
    for child in el.borrow().child_elements() {
        collect_by_class(&child, class, found);
    }
}

/// A page: head and body containers
#[derive(Debug, Clone)]
pub struct Document {
    pub head: ElementRef,
    pub body: ElementRef,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            head: Element::new("head").into_ref(),
            body: Element::new("body").into_ref(),
        }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementRef> {
        find_by_id(&self.head, id).or_else(|| find_by_id(&self.body, id))
    }
}
