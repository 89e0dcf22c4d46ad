//! The seam between the viewer and whatever owns the real markup.
//!
//! The viewer never builds or walks a DOM tree. It addresses a handful of
//! named anchors (element ids from [`AnchorIds`](crate::config::AnchorIds))
//! and asks the host to swap their markup, flip classes, set attributes,
//! or reset scroll. A browser shim implements [`Document`] over real
//! elements; [`MemoryDocument`] is the in-process implementation used by
//! the exporter and the tests.

use log::debug;
use std::collections::{BTreeMap, BTreeSet};

use crate::format::SafeHtml;

pub trait Document {
    fn has_anchor(&self, id: &str) -> bool;
    /// Replace the inner markup of an anchor.
    fn set_html(&mut self, id: &str, html: &SafeHtml);
    fn set_visible(&mut self, id: &str, visible: bool);
    fn set_class(&mut self, id: &str, class: &str, on: bool);
    fn set_attr(&mut self, id: &str, name: &str, value: &str);
    fn scroll_to_top(&mut self, id: &str);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub html: String,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub hidden: bool,
    pub scroll_top: f64,
}

/// One mutation applied to a [`MemoryDocument`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Html(String),
    Visible(String, bool),
    Class(String, String, bool),
    Attr(String, String, String),
    ScrollTop(String),
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: BTreeMap<String, Node>,
    journal: Vec<Op>,
}

impl MemoryDocument {
    pub fn with_anchors<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MemoryDocument {
            nodes: ids.into_iter().map(|id| (id.into(), Node::default())).collect(),
            journal: Vec::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn html(&self, id: &str) -> &str {
        self.nodes.get(id).map(|n| n.html.as_str()).unwrap_or("")
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.nodes.get(id).map(|n| n.classes.contains(class)).unwrap_or(false)
    }

    pub fn attr(&self, id: &str, name: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.attrs.get(name)).map(String::as_str)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.nodes.get(id).map(|n| !n.hidden).unwrap_or(false)
    }

    /// Simulate the user scrolling inside an anchor.
    pub fn scroll(&mut self, id: &str, top: f64) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.scroll_top = top;
        }
    }

    pub fn journal(&self) -> &[Op] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let node = self.nodes.get_mut(id);
        if node.is_none() {
            debug!("write to unknown anchor '{}' ignored", id);
        }
        node
    }
}

impl Document for MemoryDocument {
    fn has_anchor(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    fn set_html(&mut self, id: &str, html: &SafeHtml) {
        if let Some(node) = self.node_mut(id) {
            node.html = html.as_str().to_string();
            self.journal.push(Op::Html(id.to_string()));
        }
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(node) = self.node_mut(id) {
            node.hidden = !visible;
            self.journal.push(Op::Visible(id.to_string(), visible));
        }
    }

    fn set_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(node) = self.node_mut(id) {
            if on {
                node.classes.insert(class.to_string());
            } else {
                node.classes.remove(class);
            }
            self.journal.push(Op::Class(id.to_string(), class.to_string(), on));
        }
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) {
        if let Some(node) = self.node_mut(id) {
            node.attrs.insert(name.to_string(), value.to_string());
            self.journal
                .push(Op::Attr(id.to_string(), name.to_string(), value.to_string()));
        }
    }

    fn scroll_to_top(&mut self, id: &str) {
        if let Some(node) = self.node_mut(id) {
            node.scroll_top = 0.0;
            self.journal.push(Op::ScrollTop(id.to_string()));
        }
    }
}
