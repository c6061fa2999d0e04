//! In-memory rendering surface
//!
//! Records every write so tests and embedders can inspect what the
//! controller rendered.

use std::collections::{HashMap, HashSet};

use super::surface::{Child, Fragment, Node, RenderSurface};

/// Headless surface backed by plain maps
#[derive(Debug, Default)]
pub struct MemorySurface {
    visible: HashMap<Node, bool>,
    text: HashMap<Node, String>,
    children: HashMap<Node, Vec<Child>>,
    values: HashMap<Node, String>,
    focused: Option<Node>,
    notices: Vec<String>,
    missing: HashSet<Node>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface lacking the given regions
    pub fn without(missing: impl IntoIterator<Item = Node>) -> Self {
        Self {
            missing: missing.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Simulate the user typing into an input region
    pub fn set_value(&mut self, node: Node, value: impl Into<String>) {
        self.values.insert(node, value.into());
    }

    pub fn is_visible(&self, node: Node) -> bool {
        self.visible.get(&node).copied().unwrap_or(false)
    }

    pub fn text(&self, node: Node) -> Option<&str> {
        self.text.get(&node).map(String::as_str)
    }

    pub fn children(&self, node: Node) -> &[Child] {
        self.children.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Markup fragments among a region's children
    pub fn fragments(&self, node: Node) -> Vec<&Fragment> {
        self.children(node)
            .iter()
            .filter_map(|child| match child {
                Child::Fragment(fragment) => Some(fragment),
                Child::Node(_) => None,
            })
            .collect()
    }

    pub fn focused(&self) -> Option<Node> {
        self.focused
    }

    /// Notices shown so far, oldest first
    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl RenderSurface for MemorySurface {
    fn set_visible(&mut self, node: Node, visible: bool) {
        self.visible.insert(node, visible);
    }

    fn set_text(&mut self, node: Node, text: &str) {
        if node == Node::MessageInput || node == Node::CreatorSearch {
            self.values.insert(node, text.to_string());
        }
        self.text.insert(node, text.to_string());
    }

    fn set_children(&mut self, node: Node, children: Vec<Child>) {
        self.children.insert(node, children);
    }

    fn read_value(&self, node: Node) -> String {
        self.values.get(&node).cloned().unwrap_or_default()
    }

    fn focus(&mut self, node: Node) {
        self.focused = Some(node);
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn contains(&self, node: Node) -> bool {
        !self.missing.contains(&node)
    }
}
