//! Element type - virtual elements with attributes and children
//!
//! The core building block of the virtual tree.

use crate::attr::{AttrKey, AttrValue, Attrs, AttrsExt, HANDLER_PREFIX};
use crate::event::{Event, EventHandler};

use super::{Children, Tag, VNode};

/// Attribute holding an editable control's current content.
pub const VALUE_ATTR: &str = "value";

// =============================================================================
// Element
// =============================================================================

/// Virtual element: tag, attributes and ordered children
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Tag name identifying the live node kind
    pub tag: Tag,
    /// Element attributes (literals and handlers)
    pub attrs: Attrs,
    /// Child nodes, positionally significant
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute (literal or handler)
    pub fn attr(mut self, name: impl Into<AttrKey>, value: impl Into<AttrValue>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Bind a handler for `event`, stored under the `on`-prefixed key
    pub fn on(mut self, event: &str, handler: impl Fn(&Event) + 'static) -> Self {
        let mut key = AttrKey::from(HANDLER_PREFIX);
        key.push_str(event);
        self.attrs.set_attr(key, EventHandler::new(handler));
        self
    }

    /// Append a child node
    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a text leaf
    pub fn text(self, text: &str) -> Self {
        self.child(text)
    }

    /// Append several children in order
    pub fn with_children<C: Into<VNode>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get_attr(name)
    }

    /// Get a literal attribute by name
    pub fn get_literal(&self, name: &str) -> Option<&str> {
        self.attrs.get_literal(name)
    }

    /// Literal `value` attribute, the editable content of input-like nodes
    pub fn value(&self) -> Option<&str> {
        self.attrs.get_literal(VALUE_ATTR)
    }

    /// Literal attributes, handlers skipped
    pub fn literal_attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.literals()
    }

    /// Handler attributes
    pub fn handlers(&self) -> impl Iterator<Item = (&str, &EventHandler)> {
        self.attrs.handlers()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Other helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text of all leaf descendants
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                VNode::Leaf(p) => buf.push_str(&p.to_text()),
                VNode::Element(e) => e.collect_text(buf),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let elem = Element::new("div")
            .attr("id", "main")
            .attr("class", "container")
            .child(Element::new("span").text("Hello"))
            .text(" world")
            .child(3);

        assert_eq!(elem.tag, "div");
        assert_eq!(elem.get_literal("id"), Some("main"));
        assert_eq!(elem.child_count(), 3);
        assert_eq!(elem.text_content(), "Hello world3");
    }

    #[test]
    fn test_on_stores_prefixed_handler() {
        let elem = Element::new("button").on("click", |_| {}).attr("class", "btn");

        let keys: Vec<_> = elem.handlers().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["onclick"]);
        assert_eq!(elem.literal_attrs().count(), 1);
        assert_eq!(elem.get_literal("onclick"), None);
    }

    #[test]
    fn test_value_is_literal_only() {
        let input = Element::new("input").attr("value", "abc");
        assert_eq!(input.value(), Some("abc"));

        let bound = Element::new("input").attr("value", EventHandler::new(|_| {}));
        assert_eq!(bound.value(), None);
        assert!(Element::new("input").value().is_none());
    }

    #[test]
    fn test_duplicate_attr_overwrites() {
        let elem = Element::new("p").attr("class", "a").attr("class", "b");
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.get_literal("class"), Some("b"));
    }
}
