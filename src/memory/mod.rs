//! In-memory live tree
//!
//! `MemoryHost` is an arena-backed `Host`. It behaves like a tiny DOM:
//! element and text nodes, attributes, listeners, an editable value, and
//! ordered children. Every call that mutates the tree is journaled as a
//! `Mutation`, which makes it the natural backend for tests and for
//! headless rendering.
//!
//! Removed and replaced subtrees are released. Their listeners are dropped
//! and their ids may be reused by later allocations.

mod mutation;

pub use mutation::Mutation;

use std::fmt;

use compact_str::CompactString;
use thiserror::Error;
use tracing::trace;

use crate::event::{Event, EventHandler};
use crate::host::Host;
use crate::node::VALUE_ATTR;
use crate::render::{write_close_tag, write_open_tag, write_text};

// =============================================================================
// NodeId
// =============================================================================

/// Handle to a node in a `MemoryHost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create from a raw arena index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw arena index.
    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// MemoryError
// =============================================================================

/// Failures of `MemoryHost` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Element creation with an empty tag name
    #[error("cannot create an element with an empty tag")]
    EmptyTag,

    /// The id does not refer to a live node
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// The operation needs an element but got a text node
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// `child` is not among `parent`'s children
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Expected parent
        parent: NodeId,
        /// Node that was looked up
        child: NodeId,
    },

    /// Inserting `child` under `parent` would create a cycle
    #[error("cannot insert {child} under its own descendant {parent}")]
    HierarchyRequest {
        /// Insertion point
        parent: NodeId,
        /// Node being inserted
        child: NodeId,
    },
}

// =============================================================================
// Live nodes
// =============================================================================

#[derive(Debug, Default)]
struct LiveElement {
    tag: CompactString,
    attrs: Vec<(CompactString, String)>,
    listeners: Vec<(CompactString, EventHandler)>,
    /// Editable value once set through `set_value`
    value: Option<String>,
    children: Vec<NodeId>,
}

impl LiveElement {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
enum LiveKind {
    Element(LiveElement),
    Text(String),
}

#[derive(Debug)]
struct LiveNode {
    kind: LiveKind,
    parent: Option<NodeId>,
}

// =============================================================================
// MemoryHost
// =============================================================================

/// Arena-backed live tree with a mutation journal.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: Vec<Option<LiveNode>>,
    free_list: Vec<u32>,
    journal: Vec<Mutation>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Journal
    // ─────────────────────────────────────────────────────────────────────────

    /// Mutations recorded since the last clear
    pub fn mutations(&self) -> &[Mutation] {
        &self.journal
    }

    /// Drain the recorded mutations
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    /// Forget the recorded mutations
    pub fn clear_mutations(&mut self) {
        self.journal.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Whether no live nodes exist
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Tag of an element node
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Content of a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            LiveKind::Text(t) => Some(t),
            LiveKind::Element(_) => None,
        }
    }

    /// Literal attribute of an element node
    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.element(id)?.attribute(key)
    }

    /// Current editable value of an element.
    ///
    /// Until `set_value` is called this falls back to the `value` attribute,
    /// like a form control whose value was never edited.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        let elem = self.element(id)?;
        elem.value.as_deref().or_else(|| elem.attribute(VALUE_ATTR))
    }

    /// Children of a node (empty for text nodes and unknown ids)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Parent of an attached node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Number of listeners bound on a node
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.element(id).map_or(0, |e| e.listeners.len())
    }

    /// Number of listeners bound across all live nodes
    pub fn total_listeners(&self) -> usize {
        self.nodes
            .iter()
            .flatten()
            .map(|n| match &n.kind {
                LiveKind::Element(e) => e.listeners.len(),
                LiveKind::Text(_) => 0,
            })
            .sum()
    }

    /// Invoke every handler bound to `event` on `id`, in binding order.
    ///
    /// Returns the number of handlers called. Events do not bubble.
    pub fn dispatch(&self, id: NodeId, event: &str) -> usize {
        let Some(elem) = self.element(id) else {
            return 0;
        };
        let mut payload = Event::new(event);
        if let Some(value) = self.value(id) {
            payload = payload.with_value(value);
        }

        let mut called = 0;
        for (_, handler) in elem.listeners.iter().filter(|(name, _)| name == event) {
            handler.call(&payload);
            called += 1;
        }
        trace!(node = %id, event, called, "dispatch");
        called
    }

    /// Serialize the subtree rooted at `id` as HTML.
    ///
    /// Listeners and edited values are not part of the output.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.kind {
            LiveKind::Text(t) => write_text(t, out),
            LiveKind::Element(e) => {
                let attrs = e.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()));
                if !write_open_tag(&e.tag, attrs, !e.children.is_empty(), out) {
                    return;
                }
                for &child in &e.children {
                    self.write_html(child, out);
                }
                write_close_tag(&e.tag, out);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Arena internals
    // ─────────────────────────────────────────────────────────────────────────

    fn get(&self, id: NodeId) -> Option<&LiveNode> {
        self.nodes.get(id.index())?.as_ref()
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut LiveNode> {
        self.nodes.get_mut(id.index())?.as_mut()
    }

    fn element(&self, id: NodeId) -> Option<&LiveElement> {
        match &self.get(id)?.kind {
            LiveKind::Element(e) => Some(e),
            LiveKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut LiveElement, MemoryError> {
        match &mut self.get_mut(id).ok_or(MemoryError::UnknownNode(id))?.kind {
            LiveKind::Element(e) => Ok(e),
            LiveKind::Text(_) => Err(MemoryError::NotAnElement(id)),
        }
    }

    fn alloc(&mut self, kind: LiveKind) -> NodeId {
        let node = LiveNode { kind, parent: None };
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx as usize] = Some(node);
            NodeId(idx)
        } else {
            self.nodes.push(Some(node));
            NodeId((self.nodes.len() - 1) as u32)
        }
    }

    /// Free `id` and all its descendants.
    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(next.index()).and_then(Option::take) {
                if let LiveKind::Element(e) = node.kind {
                    stack.extend(e.children);
                }
                self.free_list.push(next.0);
            }
        }
    }

    fn ensure_live(&self, id: NodeId) -> Result<(), MemoryError> {
        if self.contains(id) { Ok(()) } else { Err(MemoryError::UnknownNode(id)) }
    }

    /// Reject inserting `child` anywhere under itself.
    fn check_hierarchy(&self, parent: NodeId, child: NodeId) -> Result<(), MemoryError> {
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(MemoryError::HierarchyRequest { parent, child });
            }
            cursor = self.parent(node);
        }
        Ok(())
    }

    fn position(&self, parent: NodeId, child: NodeId) -> Result<usize, MemoryError> {
        self.element(parent)
            .ok_or(MemoryError::NotAnElement(parent))?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(MemoryError::NotAChild { parent, child })
    }

    /// Unlink `child` from its current parent, if attached.
    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        if let Ok(parent_elem) = self.element_mut(parent) {
            parent_elem.children.retain(|&c| c != child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
    }
}

// =============================================================================
// Host implementation
// =============================================================================

impl Host for MemoryHost {
    type Node = NodeId;
    type Error = MemoryError;

    fn create_element(&mut self, tag: &str) -> Result<NodeId, MemoryError> {
        if tag.is_empty() {
            return Err(MemoryError::EmptyTag);
        }
        let id = self.alloc(LiveKind::Element(LiveElement {
            tag: tag.into(),
            ..LiveElement::default()
        }));
        self.journal.push(Mutation::CreateElement { node: id, tag: tag.to_owned() });
        Ok(id)
    }

    fn create_text(&mut self, text: &str) -> Result<NodeId, MemoryError> {
        let id = self.alloc(LiveKind::Text(text.to_owned()));
        self.journal.push(Mutation::CreateText { node: id, text: text.to_owned() });
        Ok(id)
    }

    fn set_attribute(&mut self, node: &NodeId, key: &str, value: &str) -> Result<(), MemoryError> {
        let elem = self.element_mut(*node)?;
        if let Some(slot) = elem.attrs.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value.to_owned();
        } else {
            elem.attrs.push((key.into(), value.to_owned()));
        }
        self.journal.push(Mutation::SetAttribute {
            node: *node,
            key: key.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    fn remove_attribute(&mut self, node: &NodeId, key: &str) -> Result<(), MemoryError> {
        self.element_mut(*node)?.attrs.retain(|(k, _)| k != key);
        self.journal.push(Mutation::RemoveAttribute { node: *node, key: key.to_owned() });
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        node: &NodeId,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), MemoryError> {
        self.element_mut(*node)?.listeners.push((event.into(), handler));
        self.journal.push(Mutation::AddListener { node: *node, event: event.to_owned() });
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
        let (parent, child) = (*parent, *child);
        self.ensure_live(child)?;
        self.element_mut(parent)?;
        self.check_hierarchy(parent, child)?;

        self.detach(child);
        self.element_mut(parent)?.children.push(child);
        self.set_parent(child, parent);
        self.journal.push(Mutation::AppendChild { parent, child });
        Ok(())
    }

    fn replace_child(&mut self, parent: &NodeId, old: &NodeId, new: &NodeId) -> Result<(), MemoryError> {
        let (parent, old, new) = (*parent, *old, *new);
        self.ensure_live(new)?;
        self.position(parent, old)?;
        if old == new {
            return Ok(());
        }
        self.check_hierarchy(parent, new)?;

        self.detach(new);
        let pos = self.position(parent, old)?;
        self.element_mut(parent)?.children[pos] = new;
        self.set_parent(new, parent);
        self.release(old);
        self.journal.push(Mutation::ReplaceChild { parent, old, new });
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
        let (parent, child) = (*parent, *child);
        let pos = self.position(parent, child)?;
        self.element_mut(parent)?.children.remove(pos);
        self.release(child);
        self.journal.push(Mutation::RemoveChild { parent, child });
        Ok(())
    }

    fn child_at(&self, parent: &NodeId, index: usize) -> Option<NodeId> {
        self.children(*parent).get(index).copied()
    }

    fn child_count(&self, parent: &NodeId) -> usize {
        self.children(*parent).len()
    }

    fn set_value(&mut self, node: &NodeId, value: &str) -> Result<(), MemoryError> {
        self.element_mut(*node)?.value = Some(value.to_owned());
        self.journal.push(Mutation::SetValue { node: *node, value: value.to_owned() });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tree() -> (MemoryHost, NodeId, NodeId, NodeId) {
        let mut host = MemoryHost::new();
        let root = host.create_element("div").unwrap();
        let a = host.create_element("p").unwrap();
        let b = host.create_text("b").unwrap();
        host.append_child(&root, &a).unwrap();
        host.append_child(&root, &b).unwrap();
        (host, root, a, b)
    }

    #[test]
    fn test_build_and_read() {
        let (host, root, a, b) = tree();
        assert_eq!(host.len(), 3);
        assert_eq!(host.children(root), &[a, b]);
        assert_eq!(host.parent(a), Some(root));
        assert_eq!(host.tag(a), Some("p"));
        assert_eq!(host.text(b), Some("b"));
        assert_eq!(host.child_at(&root, 1), Some(b));
        assert_eq!(host.child_at(&root, 2), None);
        assert_eq!(host.child_count(&root), 2);
        assert_eq!(host.to_html(root), "<div><p></p>b</div>");
    }

    #[test]
    fn test_journal_records_calls() {
        let (mut host, root, a, b) = tree();
        assert_eq!(host.mutations().len(), 5);

        let muts = host.take_mutations();
        assert_eq!(muts[0], Mutation::CreateElement { node: root, tag: "div".into() });
        assert_eq!(muts[2], Mutation::CreateText { node: b, text: "b".into() });
        assert_eq!(muts[3], Mutation::AppendChild { parent: root, child: a });
        assert!(host.mutations().is_empty());
    }

    #[test]
    fn test_attributes() {
        let (mut host, _, a, b) = tree();
        host.set_attribute(&a, "class", "x").unwrap();
        host.set_attribute(&a, "class", "y").unwrap();
        assert_eq!(host.attribute(a, "class"), Some("y"));

        host.remove_attribute(&a, "class").unwrap();
        host.remove_attribute(&a, "missing").unwrap();
        assert_eq!(host.attribute(a, "class"), None);

        assert_eq!(host.set_attribute(&b, "k", "v"), Err(MemoryError::NotAnElement(b)));
    }

    #[test]
    fn test_value_falls_back_to_attribute() {
        let mut host = MemoryHost::new();
        let input = host.create_element("input").unwrap();
        assert_eq!(host.value(input), None);

        host.set_attribute(&input, "value", "initial").unwrap();
        assert_eq!(host.value(input), Some("initial"));

        host.set_value(&input, "edited").unwrap();
        assert_eq!(host.value(input), Some("edited"));
        assert_eq!(host.attribute(input, "value"), Some("initial"));
    }

    #[test]
    fn test_replace_releases_old_subtree() {
        let (mut host, root, a, b) = tree();
        let inner = host.create_text("inner").unwrap();
        host.append_child(&a, &inner).unwrap();
        let c = host.create_element("span").unwrap();

        host.replace_child(&root, &a, &c).unwrap();

        assert_eq!(host.children(root), &[c, b]);
        assert!(!host.contains(a));
        assert!(!host.contains(inner));
        assert_eq!(host.parent(c), Some(root));
    }

    #[test]
    fn test_remove_and_reuse_slot() {
        let (mut host, root, a, b) = tree();
        host.remove_child(&root, &a).unwrap();
        assert_eq!(host.children(root), &[b]);
        assert_eq!(host.len(), 2);

        let reused = host.create_text("again").unwrap();
        assert_eq!(reused, a, "freed slot is reused");
        assert_eq!(host.len(), 3);
    }

    #[test]
    fn test_structural_errors() {
        let (mut host, root, a, b) = tree();
        let stray = host.create_element("i").unwrap();

        assert_eq!(
            host.remove_child(&root, &stray),
            Err(MemoryError::NotAChild { parent: root, child: stray })
        );
        assert_eq!(
            host.append_child(&a, &root),
            Err(MemoryError::HierarchyRequest { parent: a, child: root })
        );
        assert_eq!(host.append_child(&b, &stray), Err(MemoryError::NotAnElement(b)));
        assert_eq!(host.create_element(""), Err(MemoryError::EmptyTag));

        let ghost = NodeId::from_raw(99);
        assert_eq!(host.append_child(&root, &ghost), Err(MemoryError::UnknownNode(ghost)));
    }

    #[test]
    fn test_append_moves_attached_node() {
        let (mut host, root, a, b) = tree();
        host.append_child(&root, &a).unwrap();
        assert_eq!(host.children(root), &[b, a]);
    }

    #[test]
    fn test_dispatch_passes_value() {
        let mut host = MemoryHost::new();
        let input = host.create_element("input").unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        host.add_event_listener(
            &input,
            "input",
            EventHandler::new(move |e| sink.borrow_mut().push(e.clone())),
        )
        .unwrap();
        host.set_value(&input, "typed").unwrap();

        assert_eq!(host.dispatch(input, "input"), 1);
        assert_eq!(host.dispatch(input, "click"), 0);
        assert_eq!(seen.borrow().as_slice(), &[Event::new("input").with_value("typed")]);
    }

    #[test]
    fn test_html_escaping() {
        let mut host = MemoryHost::new();
        let p = host.create_element("p").unwrap();
        let t = host.create_text("a < b & c").unwrap();
        host.set_attribute(&p, "title", "\"q\"").unwrap();
        host.append_child(&p, &t).unwrap();
        assert_eq!(host.to_html(p), r#"<p title="&quot;q&quot;">a &lt; b &amp; c</p>"#);
    }

    #[test]
    fn test_html_keeps_children_of_void_elements() {
        let mut host = MemoryHost::new();
        let input = host.create_element("input").unwrap();
        host.set_attribute(&input, "value", "a").unwrap();
        assert_eq!(host.to_html(input), r#"<input value="a" />"#);

        let child = host.create_text("child").unwrap();
        host.append_child(&input, &child).unwrap();
        assert_eq!(host.to_html(input), r#"<input value="a">child</input>"#);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(MemoryError::UnknownNode(NodeId::from_raw(4)).to_string(), "unknown node #4");
        assert_eq!(
            MemoryError::NotAChild { parent: NodeId::from_raw(1), child: NodeId::from_raw(2) }.to_string(),
            "node #2 is not a child of #1"
        );
    }
}
