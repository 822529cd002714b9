//! Live tree capability set
//!
//! The reconciler never owns live nodes. It drives a `Host` that creates and
//! mutates them: a browser DOM binding, a native widget toolkit, or the
//! in-memory `MemoryHost` shipped with this crate.
//!
//! Every mutating method takes `&mut self`. A patch pass borrows the host
//! exclusively for its whole duration, so no other writer can touch the live
//! tree while it runs.

use crate::event::EventHandler;

/// Mutable display tree driven by the reconciler.
///
/// `Node` is a cheap handle to a live node. Handles stay valid while the
/// node is attached; what happens to a handle after its node is removed is
/// host-defined.
pub trait Host {
    /// Handle to a live node
    type Node: Clone;
    /// Failure of an underlying host operation
    type Error: std::error::Error + 'static;

    /// Create a new, empty, detached element node.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    /// Create a new detached text node.
    fn create_text(&mut self, text: &str) -> Result<Self::Node, Self::Error>;

    /// Set a literal attribute. Setting the same value twice is a no-op.
    fn set_attribute(&mut self, node: &Self::Node, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove an attribute. Absent attributes are ignored.
    fn remove_attribute(&mut self, node: &Self::Node, key: &str) -> Result<(), Self::Error>;

    /// Bind `handler` to `event` on `node`. Duplicate bindings are host-defined.
    fn add_event_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), Self::Error>;

    /// Append `child` at the end of `parent`'s children.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

    /// Swap `old` for `new` at `old`'s position under `parent`.
    fn replace_child(
        &mut self,
        parent: &Self::Node,
        old: &Self::Node,
        new: &Self::Node,
    ) -> Result<(), Self::Error>;

    /// Detach `child` from `parent`.
    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

    /// Child of `parent` at `index`, if any.
    fn child_at(&self, parent: &Self::Node, index: usize) -> Option<Self::Node>;

    /// Number of children under `parent`.
    fn child_count(&self, parent: &Self::Node) -> usize;

    /// Set the current content of an editable node (text inputs and the like).
    fn set_value(&mut self, node: &Self::Node, value: &str) -> Result<(), Self::Error>;
}
