//! Change classification between two virtual nodes
//!
//! Rules are checked in a fixed order and the first match wins:
//!
//! 1. `Type`  - element vs leaf, or text leaf vs number leaf
//! 2. `Text`  - leaves of the same kind with different values
//! 3. `Node`  - elements with different tags
//! 4. `Value` - same tag, different literal `value` attribute
//! 5. `Attr`  - same tag and value, different literal attribute set
//! 6. `None`
//!
//! Handlers take no part in rule 5. Two elements that only differ in a
//! bound handler classify as `None`, and the old handler stays bound.

use rustc_hash::FxHashMap;

use crate::node::{Element, VNode};

/// Kind of change between an old and a new virtual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// No difference at this node; children may still differ
    None,
    /// Variant mismatch
    Type,
    /// Leaf content differs
    Text,
    /// Tag differs
    Node,
    /// Editable `value` differs
    Value,
    /// Literal attributes differ
    Attr,
}

impl ChangeKind {
    /// Whether this change rebuilds the live node from scratch
    #[inline]
    pub fn is_replacement(self) -> bool {
        matches!(self, Self::Type | Self::Text | Self::Node)
    }
}

/// Classify the change from `old` to `new`.
pub fn classify(old: &VNode, new: &VNode) -> ChangeKind {
    match (old, new) {
        (VNode::Leaf(a), VNode::Leaf(b)) => {
            if !a.same_kind(b) {
                ChangeKind::Type
            } else if a != b {
                ChangeKind::Text
            } else {
                ChangeKind::None
            }
        }
        (VNode::Element(a), VNode::Element(b)) => classify_elements(a, b),
        _ => ChangeKind::Type,
    }
}

fn classify_elements(old: &Element, new: &Element) -> ChangeKind {
    if old.tag != new.tag {
        return ChangeKind::Node;
    }
    if old.value() != new.value() {
        return ChangeKind::Value;
    }
    if !literal_attrs_equal(old, new) {
        return ChangeKind::Attr;
    }
    ChangeKind::None
}

/// Order-independent comparison of literal attributes.
fn literal_attrs_equal(old: &Element, new: &Element) -> bool {
    let old_map: FxHashMap<&str, &str> = old.literal_attrs().collect();
    let new_map: FxHashMap<&str, &str> = new.literal_attrs().collect();
    old_map == new_map
}
