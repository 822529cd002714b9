//! Mutation journal entries recorded by `MemoryHost`

use super::NodeId;

/// One live-tree mutation, in the order the host received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateElement { node: NodeId, tag: String },
    CreateText { node: NodeId, text: String },
    SetAttribute { node: NodeId, key: String, value: String },
    RemoveAttribute { node: NodeId, key: String },
    AddListener { node: NodeId, event: String },
    AppendChild { parent: NodeId, child: NodeId },
    ReplaceChild { parent: NodeId, old: NodeId, new: NodeId },
    RemoveChild { parent: NodeId, child: NodeId },
    SetValue { node: NodeId, value: String },
}

impl Mutation {
    /// Node the mutation was applied to (the parent for structural changes)
    pub fn target(&self) -> NodeId {
        match self {
            Self::CreateElement { node, .. }
            | Self::CreateText { node, .. }
            | Self::SetAttribute { node, .. }
            | Self::RemoveAttribute { node, .. }
            | Self::AddListener { node, .. }
            | Self::SetValue { node, .. } => *node,
            Self::AppendChild { parent, .. }
            | Self::ReplaceChild { parent, .. }
            | Self::RemoveChild { parent, .. } => *parent,
        }
    }

    /// Whether the mutation changes the shape of the tree
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::AppendChild { .. } | Self::ReplaceChild { .. } | Self::RemoveChild { .. }
        )
    }
}
