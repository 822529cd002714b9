//! Positional patch algorithm
//!
//! Walks the old and new virtual trees in lockstep and mutates the live tree
//! so that it matches the new one. Children correspond by index only.
//!
//! # Algorithm
//!
//! For a slot `index` under a live `parent`:
//!
//! 1. Old absent: materialize the new node and append it to `parent`.
//! 2. New absent: remove the live child at `index`.
//! 3. Otherwise classify the pair:
//!    - `Type` / `Text` / `Node`: rebuild the subtree and swap it in.
//!    - `Value`: set the editable value in place, nothing else.
//!    - `Attr`: drop every old literal attribute, set every new one. Children
//!      are left alone unless `PatchConfig::descend_on_attr_change` is set.
//!    - `None`: queue the children.
//!
//! Child lists are patched pairwise over their common prefix. Extra new
//! children are appended in order. Extra old children are removed from the
//! last index down, so the index of every remaining removal stays valid.
//!
//! Insertions always append. That is correct for growth at the end of a
//! list, and is the reason this algorithm cannot express insertion in the
//! middle of a sibling list.
//!
//! The walk runs on an explicit stack of pending slots rather than the call
//! stack, so tree depth is bounded only by memory. Slots are pushed in
//! reverse so they pop in the same depth-first order a recursive walk takes.

use tracing::{debug, trace};

use crate::error::{PatchError, PatchResult};
use crate::host::Host;
use crate::materialize::materialize;
use crate::node::VNode;

use super::classify::{ChangeKind, classify};

// =============================================================================
// Public Types
// =============================================================================

/// Configuration for the patch pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchConfig {
    /// Keep patching children after an attribute update on their parent.
    /// Default: false (an attribute change ends the pass for that subtree)
    pub descend_on_attr_change: bool,
}

impl PatchConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also patch children of nodes whose attributes changed.
    pub fn with_attr_descent(mut self, descend: bool) -> Self {
        self.descend_on_attr_change = descend;
        self
    }
}

/// Statistics from a patch pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct PatchStats {
    /// Number of old/new pairs classified
    pub nodes_compared: usize,
    /// Number of subtrees materialized and appended
    pub nodes_created: usize,
    /// Number of subtrees rebuilt and swapped in
    pub nodes_replaced: usize,
    /// Number of live children removed
    pub nodes_removed: usize,
    /// Number of attribute updates
    pub attr_updates: usize,
    /// Number of editable value updates
    pub value_updates: usize,
    /// Deepest slot visited; the slot passed to `patch` is depth 0
    pub max_depth: usize,
}

impl PatchStats {
    /// Check if the pass mutated the live tree
    pub fn has_changes(&self) -> bool {
        self.nodes_created
            + self.nodes_replaced
            + self.nodes_removed
            + self.attr_updates
            + self.value_updates
            > 0
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Reconcile the live child of `parent` at `index` from `old` to `new`.
///
/// `parent`'s child at `index` must be the live node built from `old`. Pass
/// `None` as `old` on the first render and `None` as `new` to remove.
///
/// # Example
///
/// ```ignore
/// let mut host = MemoryHost::new();
/// let root = host.create_element("body")?;
/// let v1 = h!("p", {}, "hello");
/// patch(&mut host, &root, None, Some(&v1), 0)?;
/// let v2 = h!("p", {}, "world");
/// patch(&mut host, &root, Some(&v1), Some(&v2), 0)?;
/// ```
pub fn patch<H: Host>(
    host: &mut H,
    parent: &H::Node,
    old: Option<&VNode>,
    new: Option<&VNode>,
    index: usize,
) -> PatchResult<PatchStats, H::Error> {
    patch_with_config(host, parent, old, new, index, PatchConfig::default())
}

/// Reconcile with custom configuration.
pub fn patch_with_config<H: Host>(
    host: &mut H,
    parent: &H::Node,
    old: Option<&VNode>,
    new: Option<&VNode>,
    index: usize,
    config: PatchConfig,
) -> PatchResult<PatchStats, H::Error> {
    let mut ctx = PatchContext::new(host, config);
    ctx.pending.push(Slot {
        parent: parent.clone(),
        old,
        new,
        index,
        depth: 0,
    });
    ctx.run()?;
    let stats = ctx.stats;
    debug!(index, ?stats, "patch pass complete");
    Ok(stats)
}

// =============================================================================
// Internal Context
// =============================================================================

/// Pending work: reconcile `parent`'s child at `index` from `old` to `new`.
struct Slot<'v, N> {
    parent: N,
    old: Option<&'v VNode>,
    new: Option<&'v VNode>,
    index: usize,
    depth: usize,
}

struct PatchContext<'h, 'v, H: Host> {
    host: &'h mut H,
    config: PatchConfig,
    stats: PatchStats,
    pending: Vec<Slot<'v, H::Node>>,
}

impl<'h, 'v, H: Host> PatchContext<'h, 'v, H> {
    fn new(host: &'h mut H, config: PatchConfig) -> Self {
        Self {
            host,
            config,
            stats: PatchStats::default(),
            pending: Vec::new(),
        }
    }

    fn run(&mut self) -> PatchResult<(), H::Error> {
        while let Some(slot) = self.pending.pop() {
            self.patch_slot(slot)?;
        }
        Ok(())
    }

    fn patch_slot(&mut self, slot: Slot<'v, H::Node>) -> PatchResult<(), H::Error> {
        let Slot { parent, old, new, index, depth } = slot;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let Some(old) = old else {
            if let Some(new) = new {
                self.insert(&parent, new)?;
            }
            return Ok(());
        };

        let target = self.target(&parent, index)?;

        let Some(new) = new else {
            self.host.remove_child(&parent, &target).map_err(PatchError::Host)?;
            self.stats.nodes_removed += 1;
            return Ok(());
        };

        self.stats.nodes_compared += 1;
        let change = classify(old, new);
        trace!(?change, index, depth, "classified");

        match change {
            ChangeKind::Type | ChangeKind::Text | ChangeKind::Node => {
                return self.replace(&parent, &target, new);
            }
            ChangeKind::Value => {
                return self.update_value(&target, new);
            }
            ChangeKind::Attr => {
                self.update_attrs(&target, old, new)?;
                if !self.config.descend_on_attr_change {
                    return Ok(());
                }
            }
            ChangeKind::None => {}
        }

        self.schedule_children(&target, old.children(), new.children(), depth + 1);
        Ok(())
    }

    /// Live child expected at `index`
    fn target(&self, parent: &H::Node, index: usize) -> PatchResult<H::Node, H::Error> {
        self.host.child_at(parent, index).ok_or_else(|| PatchError::MissingTarget {
            index,
            len: self.host.child_count(parent),
        })
    }

    fn insert(&mut self, parent: &H::Node, new: &VNode) -> PatchResult<(), H::Error> {
        let live = materialize(&mut *self.host, new).map_err(PatchError::Host)?;
        self.host.append_child(parent, &live).map_err(PatchError::Host)?;
        self.stats.nodes_created += 1;
        Ok(())
    }

    fn replace(&mut self, parent: &H::Node, target: &H::Node, new: &VNode) -> PatchResult<(), H::Error> {
        let live = materialize(&mut *self.host, new).map_err(PatchError::Host)?;
        self.host.replace_child(parent, target, &live).map_err(PatchError::Host)?;
        self.stats.nodes_replaced += 1;
        Ok(())
    }

    fn update_value(&mut self, target: &H::Node, new: &VNode) -> PatchResult<(), H::Error> {
        let value = new.as_element().and_then(|e| e.value()).unwrap_or_default();
        self.host.set_value(target, value).map_err(PatchError::Host)?;
        self.stats.value_updates += 1;
        Ok(())
    }

    fn update_attrs(&mut self, target: &H::Node, old: &VNode, new: &VNode) -> PatchResult<(), H::Error> {
        let (Some(old), Some(new)) = (old.as_element(), new.as_element()) else {
            return Ok(());
        };

        for (key, _) in old.literal_attrs() {
            self.host.remove_attribute(target, key).map_err(PatchError::Host)?;
        }
        for (key, value) in new.literal_attrs() {
            self.host.set_attribute(target, key, value).map_err(PatchError::Host)?;
        }

        self.stats.attr_updates += 1;
        Ok(())
    }

    /// Queue the child slots of `target`.
    ///
    /// Pushed in reverse of execution order: common pairs pop first, then
    /// appends, then removals from the highest index down.
    fn schedule_children(&mut self, target: &H::Node, old: &'v [VNode], new: &'v [VNode], depth: usize) {
        let common = old.len().min(new.len());
        let slot = |old, new, index| Slot {
            parent: target.clone(),
            old,
            new,
            index,
            depth,
        };

        for (i, o) in old.iter().enumerate().skip(common) {
            self.pending.push(slot(Some(o), None, i));
        }
        for (i, n) in new.iter().enumerate().skip(common).rev() {
            self.pending.push(slot(None, Some(n), i));
        }
        for (i, (o, n)) in old.iter().zip(new).enumerate().rev() {
            self.pending.push(slot(Some(o), Some(n), i));
        }
    }
}
