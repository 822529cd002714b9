//! tola-reconcile - Minimal virtual tree reconciler
//!
//! ## Core Concepts
//!
//! **Virtual trees are plain data**: `VNode` is either an `Element` (tag,
//! attributes, ordered children) or a `Primitive` leaf (text or number).
//! A new tree is built for every render pass.
//!
//! **The live tree belongs to a `Host`**: the reconciler only talks to it
//! through the `Host` capability set, so any display tree can be driven.
//! `MemoryHost` is the in-memory reference host.
//!
//! **Positional patching**: `patch` classifies each old/new pair into a
//! `ChangeKind` and applies the smallest fitting mutation. Children
//! correspond by index only; there are no keys and no move detection.
//!
//! ## Modules
//! - `node`: `VNode`, `Element`, `Primitive`
//! - `attr`: attribute values and the `AttrsExt` helpers
//! - `event`: `Event` payload and `EventHandler`
//! - `host`: the `Host` trait
//! - `materialize`: build live nodes from virtual nodes
//! - `algo`: change classification and the patcher
//! - `mount`: remembered-tree helper for repeated renders
//! - `memory`: `MemoryHost` with a mutation journal
//! - `render`: HTML serialization
//!
//! ## Usage
//!
//! ```ignore
//! use tola_reconcile::prelude::*;
//!
//! let mut host = MemoryHost::new();
//! let body = host.create_element("body")?;
//! let mut mount = Mount::new(body);
//!
//! mount.render(&mut host, h!("p", { "class" => "greeting" }, "hello"))?;
//! mount.render(&mut host, h!("p", { "class" => "greeting" }, "world"))?;
//!
//! assert_eq!(host.to_html(body), r#"<body><p class="greeting">world</p></body>"#);
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Node types: VNode, Element, Primitive
pub mod node;

/// Attribute types
pub mod attr;

/// Event payload and handlers
pub mod event;

/// Live tree capability set
pub mod host;

/// Virtual to live node construction
pub mod materialize;

/// Algorithms: classify, patch
pub mod algo;

/// Caller-side mount point
pub mod mount;

/// Error types
pub mod error;

/// In-memory reference host
pub mod memory;

/// HTML rendering
pub mod render;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Element, Primitive, Tag, VNode, element};

// Attribute types
pub use attr::{AttrKey, AttrValue, Attrs, AttrsExt};

// Events
pub use event::{Event, EventHandler};

// Host
pub use host::Host;
pub use materialize::materialize;

// Algorithms
pub use algo::{ChangeKind, PatchConfig, PatchStats, classify, patch, patch_with_config};

pub use mount::Mount;

// Error types
pub use error::{PatchError, PatchResult};

// Reference host
pub use memory::{MemoryError, MemoryHost, Mutation, NodeId};
