//! Prelude module for common imports.
//!
//! ```ignore
//! use tola_reconcile::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Element, Primitive, Tag, VNode, element};

// Attributes
pub use crate::attr::{AttrKey, AttrValue, Attrs, AttrsExt};

// Events
pub use crate::event::{Event, EventHandler};

// Host
pub use crate::host::Host;
pub use crate::materialize::materialize;

// Algorithms
pub use crate::algo::{ChangeKind, PatchConfig, PatchStats, classify, patch, patch_with_config};

pub use crate::mount::Mount;

// Error
pub use crate::error::{PatchError, PatchResult};

// Reference host
pub use crate::memory::{MemoryError, MemoryHost, Mutation, NodeId};

// Render
pub use crate::render::{to_html, write_html};

// Macros
pub use crate::h;
