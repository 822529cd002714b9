//! Algorithm implementations for reconciliation.
//!
//! - `classify`: change kind between an old and a new virtual node
//! - `patch`: positional patcher driving a `Host`

mod classify;
mod patch;

pub use classify::{ChangeKind, classify};
pub use patch::{PatchConfig, PatchStats, patch, patch_with_config};
