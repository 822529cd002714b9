//! Error types for tola-reconcile.
//!
//! The reconciler itself has a single failure of its own: the live tree no
//! longer lines up with the old virtual tree. Everything else is a host
//! failure, passed through untouched.

use thiserror::Error;

/// Errors that can occur while patching a live tree.
#[derive(Debug, Error)]
pub enum PatchError<E: std::error::Error + 'static> {
    /// The live child expected at `index` does not exist.
    ///
    /// The caller broke the contract that the live tree mirrors the old
    /// virtual tree.
    #[error("no live child at index {index} (parent has {len} children)")]
    MissingTarget {
        /// Position that was looked up
        index: usize,
        /// Number of children the parent actually has
        len: usize,
    },

    /// A host operation failed.
    #[error(transparent)]
    Host(E),
}

/// Result type alias for patch operations.
pub type PatchResult<T, E> = Result<T, PatchError<E>>;

impl<E: std::error::Error + 'static> PatchError<E> {
    /// Whether this is a tree correspondence violation rather than a host failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::MissingTarget { .. })
    }

    /// The underlying host error, if any.
    pub fn host_error(&self) -> Option<&E> {
        match self {
            Self::Host(e) => Some(e),
            Self::MissingTarget { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryError;
    use static_assertions::assert_impl_all;

    assert_impl_all!(PatchError<MemoryError>: Send, Sync, std::error::Error);

    #[test]
    fn test_error_display() {
        let err: PatchError<MemoryError> = PatchError::MissingTarget { index: 2, len: 1 };
        assert_eq!(err.to_string(), "no live child at index 2 (parent has 1 children)");
        assert!(err.is_contract_violation());
        assert!(err.host_error().is_none());
    }

    #[test]
    fn test_host_error_is_transparent() {
        let err: PatchError<MemoryError> = PatchError::Host(MemoryError::EmptyTag);
        assert_eq!(err.to_string(), MemoryError::EmptyTag.to_string());
        assert!(!err.is_contract_violation());
        assert!(matches!(err.host_error(), Some(MemoryError::EmptyTag)));
    }
}
