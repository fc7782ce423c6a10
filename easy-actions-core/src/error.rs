//! Errors raised while combining action groups

/// Why a call to [`combine`](crate::combine::combine) failed
///
/// Combination is all-or-nothing: when an error is returned no partial
/// constants or actions are produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CombineError {
    /// An argument was not a plain name-to-builder mapping
    #[error("group #{index} must be a plain object")]
    InvalidGroup {
        /// Position of the offending argument
        index: usize,
    },

    /// Two entries declared the same action name
    #[error("action {name} already exists")]
    DuplicateAction {
        /// The name that was declared twice
        name: String,
    },
}
