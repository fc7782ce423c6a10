//! easy-actions: Redux-style actions without the boilerplate
//!
//! No hand-written string constants, no repeated `type` fields. Actions
//! know their own type, reducers match on generated constants.
//!
//! # Example
//! ```ignore
//! use easy_actions::prelude::*;
//!
//! struct TodoActions;
//!
//! #[action_group]
//! impl TodoActions {
//!     fn add_item(&self, text: &str) -> Payload {
//!         payload! { "type": Self::ADD_ITEM, "text": text }
//!     }
//! }
//!
//! let Combined { constants, actions } = combine([
//!     BuilderGroup::new().entry("SET_FILTER", |args| payload! { "filter": args[0].clone() }),
//! ])?;
//! ```

// Re-export everything from core
pub use easy_actions_core::*;

// Re-export the attribute macro
pub use easy_actions_macros::action_group;

/// Prelude for convenient imports
pub mod prelude {
    // Smart actions
    pub use easy_actions_core::{
        wrap_group, wrap_single, wrap_single_with, ActionContext, ActionGroup, ActionTypes,
        SmartAction, SmartActions, WrapOptions,
    };

    // Combining
    pub use easy_actions_core::{
        combine, combine_any, constants_of, ActionCreator, Actions, BuilderGroup, CombineError,
        Combined, Constants,
    };

    // Payloads
    pub use easy_actions_core::{payload, Payload, TYPE_KEY};

    // Macros
    pub use easy_actions_core::{args, assert_action_type, assert_payload_field};
    pub use easy_actions_macros::action_group;
}
