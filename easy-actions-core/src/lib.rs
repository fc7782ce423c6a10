//! Core types for easy-actions
//!
//! This crate removes the boilerplate around Redux-style actions: string
//! constants for reducers and action creators that stamp their own type.
//!
//! # Core Concepts
//!
//! - **Smart action**: a definition bound to its action type, able to call
//!   sibling actions through its [`ActionContext`]
//! - **Action group**: declarative registration of definitions, wrapped
//!   into a shared [`SmartActions`] table
//! - **Combine**: merge groups of payload builders into [`Constants`] and
//!   [`Actions`], rejecting duplicate names
//!
//! # Smart Actions
//!
//! ```
//! use easy_actions_core::prelude::*;
//! use serde_json::json;
//!
//! let actions = ActionGroup::new()
//!     .define("ADD_ITEM", |ctx, args| {
//!         let mut payload = Payload::new();
//!         payload.insert("type".into(), json!(ctx.action_type()));
//!         payload.insert("item".into(), args.first().cloned().unwrap_or_default());
//!         payload
//!     })
//!     .wrap();
//!
//! let add = actions.get("ADD_ITEM").unwrap();
//! assert_eq!(add.action_type(), "ADD_ITEM");
//! assert_eq!(add.call(&[json!("FOO_ITEM")]).get("item"), Some(&json!("FOO_ITEM")));
//! ```
//!
//! # Combining Builders
//!
//! ```
//! use easy_actions_core::prelude::*;
//! use serde_json::json;
//!
//! let todos = BuilderGroup::new().entry("ADD_TODO", |args| {
//!     let mut payload = Payload::new();
//!     payload.insert("text".into(), args[0].clone());
//!     payload
//! });
//! let filters = BuilderGroup::new().entry("SET_FILTER", |_| Payload::new());
//!
//! let Combined { constants, actions } = combine([todos, filters]).unwrap();
//!
//! // Reducers match on constants instead of hand-written strings
//! let created = actions.create("ADD_TODO", &[json!("milk")]).unwrap();
//! match payload::type_of(&created) {
//!     Some(t) if Some(t) == constants.get("ADD_TODO") => {}
//!     other => panic!("unexpected action {other:?}"),
//! }
//! ```

pub mod action;
pub mod combine;
pub mod error;
pub mod payload;
pub mod testing;
pub mod wrap;

pub use serde_json;

// Core exports
pub use action::{into_definition, ActionContext, ActionTypes, Definition, SmartAction};
pub use error::CombineError;
pub use payload::{Payload, TYPE_KEY};

// Wrapper exports
pub use wrap::{wrap_group, wrap_single, wrap_single_with, ActionGroup, SmartActions, WrapOptions};

// Combiner exports
pub use combine::{
    combine, combine_any, constants_of, into_builder, ActionCreator, Actions, Builder,
    BuilderGroup, Combined, Constants,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{ActionContext, ActionTypes, SmartAction};
    pub use crate::combine::{
        combine, combine_any, constants_of, ActionCreator, Actions, BuilderGroup, Combined,
        Constants,
    };
    pub use crate::error::CombineError;
    pub use crate::payload::{self, Payload, TYPE_KEY};
    pub use crate::wrap::{
        wrap_group, wrap_single, wrap_single_with, ActionGroup, SmartActions, WrapOptions,
    };
}
