//! Smart actions: action definitions that know their own type
//!
//! A smart action wraps a user-supplied definition together with the
//! action type it was registered under. When the action belongs to a
//! [`SmartActions`] table it also carries a non-owning reference back to
//! that table, so a definition can invoke its siblings through the
//! [`ActionContext`] it receives.

use std::fmt;
use std::sync::{Arc, Weak};

use serde_json::Value;

use crate::payload::{self, Payload};
use crate::wrap::SmartActions;

/// A shared action definition
///
/// Receives the invocation context and the positional arguments the
/// action was called with, and returns the action's payload.
pub type Definition = Arc<dyn Fn(&ActionContext<'_>, &[Value]) -> Payload + Send + Sync>;

/// Share a closure as a [`Definition`]
pub fn into_definition<F>(definition: F) -> Definition
where
    F: Fn(&ActionContext<'_>, &[Value]) -> Payload + Send + Sync + 'static,
{
    Arc::new(definition)
}

/// Trait for types that declare a fixed list of action types
///
/// Implemented by `#[action_group]` for every annotated `impl` block.
pub trait ActionTypes {
    /// All action types in declaration order
    fn action_types() -> &'static [&'static str];
}

/// What a definition sees while it runs
///
/// Gives access to the action's own type and, for actions that belong to a
/// table, to the sibling actions of that table.
pub struct ActionContext<'a> {
    name: &'a str,
    parent: Option<Arc<SmartActions>>,
}

impl<'a> ActionContext<'a> {
    /// The type of the action currently running
    pub fn action_type(&self) -> &'a str {
        self.name
    }

    /// The table this action belongs to
    ///
    /// `None` for standalone actions created with
    /// [`wrap_single`](crate::wrap::wrap_single), or when the table has
    /// already been dropped.
    pub fn parent(&self) -> Option<&SmartActions> {
        self.parent.as_deref()
    }

    /// Look up a sibling action by type
    pub fn sibling(&self, name: &str) -> Option<&SmartAction> {
        self.parent()?.get(name)
    }

    /// Invoke a sibling action and return its payload
    ///
    /// Returns `None` if there is no sibling with that type.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Payload> {
        self.sibling(name).map(|action| action.call(args))
    }
}

impl fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("name", &self.name)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// An action definition bound to its action type
///
/// The type is fixed at construction and exposed through
/// [`action_type`](Self::action_type). Cloning is cheap: the name and
/// definition are shared.
#[derive(Clone)]
pub struct SmartAction {
    name: Arc<str>,
    definition: Definition,
    inject_type: bool,
    parent: Weak<SmartActions>,
}

impl SmartAction {
    pub(crate) fn new(name: impl Into<Arc<str>>, definition: Definition, inject_type: bool) -> Self {
        Self {
            name: name.into(),
            definition,
            inject_type,
            parent: Weak::new(),
        }
    }

    /// Copy of this action pointing at a different parent table
    pub(crate) fn bound(&self, parent: Weak<SmartActions>) -> Self {
        Self {
            parent,
            ..self.clone()
        }
    }

    /// The action type this action was registered under
    pub fn action_type(&self) -> &str {
        &self.name
    }

    /// Whether a payload without `type` gets the action type filled in
    pub fn injects_type(&self) -> bool {
        self.inject_type
    }

    /// Whether the action is attached to a live sibling table
    pub fn has_parent(&self) -> bool {
        self.parent.strong_count() > 0
    }

    /// Invoke the action with positional arguments
    pub fn call(&self, args: &[Value]) -> Payload {
        let context = ActionContext {
            name: &self.name,
            parent: self.parent.upgrade(),
        };
        let result = (self.definition)(&context, args);
        if self.inject_type {
            payload::with_default_type(result, &self.name)
        } else {
            result
        }
    }
}

impl fmt::Debug for SmartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartAction")
            .field("name", &self.name)
            .field("inject_type", &self.inject_type)
            .field("has_parent", &self.has_parent())
            .finish()
    }
}
