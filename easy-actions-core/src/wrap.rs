//! Wrapping action definitions into smart actions
//!
//! Definitions are registered by name on an [`ActionGroup`], then wrapped
//! all at once with [`wrap_group`]. Every resulting [`SmartAction`] shares
//! one [`SmartActions`] table and can reach its siblings through the
//! context it is invoked with.
//!
//! # Example
//!
//! ```
//! use easy_actions_core::wrap::{wrap_group, ActionGroup};
//! use easy_actions_core::Payload;
//! use serde_json::json;
//!
//! let actions = wrap_group(
//!     ActionGroup::new()
//!         .define("DELETE_ITEM", |ctx, args| {
//!             let mut payload = Payload::new();
//!             payload.insert("type".into(), json!(ctx.action_type()));
//!             payload.insert("id".into(), args.first().cloned().unwrap_or_default());
//!             payload
//!         })
//!         .define("LINKED_ACTION", |ctx, args| {
//!             ctx.call("DELETE_ITEM", args).unwrap_or_default()
//!         }),
//! );
//!
//! let payload = actions.call("LINKED_ACTION", &[json!(42)]).unwrap();
//! assert_eq!(payload.get("id"), Some(&json!(42)));
//! assert_eq!(payload.get("type"), Some(&json!("DELETE_ITEM")));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use serde_json::Value;

use crate::action::{into_definition, ActionContext, Definition, SmartAction};
use crate::payload::Payload;

/// Options applied to every action of a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WrapOptions {
    /// Fill in the action type when a payload has no `type` field
    ///
    /// A `type` the definition set itself, or one returned by a sibling
    /// through [`ActionContext::call`], is kept.
    pub inject_type: bool,
}

impl WrapOptions {
    /// Default options: payloads are returned as the definition built them
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that give every payload a `type`
    pub fn injecting() -> Self {
        Self { inject_type: true }
    }
}

/// Declarative registration of action definitions
///
/// Names are kept in registration order. Defining a name twice replaces
/// the earlier definition in place.
#[derive(Default)]
pub struct ActionGroup {
    options: WrapOptions,
    definitions: Vec<(String, Definition)>,
}

impl ActionGroup {
    /// Create an empty group with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty group with the given options
    pub fn with_options(options: WrapOptions) -> Self {
        Self {
            options,
            definitions: Vec::new(),
        }
    }

    /// Register a definition under `name`
    pub fn define<F>(mut self, name: impl Into<String>, definition: F) -> Self
    where
        F: Fn(&ActionContext<'_>, &[Value]) -> Payload + Send + Sync + 'static,
    {
        self.insert(name, into_definition(definition));
        self
    }

    /// Register an already shared definition under `name`
    pub fn insert(&mut self, name: impl Into<String>, definition: Definition) {
        let name = name.into();
        match self.definitions.iter().position(|(n, _)| *n == name) {
            Some(slot) => {
                tracing::warn!(action = %name, "Replacing existing action definition");
                self.definitions[slot].1 = definition;
            }
            None => self.definitions.push((name, definition)),
        }
    }

    /// The options this group was created with
    pub fn options(&self) -> WrapOptions {
        self.options
    }

    /// Registered names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|(name, _)| name.as_str())
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Wrap this group, see [`wrap_group`]
    pub fn wrap(self) -> Arc<SmartActions> {
        wrap_group(self)
    }
}

impl fmt::Debug for ActionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionGroup")
            .field("options", &self.options)
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// A table of sibling smart actions
///
/// The table owns its actions; each action only holds a weak reference
/// back to the table, so dropping the last `Arc` frees everything.
pub struct SmartActions {
    actions: Vec<SmartAction>,
    index: HashMap<String, usize>,
}

impl SmartActions {
    /// Collect individually wrapped actions into one table
    ///
    /// Each action is re-bound to the new table so it can reach the others.
    /// A repeated type replaces the earlier action in its slot.
    pub fn assemble(actions: impl IntoIterator<Item = SmartAction>) -> Arc<Self> {
        let table = Self::build(actions);
        tracing::debug!(actions = table.len(), "Assembled smart actions");
        table
    }

    fn build(entries: impl IntoIterator<Item = SmartAction>) -> Arc<Self> {
        Arc::new_cyclic(|parent: &Weak<Self>| {
            let mut actions: Vec<SmartAction> = Vec::new();
            let mut index: HashMap<String, usize> = HashMap::new();

            for entry in entries {
                let action = entry.bound(parent.clone());
                let existing = index.get(action.action_type()).copied();
                match existing {
                    Some(slot) => {
                        tracing::warn!(
                            action = %action.action_type(),
                            "Replacing existing smart action"
                        );
                        actions[slot] = action;
                    }
                    None => {
                        index.insert(action.action_type().to_string(), actions.len());
                        actions.push(action);
                    }
                }
            }

            Self { actions, index }
        })
    }

    /// Look up an action by type
    pub fn get(&self, name: &str) -> Option<&SmartAction> {
        self.index.get(name).map(|&slot| &self.actions[slot])
    }

    /// Invoke an action by type
    ///
    /// Returns `None` if the table has no action with that type.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Payload> {
        self.get(name).map(|action| action.call(args))
    }

    /// Check whether an action with the given type exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Action types in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(SmartAction::action_type)
    }

    /// Iterate over the actions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &SmartAction> {
        self.actions.iter()
    }

    /// Number of actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the table is empty
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for SmartActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartActions")
            .field("count", &self.actions.len())
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Wrap every definition of a group into smart actions sharing one table
///
/// An empty group produces an empty table.
pub fn wrap_group(group: ActionGroup) -> Arc<SmartActions> {
    let ActionGroup {
        options,
        definitions,
    } = group;

    let table = SmartActions::build(
        definitions
            .into_iter()
            .map(|(name, definition)| SmartAction::new(name, definition, options.inject_type)),
    );
    tracing::debug!(
        actions = table.len(),
        inject_type = options.inject_type,
        "Wrapped action group"
    );
    table
}

/// Wrap a single definition into a standalone smart action
///
/// The action has no siblings until it is collected into a table with
/// [`SmartActions::assemble`].
pub fn wrap_single<F>(name: impl Into<String>, definition: F) -> SmartAction
where
    F: Fn(&ActionContext<'_>, &[Value]) -> Payload + Send + Sync + 'static,
{
    wrap_single_with(WrapOptions::default(), name, definition)
}

/// Like [`wrap_single`], with explicit options
pub fn wrap_single_with<F>(options: WrapOptions, name: impl Into<String>, definition: F) -> SmartAction
where
    F: Fn(&ActionContext<'_>, &[Value]) -> Payload + Send + Sync + 'static,
{
    SmartAction::new(name.into(), into_definition(definition), options.inject_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::type_of;
    use serde_json::json;

    fn item_payload(ctx: &ActionContext<'_>, key: &str, args: &[Value]) -> Payload {
        let mut payload = Payload::new();
        payload.insert("type".into(), json!(ctx.action_type()));
        payload.insert(key.into(), args.first().cloned().unwrap_or_default());
        payload
    }

    fn todo_group(options: WrapOptions) -> ActionGroup {
        ActionGroup::with_options(options)
            .define("ADD_ITEM", |ctx, args| item_payload(ctx, "item", args))
            .define("DELETE_ITEM", |ctx, args| item_payload(ctx, "id", args))
            .define("LINKED_ACTION", |ctx, args| {
                ctx.call("DELETE_ITEM", args).unwrap_or_default()
            })
    }

    #[test]
    fn test_wrap_group_types() {
        let actions = wrap_group(todo_group(WrapOptions::new()));

        assert_eq!(actions.len(), 3);
        for name in ["ADD_ITEM", "DELETE_ITEM", "LINKED_ACTION"] {
            let action = actions.get(name).unwrap();
            assert_eq!(action.action_type(), name);
            assert!(action.has_parent());
        }
        assert_eq!(
            actions.names().collect::<Vec<_>>(),
            vec!["ADD_ITEM", "DELETE_ITEM", "LINKED_ACTION"]
        );
    }

    #[test]
    fn test_type_inside_payload() {
        let actions = todo_group(WrapOptions::new()).wrap();

        let payload = actions.call("ADD_ITEM", &[]).unwrap();
        assert_eq!(type_of(&payload), Some("ADD_ITEM"));

        let payload = actions.call("ADD_ITEM", &[json!("FOO_ITEM")]).unwrap();
        assert_eq!(payload.get("item"), Some(&json!("FOO_ITEM")));
    }

    #[test]
    fn test_linked_action_matches_direct_call() {
        let actions = wrap_group(todo_group(WrapOptions::new()));
        let args = [json!(42)];

        let linked = actions.call("LINKED_ACTION", &args).unwrap();
        let direct = actions.call("DELETE_ITEM", &args).unwrap();
        assert_eq!(linked, direct);
        assert_eq!(linked.get("id"), Some(&json!(42)));
    }

    #[test]
    fn test_linked_action_sees_sibling_injection() {
        let actions = ActionGroup::with_options(WrapOptions::injecting())
            .define("SAVE", |_, _| Payload::new())
            .define("SAVE_LATER", |ctx, args| {
                ctx.call("SAVE", args).unwrap_or_default()
            })
            .wrap();

        let linked = actions.call("SAVE_LATER", &[]).unwrap();
        let direct = actions.call("SAVE", &[]).unwrap();
        assert_eq!(linked, direct);
        assert_eq!(type_of(&linked), Some("SAVE"));
    }

    #[test]
    fn test_linked_action_matches_direct_call_when_injecting() {
        let actions = todo_group(WrapOptions::injecting()).wrap();
        let args = [json!(42)];

        let linked = actions.call("LINKED_ACTION", &args).unwrap();
        let direct = actions.call("DELETE_ITEM", &args).unwrap();
        assert_eq!(linked, direct);
        assert_eq!(type_of(&linked), Some("DELETE_ITEM"));
    }

    #[test]
    fn test_action_type_is_exact_for_any_name() {
        let names = ["todos/add", "addItem", "ajouter_élément", "追加", "with space", ""];
        let group = names.iter().fold(
            ActionGroup::with_options(WrapOptions::injecting()),
            |group, name| group.define(*name, |_, _| Payload::new()),
        );
        let actions = group.wrap();

        assert_eq!(actions.names().collect::<Vec<_>>(), names.to_vec());
        for name in names {
            let action = actions.get(name).unwrap();
            assert_eq!(action.action_type(), name);
            assert_eq!(type_of(&action.call(&[])), Some(name));
        }

        let single = wrap_single("todos/remove", |ctx, _| {
            let mut payload = Payload::new();
            payload.insert("seen".into(), json!(ctx.action_type()));
            payload
        });
        assert_eq!(single.action_type(), "todos/remove");
        assert_eq!(single.call(&[]).get("seen"), Some(&json!("todos/remove")));
    }

    #[test]
    fn test_empty_group_is_noop() {
        let group = ActionGroup::new();
        assert!(group.is_empty());

        let actions = wrap_group(group);
        assert!(actions.is_empty());
        assert!(actions.call("ANYTHING", &[]).is_none());
    }

    #[test]
    fn test_redefine_replaces_in_place() {
        let group = ActionGroup::new()
            .define("FIRST", |_, _| Payload::new())
            .define("SECOND", |_, _| Payload::new())
            .define("FIRST", |ctx, _| item_payload(ctx, "replaced", &[json!(true)]));

        assert_eq!(group.names().collect::<Vec<_>>(), vec!["FIRST", "SECOND"]);

        let actions = group.wrap();
        let payload = actions.call("FIRST", &[]).unwrap();
        assert_eq!(payload.get("replaced"), Some(&json!(true)));
    }

    #[test]
    fn test_missing_sibling_returns_none() {
        let actions = ActionGroup::new()
            .define("ORPHAN", |ctx, _| {
                let mut payload = Payload::new();
                payload.insert("found".into(), json!(ctx.call("NOPE", &[]).is_some()));
                payload
            })
            .wrap();

        let payload = actions.call("ORPHAN", &[]).unwrap();
        assert_eq!(payload.get("found"), Some(&json!(false)));
    }

    #[test]
    fn test_wrap_single_then_assemble() {
        let add = wrap_single("ADD_ITEM", |ctx, args| item_payload(ctx, "item", args));
        let delete = wrap_single("DELETE_ITEM", |ctx, args| item_payload(ctx, "id", args));
        let linked = wrap_single("LINKED_ACTION", |ctx, args| {
            ctx.call("DELETE_ITEM", args).unwrap_or_default()
        });

        assert_eq!(add.action_type(), "ADD_ITEM");
        assert!(!linked.has_parent());
        assert!(linked.call(&[json!(42)]).is_empty());

        let actions = SmartActions::assemble([add, delete, linked]);
        let payload = actions.call("LINKED_ACTION", &[json!(42)]).unwrap();
        assert_eq!(payload.get("id"), Some(&json!(42)));
        assert_eq!(type_of(&payload), Some("DELETE_ITEM"));
    }

    #[test]
    fn test_wrap_single_with_injection() {
        let action = wrap_single_with(WrapOptions::injecting(), "PING", |_, _| Payload::new());
        assert!(action.injects_type());
        assert_eq!(type_of(&action.call(&[])), Some("PING"));
    }

    #[test]
    fn test_assemble_repeated_type_replaces() {
        let first = wrap_single("TICK", |_, _| {
            let mut payload = Payload::new();
            payload.insert("n".into(), json!(1));
            payload
        });
        let second = wrap_single("TICK", |_, _| {
            let mut payload = Payload::new();
            payload.insert("n".into(), json!(2));
            payload
        });

        let actions = SmartActions::assemble([first, second]);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions.call("TICK", &[]).unwrap().get("n"), Some(&json!(2)));
    }

    #[test]
    fn test_dropped_table_detaches_actions() {
        let actions = todo_group(WrapOptions::new()).wrap();
        let linked = actions.get("LINKED_ACTION").unwrap().clone();
        drop(actions);

        assert!(!linked.has_parent());
        assert_eq!(linked.action_type(), "LINKED_ACTION");
        assert!(linked.call(&[json!(1)]).is_empty());
    }

    #[test]
    fn test_actions_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmartAction>();
        assert_send_sync::<SmartActions>();
    }
}
