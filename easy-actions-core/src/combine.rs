//! Combining groups of payload builders into constants and action creators
//!
//! Each group maps action names to payload builders. [`combine`] merges
//! any number of groups into a [`Combined`] pair:
//!
//! - [`Constants`]: `name -> name`, for matching on action types in reducers
//! - [`Actions`]: `name -> creator`, where every created payload carries
//!   `type = name`
//!
//! Names must be unique across all groups; the first repeat found (in
//! argument order, then entry order) aborts the whole combination.
//!
//! # Example
//!
//! ```
//! use easy_actions_core::combine::{combine, BuilderGroup};
//! use easy_actions_core::{CombineError, Payload};
//! use serde_json::json;
//!
//! let items = BuilderGroup::new().entry("ADD_ITEM", |args| {
//!     let mut payload = Payload::new();
//!     payload.insert("text".into(), args[0].clone());
//!     payload
//! });
//!
//! let combined = combine([items.clone()]).unwrap();
//! assert_eq!(combined.constants.get("ADD_ITEM"), Some("ADD_ITEM"));
//!
//! let payload = combined.actions.create("ADD_ITEM", &[json!("Foo")]).unwrap();
//! assert_eq!(serde_json::Value::Object(payload), json!({ "type": "ADD_ITEM", "text": "Foo" }));
//!
//! let err = combine([items.clone(), items]).unwrap_err();
//! assert_eq!(err, CombineError::DuplicateAction { name: "ADD_ITEM".into() });
//! ```

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::action::ActionTypes;
use crate::error::CombineError;
use crate::payload::{self, Payload};

/// A shared payload builder
pub type Builder = Arc<dyn Fn(&[Value]) -> Payload + Send + Sync>;

/// Share a closure as a [`Builder`]
pub fn into_builder<F>(builder: F) -> Builder
where
    F: Fn(&[Value]) -> Payload + Send + Sync + 'static,
{
    Arc::new(builder)
}

/// An ordered mapping from action names to payload builders
///
/// Entries keep insertion order. Repeated names are kept as-is so that
/// [`combine`] can report them.
#[derive(Clone, Default)]
pub struct BuilderGroup {
    entries: Vec<(String, Builder)>,
}

impl BuilderGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a builder under `name`
    pub fn entry<F>(mut self, name: impl Into<String>, builder: F) -> Self
    where
        F: Fn(&[Value]) -> Payload + Send + Sync + 'static,
    {
        self.insert(name, into_builder(builder));
        self
    }

    /// Add an already shared builder under `name`
    pub fn insert(&mut self, name: impl Into<String>, builder: Builder) {
        self.entries.push((name.into(), builder));
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the group has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for BuilderGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuilderGroup")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl<N: Into<String>> FromIterator<(N, Builder)> for BuilderGroup {
    fn from_iter<I: IntoIterator<Item = (N, Builder)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, builder)| (name.into(), builder))
                .collect(),
        }
    }
}

impl<N: Into<String>> From<BTreeMap<N, Builder>> for BuilderGroup {
    fn from(map: BTreeMap<N, Builder>) -> Self {
        map.into_iter().collect()
    }
}

/// Keys are taken in sorted order so duplicate reports are deterministic.
impl<N: Into<String>> From<HashMap<N, Builder>> for BuilderGroup {
    fn from(map: HashMap<N, Builder>) -> Self {
        let mut entries: Vec<(String, Builder)> = map
            .into_iter()
            .map(|(name, builder)| (name.into(), builder))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Self { entries }
    }
}

/// Creates payloads for one action type
#[derive(Clone)]
pub struct ActionCreator {
    name: Arc<str>,
    builder: Builder,
}

impl ActionCreator {
    fn new(name: &str, builder: Builder) -> Self {
        Self {
            name: name.into(),
            builder,
        }
    }

    /// The action type this creator stamps on its payloads
    pub fn action_type(&self) -> &str {
        &self.name
    }

    /// Build a payload and set its `type` to this creator's action type
    pub fn create(&self, args: &[Value]) -> Payload {
        payload::with_type((self.builder)(args), &self.name)
    }
}

impl fmt::Debug for ActionCreator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("name", &self.name)
            .finish()
    }
}

/// Action name constants, each mapped to itself
///
/// Serializes as a JSON object, e.g. `{"ADD_ITEM": "ADD_ITEM"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Constants(BTreeMap<String, String>);

impl Constants {
    /// Get the constant for a name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Check whether a name is declared
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of constants
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no constants
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn declare(&mut self, name: &str) {
        self.0.insert(name.to_string(), name.to_string());
    }
}

/// Action creators keyed by action type
#[derive(Clone, Default)]
pub struct Actions(BTreeMap<String, ActionCreator>);

impl Actions {
    /// Get the creator for an action type
    pub fn get(&self, name: &str) -> Option<&ActionCreator> {
        self.0.get(name)
    }

    /// Create a payload for an action type
    ///
    /// Returns `None` if no creator exists for that type.
    pub fn create(&self, name: &str, args: &[Value]) -> Option<Payload> {
        self.get(name).map(|creator| creator.create(args))
    }

    /// Check whether a creator exists for an action type
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// All action types, in name order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of creators
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no creators
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Actions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions")
            .field("count", &self.0.len())
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// The result of a successful [`combine`]
#[derive(Debug, Clone, Default)]
pub struct Combined {
    /// `name -> name` for every combined action
    pub constants: Constants,
    /// `name -> creator` for every combined action
    pub actions: Actions,
}

impl Combined {
    /// Split into constants and actions
    pub fn into_parts(self) -> (Constants, Actions) {
        (self.constants, self.actions)
    }

    fn push(mut self, name: String, builder: Builder) -> Result<Self, CombineError> {
        if self.constants.contains(&name) {
            tracing::debug!(action = %name, "Duplicate action while combining");
            return Err(CombineError::DuplicateAction { name });
        }
        self.constants.declare(&name);
        let creator = ActionCreator::new(&name, builder);
        self.actions.0.insert(name, creator);
        Ok(self)
    }
}

/// Merge groups of payload builders into constants and action creators
///
/// Groups are flattened in call order and folded left to right. The first
/// repeated name fails the whole call with
/// [`CombineError::DuplicateAction`].
pub fn combine<I>(groups: I) -> Result<Combined, CombineError>
where
    I: IntoIterator,
    I::Item: Into<BuilderGroup>,
{
    let groups: Vec<BuilderGroup> = groups.into_iter().map(Into::into).collect();
    let group_count = groups.len();

    let combined = groups
        .into_iter()
        .flat_map(|group| group.entries)
        .try_fold(Combined::default(), |acc, (name, builder)| {
            acc.push(name, builder)
        })?;

    tracing::debug!(
        groups = group_count,
        actions = combined.actions.len(),
        "Combined action groups"
    );
    Ok(combined)
}

/// Like [`combine`], for arguments whose types are only known at runtime
///
/// Accepted groups are [`BuilderGroup`] and `HashMap`s or `BTreeMap`s of
/// [`Builder`]s keyed by `String` or `&'static str`. Every argument is checked before anything
/// is merged; the first argument of any other type fails with
/// [`CombineError::InvalidGroup`].
pub fn combine_any(groups: &[&dyn Any]) -> Result<Combined, CombineError> {
    let plain = groups
        .iter()
        .enumerate()
        .map(|(index, group)| as_plain_group(*group).ok_or(CombineError::InvalidGroup { index }))
        .collect::<Result<Vec<_>, _>>()?;
    combine(plain)
}

fn as_plain_group(group: &dyn Any) -> Option<BuilderGroup> {
    if let Some(group) = group.downcast_ref::<BuilderGroup>() {
        return Some(group.clone());
    }
    if let Some(map) = group.downcast_ref::<HashMap<String, Builder>>() {
        return Some(BuilderGroup::from(map.clone()));
    }
    if let Some(map) = group.downcast_ref::<BTreeMap<String, Builder>>() {
        return Some(BuilderGroup::from(map.clone()));
    }
    if let Some(map) = group.downcast_ref::<HashMap<&'static str, Builder>>() {
        return Some(BuilderGroup::from(map.clone()));
    }
    if let Some(map) = group.downcast_ref::<BTreeMap<&'static str, Builder>>() {
        return Some(BuilderGroup::from(map.clone()));
    }
    None
}

/// Constants for a type whose action types are declared with `#[action_group]`
pub fn constants_of<T: ActionTypes>() -> Constants {
    let mut constants = Constants::default();
    for name in T::action_types() {
        constants.declare(name);
    }
    constants
}
