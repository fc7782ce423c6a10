//! Test utilities for code built on easy-actions
//!
//! - [`payload!`](crate::payload!): build a [`Payload`](crate::Payload) inline
//! - [`args!`](crate::args!): build positional arguments inline
//! - Assertion macros for checking what an action produced
//!
//! # Example
//!
//! ```
//! use easy_actions_core::combine::{combine, BuilderGroup};
//! use easy_actions_core::{args, assert_action_type, assert_payload_field, payload};
//!
//! let group = BuilderGroup::new().entry("ADD_ITEM", |args| payload! { "text": args[0].clone() });
//! let combined = combine([group]).unwrap();
//!
//! let created = combined.actions.create("ADD_ITEM", &args!["Foo"]).unwrap();
//! assert_action_type!(created, "ADD_ITEM");
//! assert_payload_field!(created, "text", "Foo");
//! ```

/// Build a [`Payload`](crate::Payload) from `"key": value` pairs.
///
/// Values are converted with `serde_json::json!`.
///
/// # Example
///
/// ```
/// use easy_actions_core::payload;
///
/// let p = payload! { "id": 42, "done": false };
/// assert_eq!(p.len(), 2);
/// assert!(payload!().is_empty());
/// ```
#[macro_export]
macro_rules! payload {
    () => {
        $crate::Payload::new()
    };
    ($($key:literal : $value:expr),+ $(,)?) => {{
        let mut payload = $crate::Payload::new();
        $(
            payload.insert(($key).to_string(), $crate::serde_json::json!($value));
        )+
        payload
    }};
}

/// Build positional arguments (`Vec<serde_json::Value>`) for an action call.
///
/// # Example
///
/// ```
/// use easy_actions_core::args;
///
/// let a = args!["Foo", 42];
/// assert_eq!(a.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::serde_json::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::serde_json::json!($value)),+]
    };
}

/// Assert that a payload's `type` field equals the expected action type.
///
/// # Example
///
/// ```ignore
/// let created = actions.create("ADD_ITEM", &[]).unwrap();
/// assert_action_type!(created, "ADD_ITEM");
/// ```
#[macro_export]
macro_rules! assert_action_type {
    ($payload:expr, $expected:expr) => {{
        let payload = &$payload;
        assert_eq!(
            $crate::payload::type_of(payload),
            ::core::option::Option::Some($expected),
            "Expected action type `{}`, but got payload: {:?}",
            $expected,
            payload
        );
    }};
}

/// Assert that a payload holds `key` with the given value.
///
/// The expected value is converted with `serde_json::json!`.
///
/// # Example
///
/// ```ignore
/// assert_payload_field!(created, "text", "Foo");
/// assert_payload_field!(created, "id", 42);
/// ```
#[macro_export]
macro_rules! assert_payload_field {
    ($payload:expr, $key:expr, $value:expr) => {{
        let payload = &$payload;
        let expected = $crate::serde_json::json!($value);
        assert_eq!(
            payload.get($key),
            ::core::option::Option::Some(&expected),
            "Expected field `{}` to be {}, but got payload: {:?}",
            $key,
            expected,
            payload
        );
    }};
}

/// Assert that a combination failed because `name` was declared twice.
///
/// # Example
///
/// ```ignore
/// assert_duplicate_action!(combine([group.clone(), group]), "ADD_ITEM");
/// ```
#[macro_export]
macro_rules! assert_duplicate_action {
    ($result:expr, $name:expr) => {
        match $result {
            ::core::result::Result::Err($crate::CombineError::DuplicateAction { name }) => {
                assert_eq!(name, $name, "Duplicate reported for the wrong action");
            }
            other => panic!(
                "Expected duplicate action `{}`, but got: {:?}",
                $name,
                other.map(|combined| combined.constants)
            ),
        }
    };
}
