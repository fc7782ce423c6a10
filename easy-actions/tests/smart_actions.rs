//! End-to-end tests for wrapped action groups and combined builders

use easy_actions::prelude::*;
use serde_json::{json, Value};

fn item_payload(ctx: &ActionContext<'_>, key: &str, args: &[Value]) -> Payload {
    let mut payload = payload! { "type": ctx.action_type() };
    payload.insert(key.to_string(), args.first().cloned().unwrap_or_default());
    payload
}

mod whole_group {
    use super::*;

    fn actions() -> std::sync::Arc<SmartActions> {
        wrap_group(
            ActionGroup::new()
                .define("ADD_ITEM", |ctx, args| item_payload(ctx, "item", args))
                .define("DELETE_ITEM", |ctx, args| item_payload(ctx, "id", args))
                .define("LINKED_ACTION", |ctx, args| {
                    ctx.call("DELETE_ITEM", args).unwrap_or_default()
                }),
        )
    }

    #[test]
    fn test_type_from_action() {
        let a = actions();
        assert_eq!(a.get("ADD_ITEM").unwrap().action_type(), "ADD_ITEM");
    }

    #[test]
    fn test_type_inside_payload() {
        let a = actions();
        assert_action_type!(a.call("ADD_ITEM", &args![]).unwrap(), "ADD_ITEM");
    }

    #[test]
    fn test_payload_from_action() {
        let a = actions();
        let created = a.call("ADD_ITEM", &args!["FOO_ITEM"]).unwrap();
        assert_payload_field!(created, "item", "FOO_ITEM");
    }

    #[test]
    fn test_context_inside_definition() {
        let a = actions();
        let created = a.call("LINKED_ACTION", &args![42]).unwrap();
        assert_payload_field!(created, "id", 42);
    }
}

mod single_actions {
    use super::*;

    fn actions() -> std::sync::Arc<SmartActions> {
        SmartActions::assemble([
            wrap_single("ADD_ITEM", |ctx, args| item_payload(ctx, "item", args)),
            wrap_single("DELETE_ITEM", |ctx, args| item_payload(ctx, "id", args)),
            wrap_single("LINKED_ACTION", |ctx, args| {
                ctx.call("DELETE_ITEM", args).unwrap_or_default()
            }),
        ])
    }

    #[test]
    fn test_type_from_action() {
        let a = actions();
        assert_eq!(a.get("DELETE_ITEM").unwrap().action_type(), "DELETE_ITEM");
    }

    #[test]
    fn test_type_inside_payload() {
        let a = actions();
        assert_action_type!(a.call("ADD_ITEM", &args![]).unwrap(), "ADD_ITEM");
    }

    #[test]
    fn test_payload_from_action() {
        let a = actions();
        let created = a.call("ADD_ITEM", &args!["FOO_ITEM"]).unwrap();
        assert_payload_field!(created, "item", "FOO_ITEM");
    }

    #[test]
    fn test_context_inside_definition() {
        let a = actions();
        let created = a.call("LINKED_ACTION", &args![42]).unwrap();
        assert_payload_field!(created, "id", 42);
    }
}

mod combined {
    use super::*;

    fn todos() -> BuilderGroup {
        BuilderGroup::new()
            .entry("ADD_ITEM", |args| payload! { "text": args[0].clone() })
            .entry("TOGGLE_ITEM", |args| payload! { "id": args[0].clone() })
    }

    #[derive(Debug, Default)]
    struct TodoState {
        items: Vec<String>,
        toggled: Vec<u64>,
    }

    fn reducer(state: &mut TodoState, constants: &Constants, action: &Payload) -> bool {
        let Some(action_type) = payload::type_of(action) else {
            return false;
        };
        if Some(action_type) == constants.get("ADD_ITEM") {
            let text = action.get("text").and_then(Value::as_str).unwrap_or_default();
            state.items.push(text.to_string());
            true
        } else if Some(action_type) == constants.get("TOGGLE_ITEM") {
            let id = action.get("id").and_then(Value::as_u64).unwrap_or_default();
            state.toggled.push(id);
            true
        } else {
            false
        }
    }

    #[test]
    fn test_scenario_add_item() {
        let combined = combine([todos()]).unwrap();
        assert_eq!(combined.constants.get("ADD_ITEM"), Some("ADD_ITEM"));

        let created = combined.actions.create("ADD_ITEM", &args!["Foo"]).unwrap();
        assert_eq!(
            Value::Object(created),
            json!({ "type": "ADD_ITEM", "text": "Foo" })
        );
    }

    #[test]
    fn test_scenario_same_group_twice() {
        let group = todos();
        let result = combine([group.clone(), group]);
        easy_actions::assert_duplicate_action!(result, "ADD_ITEM");
    }

    #[test]
    fn test_reducer_dispatch_on_constants() {
        let Combined { constants, actions } = combine([todos()]).unwrap();
        let mut state = TodoState::default();

        let add = actions.create("ADD_ITEM", &args!["milk"]).unwrap();
        let toggle = actions.create("TOGGLE_ITEM", &args![3]).unwrap();
        let unknown = payload! { "type": "SOMETHING_ELSE" };

        assert!(reducer(&mut state, &constants, &add));
        assert!(reducer(&mut state, &constants, &toggle));
        assert!(!reducer(&mut state, &constants, &unknown));

        assert_eq!(state.items, vec!["milk".to_string()]);
        assert_eq!(state.toggled, vec![3]);
    }

    #[test]
    fn test_invalid_group_through_facade() {
        let group = todos();
        let not_a_group = vec!["ADD_ITEM"];
        let err = combine_any(&[&group, &not_a_group]).unwrap_err();
        assert_eq!(err, CombineError::InvalidGroup { index: 1 });
    }
}
