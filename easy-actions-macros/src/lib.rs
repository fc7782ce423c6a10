//! Procedural macros for easy-actions

use darling::FromAttributes;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::{parse_macro_input, ImplItem, ItemImpl};

/// Method-level attributes for #[action_group]
#[derive(Debug, Default, FromAttributes)]
#[darling(attributes(action))]
struct ActionMethodOpts {
    /// Explicit action type instead of the SCREAMING_SNAKE_CASE method name
    #[darling(default)]
    rename: Option<String>,

    /// Leave this method out of the group
    #[darling(default)]
    skip: bool,
}

/// Convert an identifier to SCREAMING_SNAKE_CASE
///
/// Handles snake_case (`add_item`), camelCase (`addItem`) and names that
/// are already upper case (`ADD_ITEM`).
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_lower = false;
    for ch in s.chars() {
        if ch.is_uppercase() && prev_lower {
            result.push('_');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        result.extend(ch.to_uppercase());
    }
    result
}

/// One action declared by the impl block
struct DeclaredAction {
    constant: syn::Ident,
    action_type: String,
}

fn collect_actions(item: &mut ItemImpl) -> syn::Result<Vec<DeclaredAction>> {
    let mut declared = Vec::new();
    let mut seen: HashMap<String, syn::Ident> = HashMap::new();
    let mut constants: HashMap<String, syn::Ident> = HashMap::new();

    for impl_item in item.items.iter_mut() {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let opts = ActionMethodOpts::from_attributes(&method.attrs)
            .map_err(|e| syn::Error::new_spanned(&method.sig.ident, e.to_string()))?;
        method.attrs.retain(|attr| !attr.path().is_ident("action"));

        let ident = method.sig.ident.unraw();
        // The constructor is never an action
        if opts.skip || ident == "new" {
            continue;
        }

        let constant_name = to_screaming_snake_case(&ident.to_string());
        if constant_name == ident.to_string() {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                format!(
                    "method `{}` is already SCREAMING_SNAKE_CASE and would collide with its \
                     generated constant; use a snake_case method name",
                    ident
                ),
            ));
        }

        if constant_name == "ACTION_TYPES" {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                format!(
                    "method `{}` would generate the constant `ACTION_TYPES`, which is reserved \
                     for the list of action types; rename the method or mark it #[action(skip)]",
                    ident
                ),
            ));
        }
        if let Some(previous) = constants.get(&constant_name) {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                format!(
                    "duplicate constant `{}` (already generated for `{}`)",
                    constant_name, previous
                ),
            ));
        }
        constants.insert(constant_name.clone(), ident.clone());

        let action_type = opts.rename.unwrap_or_else(|| constant_name.clone());
        if let Some(previous) = seen.get(&action_type) {
            return Err(syn::Error::new_spanned(
                &method.sig.ident,
                format!(
                    "duplicate action type `{}` (already declared by `{}`)",
                    action_type, previous
                ),
            ));
        }
        seen.insert(action_type.clone(), ident.clone());

        declared.push(DeclaredAction {
            constant: format_ident!("{}", constant_name, span = method.sig.ident.span()),
            action_type,
        });
    }

    Ok(declared)
}

/// Attribute macro that turns an `impl` block into an action group
///
/// For every method it generates an associated constant named after the
/// method in SCREAMING_SNAKE_CASE whose value is the action type, plus an
/// `ACTION_TYPES` slice in declaration order, and implements
/// `easy_actions::ActionTypes`.
///
/// `fn new` is skipped. Method attributes:
/// - `#[action(skip)]` - leave the method out
/// - `#[action(rename = "todos/add")]` - use a custom action type
///
/// # Example
/// ```ignore
/// struct TodoActions;
///
/// #[action_group]
/// impl TodoActions {
///     fn add_item(&self, text: &str) -> Payload {
///         payload! { "type": Self::ADD_ITEM, "text": text }
///     }
///
///     #[action(rename = "todos/remove")]
///     fn delete_item(&self, id: u64) -> Payload {
///         payload! { "type": Self::DELETE_ITEM, "id": id }
///     }
/// }
///
/// assert_eq!(TodoActions::ADD_ITEM, "ADD_ITEM");
/// assert_eq!(TodoActions::DELETE_ITEM, "todos/remove");
/// assert_eq!(TodoActions::ACTION_TYPES, &["ADD_ITEM", "todos/remove"]);
/// ```
#[proc_macro_attribute]
pub fn action_group(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "action_group takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let mut item = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &item.trait_ {
        return syn::Error::new_spanned(
            path,
            "action_group can only be applied to inherent impl blocks",
        )
        .to_compile_error()
        .into();
    }

    let declared = match collect_actions(&mut item) {
        Ok(declared) => declared,
        Err(e) => return e.to_compile_error().into(),
    };

    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    let constants = declared.iter().map(|action| {
        let constant = &action.constant;
        let value = &action.action_type;
        let doc = format!("Action type `{}`", value);
        quote! {
            #[doc = #doc]
            pub const #constant: &'static str = #value;
        }
    });
    let action_types = declared.iter().map(|action| &action.action_type);

    let expanded = quote! {
        #item

        impl #impl_generics #self_ty #where_clause {
            #(#constants)*

            /// All action types of this group, in declaration order
            pub const ACTION_TYPES: &'static [&'static str] = &[#(#action_types),*];
        }

        impl #impl_generics easy_actions::ActionTypes for #self_ty #where_clause {
            fn action_types() -> &'static [&'static str] {
                Self::ACTION_TYPES
            }
        }
    };

    TokenStream::from(expanded)
}
