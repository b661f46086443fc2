//! Derive macro for typed automation identifiers.
//!
//! UI tests locate elements by opaque identifier strings. Spelling those
//! strings out at every call site invites typos that only surface when a test
//! fails to find an element. `#[derive(AutomationId)]` ties each identifier to
//! an enum variant instead, so a misspelled element is a compile error.
//!
//! # Example
//!
//! ```ignore
//! use firstrun::{AutomationCatalog, AutomationId, AutomationIdentifying};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, AutomationId)]
//! #[automation(prefix = "automation.settings")]
//! enum SettingsScreen {
//!     // "automation.settings.dark_mode"
//!     DarkMode,
//!     #[automation(id = "automation.settings.done")]
//!     Close,
//! }
//!
//! assert_eq!(SettingsScreen::Close.automation_id(), "automation.settings.done");
//! assert_eq!(SettingsScreen::variants().len(), 2);
//! ```
//!
//! # Attributes
//!
//! - `#[automation(prefix = "...")]` on the enum: prefix joined with `.` to the
//!   snake_case variant name for variants without an explicit id.
//! - `#[automation(id = "...")]` on a variant: the exact identifier.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive `firstrun::AutomationIdentifying` and `firstrun::AutomationCatalog`
/// for a fieldless enum.
#[proc_macro_derive(AutomationId, attributes(automation))]
pub fn derive_automation_id(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_automation_id(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_automation_id(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "AutomationId can only be derived for enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "AutomationId needs at least one variant",
        ));
    }

    let prefix = automation_attribute(&input.attrs, "prefix")?;

    let mut idents = Vec::with_capacity(data.variants.len());
    let mut ids = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "AutomationId variants must not carry fields",
            ));
        }
        let id = match automation_attribute(&variant.attrs, "id")? {
            Some(id) => id,
            None => default_identifier(prefix.as_deref(), &variant.ident.to_string()),
        };
        if ids.contains(&id) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate automation identifier `{id}`"),
            ));
        }
        idents.push(&variant.ident);
        ids.push(id);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::firstrun::AutomationIdentifying for #name #ty_generics #where_clause {
            fn automation_id(&self) -> &'static str {
                match self {
                    #( Self::#idents => #ids, )*
                }
            }
        }

        impl #impl_generics ::firstrun::AutomationCatalog for #name #ty_generics #where_clause {
            fn variants() -> &'static [Self] {
                &[ #( Self::#idents ),* ]
            }
        }
    })
}

/// Read `#[automation(<key> = "...")]`, rejecting any other key.
fn automation_attribute(attrs: &[Attribute], key: &str) -> syn::Result<Option<String>> {
    let mut value = None;
    for attr in attrs {
        if !attr.path().is_ident("automation") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let lit: LitStr = meta.value()?.parse()?;
                value = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error(format!(
                    "unsupported automation attribute here, expected `{key} = \"...\"`"
                )))
            }
        })?;
    }
    Ok(value)
}

fn default_identifier(prefix: Option<&str>, variant: &str) -> String {
    let leaf = to_snake_case(variant);
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{leaf}"),
        _ => leaf,
    }
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = true;
        }
    }

    result
}
