//! Procedural macros behind the `casekit` crate. Use `casekit` instead of
//! depending on this crate directly; it re-exports everything here next to
//! the runtime types the generated code needs.

#![cfg_attr(nightly, feature(proc_macro_diagnostic))]

use proc_macro::TokenStream;

use crate::diagnostic::debug;
use crate::diagnostic::Expansion;

mod case_name;
mod case_value;
mod diagnostic;
mod enums;
mod is_case;
mod is_not_case;
mod labeled;
mod labeled_views;
mod option_set;
mod stringified;
mod text;
mod with_env;

// ======================
// === Expansion glue ===
// ======================

fn expand_derive(
    input: TokenStream,
    generator: fn(&syn::DeriveInput) -> Expansion,
) -> TokenStream {
    match syn::parse::<syn::DeriveInput>(input) {
        Ok(parsed) => finish_items(generator(&parsed)),
        Err(parse_error) => parse_error.into_compile_error().into(),
    }
}

fn finish_items(expansion: Expansion) -> TokenStream {
    let tokens = expansion.into_item_tokens();
    debug!("{tokens}");
    tokens.into()
}

fn finish_expr(expansion: Expansion) -> TokenStream {
    let tokens = expansion.into_expr_tokens();
    debug!("{tokens}");
    tokens.into()
}

// ===============
// === Derives ===
// ===============

/// Derives a `case_name` method returning the name of the active variant as
/// a `&'static str`. The optional `#[case_name(snake_case)]` attribute
/// (also `kebab_case`, `camel_case`, `dot_case`) rewrites the reported
/// names.
#[proc_macro_derive(CaseName, attributes(case_name))]
pub fn case_name(input: TokenStream) -> TokenStream {
    expand_derive(input, case_name::expand)
}

/// Derives an `is_*` predicate per variant, a payload-free `<Name>Cases`
/// mirror enum, and `is_among` membership tests over it.
#[proc_macro_derive(IsCase)]
pub fn is_case(input: TokenStream) -> TokenStream {
    expand_derive(input, is_case::expand)
}

/// Derives an `is_not_*` predicate per variant.
#[proc_macro_derive(IsNotCase)]
pub fn is_not_case(input: TokenStream) -> TokenStream {
    expand_derive(input, is_not_case::expand)
}

/// Derives an accessor per payload slot, returning `Option<&T>` for the
/// slot when its variant is active. `Option` payloads are flattened rather
/// than wrapped a second time.
#[proc_macro_derive(CaseValue)]
pub fn case_value(input: TokenStream) -> TokenStream {
    expand_derive(input, case_value::expand)
}

// ============================
// === Function-like macros ===
// ============================

/// Builds an ordered map from an array literal, keyed by each element's
/// source text. The `let` form also rewrites the type annotation:
/// `labeled!(let sizes: [u32] = [small, large];)` binds a
/// `LabeledMap<u32>`.
#[proc_macro]
pub fn labeled(input: TokenStream) -> TokenStream {
    finish_expr(labeled::expand(input.into()))
}

/// Declares a bit-set struct from an `enum Options` of flag names:
///
/// ```text
/// option_set! {
///     pub struct Style(u8) {
///         enum Options { Bold, Italic, Underline }
///     }
/// }
/// ```
#[proc_macro]
pub fn option_set(input: TokenStream) -> TokenStream {
    finish_items(option_set::expand(input.into()))
}

/// Expands to a value whose `body` method fetches the declared variables
/// from an `Environment` and passes them to the given content expression.
#[proc_macro]
pub fn with_environment(input: TokenStream) -> TokenStream {
    finish_expr(with_env::expand(input.into(), with_env::Mode::Expression))
}

/// Declaration-only form of `with_environment!`: emits the generated type
/// without instantiating it.
#[proc_macro]
pub fn with_env(input: TokenStream) -> TokenStream {
    finish_items(with_env::expand(input.into(), with_env::Mode::Declaration))
}

/// The source text of the given expression, as a string literal.
#[proc_macro]
pub fn stringified(input: TokenStream) -> TokenStream {
    finish_expr(stringified::expand_stringified(input.into()))
}

/// A `(source_text, value)` pair for the given expression.
#[proc_macro]
pub fn dictionarified(input: TokenStream) -> TokenStream {
    finish_expr(stringified::expand_dictionarified(input.into()))
}

// ==================
// === Attributes ===
// ==================

/// Rewrites every expression statement of the function body into a labeled
/// value (via `LabeledView::labeled_view`), labeled by its source text, and
/// wraps the body in `casekit::labeled_views`.
#[proc_macro_attribute]
pub fn labeled_views(attr: TokenStream, item: TokenStream) -> TokenStream {
    finish_items(labeled_views::expand(attr.into(), item.into()))
}
