//! Helpers shared by the enum-reflection derives.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Fields;
use syn::Variant;

use crate::text::trim_raw_marker;

/// The display text of a variant, with any raw-identifier marker removed.
pub(crate) fn case_text(variant: &Variant) -> String {
    trim_raw_marker(&variant.ident.to_string()).to_string()
}

/// A match pattern covering the given variant regardless of payload shape.
pub(crate) fn variant_pattern(variant: &Variant) -> TokenStream {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Unit => quote! { Self::#ident },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Named(_) => quote! { Self::#ident { .. } },
    }
}
