//! `stringified!` and `dictionarified!`: the source text of an expression,
//! alone or paired with its value.

use proc_macro2::Span;
use proc_macro2::TokenStream;
use quote::quote;
use syn::Expr;

use crate::diagnostic::error;
use crate::diagnostic::Expansion;

fn parse_argument(tokens: TokenStream) -> Result<Expr, Expansion> {
    if tokens.is_empty() {
        return Err(Expansion::failure(vec![error!(
            Span::call_site(),
            "stringify.missingArgument",
            "requires one argument"
        )]));
    }
    syn::parse2(tokens).map_err(|parse_error| Expansion::failure(vec![parse_error.into()]))
}

pub(crate) fn expand_stringified(tokens: TokenStream) -> Expansion {
    match parse_argument(tokens) {
        Ok(expr) => {
            let text = quote!(#expr).to_string();
            Expansion::new(quote! { #text })
        }
        Err(failure) => failure,
    }
}

pub(crate) fn expand_dictionarified(tokens: TokenStream) -> Expansion {
    match parse_argument(tokens) {
        Ok(expr) => {
            let text = quote!(#expr).to_string();
            Expansion::new(quote! { (#text, #expr) })
        }
        Err(failure) => failure,
    }
}
