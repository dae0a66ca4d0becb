//! `labeled!` expression macro: turns an array literal into an ordered map
//! keyed by the source text of each element.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parse;
use syn::parse::ParseStream;
use syn::spanned::Spanned;
use syn::Block;
use syn::Expr;
use syn::ExprArray;
use syn::Local;
use syn::LocalInit;
use syn::Pat;
use syn::Stmt;
use syn::Token;
use syn::Type;

use crate::diagnostic::error;
use crate::diagnostic::Expansion;
use crate::text::trim_raw_marker;

pub(crate) enum LabeledInput {
    /// `labeled!([a, b, c])`
    Array(ExprArray),
    /// `labeled!(let map: [u32] = [a, b, c];)`
    Declaration(Box<Local>),
}

impl Parse for LabeledInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![let]) {
            let mut statements = Block::parse_within(input)?.into_iter();
            match (statements.next(), statements.next()) {
                (Some(Stmt::Local(local)), None) => {
                    Ok(LabeledInput::Declaration(Box::new(local)))
                }
                _ => Err(input.error("expected a single `let` binding")),
            }
        } else {
            Ok(LabeledInput::Array(input.parse()?))
        }
    }
}

/// The map key of one element: a bare identifier keeps its own (unescaped)
/// name, anything else is keyed by its source text.
fn element_key(element: &Expr) -> String {
    if let Expr::Path(path) = element {
        if path.qself.is_none() && path.path.segments.len() == 1 && path.attrs.is_empty() {
            let segment = &path.path.segments[0];
            if segment.arguments.is_none() {
                return trim_raw_marker(&segment.ident.to_string()).to_string();
            }
        }
    }
    quote!(#element).to_string()
}

fn map_tokens(array: &ExprArray) -> TokenStream {
    if array.elems.is_empty() {
        return quote! { ::casekit::LabeledMap::new() };
    }
    let entries = array.elems.iter().map(|element| {
        let key = element_key(element);
        quote! { (#key, #element) }
    });
    quote! { ::casekit::LabeledMap::from([#(#entries),*]) }
}

/// The element type of the declared annotation, used as the map value type.
fn element_type(ty: &Type) -> &Type {
    match ty {
        Type::Array(array) => &array.elem,
        Type::Slice(slice) => &slice.elem,
        Type::Reference(reference) => element_type(&reference.elem),
        Type::Path(path) => {
            if let Some(segment) = path.path.segments.last() {
                if segment.ident == "Vec" {
                    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                        if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                            return inner;
                        }
                    }
                }
            }
            ty
        }
        _ => ty,
    }
}

fn expand_declaration(local: &Local) -> Expansion {
    let Some(LocalInit { expr, .. }) = &local.init else {
        return Expansion::failure(vec![error!(
            local.span(),
            "labeled.invalidDeclaration",
            "the binding must be initialized with an array literal"
        )]);
    };
    let Expr::Array(array) = expr.as_ref() else {
        return Expansion::failure(vec![error!(
            expr.span(),
            "labeled.invalidDeclaration",
            "the binding must be initialized with an array literal"
        )]);
    };
    let map = map_tokens(array);
    let attrs = &local.attrs;
    match &local.pat {
        Pat::Type(annotated) => {
            let pat = &annotated.pat;
            let element = element_type(&annotated.ty);
            Expansion::new(quote! {
                #(#attrs)* let #pat: ::casekit::LabeledMap<#element> = #map;
            })
        }
        pat => Expansion::new(quote! {
            #(#attrs)* let #pat = #map;
        }),
    }
}

pub(crate) fn expand(tokens: TokenStream) -> Expansion {
    if tokens.is_empty() {
        return Expansion::failure(vec![error!(
            proc_macro2::Span::call_site(),
            "labeled.missingArgument",
            "expected an array literal or a `let` binding of one"
        )]);
    }
    let input: LabeledInput = match syn::parse2(tokens) {
        Ok(input) => input,
        Err(parse_error) => return Expansion::failure(vec![parse_error.into()]),
    };
    match input {
        LabeledInput::Array(array) => Expansion::new(map_tokens(&array)),
        LabeledInput::Declaration(local) => expand_declaration(&local),
    }
}
