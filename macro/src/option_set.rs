//! `option_set!` declaration macro: a bit-set struct generated from an enum
//! of flag names.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parse;
use syn::parse::ParseStream;
use syn::spanned::Spanned;
use syn::Attribute;
use syn::Fields;
use syn::Ident;
use syn::Item;
use syn::ItemEnum;
use syn::Token;
use syn::Type;
use syn::Visibility;

use crate::diagnostic::error;
use crate::diagnostic::Expansion;
use crate::text::to_screaming_snake_case;

pub(crate) struct OptionSetInput {
    attrs: Vec<Attribute>,
    vis: Visibility,
    struct_token: Option<Token![struct]>,
    name: Ident,
    raw: Option<Type>,
    items: Vec<Item>,
}

impl Parse for OptionSetInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let struct_token: Option<Token![struct]> = input.parse()?;
        let name: Ident = input.parse()?;
        let raw = if input.peek(syn::token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            Some(content.parse()?)
        } else {
            None
        };
        let body;
        syn::braced!(body in input);
        let mut items = Vec::new();
        while !body.is_empty() {
            items.push(body.parse()?);
        }
        Ok(Self { attrs, vis, struct_token, name, raw, items })
    }
}

/// The bit position of each flag. Explicit discriminants reposition the
/// running counter, as enum discriminants do.
fn flag_bits(options: &ItemEnum) -> Result<Vec<(Ident, u32)>, Expansion> {
    let mut bits = Vec::new();
    let mut next = 0u32;
    for variant in &options.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Expansion::failure(vec![error!(
                variant.ident.span(),
                "optionSet.invalidUsage",
                "flag `{}` cannot carry a payload",
                variant.ident
            )]));
        }
        if let Some((_, discriminant)) = &variant.discriminant {
            let parsed = match discriminant {
                syn::Expr::Lit(literal) => match &literal.lit {
                    syn::Lit::Int(int) => int.base10_parse::<u32>().ok(),
                    _ => None,
                },
                _ => None,
            };
            match parsed {
                Some(position) => next = position,
                None => {
                    return Err(Expansion::failure(vec![error!(
                        discriminant.span(),
                        "optionSet.invalidUsage",
                        "flag positions must be integer literals"
                    )]));
                }
            }
        }
        bits.push((variant.ident.clone(), next));
        next += 1;
    }
    Ok(bits)
}

pub(crate) fn expand(tokens: TokenStream) -> Expansion {
    let input: OptionSetInput = match syn::parse2(tokens) {
        Ok(input) => input,
        Err(parse_error) => return Expansion::failure(vec![parse_error.into()]),
    };
    if input.struct_token.is_none() {
        return Expansion::failure(vec![error!(
            input.name.span(),
            "optionSet.invalidUsage",
            "expected `struct {}`",
            input.name
        )]);
    }
    let Some(raw) = &input.raw else {
        return Expansion::failure(vec![error!(
            input.name.span(),
            "optionSet.missingRawType",
            "`{}` needs a raw representation, e.g. `struct {}(u8)`",
            input.name,
            input.name
        )]);
    };

    let mut options = None;
    let mut extra = Vec::new();
    for item in input.items {
        match item {
            Item::Enum(item_enum) if item_enum.ident == "Options" => options = Some(item_enum),
            other => extra.push(other),
        }
    }
    let Some(options) = options else {
        return Expansion::failure(vec![error!(
            input.name.span(),
            "optionSet.missingOptions",
            "`{}` needs an `enum Options` listing its flags",
            input.name
        )]);
    };
    let bits = match flag_bits(&options) {
        Ok(bits) => bits,
        Err(failure) => return failure,
    };

    let attrs = &input.attrs;
    let vis = &input.vis;
    let name = &input.name;
    let constants = bits.iter().map(|(flag, bit)| {
        let constant = Ident::new(&to_screaming_snake_case(&flag.to_string()), flag.span());
        let doc = format!("The `{flag}` flag.");
        quote! {
            #[doc = #doc]
            #vis const #constant: Self = Self { raw_value: 1 << #bit };
        }
    });
    let struct_doc = format!("A set of `{name}` flags packed into a `{}`.", quote!(#raw));

    Expansion::new(quote! {
        #[doc = #struct_doc]
        #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
        #(#attrs)*
        #vis struct #name {
            raw_value: #raw,
        }

        impl #name {
            #(#constants)*

            /// The empty set.
            #vis const fn new() -> Self {
                Self { raw_value: 0 }
            }

            #vis const fn from_raw_value(raw_value: #raw) -> Self {
                Self { raw_value }
            }

            #vis const fn raw_value(self) -> #raw {
                self.raw_value
            }
        }

        impl ::casekit::OptionSet for #name {
            type RawValue = #raw;

            fn raw_value(self) -> #raw {
                self.raw_value
            }

            fn from_raw_value(raw_value: #raw) -> Self {
                Self { raw_value }
            }
        }

        #(#extra)*
    })
}
