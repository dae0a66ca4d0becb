//! `CaseName` derive: a `case_name` method returning the textual name of the
//! active variant.

use quote::quote;
use syn::Data;
use syn::DeriveInput;

use crate::diagnostic::error;
use crate::diagnostic::Expansion;
use crate::enums::case_text;
use crate::enums::variant_pattern;
use crate::text::to_camel_case;
use crate::text::to_dot_case;
use crate::text::to_kebab_case;
use crate::text::to_snake_case;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NameStyle {
    Verbatim,
    SnakeCase,
    KebabCase,
    CamelCase,
    DotCase,
}

impl NameStyle {
    fn apply(self, name: &str) -> String {
        match self {
            NameStyle::Verbatim => name.to_string(),
            NameStyle::SnakeCase => to_snake_case(name),
            NameStyle::KebabCase => to_kebab_case(name),
            NameStyle::CamelCase => to_camel_case(name),
            NameStyle::DotCase => to_dot_case(name),
        }
    }
}

/// Reads the optional `#[case_name(...)]` helper attribute off the input.
fn name_style(input: &DeriveInput) -> Result<NameStyle, Expansion> {
    let mut style = NameStyle::Verbatim;
    for attr in &input.attrs {
        if !attr.path().is_ident("case_name") {
            continue;
        }
        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("snake_case") {
                style = NameStyle::SnakeCase;
            } else if meta.path.is_ident("kebab_case") {
                style = NameStyle::KebabCase;
            } else if meta.path.is_ident("camel_case") {
                style = NameStyle::CamelCase;
            } else if meta.path.is_ident("dot_case") {
                style = NameStyle::DotCase;
            } else {
                return Err(meta.error("unknown case_name option"));
            }
            Ok(())
        });
        if let Err(parse_error) = result {
            let span = parse_error.span();
            return Err(Expansion::failure(vec![error!(
                span,
                "caseName.invalidOption",
                "expected one of `snake_case`, `kebab_case`, `camel_case`, `dot_case`"
            )]));
        }
    }
    Ok(style)
}

pub(crate) fn expand(input: &DeriveInput) -> Expansion {
    let Data::Enum(data) = &input.data else {
        return Expansion::failure(vec![error!(
            input.ident.span(),
            "caseName.invalidUsage",
            "`CaseName` can only be derived for enums"
        )]);
    };
    if data.variants.is_empty() {
        return Expansion::failure(vec![error!(
            input.ident.span(),
            "caseName.emptyEnum",
            "`CaseName` requires at least one variant"
        )]);
    }
    let style = match name_style(input) {
        Ok(style) => style,
        Err(failure) => return failure,
    };

    let name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let arms = data.variants.iter().map(|variant| {
        let pattern = variant_pattern(variant);
        let text = style.apply(&case_text(variant));
        quote! { #pattern => #text, }
    });

    // Every variant is matched explicitly, so adding a variant without
    // re-deriving is a compile error rather than a silent misreport.
    Expansion::new(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// The name of the active variant.
            #vis fn case_name(&self) -> &'static str {
                match self {
                    #(#arms)*
                }
            }
        }
    })
}
