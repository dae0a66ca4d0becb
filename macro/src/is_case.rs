//! `IsCase` derive: per-variant `is_*` predicates plus a payload-free shadow
//! enum usable for membership tests.

use quote::format_ident;
use quote::quote;
use syn::Data;
use syn::DeriveInput;

use crate::diagnostic::error;
use crate::diagnostic::warning;
use crate::diagnostic::Expansion;
use crate::enums::case_text;
use crate::enums::variant_pattern;
use crate::text::ident_for;
use crate::text::to_pascal_case;
use crate::text::to_snake_case;

pub(crate) fn expand(input: &DeriveInput) -> Expansion {
    let Data::Enum(data) = &input.data else {
        return Expansion::failure(vec![error!(
            input.ident.span(),
            "isCase.invalidUsage",
            "`IsCase` can only be derived for enums"
        )]);
    };
    if data.variants.is_empty() {
        let mut expansion = Expansion::empty();
        expansion.diagnostics.push(warning!(
            input.ident.span(),
            "isCase.emptyEnum",
            "`IsCase` has nothing to generate for an empty enum"
        ));
        return expansion;
    }

    let name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let singleton = data.variants.len() == 1;

    let predicates = data.variants.iter().map(|variant| {
        let text = case_text(variant);
        let method = ident_for(&format!("is_{}", to_snake_case(&text)), variant.ident.span());
        let doc = format!("Whether the value is `{text}`.");
        if singleton {
            // The only variant is always active; a match would trip the
            // unreachable-pattern lint on its fallback arm.
            let doc = format!("{doc} Always true: `{text}` is the only variant.");
            quote! {
                #[doc = #doc]
                #vis fn #method(&self) -> bool {
                    true
                }
            }
        } else {
            let pattern = variant_pattern(variant);
            quote! {
                #[doc = #doc]
                #vis fn #method(&self) -> bool {
                    matches!(self, #pattern)
                }
            }
        }
    });

    let cases_name = format_ident!("{name}Cases");
    let cases_doc = format!("Payload-free mirror of the variants of [`{name}`].");
    let case_idents: Vec<_> = data.variants.iter().map(|variant| {
        ident_for(&to_pascal_case(&case_text(variant)), variant.ident.span())
    }).collect();
    let case_arms = data.variants.iter().zip(&case_idents).map(|(variant, case)| {
        let pattern = variant_pattern(variant);
        quote! { #pattern => #cases_name::#case, }
    });

    Expansion::new(quote! {
        #[doc = #cases_doc]
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        #vis enum #cases_name {
            #(#case_idents,)*
        }

        impl #impl_generics #name #ty_generics #where_clause {
            #(#predicates)*

            fn case_value(&self) -> #cases_name {
                match self {
                    #(#case_arms)*
                }
            }

            /// Whether the active variant is one of the given cases.
            #vis fn is_among(&self, cases: &[#cases_name]) -> bool {
                cases.contains(&self.case_value())
            }

            /// Whether the active variant is one of the given cases.
            #vis fn is_among_any(&self, cases: impl IntoIterator<Item = #cases_name>) -> bool {
                let current = self.case_value();
                cases.into_iter().any(|case| case == current)
            }
        }
    })
}
