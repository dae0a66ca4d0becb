//! `IsNotCase` derive: negated per-variant predicates.

use quote::quote;
use syn::Data;
use syn::DeriveInput;

use crate::diagnostic::error;
use crate::diagnostic::Expansion;
use crate::enums::case_text;
use crate::enums::variant_pattern;
use crate::text::ident_for;
use crate::text::to_snake_case;

pub(crate) fn expand(input: &DeriveInput) -> Expansion {
    let Data::Enum(data) = &input.data else {
        return Expansion::failure(vec![error!(
            input.ident.span(),
            "isNotCase.invalidUsage",
            "`IsNotCase` can only be derived for enums"
        )]);
    };
    if data.variants.is_empty() {
        return Expansion::empty();
    }

    let name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let singleton = data.variants.len() == 1;

    let predicates = data.variants.iter().map(|variant| {
        let text = case_text(variant);
        let method = ident_for(&format!("is_not_{}", to_snake_case(&text)), variant.ident.span());
        let doc = format!("Whether the value is anything but `{text}`.");
        if singleton {
            // A lone variant can never be "not itself".
            let doc = format!("{doc} Always false: `{text}` is the only variant.");
            quote! {
                #[doc = #doc]
                #vis fn #method(&self) -> bool {
                    false
                }
            }
        } else {
            let pattern = variant_pattern(variant);
            quote! {
                #[doc = #doc]
                #vis fn #method(&self) -> bool {
                    !matches!(self, #pattern)
                }
            }
        }
    });

    Expansion::new(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#predicates)*
        }
    })
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn generates_negated_predicates() {
        let expansion = expand(&parse_quote! {
            pub enum State { Idle, Running(u32) }
        });
        assert!(!expansion.has_errors());
        let text = expansion.tokens.to_string();
        assert!(text.contains("pub fn is_not_idle"));
        assert!(text.contains("pub fn is_not_running"));
        assert!(text.contains("! matches !"));
    }

    #[test]
    fn singleton_predicate_is_unconditionally_false() {
        let expansion = expand(&parse_quote! {
            enum Only { One }
        });
        assert!(!expansion.has_errors());
        let text = expansion.tokens.to_string();
        assert!(text.contains("fn is_not_one (& self) -> bool { false }"));
    }

    #[test]
    fn empty_enum_expands_to_nothing() {
        let expansion = expand(&parse_quote! {
            enum Nothing {}
        });
        assert!(!expansion.has_errors());
        assert!(expansion.diagnostics.is_empty());
        assert!(expansion.tokens.is_empty());
    }

    #[test]
    fn rejects_unions() {
        let expansion = expand(&parse_quote! {
            union Raw { bits: u32 }
        });
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "isNotCase.invalidUsage");
    }
}
