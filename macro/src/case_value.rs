//! `CaseValue` derive: per-slot payload accessors returning `Option<&T>`.

use proc_macro2::Ident;
use proc_macro2::TokenStream;
use quote::quote;
use syn::Data;
use syn::DeriveInput;
use syn::Fields;
use syn::GenericArgument;
use syn::PathArguments;
use syn::Type;
use syn::Variant;

use crate::diagnostic::error;
use crate::diagnostic::note;
use crate::diagnostic::remark;
use crate::diagnostic::Diagnostic;
use crate::diagnostic::Expansion;
use crate::enums::case_text;
use crate::text::ident_for;
use crate::text::to_snake_case;

/// The inner type of `Option<T>`, when `ty` is spelled that way.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else { return None };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// One payload slot of a variant.
struct Slot<'a> {
    index: usize,
    name: String,
    ty: &'a Type,
    named: Option<&'a Ident>,
}

/// A name for an unnamed slot, taken from its type text. `Vec<String>`
/// becomes `vec_string`; unpronounceable types fall back to `value`.
fn type_slot_name(ty: &Type) -> String {
    let source = option_inner(ty).unwrap_or(ty);
    let name = to_snake_case(&quote!(#source).to_string());
    if name.is_empty() { "value".to_string() } else { name }
}

fn slots_of<'a>(variant: &'a Variant, diagnostics: &mut Vec<Diagnostic>) -> Vec<Slot<'a>> {
    let mut slots: Vec<Slot<'a>> = Vec::new();
    let fields: Vec<_> = match &variant.fields {
        Fields::Unit => return slots,
        Fields::Unnamed(fields) => fields.unnamed.iter().collect(),
        Fields::Named(fields) => fields.named.iter().collect(),
    };
    for (index, field) in fields.iter().enumerate() {
        let (name, named) = match &field.ident {
            Some(ident) => (crate::text::trim_raw_marker(&ident.to_string()).to_string(), Some(ident)),
            None => (type_slot_name(&field.ty), None),
        };
        slots.push(Slot { index, name, ty: &field.ty, named });
    }
    // Same-named slots get positional suffixes so every accessor is distinct.
    for i in 0..slots.len() {
        let duplicated = slots.iter().enumerate().any(|(j, other)| j != i && other.name == slots[i].name);
        if duplicated {
            diagnostics.push(note!(
                variant.ident.span(),
                "caseValue.duplicateSlotType",
                "`{}` has several payload slots named `{}`; accessors are numbered by position",
                variant.ident,
                slots[i].name
            ));
            break;
        }
    }
    let names: Vec<String> = slots.iter().map(|slot| slot.name.clone()).collect();
    for slot in &mut slots {
        if names.iter().filter(|name| **name == slot.name).count() > 1 {
            slot.name = format!("{}_{}", slot.name, slot.index);
        }
    }
    slots
}

/// A pattern binding exactly one slot of the variant to `value`.
fn binding_pattern(variant: &Variant, slot: &Slot<'_>) -> TokenStream {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Unit => quote! { Self::#ident },
        Fields::Unnamed(fields) => {
            let positions = (0..fields.unnamed.len()).map(|position| {
                if position == slot.index { quote! { value } } else { quote! { _ } }
            });
            quote! { Self::#ident(#(#positions),*) }
        }
        Fields::Named(_) => match slot.named {
            Some(field) => quote! { Self::#ident { #field: value, .. } },
            None => quote! { Self::#ident { .. } },
        },
    }
}

fn accessor(
    variant: &Variant,
    slot: &Slot<'_>,
    vis: &syn::Visibility,
    singleton: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> TokenStream {
    let case = case_text(variant);
    let case_snake = to_snake_case(&case);
    let method_name = if slot.name == case_snake {
        diagnostics.push(remark!(
            variant.ident.span(),
            "caseValue.slotNameMatchesCase",
            "`{case}` has a payload slot named after the case; the accessor is called `{case_snake}`"
        ));
        case_snake
    } else {
        format!("{}_{}", case_snake, slot.name)
    };
    let method = ident_for(&method_name, variant.ident.span());
    let pattern = binding_pattern(variant, slot);
    let doc = format!("The `{}` payload of `{case}`, if that case is active.", slot.name);
    let (return_ty, arm_value) = match option_inner(slot.ty) {
        Some(inner) => (quote! { #inner }, quote! { value.as_ref() }),
        None => {
            let ty = slot.ty;
            (quote! { #ty }, quote! { ::core::option::Option::Some(value) })
        }
    };
    let fallback = if singleton {
        TokenStream::new()
    } else {
        quote! { _ => ::core::option::Option::None, }
    };
    quote! {
        #[doc = #doc]
        #vis fn #method(&self) -> ::core::option::Option<&#return_ty> {
            match self {
                #pattern => #arm_value,
                #fallback
            }
        }
    }
}

pub(crate) fn expand(input: &DeriveInput) -> Expansion {
    let Data::Enum(data) = &input.data else {
        return Expansion::failure(vec![error!(
            input.ident.span(),
            "caseValue.invalidUsage",
            "`CaseValue` can only be derived for enums"
        )]);
    };

    let name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let singleton = data.variants.len() == 1;
    let mut diagnostics = Vec::new();
    let mut methods = Vec::new();
    for variant in &data.variants {
        for slot in slots_of(variant, &mut diagnostics) {
            methods.push(accessor(variant, &slot, vis, singleton, &mut diagnostics));
        }
    }
    if methods.is_empty() {
        return Expansion { tokens: TokenStream::new(), diagnostics };
    }
    Expansion {
        tokens: quote! {
            impl #impl_generics #name #ty_generics #where_clause {
                #(#methods)*
            }
        },
        diagnostics,
    }
}
