//! `with_environment!` and `with_env!`: a generated type whose `body` pulls
//! typed values out of an [`Environment`] and hands them to a stored closure.
//!
//! The environment block is a braced list of uninitialized `let` bindings,
//! each annotated with `ObservedObject<T>` or `Observed<T>`:
//!
//! ```text
//! with_environment! {
//!     { let user: ObservedObject<User>; let theme: Observed<Theme>; },
//!     render(&user, &theme)
//! }
//! ```

use proc_macro2::Ident;
use proc_macro2::Span;
use proc_macro2::TokenStream;
use quote::format_ident;
use quote::quote;
use syn::parse::Parse;
use syn::parse::ParseStream;
use syn::spanned::Spanned;
use syn::Expr;
use syn::GenericArgument;
use syn::LitStr;
use syn::Pat;
use syn::PathArguments;
use syn::Stmt;
use syn::Token;
use syn::Type;

use crate::diagnostic::err;
use crate::diagnostic::error;
use crate::diagnostic::warning;
use crate::diagnostic::Diagnostic;
use crate::diagnostic::Expansion;
use crate::diagnostic::Result;
use crate::text::short_hash;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// `with_environment!`: expands to an instance, content required.
    Expression,
    /// `with_env!`: expands to the type declaration only.
    Declaration,
}

pub(crate) struct WithEnvInput {
    prefix: Option<LitStr>,
    declarations: Expr,
    content: Option<Expr>,
}

impl Parse for WithEnvInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let prefix = if input.peek(LitStr) {
            let literal = input.parse()?;
            input.parse::<Token![,]>()?;
            Some(literal)
        } else {
            None
        };
        let declarations: Expr = input.parse()?;
        let content = if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
            if input.is_empty() { None } else { Some(input.parse()?) }
        } else {
            None
        };
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        Ok(Self { prefix, declarations, content })
    }
}

enum Source {
    /// `ObservedObject<T>`: fetched with `Environment::object`.
    Object(Type),
    /// `Observed<T>`: fetched with `Environment::value`.
    Value(Type),
    /// Anything else: kept in the signature but panics when fetched.
    Unsupported,
}

struct EnvVar {
    name: Ident,
    ty: Type,
    source: Source,
}

/// Classifies a declared type by its outermost path segment.
fn classify(ty: &Type) -> Source {
    let Type::Path(path) = ty else { return Source::Unsupported };
    let Some(segment) = path.path.segments.last() else {
        return Source::Unsupported;
    };
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Source::Unsupported;
    };
    let inner = args.args.iter().find_map(|argument| match argument {
        GenericArgument::Type(inner) => Some(inner.clone()),
        _ => None,
    });
    let Some(inner) = inner else { return Source::Unsupported };
    if segment.ident == "ObservedObject" {
        Source::Object(inner)
    } else if segment.ident == "Observed" {
        Source::Value(inner)
    } else {
        Source::Unsupported
    }
}

/// Extracts the environment variables from the declaration block, stopping at
/// the first malformed binding.
fn environment_vars(
    declarations: &Expr,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<EnvVar>> {
    let Expr::Block(block) = declarations else {
        return err!(
            declarations.span(),
            "withEnvironment.invalidEnvironmentClosure",
            "expected a block of `let` declarations"
        );
    };
    let mut vars: Vec<EnvVar> = Vec::new();
    for statement in &block.block.stmts {
        let Stmt::Local(local) = statement else {
            return err!(
                statement.span(),
                "withEnvironment.invalidEnvironmentClosure",
                "only `let` declarations are allowed here"
            );
        };
        if let Some(init) = &local.init {
            return err!(
                init.expr.span(),
                "withEnvironment.noInitializer",
                "environment variables are filled in by `body`, drop the initializer"
            );
        }
        let (name, ty) = match &local.pat {
            Pat::Type(annotated) => match annotated.pat.as_ref() {
                Pat::Ident(pat) => (pat.ident.clone(), (*annotated.ty).clone()),
                other => {
                    return err!(
                        other.span(),
                        "withEnvironment.invalidEnvironmentClosure",
                        "expected a plain variable name"
                    );
                }
            },
            Pat::Ident(pat) => {
                return err!(
                    pat.ident.span(),
                    "withEnvironment.missingType",
                    "`{}` needs a type annotation",
                    pat.ident
                );
            }
            other => {
                return err!(
                    other.span(),
                    "withEnvironment.invalidEnvironmentClosure",
                    "expected a plain variable name"
                );
            }
        };
        if vars.iter().any(|var| var.name == name) {
            return err!(
                name.span(),
                "withEnvironment.duplicateName",
                "duplicate environment variable name `{name}`"
            );
        }
        let ty_text = quote!(#ty).to_string();
        let same_type = vars.iter().any(|var| {
            let existing = &var.ty;
            quote!(#existing).to_string() == ty_text
        });
        if same_type {
            return err!(
                ty.span(),
                "withEnvironment.duplicateType",
                "duplicate environment variable type `{ty_text}`"
            );
        }
        let source = classify(&ty);
        if matches!(source, Source::Unsupported) {
            diagnostics.push(warning!(
                ty.span(),
                "withEnvironment.unsupportedType",
                "`{ty_text}` is not `ObservedObject<T>` or `Observed<T>`; fetching it will panic"
            ));
        }
        vars.push(EnvVar { name, ty, source });
    }
    Ok(vars)
}

fn sanitized(prefix: &str) -> String {
    prefix
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn fetch_fn(var: &EnvVar) -> TokenStream {
    let name = &var.name;
    let ty = &var.ty;
    let fetch = match &var.source {
        Source::Object(inner) => quote! { env.object::<#inner>() },
        Source::Value(inner) => quote! { env.value::<#inner>() },
        Source::Unsupported => quote! { env.unsupported::<#ty>() },
    };
    quote! {
        fn #name(env: &::casekit::Environment) -> #ty {
            #fetch
        }
    }
}

pub(crate) fn expand(tokens: TokenStream, mode: Mode) -> Expansion {
    let input: WithEnvInput = match syn::parse2(tokens) {
        Ok(input) => input,
        Err(parse_error) => return Expansion::failure(vec![parse_error.into()]),
    };
    let mut diagnostics = Vec::new();
    let vars = match environment_vars(&input.declarations, &mut diagnostics) {
        Ok(vars) => vars,
        Err(diagnostic) => {
            diagnostics.push(diagnostic);
            return Expansion::failure(diagnostics);
        }
    };
    if vars.is_empty() {
        diagnostics.push(error!(
            input.declarations.span(),
            "withEnvironment.missingVariables",
            "the environment block declares no variables"
        ));
        return Expansion::failure(diagnostics);
    }
    if mode == Mode::Expression && input.content.is_none() {
        diagnostics.push(error!(
            Span::call_site(),
            "withEnvironment.missingContent",
            "expected a content expression after the environment block"
        ));
        return Expansion::failure(diagnostics);
    }
    if mode == Mode::Declaration && input.content.is_some() {
        diagnostics.push(error!(
            Span::call_site(),
            "withEnvironment.invalidUsage",
            "`with_env!` declares the type only and takes no content expression"
        ));
        return Expansion::failure(diagnostics);
    }

    // The generated name is a pure function of the invocation text, so
    // identical invocations agree on it across builds.
    let declarations = &input.declarations;
    let mut seed = quote!(#declarations).to_string();
    if let Some(content) = &input.content {
        seed.push_str(&quote!(#content).to_string());
    }
    let prefix = input
        .prefix
        .as_ref()
        .map_or_else(|| "WithEnvironment".to_string(), |literal| sanitized(&literal.value()));
    let name = format_ident!("_{}_{}", prefix, short_hash(&seed));

    let types: Vec<&Type> = vars.iter().map(|var| &var.ty).collect();
    let names: Vec<&Ident> = vars.iter().map(|var| &var.name).collect();
    let fetchers = vars.iter().map(fetch_fn);
    let declaration = quote! {
        #[allow(non_camel_case_types)]
        struct #name<R, F>
        where
            F: Fn(#(#types),*) -> R,
        {
            content: F,
            _result: ::core::marker::PhantomData<fn() -> R>,
        }

        impl<R, F> #name<R, F>
        where
            F: Fn(#(#types),*) -> R,
        {
            #(#fetchers)*

            /// Fetches every declared variable and runs the content closure.
            fn body(&self, env: &::casekit::Environment) -> R {
                (self.content)(#(Self::#names(env)),*)
            }
        }
    };

    // The guards above leave content present exactly in expression mode.
    let tokens = match input.content {
        None => declaration,
        Some(content) => {
            quote! {
                {
                    #declaration
                    #name {
                        content: |#(#names: #types),*| #content,
                        _result: ::core::marker::PhantomData,
                    }
                }
            }
        }
    };
    Expansion { tokens, diagnostics }
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    #[test]
    fn expression_form_builds_an_instance() {
        let expansion = expand(
            quote! {
                { let user: ObservedObject<User>; let theme: Observed<Theme>; },
                render(&user, &theme)
            },
            Mode::Expression,
        );
        assert!(!expansion.has_errors());
        let text = expansion.tokens.to_string();
        assert!(text.contains("struct _WithEnvironment_"));
        assert!(text.contains("fn user (env : & :: casekit :: Environment) -> ObservedObject < User >"));
        assert!(text.contains("env . object :: < User > ()"));
        assert!(text.contains("env . value :: < Theme > ()"));
        assert!(text.contains("fn body"));
        assert!(text.contains("content : | user : ObservedObject < User > , theme : Observed < Theme > |"));
    }

    #[test]
    fn declaration_form_emits_the_type_only() {
        let expansion = expand(
            quote! { "Header", { let user: ObservedObject<User>; } },
            Mode::Declaration,
        );
        assert!(!expansion.has_errors());
        let text = expansion.tokens.to_string();
        assert!(text.contains("struct _Header_"));
        assert!(!text.contains("content : |"));
    }

    #[test]
    fn generated_names_are_deterministic() {
        let first = expand(
            quote! { { let user: ObservedObject<User>; }, use_it(&user) },
            Mode::Expression,
        );
        let second = expand(
            quote! { { let user: ObservedObject<User>; }, use_it(&user) },
            Mode::Expression,
        );
        assert_eq!(first.tokens.to_string(), second.tokens.to_string());
    }

    #[test]
    fn different_invocations_get_different_names() {
        let first = expand(
            quote! { { let user: ObservedObject<User>; }, a(&user) },
            Mode::Expression,
        );
        let second = expand(
            quote! { { let user: ObservedObject<User>; }, b(&user) },
            Mode::Expression,
        );
        assert_ne!(first.tokens.to_string(), second.tokens.to_string());
    }

    #[test]
    fn prefixes_are_sanitized() {
        let expansion = expand(
            quote! { "My Header!", { let user: ObservedObject<User>; } },
            Mode::Declaration,
        );
        assert!(!expansion.has_errors());
        assert!(expansion.tokens.to_string().contains("struct _My_Header__"));
    }

    #[test]
    fn non_block_declarations_are_rejected() {
        let expansion = expand(quote! { 42, body() }, Mode::Expression);
        assert!(expansion.has_errors());
        assert_eq!(
            expansion.diagnostics[0].code,
            "withEnvironment.invalidEnvironmentClosure"
        );
    }

    #[test]
    fn missing_type_annotation_is_rejected() {
        let expansion = expand(quote! { { let user; }, body() }, Mode::Expression);
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "withEnvironment.missingType");
    }

    #[test]
    fn initializers_are_rejected() {
        let expansion = expand(
            quote! { { let user: ObservedObject<User> = make(); }, body() },
            Mode::Expression,
        );
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "withEnvironment.noInitializer");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let expansion = expand(
            quote! {
                { let user: ObservedObject<User>; let user: Observed<Theme>; },
                body()
            },
            Mode::Expression,
        );
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "withEnvironment.duplicateName");
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let expansion = expand(
            quote! {
                { let first: ObservedObject<User>; let second: ObservedObject<User>; },
                body()
            },
            Mode::Expression,
        );
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "withEnvironment.duplicateType");
    }

    #[test]
    fn empty_blocks_are_rejected() {
        let expansion = expand(quote! { { }, body() }, Mode::Expression);
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "withEnvironment.missingVariables");
    }

    #[test]
    fn expression_form_requires_content() {
        let expansion = expand(
            quote! { { let user: ObservedObject<User>; } },
            Mode::Expression,
        );
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "withEnvironment.missingContent");
    }

    #[test]
    fn unsupported_types_warn_but_expand() {
        let expansion = expand(
            quote! { { let count: usize; }, show(count) },
            Mode::Expression,
        );
        assert!(!expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "withEnvironment.unsupportedType");
        assert!(expansion.tokens.to_string().contains("env . unsupported :: < usize > ()"));
    }
}
