//! `#[labeled_views]` attribute: rewrites every expression statement of a
//! function body into a labeled value, labeled by its own source text.

use proc_macro2::Span;
use proc_macro2::TokenStream;
use quote::quote;
use quote::ToTokens;
use syn::Block;
use syn::ItemFn;
use syn::Stmt;
use syn::TraitItemFn;

use crate::diagnostic::error;
use crate::diagnostic::Expansion;

fn rewritten_statement(statement: Stmt) -> Stmt {
    match statement {
        Stmt::Expr(expr, semi) => {
            let label = quote!(#expr).to_string();
            Stmt::Expr(
                syn::parse_quote! { (#expr).labeled_view(#label) },
                semi,
            )
        }
        other => other,
    }
}

fn rewritten_block(block: Block) -> Block {
    let statements: Vec<Stmt> = block.stmts.into_iter().map(rewritten_statement).collect();
    syn::parse_quote! {
        {
            ::casekit::labeled_views(move || {
                use ::casekit::LabeledView as _;
                #(#statements)*
            })
        }
    }
}

pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> Expansion {
    if !attr.is_empty() {
        return Expansion {
            tokens: item,
            diagnostics: vec![error!(
                Span::call_site(),
                "labeledViews.invalidUsage",
                "`labeled_views` takes no arguments"
            )],
        };
    }
    if let Ok(mut function) = syn::parse2::<ItemFn>(item.clone()) {
        function.block = Box::new(rewritten_block(*function.block));
        return Expansion::new(function.into_token_stream());
    }
    if let Ok(mut function) = syn::parse2::<TraitItemFn>(item.clone()) {
        let Some(block) = function.default.take() else {
            return Expansion {
                tokens: item,
                diagnostics: vec![error!(
                    function.sig.ident.span(),
                    "labeledViews.missingBody",
                    "`labeled_views` needs a function body to rewrite"
                )],
            };
        };
        function.default = Some(rewritten_block(block));
        return Expansion::new(function.into_token_stream());
    }
    Expansion {
        tokens: item,
        diagnostics: vec![error!(
            Span::call_site(),
            "labeledViews.invalidUsage",
            "`labeled_views` can only be applied to functions"
        )],
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    #[test]
    fn expression_statements_are_labeled() {
        let expansion = expand(
            TokenStream::new(),
            quote! {
                fn dashboard(&self) -> Vec<Widget> {
                    header();
                    footer()
                }
            },
        );
        assert!(!expansion.has_errors());
        let text = expansion.tokens.to_string();
        assert!(text.contains(":: casekit :: labeled_views (move | |"));
        assert!(text.contains("use :: casekit :: LabeledView as _ ;"));
        assert!(text.contains("(header ()) . labeled_view (\"header ()\") ;"));
        assert!(text.contains("(footer ()) . labeled_view (\"footer ()\")"));
    }

    #[test]
    fn let_bindings_pass_through_untouched() {
        let expansion = expand(
            TokenStream::new(),
            quote! {
                fn view(&self) -> Widget {
                    let width = 12;
                    render(width)
                }
            },
        );
        assert!(!expansion.has_errors());
        let text = expansion.tokens.to_string();
        assert!(text.contains("let width = 12 ;"));
        assert!(text.contains("(render (width)) . labeled_view"));
    }

    #[test]
    fn bodyless_trait_methods_are_rejected() {
        let expansion = expand(
            TokenStream::new(),
            quote! {
                fn view(&self) -> Widget;
            },
        );
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "labeledViews.missingBody");
    }

    #[test]
    fn non_functions_are_rejected() {
        let expansion = expand(
            TokenStream::new(),
            quote! {
                struct NotAFunction;
            },
        );
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "labeledViews.invalidUsage");
        assert!(expansion.tokens.to_string().contains("struct NotAFunction"));
    }

    #[test]
    fn arguments_are_rejected() {
        let expansion = expand(
            quote! { verbose },
            quote! {
                fn view(&self) -> Widget { render() }
            },
        );
        assert!(expansion.has_errors());
        assert_eq!(expansion.diagnostics[0].code, "labeledViews.invalidUsage");
    }
}
