use proc_macro2::Span;
use proc_macro2::TokenStream;

// ================
// === Severity ===
// ================

/// Set to 'true' to enable debug prints.
pub(crate) const DEBUG: bool = false;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Severity {
    Error,
    Warning,
    Note,
    Remark,
}

impl Severity {
    fn prefix(self) -> &'static str {
        match self {
            Severity::Error => "[ERROR]",
            Severity::Warning => "[WARNING]",
            Severity::Note => "[NOTE]",
            Severity::Remark => "[REMARK]",
        }
    }
}

#[cfg(nightly)]
impl From<Severity> for proc_macro::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => proc_macro::Level::Error,
            Severity::Warning => proc_macro::Level::Warning,
            Severity::Note | Severity::Remark => proc_macro::Level::Note,
        }
    }
}

// ==================
// === Diagnostic ===
// ==================

/// A structured message bound to a source location and a stable code.
///
/// The `code` is a dotted identifier such as `"withEnvironment.duplicateName"`.
/// Tests assert on codes instead of message wording, so codes must never change
/// once published.
#[derive(Clone, Debug)]
pub(crate) struct Diagnostic {
    pub severity: Severity,
    pub span: Span,
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, span: Span, code: &'static str, message: String) -> Self {
        Self { severity, span, code, message }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Renders the diagnostic as a `compile_error!` invocation carrying the
    /// original span, so rustc reports it at the offending syntax. The brace
    /// form is valid in both item and statement position.
    pub fn to_compile_error(&self) -> TokenStream {
        let message = &self.message;
        quote::quote_spanned! { self.span => ::core::compile_error! { #message } }
    }

    /// Surfaces a non-fatal diagnostic. Nightly rustc has a real side channel
    /// for macro warnings; on stable, and outside a live macro expansion, the
    /// best we can do is a prefixed line on stdout.
    pub fn emit(&self) {
        #[cfg(nightly)]
        if proc_macro::is_available() {
            let span = self.span.unwrap();
            let message = format!("{} [{}]", self.message, self.code);
            proc_macro::Diagnostic::spanned(span, self.severity.into(), message).emit();
            return;
        }
        println!("{} [{}] {}", self.severity.prefix(), self.code, self.message);
    }
}

impl From<syn::Error> for Diagnostic {
    fn from(parse_error: syn::Error) -> Self {
        Self::new(
            Severity::Error,
            parse_error.span(),
            "invalidSyntax",
            parse_error.to_string(),
        )
    }
}

pub(crate) type Result<T = TokenStream, E = Diagnostic> = std::result::Result<T, E>;

// =================
// === Expansion ===
// =================

/// The outcome of one generator invocation: replacement tokens plus every
/// diagnostic reported while producing them. An error diagnostic does not by
/// itself clear `tokens`; generators that hit a fatal precondition return
/// empty tokens explicitly.
pub(crate) struct Expansion {
    pub tokens: TokenStream,
    pub diagnostics: Vec<Diagnostic>,
}

impl Expansion {
    pub fn new(tokens: TokenStream) -> Self {
        Self { tokens, diagnostics: Vec::new() }
    }

    pub fn empty() -> Self {
        Self::new(TokenStream::new())
    }

    /// No-op output carrying the given diagnostics (typically one error).
    pub fn failure(diagnostics: Vec<Diagnostic>) -> Self {
        Self { tokens: TokenStream::new(), diagnostics }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Finishes a member- or declaration-synthesis expansion: fatal
    /// diagnostics become trailing `compile_error!` items, non-fatal ones are
    /// emitted out of band.
    pub fn into_item_tokens(self) -> TokenStream {
        let mut tokens = self.tokens;
        for diagnostic in &self.diagnostics {
            if diagnostic.is_fatal() {
                tokens.extend(diagnostic.to_compile_error());
            } else {
                diagnostic.emit();
            }
        }
        tokens
    }

    /// Finishes an expression-synthesis expansion. A failed site still has to
    /// produce a syntactically valid expression so the surrounding program
    /// stays parseable; the unit value is the placeholder.
    pub fn into_expr_tokens(self) -> TokenStream {
        if !self.has_errors() {
            for diagnostic in &self.diagnostics {
                diagnostic.emit();
            }
            return self.tokens;
        }
        let mut errors = TokenStream::new();
        for diagnostic in &self.diagnostics {
            if diagnostic.is_fatal() {
                errors.extend(diagnostic.to_compile_error());
            } else {
                diagnostic.emit();
            }
        }
        quote::quote! { { #errors () } }
    }
}

// ==============
// === Macros ===
// ==============

macro_rules! debug {
    ($($ts:tt)*) => { if $crate::diagnostic::DEBUG { println!( $($ts)* ) } };
}

macro_rules! diag {
    ($severity:expr, $span:expr, $code:expr, $($fmt:tt)*) => {
        $crate::diagnostic::Diagnostic::new($severity, $span, $code, format!($($fmt)*))
    };
}

macro_rules! error {
    ($($ts:tt)*) => { $crate::diagnostic::diag! { $crate::diagnostic::Severity::Error, $($ts)* } };
}

macro_rules! warning {
    ($($ts:tt)*) => { $crate::diagnostic::diag! { $crate::diagnostic::Severity::Warning, $($ts)* } };
}

macro_rules! note {
    ($($ts:tt)*) => { $crate::diagnostic::diag! { $crate::diagnostic::Severity::Note, $($ts)* } };
}

macro_rules! remark {
    ($($ts:tt)*) => { $crate::diagnostic::diag! { $crate::diagnostic::Severity::Remark, $($ts)* } };
}

macro_rules! err {
    ($($ts:tt)*) => { Err($crate::diagnostic::error!($($ts)*)) };
}

pub(crate) use debug;
pub(crate) use diag;
pub(crate) use err;
pub(crate) use error;
pub(crate) use note;
pub(crate) use remark;
pub(crate) use warning;
