//! Identifier text utilities shared by every generator: word segmentation,
//! case conversion, keyword escaping, and the short content hash used for
//! deterministic generated names.

use proc_macro2::Ident;
use proc_macro2::Span;

// =============
// === Words ===
// =============

/// Splits an identifier-like string into its constituent words.
///
/// The scanner is greedy and leftmost: a digit run is one word, an uppercase
/// run that is not followed by a lowercase letter is one word (acronyms), an
/// optional single uppercase letter plus a lowercase run is one word, and a
/// run of caseless letters is one word. Everything else separates words and is
/// dropped. `"HTMLParser2"` segments as `["HTML", "Parser", "2"]`.
pub(crate) fn words_of(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            words.push(chars[start..i].iter().collect());
        } else if c.is_uppercase() {
            let start = i;
            while i < chars.len() && chars[i].is_uppercase() {
                i += 1;
            }
            let next_is_lower = i < chars.len() && chars[i].is_lowercase();
            if next_is_lower {
                if i - start == 1 {
                    // Single capital starting a capitalized word.
                    while i < chars.len() && chars[i].is_lowercase() {
                        i += 1;
                    }
                    words.push(chars[start..i].iter().collect());
                } else {
                    // Acronym run; its last capital starts the next word.
                    i -= 1;
                    words.push(chars[start..i].iter().collect());
                }
            } else {
                words.push(chars[start..i].iter().collect());
            }
        } else if c.is_lowercase() {
            let start = i;
            while i < chars.len() && chars[i].is_lowercase() {
                i += 1;
            }
            words.push(chars[start..i].iter().collect());
        } else if c.is_alphabetic() {
            let start = i;
            while i < chars.len()
                && chars[i].is_alphabetic()
                && !chars[i].is_uppercase()
                && !chars[i].is_lowercase()
            {
                i += 1;
            }
            words.push(chars[start..i].iter().collect());
        } else {
            i += 1;
        }
    }
    words
}

// =========================
// === Case conversions ===
// =========================

pub(crate) fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// `"HTTPResponseCode"` becomes `"httpResponseCode"`.
pub(crate) fn to_camel_case(text: &str) -> String {
    let words = words_of(text);
    let mut out = String::new();
    for (index, word) in words.iter().enumerate() {
        if index == 0 {
            out.extend(word.chars().flat_map(char::to_lowercase));
        } else {
            out.push_str(&capitalized(word));
        }
    }
    out
}

pub(crate) fn to_pascal_case(text: &str) -> String {
    words_of(text).iter().map(|word| capitalized(word)).collect()
}

fn joined_lowercase(text: &str, separator: char) -> String {
    let words = words_of(text);
    let mut out = String::new();
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            out.push(separator);
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

pub(crate) fn to_snake_case(text: &str) -> String {
    joined_lowercase(text, '_')
}

pub(crate) fn to_kebab_case(text: &str) -> String {
    joined_lowercase(text, '-')
}

pub(crate) fn to_screaming_snake_case(text: &str) -> String {
    to_snake_case(text).to_uppercase()
}

pub(crate) fn to_dot_case(text: &str) -> String {
    joined_lowercase(text, '.')
}

// ================
// === Keywords ===
// ================

/// Reserved words that cannot be used as plain identifiers.
pub(crate) const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try",
];

/// Keywords that the raw-identifier prefix cannot rescue.
const RAW_FORBIDDEN: &[&str] = &["self", "Self", "super", "crate"];

/// Strips a leading raw-identifier marker, if any.
pub(crate) fn trim_raw_marker(name: &str) -> &str {
    name.strip_prefix("r#").unwrap_or(name)
}

/// Escapes `name` when it collides with a reserved word, leaving it untouched
/// otherwise. Already-escaped input passes through unchanged, so the function
/// is idempotent. Keywords that cannot be raw identifiers get a trailing
/// underscore instead.
pub(crate) fn escape_if_reserved(name: &str) -> String {
    let trimmed = trim_raw_marker(name);
    if RAW_FORBIDDEN.contains(&trimmed) {
        return format!("{trimmed}_");
    }
    if KEYWORDS.contains(&trimmed) {
        return format!("r#{trimmed}");
    }
    trimmed.to_string()
}

/// Builds an identifier from arbitrary name text, escaping reserved words.
pub(crate) fn ident_for(name: &str, span: Span) -> Ident {
    let escaped = escape_if_reserved(name);
    match escaped.strip_prefix("r#") {
        Some(raw) => Ident::new_raw(raw, span),
        None => Ident::new(&escaped, span),
    }
}

// ==================
// === Short hash ===
// ==================

/// Last eight uppercase hex digits of the FNV-1a 64-bit hash of `seed`.
///
/// Stable across platforms and releases; generated names baked into downstream
/// sources depend on it never changing. The empty seed hashes to `"84222325"`.
pub(crate) fn short_hash(seed: &str) -> String {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for byte in seed.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    let hex = format!("{hash:016X}");
    hex[hex.len() - 8..].to_string()
}

// =============
// === Tests ===
// =============
