//! Case-style detection and case-preserving re-casing.
//!
//! A matched token's capitalization convention is inferred from its shape
//! alone, and the replacement is re-cast into that convention. Tokens with
//! no recognizable convention pass the replacement through untouched.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// A token's capitalization/separator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Snake,
    Camel,
    Pascal,
    ScreamingSnake,
    Kebab,
    Unknown,
}

impl CaseStyle {
    /// Classify a token by its character composition.
    ///
    /// Mixed separators, non-identifier characters, or leading
    /// non-alphabetic characters all classify as `Unknown`.
    pub fn detect(token: &str) -> CaseStyle {
        if token.is_empty()
            || !token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return CaseStyle::Unknown;
        }

        let has_underscore = token.contains('_');
        let has_hyphen = token.contains('-');
        if has_underscore && has_hyphen {
            return CaseStyle::Unknown;
        }

        let any_lower = token.chars().any(|c| c.is_ascii_lowercase());
        let any_upper = token.chars().any(|c| c.is_ascii_uppercase());

        if has_hyphen {
            return if any_upper {
                CaseStyle::Unknown
            } else {
                CaseStyle::Kebab
            };
        }
        if has_underscore {
            return match (any_lower, any_upper) {
                (false, _) => CaseStyle::ScreamingSnake,
                (true, false) => CaseStyle::Snake,
                (true, true) => CaseStyle::Unknown,
            };
        }

        let first = token.chars().next().unwrap();
        if !first.is_ascii_alphabetic() {
            return CaseStyle::Unknown;
        }
        if !any_lower {
            return CaseStyle::ScreamingSnake;
        }
        if !any_upper {
            return CaseStyle::Snake;
        }
        if first.is_ascii_uppercase() {
            CaseStyle::Pascal
        } else {
            CaseStyle::Camel
        }
    }

    /// Re-cast `text` into this style. `Unknown` passes `text` through as-is.
    pub fn apply(&self, text: &str) -> String {
        match self {
            CaseStyle::Snake => text.to_snake_case(),
            CaseStyle::Camel => text.to_lower_camel_case(),
            CaseStyle::Pascal => text.to_upper_camel_case(),
            CaseStyle::ScreamingSnake => text.to_shouty_snake_case(),
            CaseStyle::Kebab => text.to_kebab_case(),
            CaseStyle::Unknown => text.to_string(),
        }
    }
}

/// Generate the (from, to) case-variant pairs for a subvert query.
///
/// Duplicated `from` forms (a single lowercase word looks the same in
/// snake, camel and kebab) keep their first occurrence.
pub fn variants(pattern: &str, replacement: &str) -> Vec<(String, String)> {
    let styles = [
        CaseStyle::Snake,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::ScreamingSnake,
        CaseStyle::Kebab,
    ];
    let mut pairs: Vec<(String, String)> = Vec::new();
    for style in styles {
        let from = style.apply(pattern);
        if pairs.iter().any(|(f, _)| *f == from) {
            continue;
        }
        let to = style.apply(replacement);
        pairs.push((from, to));
    }
    pairs
}
