use regex::Regex;

/// A replacement query.
pub enum Query {
    /// Substitute exact occurrences of `old` with `new`.
    Substring(String, String),
    /// Replace the parts matching the regex with the replacement,
    /// expanding capture groups (`$1`, `$2`, ...).
    Regex(Regex, String),
    /// Replace every case variant of `pattern` with the matching
    /// variant of `replacement`: `FooBar` becomes `SpamEggs` while
    /// `foo_bar` becomes `spam_eggs`, in a single query.
    Subvert(String, String),
}

impl Query {
    pub fn substring(old: &str, new: &str) -> Self {
        Self::Substring(old.to_string(), new.to_string())
    }

    pub fn regex(re: Regex, replacement: &str) -> Self {
        Self::Regex(re, replacement.to_string())
    }

    pub fn subvert(pattern: &str, replacement: &str) -> Self {
        Self::Subvert(pattern.to_string(), replacement.to_string())
    }
}
