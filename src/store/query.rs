//! Larder - Key Matching
//! Wildcard patterns for the query operation.
//!
//! A pattern without `*` names exactly one key. A pattern containing
//! `*` is split on `*` into its non-empty literal fragments, and a key
//! matches when ANY fragment occurs in it as a substring. This is an
//! OR-of-substrings match, not a glob: `"name*"` and `"*name*"` are
//! equivalent, and `"a*b"` matches keys containing `a` OR `b`.

/// A parsed query pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPattern {
    /// No wildcard marker: match exactly one key.
    Exact(String),
    /// Wildcard form: match keys containing any of these fragments.
    AnyFragment(Vec<String>),
}

impl KeyPattern {
    /// Parse a pattern string.
    /// A lone `*` has no literal fragments and matches nothing.
    pub fn parse(pattern: &str) -> Self {
        if !pattern.contains('*') {
            return Self::Exact(pattern.to_string());
        }
        let fragments = pattern
            .split('*')
            .filter(|frag| !frag.is_empty())
            .map(str::to_string)
            .collect();
        Self::AnyFragment(fragments)
    }

    /// Returns true if `key` matches this pattern.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Exact(want) => key == want,
            Self::AnyFragment(fragments) => {
                fragments.iter().any(|frag| key.contains(frag.as_str()))
            }
        }
    }
}
