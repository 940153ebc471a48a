//! Honeypot path matching.

use regex::{RegexSet, RegexSetBuilder};

/// Path fragments probed by vulnerability scanners.
pub const DEFAULT_HONEYPOT_PATTERNS: [&str; 9] = [
    "/admin",
    "/wp-admin",
    "/phpmyadmin",
    "/cpanel",
    "/.env",
    "/config",
    "/backup",
    "/login",
    "/dashboard",
];

/// Case-insensitive matcher over literal path fragments.
#[derive(Debug, Clone)]
pub struct HoneypotMatcher {
    set: RegexSet,
}

impl HoneypotMatcher {
    /// Builds a matcher from literal fragments. Fragments are escaped, so
    /// `/.env` only matches a literal dot.
    pub fn new<I, S>(fragments: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<String> = fragments
            .into_iter()
            .map(|f| regex::escape(f.as_ref().trim()))
            .filter(|p| !p.is_empty())
            .collect();

        let set = RegexSetBuilder::new(patterns)
            .case_insensitive(true)
            .build()?;

        Ok(Self { set })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.set.is_match(path)
    }
}

impl Default for HoneypotMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_HONEYPOT_PATTERNS).expect("default honeypot patterns are valid")
    }
}
