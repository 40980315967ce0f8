use std::sync::OnceLock;

use regex::Regex;

/// Grammar for Big 12 policy numbers: `{SPORT}-{CATEGORY}-{NUMBER}`.
const POLICY_NUMBER_PATTERN: &str = r"^[A-Z]{2,4}-[A-Z]{3}-\d{3}$";

fn policy_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(POLICY_NUMBER_PATTERN).expect("policy number pattern is valid"))
}

/// A validated policy number such as `BSB-OFF-001`.
///
/// Only constructible through [`PolicyNumber::parse`], so holding one means
/// the grammar has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyNumber(String);

impl PolicyNumber {
    /// Validate a raw string against the policy number grammar.
    ///
    /// ```
    /// use dox_hooks::PolicyNumber;
    ///
    /// assert!(PolicyNumber::parse("BSB-OFF-001").is_some());
    /// assert!(PolicyNumber::parse("bsb-off-1").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        policy_number_re()
            .is_match(raw)
            .then(|| PolicyNumber(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sport code, e.g. `BSB`.
    pub fn sport(&self) -> &str {
        self.segment(0)
    }

    /// Category code, e.g. `OFF`.
    pub fn category(&self) -> &str {
        self.segment(1)
    }

    /// Three-digit sequence, e.g. `001`.
    pub fn sequence(&self) -> &str {
        self.segment(2)
    }

    fn segment(&self, index: usize) -> &str {
        self.0.split('-').nth(index).unwrap_or_default()
    }
}

impl std::fmt::Display for PolicyNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
