use regex::{Regex, RegexBuilder};

/// Compile built-in patterns. Panics only on a malformed literal, which is
/// a programming error caught by the unit tests.
pub(crate) fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("built-in pattern is valid"))
        .collect()
}

/// Like [`compile`], matching without regard to case.
pub(crate) fn compile_case_insensitive(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .expect("built-in pattern is valid")
        })
        .collect()
}

pub(crate) fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}
