use std::sync::OnceLock;

use regex::Regex;

use crate::audit::{LogStore, PromptRecord};
use crate::error::HookError;
use crate::protocol::{HookOutcome, PromptInput, Rejection};

use super::patterns::{any_match, compile_case_insensitive};

/// Prompt intents that are refused outright, with the reason shown to the user.
const UNSAFE_INTENTS: &[(&str, &str)] = &[
    (
        r"delete\s+all\s+policies",
        "Bulk policy deletion requires explicit confirmation",
    ),
    (
        r"drop\s+(?:table|database)",
        "Database schema modifications are restricted",
    ),
    (r"truncate\s+", "Table truncation is not allowed"),
    (
        r"service[_\s]key",
        "Service key operations should use secure methods",
    ),
    (
        r"production\s+database.*write",
        "Direct production writes should use MCP tools",
    ),
];

/// Keyword triggers and the hint each one adds, in output order.
const CONTEXT_HINTS: &[(&str, &str)] = &[
    (
        r"\b(policy|policies)\b",
        "Context: DoX manages 191 Big 12 Conference policies across 8 sports.",
    ),
    (
        r"\b(manual|pdf)\b",
        "Context: DoX can generate PDF manuals using React PDF with Big 12 branding.",
    ),
    (
        r"\b(search|find|query)\b",
        "Context: DoX uses PostgreSQL full-text search with GIN indexes.",
    ),
    (
        r"\b(sport|sports)\b",
        "Context: Sports with policies: Baseball, Basketball (M/W), Soccer, Volleyball, Gymnastics, Tennis, Wrestling.",
    ),
    (
        r"\b(mcp|server)\b",
        "Context: DoX MCP server has 18 tools for policy management (search, retrieve, generate PDFs).",
    ),
    (
        r"\b(database|supabase)\b",
        "Context: DoX uses Supabase project vfzgnvcwakjxtdsaedfq with 'competition' schema.",
    ),
];

const COMPLEX_FEATURE_PATTERNS: &[&str] = &[
    r"build.*interface",
    r"create.*dashboard",
    r"implement.*feature",
    r"add.*functionality",
    r"design.*system",
];

pub const PRP_SUGGESTION: &str =
    "Consider: For complex features, use `/generate-prp` to create a detailed implementation plan.";

pub const CONTEXT_HEADER: &str = "=== DoX Context ===";
pub const CONTEXT_FOOTER: &str = "==================";

struct Rule {
    re: Regex,
    text: &'static str,
}

fn rules(table: &[(&str, &'static str)]) -> Vec<Rule> {
    let patterns: Vec<&str> = table.iter().map(|(p, _)| *p).collect();
    compile_case_insensitive(&patterns)
        .into_iter()
        .zip(table.iter().map(|(_, text)| *text))
        .map(|(re, text)| Rule { re, text })
        .collect()
}

fn unsafe_intent_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| rules(UNSAFE_INTENTS))
}

fn context_hint_rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| rules(CONTEXT_HINTS))
}

fn complex_feature_re() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile_case_insensitive(COMPLEX_FEATURE_PATTERNS))
}

/// Run the UserPromptSubmit gate.
///
/// Unsafe prompts are rejected without being logged. Every other prompt is
/// logged, and any hints are returned as context for the assistant.
pub fn evaluate(input: &PromptInput, log: &dyn LogStore) -> Result<HookOutcome, HookError> {
    if let Some(message) = unsafe_intent(&input.prompt) {
        tracing::info!(session = %input.session_id, reason = message, "prompt rejected");
        return Ok(HookOutcome::Reject(Rejection::new(
            format!("⚠️  Safety Warning: {message}"),
            "Please revise your request to be more specific and safe.",
        )));
    }

    let hints = context_hints(&input.prompt);
    let suggestion = complexity_suggestion(&input.prompt);

    log.append(
        &PromptRecord {
            timestamp: input
                .timestamp
                .clone()
                .unwrap_or_else(super::now_timestamp),
            session_id: input.session_id.clone(),
            prompt: input.prompt.clone(),
            contexts_added: hints.len(),
            prp_suggested: suggestion.is_some(),
        }
        .into(),
    )?;

    tracing::debug!(hints = hints.len(), suggested = suggestion.is_some(), "prompt accepted");
    Ok(HookOutcome::Allow {
        context: render_context(&hints, suggestion),
    })
}

/// The reason for refusing the prompt, if it matches an unsafe intent.
pub fn unsafe_intent(prompt: &str) -> Option<&'static str> {
    unsafe_intent_rules()
        .iter()
        .find(|rule| rule.re.is_match(prompt))
        .map(|rule| rule.text)
}

/// Every hint whose trigger appears in the prompt, in table order.
pub fn context_hints(prompt: &str) -> Vec<&'static str> {
    context_hint_rules()
        .iter()
        .filter(|rule| rule.re.is_match(prompt))
        .map(|rule| rule.text)
        .collect()
}

/// The planning suggestion, for prompts that describe a sizeable feature.
pub fn complexity_suggestion(prompt: &str) -> Option<&'static str> {
    any_match(complex_feature_re(), prompt).then_some(PRP_SUGGESTION)
}

/// Format hints and suggestion as the block printed to stdout.
/// `None` when there is nothing to add.
pub fn render_context(hints: &[&str], suggestion: Option<&str>) -> Option<String> {
    if hints.is_empty() && suggestion.is_none() {
        return None;
    }

    let mut lines = vec![CONTEXT_HEADER.to_string()];
    lines.extend(hints.iter().map(|hint| format!("• {hint}")));
    if let Some(suggestion) = suggestion {
        lines.push(String::new());
        lines.push(suggestion.to_string());
    }
    lines.push(CONTEXT_FOOTER.to_string());
    Some(lines.join("\n"))
}
