//! The three hook gates.
//!
//! Each gate runs a fixed, ordered list of checks over one event. The first
//! failing check decides the outcome; success falls through to an audit
//! record and a neutral outcome.

mod patterns;
mod value;

pub mod post_tool_use;
pub mod pre_tool_use;
pub mod user_prompt;

use chrono::{SecondsFormat, Utc};

use crate::audit::AuditLogs;
use crate::error::HookError;
use crate::protocol::{HookEvent, HookOutcome};

/// Evaluate one decoded event against its gate, writing to the given logs.
///
/// # Examples
///
/// ```
/// use dox_hooks::audit::{AuditLogs, MemoryLog};
/// use dox_hooks::gate::evaluate;
/// use dox_hooks::protocol::{HookEvent, HookKind, HookOutcome};
///
/// let logs = AuditLogs {
///     pre_tool_use: Box::new(MemoryLog::new()),
///     post_tool_use: Box::new(MemoryLog::new()),
///     user_prompt_submit: Box::new(MemoryLog::new()),
///     changes: Box::new(MemoryLog::new()),
/// };
/// let event = HookEvent::decode(
///     HookKind::PreToolUse,
///     r#"{"tool_name": "Bash", "tool_input": {"command": "psql -c 'DROP TABLE policies'"}}"#,
/// ).unwrap();
///
/// let outcome = evaluate(&event, &logs).unwrap();
/// assert!(matches!(outcome, HookOutcome::Reject(_)));
/// ```
pub fn evaluate(event: &HookEvent, logs: &AuditLogs) -> Result<HookOutcome, HookError> {
    match event {
        HookEvent::PreToolUse(input) => pre_tool_use::evaluate(input, logs.pre_tool_use.as_ref()),
        HookEvent::PostToolUse(input) => post_tool_use::evaluate(
            input,
            logs.post_tool_use.as_ref(),
            logs.changes.as_ref(),
        ),
        HookEvent::UserPromptSubmit(input) => {
            user_prompt::evaluate(input, logs.user_prompt_submit.as_ref())
        }
    }
}

/// Current time for records the host did not timestamp.
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests;
