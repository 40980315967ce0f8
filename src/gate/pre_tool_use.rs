use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::audit::{LogStore, ToolUseRecord, ToolUseStatus};
use crate::domain::PolicyNumber;
use crate::error::HookError;
use crate::protocol::{DoxTool, HookOutcome, Rejection, ToolUse, ToolUseInput};

use super::patterns::{any_match, compile};

/// Destructive SQL and schema-wide access, matched against the lower-cased command.
const DESTRUCTIVE_PATTERNS: &[&str] = &[
    r"drop\s+(?:table|database|schema)",
    r"truncate\s+table",
    r"delete\s+from\s+.*where\s*1\s*=\s*1",
    // no WHERE anywhere after the table name
    r"delete\s+from\s+[^w]*$",
    r"update\s+.*set.*where\s*1\s*=\s*1",
    r"alter\s+table.*drop",
    r"competition\.\*",
];

const WRITE_PATTERNS: &[&str] = &[
    r"insert\s+into",
    r"update\s+",
    r"delete\s+from",
    r"create\s+",
    r"alter\s+",
    r"drop\s+",
];

/// Largest `policy_ids` list a single MCP delete call may carry.
pub const BULK_DELETE_LIMIT: usize = 10;

pub const PRODUCTION_DB_HOST: &str = "vfzgnvcwakjxtdsaedfq.supabase.co";
const PRIVILEGED_CREDENTIAL_MARKERS: &[&str] = &["service_role", "SERVICE_KEY"];
const ENV_FILE_MARKER: &str = ".env";
const SERVICE_KEY_MARKER: &str = "SERVICE_KEY";

fn destructive_re() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(DESTRUCTIVE_PATTERNS))
}

fn write_re() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(WRITE_PATTERNS))
}

/// A single pre-action check. Returns the rejection when the call must not run.
type Validator = fn(&ToolUse, &Value) -> Option<Rejection>;

/// Checks in the order they are applied; the first rejection wins.
const VALIDATORS: &[Validator] = &[
    destructive_sql,
    bulk_deletion,
    production_write,
    policy_number_format,
    credential_file,
];

/// Run the PreToolUse gate: reject dangerous calls, log the rest.
///
/// Rejected calls leave no audit record.
pub fn evaluate(input: &ToolUseInput, log: &dyn LogStore) -> Result<HookOutcome, HookError> {
    let tool_use = ToolUse::parse(&input.tool_name, &input.tool_input);

    if let Some(rejection) = check(&tool_use, &input.tool_input) {
        tracing::info!(tool = %input.tool_name, reason = %rejection.headline, "tool call rejected");
        return Ok(HookOutcome::Reject(rejection));
    }

    log.append(
        &ToolUseRecord {
            timestamp: input.timestamp.clone(),
            session_id: input.session_id.clone(),
            tool_name: input.tool_name.clone(),
            tool_input: input.tool_input.clone(),
            status: ToolUseStatus::Allowed,
        }
        .into(),
    )?;
    tracing::debug!(tool = %input.tool_name, "tool call allowed");
    Ok(HookOutcome::allow())
}

/// Apply every validator in order without touching any log.
pub fn check(tool_use: &ToolUse, tool_input: &Value) -> Option<Rejection> {
    VALIDATORS
        .iter()
        .find_map(|validator| validator(tool_use, tool_input))
}

fn dangerous_operation() -> Rejection {
    Rejection::new(
        "BLOCKED: Dangerous database operation detected",
        "Use specific WHERE clauses and avoid bulk deletions",
    )
}

fn destructive_sql(tool_use: &ToolUse, _: &Value) -> Option<Rejection> {
    let command = tool_use.command()?.to_lowercase();
    any_match(destructive_re(), &command).then(dangerous_operation)
}

fn bulk_deletion(tool_use: &ToolUse, tool_input: &Value) -> Option<Rejection> {
    let ToolUse::Mcp { tool_name } = tool_use else {
        return None;
    };
    if !tool_name.to_lowercase().contains("delete") {
        return None;
    }
    let count = tool_input
        .get("policy_ids")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    (count > BULK_DELETE_LIMIT).then(dangerous_operation)
}

fn production_write(tool_use: &ToolUse, _: &Value) -> Option<Rejection> {
    let command = tool_use.command()?;
    let privileged = command.contains(PRODUCTION_DB_HOST)
        && PRIVILEGED_CREDENTIAL_MARKERS
            .iter()
            .any(|marker| command.contains(marker));
    (privileged && any_match(write_re(), &command.to_lowercase())).then(|| {
        Rejection::new(
            "BLOCKED: Direct production database writes are restricted",
            "Use MCP tools or application APIs for data modifications",
        )
    })
}

/// Create calls must carry a well-formed policy number; update calls are
/// only checked when they name one.
fn policy_number_format(tool_use: &ToolUse, tool_input: &Value) -> Option<Rejection> {
    let supplied = tool_input.get("policy_number");
    match tool_use.dox_tool()? {
        DoxTool::CreatePolicy => {}
        DoxTool::UpdatePolicy if supplied.is_some() => {}
        _ => return None,
    }

    let valid = supplied
        .and_then(Value::as_str)
        .and_then(PolicyNumber::parse)
        .is_some();
    (!valid).then(|| {
        Rejection::new(
            "BLOCKED: Invalid policy number format",
            "Format must be: {SPORT}-{CATEGORY}-{NUMBER} (e.g., BSB-OFF-001)",
        )
    })
}

/// Reads and edits of `.env` files that hold a service key.
///
/// A file that cannot be read is let through; the tool itself will fail.
fn credential_file(tool_use: &ToolUse, _: &Value) -> Option<Rejection> {
    let ToolUse::FileAccess {
        file_path: Some(path),
        ..
    } = tool_use
    else {
        return None;
    };
    if !path.contains(ENV_FILE_MARKER) {
        return None;
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "env file unreadable, skipping credential check");
            return None;
        }
    };
    content.contains(SERVICE_KEY_MARKER).then(|| {
        Rejection::new(
            "BLOCKED: Access to service keys is restricted",
            "Reference credentials through environment configuration instead",
        )
    })
}
