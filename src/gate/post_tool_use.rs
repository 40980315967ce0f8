use serde_json::Value;

use crate::audit::{ChangeRecord, ChangeResult, LogStore, ToolResultRecord, ToolResultStatus};
use crate::domain::PolicyNumber;
use crate::error::HookError;
use crate::protocol::{BlockDecision, DoxTool, HookOutcome, ToolResultInput};

use super::value::{display_value, is_truthy};

/// Fields a created policy must carry, each with a truthy value.
pub const REQUIRED_POLICY_FIELDS: &[&str] =
    &["policy_number", "title", "sport_id", "category", "content_text"];

/// Run the PostToolUse gate.
///
/// Mutating DoX calls are written to `changes` first, whatever the rest of
/// the gate decides. A failed validation yields an advisory block; otherwise
/// the call is recorded in `log`.
pub fn evaluate(
    input: &ToolResultInput,
    log: &dyn LogStore,
    changes: &dyn LogStore,
) -> Result<HookOutcome, HookError> {
    let tool = DoxTool::from_tool_name(&input.tool_name);

    if tool.is_some_and(DoxTool::is_mutating) {
        changes.append(&change_record(input).into())?;
    }

    if let Err(message) = validate_policy_creation(tool, &input.tool_response) {
        return Ok(block(
            &input.tool_name,
            format!("Policy validation failed: {message}. Please fix and retry."),
        ));
    }

    if let Err(message) = check_manual_generation(tool, &input.tool_response) {
        return Ok(block(
            &input.tool_name,
            format!("Manual generation issue: {message}. Check logs and retry."),
        ));
    }

    log.append(
        &ToolResultRecord {
            timestamp: input.timestamp.clone(),
            session_id: input.session_id.clone(),
            tool_name: input.tool_name.clone(),
            status: ToolResultStatus::Success,
        }
        .into(),
    )?;
    tracing::debug!(tool = %input.tool_name, "tool result accepted");
    Ok(HookOutcome::allow())
}

fn block(tool_name: &str, reason: String) -> HookOutcome {
    tracing::info!(tool = %tool_name, reason = %reason, "tool result blocked");
    HookOutcome::Block(BlockDecision::block(reason))
}

fn change_record(input: &ToolResultInput) -> ChangeRecord {
    let error = input.tool_response.get("error");
    ChangeRecord {
        timestamp: super::now_timestamp(),
        tool: input.tool_name.clone(),
        input: input.tool_input.clone(),
        result: if error.is_some() {
            ChangeResult::Failed
        } else {
            ChangeResult::Success
        },
        details: error.cloned(),
    }
}

/// A created policy must carry every required field and a valid number.
pub(crate) fn validate_policy_creation(
    tool: Option<DoxTool>,
    response: &Value,
) -> Result<(), String> {
    if tool != Some(DoxTool::CreatePolicy) {
        return Ok(());
    }

    let policy = response.get("policy");
    let field = |name: &str| policy.and_then(|p| p.get(name));

    let missing: Vec<&str> = REQUIRED_POLICY_FIELDS
        .iter()
        .copied()
        .filter(|name| !field(*name).is_some_and(is_truthy))
        .collect();
    if !missing.is_empty() {
        return Err(format!(
            "Policy missing required fields: {}",
            missing.join(", ")
        ));
    }

    let number = field("policy_number");
    match number.and_then(Value::as_str).and_then(PolicyNumber::parse) {
        Some(_) => Ok(()),
        None => Err(format!(
            "Invalid policy number format: {}",
            number.map(display_value).unwrap_or_default()
        )),
    }
}

/// Manual generation must report no error and a produced PDF.
pub(crate) fn check_manual_generation(
    tool: Option<DoxTool>,
    response: &Value,
) -> Result<(), String> {
    if tool != Some(DoxTool::GenerateManual) {
        return Ok(());
    }

    if let Some(error) = response.get("error") {
        return Err(format!("Manual generation failed: {}", display_value(error)));
    }

    let generated = response
        .get("manual")
        .and_then(|m| m.get("pdf_generated"))
        .is_some_and(is_truthy);
    if !generated {
        return Err("PDF generation incomplete".to_string());
    }
    Ok(())
}
