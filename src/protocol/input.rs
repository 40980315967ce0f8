use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Which lifecycle point the hook was invoked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    PreToolUse,
    PostToolUse,
    UserPromptSubmit,
}

/// A decoded hook event, one variant per hook kind.
#[derive(Debug)]
pub enum HookEvent {
    PreToolUse(ToolUseInput),
    PostToolUse(ToolResultInput),
    UserPromptSubmit(PromptInput),
}

impl HookEvent {
    /// Decode the stdin payload for the given hook kind.
    ///
    /// Missing required fields surface as a decode error rather than as
    /// empty defaults further down the pipeline.
    pub fn decode(kind: HookKind, json: &str) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            HookKind::PreToolUse => HookEvent::PreToolUse(serde_json::from_str(json)?),
            HookKind::PostToolUse => HookEvent::PostToolUse(serde_json::from_str(json)?),
            HookKind::UserPromptSubmit => HookEvent::UserPromptSubmit(serde_json::from_str(json)?),
        })
    }

    pub fn kind(&self) -> HookKind {
        match self {
            HookEvent::PreToolUse(_) => HookKind::PreToolUse,
            HookEvent::PostToolUse(_) => HookKind::PostToolUse,
            HookEvent::UserPromptSubmit(_) => HookKind::UserPromptSubmit,
        }
    }
}

/// Input for a PreToolUse hook: the tool call about to run.
///
/// Unknown fields are silently ignored for forward compatibility.
#[derive(Debug, Deserialize)]
pub struct ToolUseInput {
    pub tool_name: String,
    #[serde(default = "empty_object")]
    pub tool_input: Value,
    #[serde(default, deserialize_with = "metadata")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "metadata")]
    pub timestamp: Option<String>,
}

/// Input for a PostToolUse hook: the tool call plus its result.
#[derive(Debug, Deserialize)]
pub struct ToolResultInput {
    pub tool_name: String,
    #[serde(default = "empty_object")]
    pub tool_input: Value,
    #[serde(default = "empty_object")]
    pub tool_response: Value,
    #[serde(default, deserialize_with = "metadata")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "metadata")]
    pub timestamp: Option<String>,
}

/// Input for a UserPromptSubmit hook.
#[derive(Debug, Deserialize)]
pub struct PromptInput {
    pub prompt: String,
    #[serde(default, deserialize_with = "metadata_or_empty")]
    pub session_id: String,
    #[serde(default, deserialize_with = "metadata")]
    pub timestamp: Option<String>,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

/// Session and timestamp fields only feed the audit records, so a value of
/// the wrong type must never stop the checks from running. Null reads as
/// absent, other non-strings are kept in their JSON form.
fn metadata<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn metadata_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(metadata(deserializer)?.unwrap_or_default())
}
