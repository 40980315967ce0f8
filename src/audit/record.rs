use serde::Serialize;
use serde_json::Value;

/// One entry in an audit log. Each hook kind writes its own variant.
///
/// Serialized untagged, so each log file holds plain objects with the
/// field names below.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuditRecord {
    ToolUse(ToolUseRecord),
    ToolResult(ToolResultRecord),
    Prompt(PromptRecord),
    Change(ChangeRecord),
}

/// A tool call the PreToolUse gate let through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolUseRecord {
    pub timestamp: Option<String>,
    pub session_id: Option<String>,
    pub tool_name: String,
    pub tool_input: Value,
    pub status: ToolUseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolUseStatus {
    Allowed,
}

/// A tool result the PostToolUse gate found no fault with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResultRecord {
    pub timestamp: Option<String>,
    pub session_id: Option<String>,
    pub tool_name: String,
    pub status: ToolResultStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolResultStatus {
    Success,
}

/// A submitted prompt and what the gate added to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRecord {
    pub timestamp: String,
    pub session_id: String,
    pub prompt: String,
    pub contexts_added: usize,
    pub prp_suggested: bool,
}

/// A database-modifying DoX tool call, recorded whatever its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    pub timestamp: String,
    pub tool: String,
    pub input: Value,
    pub result: ChangeResult,
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeResult {
    Success,
    Failed,
}

impl From<ToolUseRecord> for AuditRecord {
    fn from(record: ToolUseRecord) -> Self {
        AuditRecord::ToolUse(record)
    }
}

impl From<ToolResultRecord> for AuditRecord {
    fn from(record: ToolResultRecord) -> Self {
        AuditRecord::ToolResult(record)
    }
}

impl From<PromptRecord> for AuditRecord {
    fn from(record: PromptRecord) -> Self {
        AuditRecord::Prompt(record)
    }
}

impl From<ChangeRecord> for AuditRecord {
    fn from(record: ChangeRecord) -> Self {
        AuditRecord::Change(record)
    }
}
