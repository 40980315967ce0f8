//! Audit logs written by the gates.
//!
//! Each hook kind appends to its own JSON-array file; database-modifying
//! DoX calls additionally go to a separate audit trail.

mod record;
mod store;

pub use record::{
    AuditRecord, ChangeRecord, ChangeResult, PromptRecord, ToolResultRecord, ToolResultStatus,
    ToolUseRecord, ToolUseStatus,
};
pub use store::{JsonArrayLog, LogError, LogStore, MemoryLog};

use std::path::Path;

pub const PRE_TOOL_USE_LOG: &str = "pre_tool_use.json";
pub const POST_TOOL_USE_LOG: &str = "post_tool_use.json";
pub const USER_PROMPT_SUBMIT_LOG: &str = "user_prompt_submit.json";
pub const CHANGE_AUDIT_LOG: &str = "dox_audit.json";

/// The set of stores the gates write to.
pub struct AuditLogs {
    pub pre_tool_use: Box<dyn LogStore>,
    pub post_tool_use: Box<dyn LogStore>,
    pub user_prompt_submit: Box<dyn LogStore>,
    pub changes: Box<dyn LogStore>,
}

impl AuditLogs {
    /// File-backed logs under `dir`, using the fixed file names.
    pub fn in_dir(dir: &Path) -> Self {
        AuditLogs {
            pre_tool_use: Box::new(JsonArrayLog::new(dir.join(PRE_TOOL_USE_LOG))),
            post_tool_use: Box::new(JsonArrayLog::new(dir.join(POST_TOOL_USE_LOG))),
            user_prompt_submit: Box::new(JsonArrayLog::new(dir.join(USER_PROMPT_SUBMIT_LOG))),
            changes: Box::new(JsonArrayLog::new(dir.join(CHANGE_AUDIT_LOG))),
        }
    }
}
