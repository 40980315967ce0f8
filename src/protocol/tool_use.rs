use serde_json::Value;

/// Prefix Claude Code puts on every MCP tool name.
pub const MCP_PREFIX: &str = "mcp__";

/// Prefix of the DoX policy server's tools.
pub const DOX_SERVER_PREFIX: &str = "mcp__dox-server__";

/// Identifies which file tool is touching a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileOperation {
    Read,
    Edit,
    MultiEdit,
}

/// Typed representation of a tool invocation, parsed at the protocol boundary.
///
/// Each variant carries the tool-specific fields extracted from `tool_input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolUse {
    /// Bash command execution. `None` when the command field is missing
    /// or not a string.
    Bash { command: Option<String> },
    /// Read/Edit/MultiEdit on a single file.
    FileAccess {
        operation: FileOperation,
        file_path: Option<String>,
    },
    /// Any call routed through an MCP server.
    Mcp { tool_name: String },
    /// Unrecognized tool; no gate has an opinion.
    Unknown { tool_name: String },
}

impl ToolUse {
    /// Parse from raw hook input fields.
    ///
    /// ```
    /// use dox_hooks::protocol::ToolUse;
    ///
    /// let tool_use = ToolUse::parse("Bash", &serde_json::json!({"command": "psql -c 'select 1'"}));
    /// assert_eq!(tool_use.command(), Some("psql -c 'select 1'"));
    /// ```
    pub fn parse(tool_name: &str, tool_input: &Value) -> Self {
        let file_access = |operation| ToolUse::FileAccess {
            operation,
            file_path: extract_string(tool_input, "file_path"),
        };
        match tool_name {
            "Bash" => ToolUse::Bash {
                command: tool_input
                    .get("command")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            "Read" => file_access(FileOperation::Read),
            "Edit" => file_access(FileOperation::Edit),
            "MultiEdit" => file_access(FileOperation::MultiEdit),
            name if name.starts_with(MCP_PREFIX) => ToolUse::Mcp {
                tool_name: name.to_string(),
            },
            _ => ToolUse::Unknown {
                tool_name: tool_name.to_string(),
            },
        }
    }

    /// The shell command for Bash calls.
    pub fn command(&self) -> Option<&str> {
        match self {
            ToolUse::Bash { command } => command.as_deref(),
            _ => None,
        }
    }

    /// The DoX server tool this call targets, if any.
    pub fn dox_tool(&self) -> Option<DoxTool> {
        match self {
            ToolUse::Mcp { tool_name } => DoxTool::from_tool_name(tool_name),
            _ => None,
        }
    }
}

/// Tools exposed by the DoX policy MCP server that the gates care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoxTool {
    CreatePolicy,
    UpdatePolicy,
    DeletePolicy,
    CreateManual,
    GenerateManual,
}

impl DoxTool {
    /// Resolve a full tool name such as `mcp__dox-server__create_policy`.
    pub fn from_tool_name(tool_name: &str) -> Option<Self> {
        match tool_name.strip_prefix(DOX_SERVER_PREFIX)? {
            "create_policy" => Some(DoxTool::CreatePolicy),
            "update_policy" => Some(DoxTool::UpdatePolicy),
            "delete_policy" => Some(DoxTool::DeletePolicy),
            "create_manual" => Some(DoxTool::CreateManual),
            "generate_manual" => Some(DoxTool::GenerateManual),
            _ => None,
        }
    }

    /// Tools whose calls modify the policy database and go to the audit trail.
    pub fn is_mutating(self) -> bool {
        !matches!(self, DoxTool::GenerateManual)
    }
}

/// Extract a non-empty string field from JSON.
fn extract_string(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
