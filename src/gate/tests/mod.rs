
use crate::protocol::{PromptInput, ToolResultInput, ToolUseInput};
use serde_json::json;

const CREATE_POLICY: &str = "mcp__dox-server__create_policy";
const UPDATE_POLICY: &str = "mcp__dox-server__update_policy";
const DELETE_POLICY: &str = "mcp__dox-server__delete_policy";
const CREATE_MANUAL: &str = "mcp__dox-server__create_manual";
const GENERATE_MANUAL: &str = "mcp__dox-server__generate_manual";

fn tool_input(tool_name: &str, tool_input: serde_json::Value) -> ToolUseInput {
    serde_json::from_value(json!({
        "session_id": "sess-test",
        "timestamp": "2025-01-15T10:00:00",
        "tool_name": tool_name,
        "tool_input": tool_input
    }))
    .expect("test input should parse")
}

fn bash_input(command: &str) -> ToolUseInput {
    tool_input("Bash", json!({"command": command}))
}

fn result_input(
    tool_name: &str,
    tool_input: serde_json::Value,
    tool_response: serde_json::Value,
) -> ToolResultInput {
    serde_json::from_value(json!({
        "session_id": "sess-test",
        "timestamp": "2025-01-15T10:00:00",
        "tool_name": tool_name,
        "tool_input": tool_input,
        "tool_response": tool_response
    }))
    .expect("test input should parse")
}

fn prompt_input(prompt: &str) -> PromptInput {
    serde_json::from_value(json!({
        "session_id": "sess-test",
        "timestamp": "2025-01-15T10:00:00",
        "prompt": prompt
    }))
    .expect("test input should parse")
}

fn valid_policy() -> serde_json::Value {
    json!({
        "policy_number": "BSB-OFF-001",
        "title": "Officiating Assignments",
        "sport_id": 1,
        "category": "officiating",
        "content_text": "Officials are assigned by the conference office."
    })
}
