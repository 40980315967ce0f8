pub mod input;
pub mod output;
pub mod tool_use;

pub use input::{HookEvent, HookKind, PromptInput, ToolResultInput, ToolUseInput};
pub use output::{BlockDecision, Decision, HookOutcome, Rejection, BLOCK_EXIT_CODE};
pub use tool_use::{DoxTool, FileOperation, ToolUse};
