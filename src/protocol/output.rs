use serde::Serialize;

/// Exit status the host reads as "block this action".
pub const BLOCK_EXIT_CODE: u8 = 2;

/// The result of running one gate, before it is mapped onto the process.
#[derive(Debug, PartialEq, Eq)]
pub enum HookOutcome {
    /// Let the action proceed. `context` is printed to stdout when present.
    Allow { context: Option<String> },
    /// Hard block: lines go to stderr and the process exits with status 2.
    Reject(Rejection),
    /// Advisory block after the fact: JSON on stdout, exit status 0.
    Block(BlockDecision),
}

impl HookOutcome {
    pub fn allow() -> Self {
        HookOutcome::Allow { context: None }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            HookOutcome::Reject(_) => BLOCK_EXIT_CODE,
            HookOutcome::Allow { .. } | HookOutcome::Block(_) => 0,
        }
    }
}

/// A hard rejection with a headline and a suggested alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub headline: String,
    pub advice: String,
}

impl Rejection {
    pub fn new(headline: impl Into<String>, advice: impl Into<String>) -> Self {
        Rejection {
            headline: headline.into(),
            advice: advice.into(),
        }
    }
}

/// The PostToolUse output returned to Claude Code on stdout.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BlockDecision {
    pub decision: Decision,
    pub reason: String,
}

impl BlockDecision {
    pub fn block(reason: impl Into<String>) -> Self {
        BlockDecision {
            decision: Decision::Block,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Block,
}
