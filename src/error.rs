use crate::audit::LogError;

/// Internal failures of a hook run.
///
/// None of these block the host: the CLI maps every variant to a silent,
/// successful exit after reporting it through tracing.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to read hook input: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("malformed hook input: {0}")]
    Input(#[from] serde_json::Error),
    #[error(transparent)]
    Log(#[from] LogError),
}
