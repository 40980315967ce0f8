use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::audit::AuditLogs;
use crate::config::Config;
use crate::error::HookError;
use crate::gate;
use crate::protocol::{HookEvent, HookKind, HookOutcome};
use crate::HookOptions;

/// Execute one hook: read JSON from stdin, evaluate, emit the outcome.
///
/// This is the only place outcomes become process behavior. Internal errors
/// (bad stdin, malformed input, log I/O) end in a silent exit 0 so the host
/// assistant is never halted by a fault in the hook itself.
pub fn run(kind: HookKind, options: &HookOptions) -> ExitCode {
    let logs = AuditLogs::in_dir(&log_dir(options));

    match execute_from_stdin(kind, &logs) {
        Ok(outcome) => emit(&outcome),
        Err(e) => {
            tracing::warn!(hook = ?kind, error = %e, "hook failed, letting the action continue");
            ExitCode::SUCCESS
        }
    }
}

fn execute_from_stdin(kind: HookKind, logs: &AuditLogs) -> Result<HookOutcome, HookError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let event = HookEvent::decode(kind, &input)?;
    gate::evaluate(&event, logs)
}

/// Resolve the audit-log directory. A broken config file only costs the
/// custom location; the checks still run.
fn log_dir(options: &HookOptions) -> PathBuf {
    let config = match options.config.as_deref().map(Config::load) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            tracing::warn!("{:?}", miette::Report::new(e));
            Config::default()
        }
        None => Config::default(),
    };
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    config.resolve_log_dir(options.log_dir.as_deref(), &cwd)
}

fn emit(outcome: &HookOutcome) -> ExitCode {
    match outcome {
        HookOutcome::Allow { context } => {
            if let Some(context) = context {
                println!("{context}");
            }
        }
        HookOutcome::Reject(rejection) => {
            eprintln!("{}", rejection.headline);
            eprintln!("{}", rejection.advice);
        }
        HookOutcome::Block(decision) => match serde_json::to_string(decision) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize block decision"),
        },
    }
    ExitCode::from(outcome.exit_code())
}
