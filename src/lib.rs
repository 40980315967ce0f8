pub mod audit;
pub mod config;
pub mod error;
pub mod gate;
pub mod protocol;

pub(crate) mod cli;
pub(crate) mod domain;

pub use domain::PolicyNumber;

use std::path::PathBuf;
use std::process::ExitCode;

use protocol::HookKind;

/// Options shared by every hook subcommand.
#[derive(Debug, Default, Clone)]
pub struct HookOptions {
    /// Optional KDL config file.
    pub config: Option<PathBuf>,
    /// Explicit audit-log directory; wins over the config file.
    pub log_dir: Option<PathBuf>,
}

/// Run one hook invocation: read JSON from stdin, evaluate, emit the outcome.
///
/// This is the binary entry point. It bridges `main.rs` to the library without
/// exposing `cli` internals. Embedders should call [`gate::evaluate`] with their
/// own [`audit::AuditLogs`] instead.
pub fn run_hook(kind: HookKind, options: &HookOptions) -> ExitCode {
    cli::hook::run(kind, options)
}
