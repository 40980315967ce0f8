use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use dox_hooks::protocol::HookKind;
use dox_hooks::HookOptions;
use tracing_subscriber::EnvFilter;

/// Safety and audit hooks for Claude Code sessions on the DoX policy dataset.
#[derive(Debug, Parser)]
#[command(name = "dox-hooks", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run as a PreToolUse hook (blocks dangerous tool calls with exit 2)
    PreToolUse(HookArgs),
    /// Run as a PostToolUse hook (prints a block decision as JSON)
    PostToolUse(HookArgs),
    /// Run as a UserPromptSubmit hook (blocks unsafe prompts, adds context)
    UserPromptSubmit(HookArgs),
}

#[derive(Debug, Args)]
struct HookArgs {
    /// Path to the KDL config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the JSON audit logs
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl From<HookArgs> for HookOptions {
    fn from(args: HookArgs) -> Self {
        HookOptions {
            config: args.config,
            log_dir: args.log_dir,
        }
    }
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout belongs to the hook protocol.
    let filter =
        EnvFilter::try_from_env("DOX_HOOKS_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let (kind, args) = match cli.command {
        Commands::PreToolUse(args) => (HookKind::PreToolUse, args),
        Commands::PostToolUse(args) => (HookKind::PostToolUse, args),
        Commands::UserPromptSubmit(args) => (HookKind::UserPromptSubmit, args),
    };

    dox_hooks::run_hook(kind, &args.into())
}
