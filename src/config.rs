// src/config.rs
use crate::constants::{DEFAULT_INTERPRETER, INTERPRETER_ENV_VAR};
use crate::error::AppError;
use crate::executor::ExecutorConfig;
use crate::script::{ResolutionPolicy, ScriptComposition, Strictness, VariableContext};
use crate::types::{Component, TargetApplication, ValidationError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Do not echo interpreter output
    #[arg(short, long, global = true, default_value_t = false)]
    pub silent: bool,

    /// Fail instead of emitting a placeholder when a fragment parameter is missing
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Escape quotes and backslashes in interpolated values
    #[arg(long, global = true, default_value_t = false)]
    pub escape: bool,

    /// Kill the interpreter after this many seconds (default: wait forever)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Interpreter executable (default: $MACACTOR_INTERPRETER or /usr/bin/osascript)
    #[arg(long, global = true)]
    pub interpreter: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print the composed script without running it
    Build(ScriptArgs),
    /// Compose a script and run it
    Run(ScriptArgs),
    /// Numbers convenience operations
    Numbers {
        #[command(subcommand)]
        operation: NumbersOperation,
    },
}

/// Arguments describing one composition.
#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// Target application (Numbers, Ghostty, Finder)
    #[arg(short, long)]
    pub app: String,

    /// File path for `open`
    #[arg(short, long)]
    pub file: Option<String>,

    /// Export path for `export-pdf` / `export-csv`
    #[arg(short, long)]
    pub export: Option<String>,

    /// Additional variable, repeatable (e.g. --set message=Hello)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// JSON file with file_path, export_path and additional values
    #[arg(long)]
    pub vars: Option<PathBuf>,

    /// Components in order (e.g. begin-scope enumerate-structure end-scope)
    pub components: Vec<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum NumbersOperation {
    /// Bring Numbers to the front
    Activate,
    /// Open a document
    Open { path: String },
    /// Export the front document as PDF
    ExportPdf { path: String },
    /// Export the front document as CSV
    ExportCsv { path: String },
    /// Close the front document
    Close,
    /// Show all sheets and tables of the front document
    Map,
    /// Set one cell value
    SetCell {
        #[arg(long)]
        sheet: u32,
        #[arg(long)]
        table: String,
        #[arg(long)]
        row: u32,
        #[arg(long)]
        column: u32,
        #[arg(long)]
        value: String,
    },
}

/// What the resolved invocation should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Build(ScriptComposition),
    Run(ScriptComposition),
    Numbers(NumbersOperation),
}

/// Resolved configuration, validated and ready to drive one invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub action: CliAction,
    pub executor: ExecutorConfig,
    pub policy: ResolutionPolicy,
    pub silent: bool,
    pub verbose: bool,
}

impl RunConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let policy = ResolutionPolicy {
            strictness: if cli.strict {
                Strictness::Strict
            } else {
                Strictness::Lenient
            },
            escape_values: cli.escape,
        };

        let interpreter = cli
            .interpreter
            .or_else(|| std::env::var(INTERPRETER_ENV_VAR).ok())
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string());

        let timeout = match cli.timeout {
            Some(0) => {
                return Err(ValidationError::InvalidTimeout(
                    "timeout must be at least one second".to_string(),
                )
                .into())
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        let action = match cli.command {
            CliCommand::Build(args) => CliAction::Build(resolve_composition(args, policy)?),
            CliCommand::Run(args) => CliAction::Run(resolve_composition(args, policy)?),
            CliCommand::Numbers { operation } => CliAction::Numbers(operation),
        };

        Ok(RunConfig {
            action,
            executor: ExecutorConfig::default()
                .with_interpreter(interpreter)
                .with_timeout(timeout),
            policy,
            silent: cli.silent,
            verbose: cli.verbose,
        })
    }
}

/// Builds a composition from CLI arguments.
///
/// Values given directly on the command line override the `--vars` file.
fn resolve_composition(
    args: ScriptArgs,
    policy: ResolutionPolicy,
) -> Result<ScriptComposition, AppError> {
    let application: TargetApplication = args.app.parse()?;
    let components = args
        .components
        .iter()
        .map(|tag| tag.parse::<Component>())
        .collect::<Result<Vec<_>, _>>()?;

    let base = match &args.vars {
        Some(path) => VariableContext::from_json_file(path)?,
        None => VariableContext::default(),
    };

    let mut overlay = VariableContext {
        file_path: args.file,
        export_path: args.export,
        ..VariableContext::default()
    };
    for assignment in &args.assignments {
        overlay.assign(assignment)?;
    }

    Ok(ScriptComposition::new(application, components)
        .with_variables(base.merged_with(overlay))
        .with_policy(policy))
}
