// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use macactor::constants::LOG_FILE_NAME;
use macactor::{
    AppError, CliAction, CommandLineInput, ExecutionResult, NumbersActor, NumbersOperation,
    RunConfig, ScriptExecutor,
};
use std::fs;
use std::process::ExitCode;

/// Sets up logging configuration.
///
/// Console logging goes to stderr so that stdout carries only scripts and
/// interpreter output.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join(LOG_FILE_NAME);
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Carries out the resolved action and reports whether it succeeded.
fn execute(config: RunConfig) -> Result<ExitCode, AppError> {
    let executor = ScriptExecutor::new(config.executor.clone());

    let result = match config.action {
        CliAction::Build(composition) => {
            println!("{}", composition.build()?);
            return Ok(ExitCode::SUCCESS);
        }
        CliAction::Run(composition) => executor.run_composition(&composition, config.silent),
        CliAction::Numbers(operation) => {
            let actor = NumbersActor::with_executor(executor)
                .with_policy(config.policy)
                .silent(config.silent);
            perform_numbers_operation(&actor, operation)
        }
    };

    Ok(exit_code_for(&result))
}

fn perform_numbers_operation(actor: &NumbersActor, operation: NumbersOperation) -> ExecutionResult {
    log::info!("Numbers operation: {:?}", operation);
    match operation {
        NumbersOperation::Activate => actor.activate(),
        NumbersOperation::Open { path } => actor.open_document(&path),
        NumbersOperation::ExportPdf { path } => actor.export_pdf(&path),
        NumbersOperation::ExportCsv { path } => actor.export_csv(&path),
        NumbersOperation::Close => actor.close_document(),
        NumbersOperation::Map => actor.map_sheets_and_tables(),
        NumbersOperation::SetCell {
            sheet,
            table,
            row,
            column,
            value,
        } => actor.set_cell_value(sheet, &table, row, column, &value),
    }
}

fn exit_code_for(result: &ExecutionResult) -> ExitCode {
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    match RunConfig::resolve(cli).and_then(execute) {
        Ok(code) => Ok(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
