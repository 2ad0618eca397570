//! Convenience operations for Numbers.

use crate::executor::{ExecutionResult, ProcessRunner, ScriptExecutor, SystemProcessRunner};
use crate::script::{keys, ResolutionPolicy, ScriptComposition, VariableContext};
use crate::types::{Component, TargetApplication};

/// Drives the Numbers spreadsheet app.
pub struct NumbersActor<R = SystemProcessRunner> {
    executor: ScriptExecutor<R>,
    policy: ResolutionPolicy,
    silent: bool,
}

impl NumbersActor<SystemProcessRunner> {
    pub fn new() -> Self {
        Self::with_executor(ScriptExecutor::default())
    }
}

impl Default for NumbersActor<SystemProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> NumbersActor<R> {
    pub const APPLICATION: TargetApplication = TargetApplication::Numbers;

    pub fn with_executor(executor: ScriptExecutor<R>) -> Self {
        Self {
            executor,
            policy: ResolutionPolicy::default(),
            silent: false,
        }
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Suppresses echoing interpreter output to stdout.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Activate the Numbers app.
    pub fn activate(&self) -> ExecutionResult {
        self.perform(vec![Component::Activate], VariableContext::new())
    }

    /// Open a Numbers document at a given file path.
    pub fn open_document(&self, file_path: &str) -> ExecutionResult {
        self.perform(
            vec![Component::Open],
            VariableContext::new().with_file_path(file_path),
        )
    }

    /// Export the front document as a PDF.
    pub fn export_pdf(&self, export_path: &str) -> ExecutionResult {
        self.perform(
            vec![Component::ExportPdf],
            VariableContext::new().with_export_path(export_path),
        )
    }

    /// Export the front document as CSV.
    pub fn export_csv(&self, export_path: &str) -> ExecutionResult {
        self.perform(
            vec![Component::ExportCsv],
            VariableContext::new().with_export_path(export_path),
        )
    }

    /// Close the front document.
    pub fn close_document(&self) -> ExecutionResult {
        self.perform(vec![Component::Close], VariableContext::new())
    }

    /// Show every sheet and table of the front document in a dialog.
    pub fn map_sheets_and_tables(&self) -> ExecutionResult {
        self.perform(
            vec![
                Component::BeginScope,
                Component::EnumerateStructure,
                Component::EndScope,
            ],
            VariableContext::new(),
        )
    }

    /// Set a cell (1-based column and row) in the named table of a sheet.
    pub fn set_cell_value(
        &self,
        sheet: u32,
        table: &str,
        row: u32,
        column: u32,
        value: &str,
    ) -> ExecutionResult {
        let variables = VariableContext::new()
            .with_value(keys::SHEET, sheet.to_string())
            .with_value(keys::TABLE, table)
            .with_value(keys::ROW, row.to_string())
            .with_value(keys::COLUMN, column.to_string())
            .with_value(keys::VALUE, value);
        self.perform(vec![Component::SetCellValue], variables)
    }

    fn perform(&self, components: Vec<Component>, variables: VariableContext) -> ExecutionResult {
        let composition = ScriptComposition::new(Self::APPLICATION, components)
            .with_variables(variables)
            .with_policy(self.policy);
        self.executor.run_composition(&composition, self.silent)
    }
}
