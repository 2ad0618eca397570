//! Runs composed scripts through the interpreter and classifies the outcome.
//!
//! This is the only place the interpreter is invoked; everything it reports
//! comes back as an [`ExecutionResult`] value, never as an error.

use super::process::{ProcessRunner, SystemProcessRunner};
use super::types::{ExecutionResult, ExecutorConfig, ProcessError, ProcessOutput};
use crate::constants::{INLINE_SCRIPT_FLAG, LAUNCH_FAILURE_PREFIX};
use crate::script::{ScriptComposition, VariableContext};
use crate::types::{Component, TargetApplication};

/// Invokes `<interpreter> -e <script>` and maps the exit status to a result.
#[derive(Debug, Clone, Default)]
pub struct ScriptExecutor<R = SystemProcessRunner> {
    config: ExecutorConfig,
    runner: R,
}

impl ScriptExecutor<SystemProcessRunner> {
    pub fn new(config: ExecutorConfig) -> Self {
        Self::with_runner(config, SystemProcessRunner)
    }
}

impl<R: ProcessRunner> ScriptExecutor<R> {
    pub fn with_runner(config: ExecutorConfig, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Runs `script` and blocks until the interpreter exits.
    ///
    /// Unless `silent`, the interpreter's own output is also printed to
    /// stdout. Launch and timeout failures are only logged, so stdout never
    /// carries text the interpreter did not produce. The returned result is
    /// the same either way.
    pub fn run(&self, script: &str, silent: bool) -> ExecutionResult {
        let interpreter = &self.config.interpreter;
        log::info!(
            "Running {}-line script through {}",
            script.lines().count(),
            interpreter.display()
        );
        log::debug!("Script text:\n{}", script);

        match self.runner.run_to_completion(
            interpreter,
            &[INLINE_SCRIPT_FLAG, script],
            self.config.timeout,
        ) {
            Ok(output) => {
                let result = classify(output);
                echo(&result, silent);
                result
            }
            Err(err @ ProcessError::TimedOut { .. }) => {
                log::error!("{}", err);
                ExecutionResult::Failure(err.to_string())
            }
            Err(err) => {
                log::error!("Interpreter could not be run: {}", err);
                ExecutionResult::Failure(format!("{}: {}", LAUNCH_FAILURE_PREFIX, err))
            }
        }
    }

    /// Builds `composition` and runs it.
    ///
    /// A composition that fails to build (strict mode) becomes a failure
    /// result without starting the interpreter. That failure is logged, not
    /// echoed.
    pub fn run_composition(
        &self,
        composition: &ScriptComposition,
        silent: bool,
    ) -> ExecutionResult {
        match composition.build() {
            Ok(script) => self.run(&script, silent),
            Err(e) => {
                log::error!("Script was not run: {}", e);
                ExecutionResult::Failure(e.to_string())
            }
        }
    }
}

/// Composes with the default policy and runs with the default interpreter.
pub fn run(
    application: TargetApplication,
    components: &[Component],
    variables: &VariableContext,
    silent: bool,
) -> ExecutionResult {
    let composition =
        ScriptComposition::new(application, components.to_vec()).with_variables(variables.clone());
    ScriptExecutor::new(ExecutorConfig::default()).run_composition(&composition, silent)
}

fn classify(output: ProcessOutput) -> ExecutionResult {
    match output.exit_code {
        Some(0) => ExecutionResult::Success(decode(output.stdout)),
        code => {
            log::warn!("Interpreter exited with status {:?}", code);
            ExecutionResult::Failure(decode(output.stderr))
        }
    }
}

/// Invalid UTF-8 decodes to an empty string.
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_default()
}

fn echo(result: &ExecutionResult, silent: bool) {
    if !silent {
        println!("{}", result.payload());
    }
}
