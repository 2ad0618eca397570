//! Joins resolved fragments into one script.

use super::catalog::{FragmentCatalog, ResolutionPolicy};
use super::variables::VariableContext;
use crate::error::AppError;
use crate::types::{Component, TargetApplication};

/// Separator placed between consecutive fragments.
pub const FRAGMENT_SEPARATOR: &str = "\n";

/// One script build request.
///
/// Building does not consume or mutate the composition, so the same value
/// can be built (and run) repeatedly with identical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptComposition {
    pub application: TargetApplication,
    pub components: Vec<Component>,
    pub variables: VariableContext,
    pub policy: ResolutionPolicy,
}

impl ScriptComposition {
    pub fn new(application: TargetApplication, components: Vec<Component>) -> Self {
        Self {
            application,
            components,
            variables: VariableContext::default(),
            policy: ResolutionPolicy::default(),
        }
    }

    pub fn with_variables(mut self, variables: VariableContext) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves every component in order and joins the fragments.
    ///
    /// No fragments are merged, dropped or reordered, and the result is not
    /// checked for balanced scope blocks.
    pub fn build(&self) -> Result<String, AppError> {
        let catalog = FragmentCatalog::new(self.policy)?;
        self.build_with(&catalog)
    }

    /// Like [`build`](Self::build) but with a caller-supplied catalog, whose
    /// policy takes precedence over `self.policy`.
    pub fn build_with(&self, catalog: &FragmentCatalog) -> Result<String, AppError> {
        let fragments = self
            .components
            .iter()
            .map(|component| catalog.resolve(*component, self.application, &self.variables))
            .collect::<Result<Vec<_>, _>>()?;

        let script = fragments.join(FRAGMENT_SEPARATOR);
        log::debug!(
            "Composed {} fragment(s) for {} into {} bytes",
            fragments.len(),
            self.application,
            script.len()
        );
        Ok(script)
    }
}

/// Builds a script with the default lenient policy.
pub fn build(
    application: TargetApplication,
    components: &[Component],
    variables: &VariableContext,
) -> String {
    let composition =
        ScriptComposition::new(application, components.to_vec()).with_variables(variables.clone());

    // Lenient resolution only fails if a built-in template is broken.
    composition.build().unwrap_or_else(|e| {
        log::error!("Script composition failed: {}", e);
        String::new()
    })
}
