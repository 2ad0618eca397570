//! Fragment catalog: turns a component into script text.
//!
//! Resolution is a pure function of the component, the target application,
//! the variable context and the catalog's [`ResolutionPolicy`].

use super::escape::escape_applescript_string;
use super::templates::{invalid_parameter_placeholder, missing_parameter_placeholder, source_for};
use super::variables::{keys, VariableContext};
use crate::error::AppError;
use crate::types::{Component, TargetApplication};
use handlebars::Handlebars;
use serde_json::{Map, Value};

/// What to do when a fragment's required parameter is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Emit an inert placeholder comment in place of the fragment.
    #[default]
    Lenient,
    /// Fail with [`AppError::MissingParameter`] or [`AppError::InvalidParameter`].
    Strict,
}

/// How the catalog treats missing parameters and interpolated values.
///
/// The default reproduces the historical output: lenient placeholders and
/// values inserted exactly as given.
///
/// With `escape_values` set, quoted values are escaped and the unquoted
/// sheet, row and column positions must be whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionPolicy {
    pub strictness: Strictness,
    pub escape_values: bool,
}

impl ResolutionPolicy {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Self::default()
        }
    }

    pub fn with_escaping(mut self, escape_values: bool) -> Self {
        self.escape_values = escape_values;
        self
    }
}

/// Why a component could not be rendered from its variables.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParameterFault {
    Missing(&'static str),
    NotAWholeNumber(&'static str, String),
}

/// Registry of every component template.
pub struct FragmentCatalog {
    registry: Handlebars<'static>,
    policy: ResolutionPolicy,
}

impl FragmentCatalog {
    /// Registers all templates under their component tags.
    pub fn new(policy: ResolutionPolicy) -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        if policy.escape_values {
            registry.register_escape_fn(escape_applescript_string);
        } else {
            registry.register_escape_fn(handlebars::no_escape);
        }

        for component in Component::ALL {
            registry
                .register_template_string(component.tag(), source_for(component))
                .map_err(|e| AppError::TemplateRegistration {
                    name: component.tag().to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { registry, policy })
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Resolves one component into its fragment text.
    ///
    /// In lenient mode a missing or rejected parameter yields a placeholder
    /// comment and this never fails for that reason.
    pub fn resolve(
        &self,
        component: Component,
        application: TargetApplication,
        variables: &VariableContext,
    ) -> Result<String, AppError> {
        let parameters = match required_parameters(component, variables) {
            Ok(parameters) => parameters,
            Err(missing) => return self.degrade(component, ParameterFault::Missing(missing)),
        };
        if self.policy.escape_values {
            if let Some(fault) = unquoted_fault(&parameters) {
                return self.degrade(component, fault);
            }
        }

        let mut data = Map::new();
        data.insert(
            "app".to_string(),
            Value::String(application.scripting_name().to_string()),
        );
        for (name, value) in parameters {
            data.insert(name.to_string(), Value::String(value.to_string()));
        }

        let fragment = self
            .registry
            .render(component.tag(), &Value::Object(data))
            .map_err(|e| AppError::TemplateRenderError {
                name: component.tag().to_string(),
                message: e.to_string(),
            })?;

        log::debug!(
            "Resolved {} for {} ({} bytes)",
            component,
            application,
            fragment.len()
        );
        Ok(fragment)
    }

    fn degrade(&self, component: Component, fault: ParameterFault) -> Result<String, AppError> {
        match (self.policy.strictness, fault) {
            (Strictness::Lenient, ParameterFault::Missing(name)) => {
                log::warn!(
                    "Component '{}' is missing '{}'; emitting a no-op placeholder",
                    component,
                    name
                );
                Ok(missing_parameter_placeholder(name))
            }
            (Strictness::Lenient, ParameterFault::NotAWholeNumber(name, value)) => {
                log::warn!(
                    "Component '{}' rejected '{}' = {:?}; emitting a no-op placeholder",
                    component,
                    name,
                    value
                );
                Ok(invalid_parameter_placeholder(name))
            }
            (Strictness::Strict, ParameterFault::Missing(name)) => {
                Err(AppError::MissingParameter {
                    component,
                    parameter: name,
                })
            }
            (Strictness::Strict, ParameterFault::NotAWholeNumber(name, value)) => {
                Err(AppError::InvalidParameter {
                    component,
                    parameter: name,
                    value,
                })
            }
        }
    }
}

/// Parameters interpolated outside a string literal. Escaping cannot
/// neutralise them, so they must parse as whole numbers.
const UNQUOTED_PARAMETERS: [&str; 3] = [keys::SHEET, keys::ROW, keys::COLUMN];

fn unquoted_fault(parameters: &[(&'static str, &str)]) -> Option<ParameterFault> {
    parameters
        .iter()
        .filter(|(name, _)| UNQUOTED_PARAMETERS.contains(name))
        .find(|(_, value)| value.parse::<u32>().is_err())
        .map(|(name, value)| ParameterFault::NotAWholeNumber(*name, value.to_string()))
}

/// Collects the template values a component needs.
///
/// Returns the display name of the first absent parameter on failure.
fn required_parameters<'v>(
    component: Component,
    variables: &'v VariableContext,
) -> Result<Vec<(&'static str, &'v str)>, &'static str> {
    match component {
        Component::Open => {
            let file = variables.file_path.as_deref().ok_or("filePath")?;
            Ok(vec![("file_path", file)])
        }
        Component::ExportPdf | Component::ExportCsv => {
            let export = variables.export_path.as_deref().ok_or("exportPath")?;
            Ok(vec![("export_path", export)])
        }
        Component::ShowMessage => {
            let message = variables.get(keys::MESSAGE).ok_or(keys::MESSAGE)?;
            Ok(vec![(keys::MESSAGE, message)])
        }
        Component::SetCellValue => [keys::SHEET, keys::TABLE, keys::ROW, keys::COLUMN, keys::VALUE]
            .into_iter()
            .map(|key| variables.get(key).map(|value| (key, value)).ok_or(key))
            .collect(),
        Component::Activate
        | Component::Close
        | Component::EnumerateStructure
        | Component::BeginScope
        | Component::EndScope => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lenient() -> FragmentCatalog {
        FragmentCatalog::new(ResolutionPolicy::default()).unwrap()
    }

    fn cell_vars() -> VariableContext {
        VariableContext::new()
            .with_value("sheet", "1")
            .with_value("table", "Budget")
            .with_value("row", "2")
            .with_value("column", "3")
            .with_value("value", "100")
    }

    #[test]
    fn activate_targets_application() {
        let text = lenient()
            .resolve(
                Component::Activate,
                TargetApplication::Finder,
                &VariableContext::new(),
            )
            .unwrap();
        assert_eq!(text, "tell application \"Finder\"\n    activate\nend tell");
    }

    #[test]
    fn open_embeds_file_path() {
        let vars = VariableContext::new().with_file_path("/tmp/a.numbers");
        let text = lenient()
            .resolve(Component::Open, TargetApplication::Numbers, &vars)
            .unwrap();
        assert_eq!(
            text,
            "set docFile to POSIX file \"/tmp/a.numbers\" as alias\n\
             tell application \"Numbers\"\n    open docFile\nend tell"
        );
    }

    #[test]
    fn close_is_scoped_to_front_document() {
        let text = lenient()
            .resolve(
                Component::Close,
                TargetApplication::Numbers,
                &VariableContext::new(),
            )
            .unwrap();
        assert_eq!(
            text,
            "tell application \"Numbers\"\n    tell document 1\n        close\n    end tell\nend tell"
        );
    }

    #[test]
    fn exports_embed_export_path_and_format() {
        let vars = VariableContext::new().with_export_path("/tmp/out");
        let catalog = lenient();

        let pdf = catalog
            .resolve(Component::ExportPdf, TargetApplication::Numbers, &vars)
            .unwrap();
        assert!(pdf.starts_with("set pdfPath to POSIX file \"/tmp/out\"\n"));
        assert!(pdf.contains("export to pdfPath as PDF"));

        let csv = catalog
            .resolve(Component::ExportCsv, TargetApplication::Numbers, &vars)
            .unwrap();
        assert!(csv.starts_with("set csvPath to POSIX file \"/tmp/out\"\n"));
        assert!(csv.contains("export to csvPath as CSV"));
    }

    #[test]
    fn show_message_embeds_message() {
        let vars = VariableContext::new().with_value("message", "Done!");
        let text = lenient()
            .resolve(Component::ShowMessage, TargetApplication::Finder, &vars)
            .unwrap();
        assert_eq!(text, "display dialog \"Done!\"");
    }

    #[test]
    fn set_cell_value_places_every_parameter() {
        let text = lenient()
            .resolve(
                Component::SetCellValue,
                TargetApplication::Numbers,
                &cell_vars(),
            )
            .unwrap();
        assert!(text.contains("tell sheet 1"));
        assert!(text.contains("tell table \"Budget\""));
        assert!(text.contains("set the value of cell 3 of row 2 to \"100\""));
        assert!(text.starts_with("tell application \"Numbers\"\n    activate\n"));
    }

    #[test]
    fn scope_fragments() {
        let catalog = lenient();
        let vars = VariableContext::new();
        assert_eq!(
            catalog
                .resolve(Component::BeginScope, TargetApplication::Ghostty, &vars)
                .unwrap(),
            "tell application \"Ghostty\""
        );
        assert_eq!(
            catalog
                .resolve(Component::EndScope, TargetApplication::Ghostty, &vars)
                .unwrap(),
            "end tell"
        );
    }

    #[test]
    fn enumerate_structure_is_application_independent() {
        let catalog = lenient();
        let vars = VariableContext::new();
        let numbers = catalog
            .resolve(Component::EnumerateStructure, TargetApplication::Numbers, &vars)
            .unwrap();
        let finder = catalog
            .resolve(Component::EnumerateStructure, TargetApplication::Finder, &vars)
            .unwrap();
        assert_eq!(numbers, finder);
        assert!(numbers.starts_with("tell document 1\n"));
        assert!(numbers.contains("repeat with tableIndex from 1 to count of tables of currentSheet"));
        assert!(numbers.contains("display dialog report"));
        assert!(numbers.ends_with("end tell"));
    }

    #[test]
    fn missing_parameters_degrade_to_placeholders() {
        let catalog = lenient();
        let empty = VariableContext::new();
        let cases = [
            (Component::Open, "-- Missing filePath"),
            (Component::ExportPdf, "-- Missing exportPath"),
            (Component::ExportCsv, "-- Missing exportPath"),
            (Component::ShowMessage, "-- Missing message"),
            (Component::SetCellValue, "-- Missing sheet"),
        ];
        for (component, placeholder) in cases {
            let text = catalog
                .resolve(component, TargetApplication::Numbers, &empty)
                .unwrap();
            assert_eq!(text, placeholder, "component {}", component);
        }
    }

    #[test]
    fn set_cell_value_reports_first_missing_key() {
        let mut vars = cell_vars();
        vars.additional.shift_remove("row");
        let text = lenient()
            .resolve(Component::SetCellValue, TargetApplication::Numbers, &vars)
            .unwrap();
        assert_eq!(text, "-- Missing row");
    }

    #[test]
    fn strict_mode_fails_on_missing_parameter() {
        let catalog = FragmentCatalog::new(ResolutionPolicy::strict()).unwrap();
        let err = catalog
            .resolve(
                Component::ExportPdf,
                TargetApplication::Numbers,
                &VariableContext::new(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingParameter {
                component: Component::ExportPdf,
                parameter: "exportPath"
            }
        ));
    }

    #[test]
    fn strict_mode_resolves_parameter_free_components() {
        let catalog = FragmentCatalog::new(ResolutionPolicy::strict()).unwrap();
        assert!(catalog
            .resolve(
                Component::Close,
                TargetApplication::Numbers,
                &VariableContext::new()
            )
            .is_ok());
    }

    #[test]
    fn values_are_verbatim_by_default() {
        let vars = VariableContext::new().with_value("message", r#"say "hi" \ bye"#);
        let text = lenient()
            .resolve(Component::ShowMessage, TargetApplication::Finder, &vars)
            .unwrap();
        assert_eq!(text, r#"display dialog "say "hi" \ bye""#);
    }

    #[test]
    fn escaping_policy_quotes_values() {
        let catalog =
            FragmentCatalog::new(ResolutionPolicy::default().with_escaping(true)).unwrap();
        let vars = VariableContext::new().with_value("message", r#"say "hi""#);
        let text = catalog
            .resolve(Component::ShowMessage, TargetApplication::Finder, &vars)
            .unwrap();
        assert_eq!(text, r#"display dialog "say \"hi\"""#);
    }

    #[test]
    fn escaping_rejects_code_in_numeric_positions() {
        let catalog =
            FragmentCatalog::new(ResolutionPolicy::default().with_escaping(true)).unwrap();
        let vars = cell_vars().with_value("sheet", "1\ndo shell script \"touch /tmp/x\"\n--");
        let text = catalog
            .resolve(Component::SetCellValue, TargetApplication::Numbers, &vars)
            .unwrap();
        assert_eq!(text, "-- Invalid sheet");

        let vars = cell_vars().with_value("column", "3 of row 1\nbeep");
        let text = catalog
            .resolve(Component::SetCellValue, TargetApplication::Numbers, &vars)
            .unwrap();
        assert_eq!(text, "-- Invalid column");
    }

    #[test]
    fn strict_escaping_fails_on_non_numeric_row() {
        let catalog =
            FragmentCatalog::new(ResolutionPolicy::strict().with_escaping(true)).unwrap();
        let vars = cell_vars().with_value("row", "two");
        let err = catalog
            .resolve(Component::SetCellValue, TargetApplication::Numbers, &vars)
            .unwrap_err();
        match err {
            AppError::InvalidParameter {
                component,
                parameter,
                value,
            } => {
                assert_eq!(component, Component::SetCellValue);
                assert_eq!(parameter, "row");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn escaping_accepts_numeric_positions_and_escapes_the_rest() {
        let catalog =
            FragmentCatalog::new(ResolutionPolicy::default().with_escaping(true)).unwrap();
        let vars = cell_vars().with_value("value", r#"a "b""#);
        let text = catalog
            .resolve(Component::SetCellValue, TargetApplication::Numbers, &vars)
            .unwrap();
        assert!(text.contains("tell sheet 1"));
        assert!(text.contains(r#"set the value of cell 3 of row 2 to "a \"b\"""#));
    }

    #[test]
    fn numeric_positions_are_verbatim_without_escaping() {
        let vars = cell_vars().with_value("sheet", "\"Summary\"");
        let text = lenient()
            .resolve(Component::SetCellValue, TargetApplication::Numbers, &vars)
            .unwrap();
        assert!(text.contains("tell sheet \"Summary\""));
    }

    #[test]
    fn html_characters_are_never_entity_encoded() {
        let vars = VariableContext::new().with_file_path("/tmp/a&b <c>.numbers");
        for escape in [false, true] {
            let catalog =
                FragmentCatalog::new(ResolutionPolicy::default().with_escaping(escape)).unwrap();
            let text = catalog
                .resolve(Component::Open, TargetApplication::Numbers, &vars)
                .unwrap();
            assert!(text.contains("POSIX file \"/tmp/a&b <c>.numbers\""));
        }
    }
}
