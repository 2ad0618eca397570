use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One kind of reusable script fragment.
///
/// The set is closed: the fragment catalog matches on every variant, so a new
/// kind needs a template alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    /// Bring the application to the foreground.
    Activate,
    /// Open the document at the context's file path.
    Open,
    /// Close the front document.
    Close,
    /// Export the front document as PDF to the context's export path.
    ExportPdf,
    /// Export the front document as CSV to the context's export path.
    ExportCsv,
    /// Show the `message` value in a dialog.
    ShowMessage,
    /// Walk sheets and tables of the front document and show a report.
    EnumerateStructure,
    /// Set one table cell from `sheet`, `table`, `row`, `column` and `value`.
    SetCellValue,
    /// Open an application scope block.
    BeginScope,
    /// Close the innermost scope block.
    EndScope,
}

impl Component {
    pub const ALL: [Component; 10] = [
        Self::Activate,
        Self::Open,
        Self::Close,
        Self::ExportPdf,
        Self::ExportCsv,
        Self::ShowMessage,
        Self::EnumerateStructure,
        Self::SetCellValue,
        Self::BeginScope,
        Self::EndScope,
    ];

    /// Stable kebab-case tag, also used as the template name.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Open => "open",
            Self::Close => "close",
            Self::ExportPdf => "export-pdf",
            Self::ExportCsv => "export-csv",
            Self::ShowMessage => "show-message",
            Self::EnumerateStructure => "enumerate-structure",
            Self::SetCellValue => "set-cell-value",
            Self::BeginScope => "begin-scope",
            Self::EndScope => "end-scope",
        }
    }
}

impl std::str::FromStr for Component {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "activate" => Ok(Self::Activate),
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "export-pdf" | "exportPDF" => Ok(Self::ExportPdf),
            "export-csv" | "exportCSV" => Ok(Self::ExportCsv),
            "show-message" | "displayDialog" => Ok(Self::ShowMessage),
            "enumerate-structure" | "numbersMap" => Ok(Self::EnumerateStructure),
            "set-cell-value" => Ok(Self::SetCellValue),
            "begin-scope" => Ok(Self::BeginScope),
            "end-scope" => Ok(Self::EndScope),
            other => Err(ValidationError::UnknownComponent(other.to_string())),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back_to_their_component() {
        for component in Component::ALL {
            assert_eq!(component.tag().parse::<Component>().unwrap(), component);
        }
    }

    #[test]
    fn accepts_legacy_camel_case_aliases() {
        assert_eq!("exportPDF".parse::<Component>().unwrap(), Component::ExportPdf);
        assert_eq!("exportCSV".parse::<Component>().unwrap(), Component::ExportCsv);
        assert_eq!(
            "displayDialog".parse::<Component>().unwrap(),
            Component::ShowMessage
        );
        assert_eq!(
            "numbersMap".parse::<Component>().unwrap(),
            Component::EnumerateStructure
        );
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "explode".parse::<Component>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownComponent(ref t) if t == "explode"));
    }

    #[test]
    fn serde_uses_kebab_case_tags() {
        let json = serde_json::to_string(&Component::SetCellValue).unwrap();
        assert_eq!(json, "\"set-cell-value\"");
        let parsed: Component = serde_json::from_str("\"export-pdf\"").unwrap();
        assert_eq!(parsed, Component::ExportPdf);
    }
}
