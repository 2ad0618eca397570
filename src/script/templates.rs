//! Fragment template sources, one per component.
//!
//! Templates are Handlebars text. Every `{{…}}` expansion goes through the
//! catalog's escape function, so quoting policy lives in one place.

use crate::types::Component;

pub const ACTIVATE: &str = r#"tell application "{{app}}"
    activate
end tell"#;

pub const OPEN: &str = r#"set docFile to POSIX file "{{file_path}}" as alias
tell application "{{app}}"
    open docFile
end tell"#;

pub const CLOSE: &str = r#"tell application "{{app}}"
    tell document 1
        close
    end tell
end tell"#;

pub const EXPORT_PDF: &str = r#"set pdfPath to POSIX file "{{export_path}}"
tell application "{{app}}"
    tell document 1
        export to pdfPath as PDF
    end tell
end tell"#;

pub const EXPORT_CSV: &str = r#"set csvPath to POSIX file "{{export_path}}"
tell application "{{app}}"
    tell document 1
        export to csvPath as CSV
    end tell
end tell"#;

pub const SHOW_MESSAGE: &str = r#"display dialog "{{message}}""#;

/// Runs inside an application scope; wrap with begin/end scope.
pub const ENUMERATE_STRUCTURE: &str = r#"tell document 1
    set report to "Sheet and Table Overview:\n"
    repeat with sheetIndex from 1 to count of sheets
        set currentSheet to sheet sheetIndex
        set sheetName to name of currentSheet
        set report to report & "Sheet " & sheetIndex & ": " & sheetName & "\n"

        repeat with tableIndex from 1 to count of tables of currentSheet
            set currentTable to table tableIndex of currentSheet
            set tableName to name of currentTable
            set report to report & "  Table " & tableIndex & ": " & tableName & "\n"
        end repeat
    end repeat
    display dialog report
end tell"#;

pub const SET_CELL_VALUE: &str = r#"tell application "{{app}}"
    activate
    tell document 1
        tell sheet {{sheet}}
            tell table "{{table}}"
                set the value of cell {{column}} of row {{row}} to "{{value}}"
            end tell
        end tell
    end tell
end tell"#;

pub const BEGIN_SCOPE: &str = r#"tell application "{{app}}""#;

pub const END_SCOPE: &str = "end tell";

/// Template source for a component.
pub fn source_for(component: Component) -> &'static str {
    match component {
        Component::Activate => ACTIVATE,
        Component::Open => OPEN,
        Component::Close => CLOSE,
        Component::ExportPdf => EXPORT_PDF,
        Component::ExportCsv => EXPORT_CSV,
        Component::ShowMessage => SHOW_MESSAGE,
        Component::EnumerateStructure => ENUMERATE_STRUCTURE,
        Component::SetCellValue => SET_CELL_VALUE,
        Component::BeginScope => BEGIN_SCOPE,
        Component::EndScope => END_SCOPE,
    }
}

/// Text emitted in place of a fragment whose parameter is missing.
///
/// An AppleScript line comment, so the composed script still compiles and
/// the step is a no-op.
pub fn missing_parameter_placeholder(parameter: &str) -> String {
    format!("-- Missing {}", parameter)
}

/// Text emitted in place of a fragment whose numeric parameter is not a
/// whole number.
pub fn invalid_parameter_placeholder(parameter: &str) -> String {
    format!("-- Invalid {}", parameter)
}
