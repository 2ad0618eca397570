use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An application that generated scripts can address.
///
/// The identifier returned by [`TargetApplication::scripting_name`] is the
/// name the application registers with the scripting system, and is written
/// verbatim into `tell application "…"` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetApplication {
    Numbers,
    Ghostty,
    Finder,
}

impl TargetApplication {
    /// Every addressable application, in declaration order.
    pub const ALL: [TargetApplication; 3] = [Self::Numbers, Self::Ghostty, Self::Finder];

    /// The application's registered scripting name.
    pub fn scripting_name(&self) -> &'static str {
        match self {
            Self::Numbers => "Numbers",
            Self::Ghostty => "Ghostty",
            Self::Finder => "Finder",
        }
    }
}

impl std::str::FromStr for TargetApplication {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|app| app.scripting_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownApplication(s.to_string()))
    }
}

impl fmt::Display for TargetApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scripting_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scripting_names_case_insensitively() {
        assert_eq!(
            "Numbers".parse::<TargetApplication>().unwrap(),
            TargetApplication::Numbers
        );
        assert_eq!(
            "finder".parse::<TargetApplication>().unwrap(),
            TargetApplication::Finder
        );
        assert_eq!(
            " GHOSTTY ".parse::<TargetApplication>().unwrap(),
            TargetApplication::Ghostty
        );
    }

    #[test]
    fn rejects_unknown_application() {
        let err = "Keynote".parse::<TargetApplication>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown target application: Keynote");
    }

    #[test]
    fn display_matches_scripting_name() {
        for app in TargetApplication::ALL {
            assert_eq!(app.to_string(), app.scripting_name());
        }
    }
}
