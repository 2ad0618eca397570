// src/constants.rs
//! Constants that fix how the system talks to the outside world.

// ---------------------------------------------------------------------------
// Interpreter invocation
// ---------------------------------------------------------------------------

/// The platform's AppleScript interpreter.
pub const DEFAULT_INTERPRETER: &str = "/usr/bin/osascript";

/// Flag that makes the interpreter treat the next argument as script text
/// rather than a file path.
pub const INLINE_SCRIPT_FLAG: &str = "-e";

/// Environment variable that overrides the interpreter path for the CLI.
pub const INTERPRETER_ENV_VAR: &str = "MACACTOR_INTERPRETER";

/// Prefix of the diagnostic returned when the interpreter cannot be started.
pub const LAUNCH_FAILURE_PREFIX: &str = "Failed to run AppleScript";

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log file name, created under the OS temp directory.
pub const LOG_FILE_NAME: &str = "macactor.log";
