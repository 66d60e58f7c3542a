use std::process::ExitCode;

use super::commands::CommandResult;
use crate::issues::Rule;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed successfully, no issues found
/// - `Failure` (1): Command completed but found issues (malformed declarations)
/// - `Error` (2): Command failed due to internal error (parse error, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully, no issues found.
    Success,
    /// Command completed but found issues (malformed declarations).
    Failure,
    /// Command failed due to internal error (parse error, config error, etc.)
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

/// Derive the exit status from a command's result.
///
/// A parse error means the run produced no usable output at all, which is
/// an `Error`; any other reported issue downgrades success to `Failure`.
pub fn status_for(result: &CommandResult) -> ExitStatus {
    if result.issues.iter().any(|i| i.rule() == Rule::ParseError) {
        ExitStatus::Error
    } else if result.issues.is_empty() {
        ExitStatus::Success
    } else {
        ExitStatus::Failure
    }
}
