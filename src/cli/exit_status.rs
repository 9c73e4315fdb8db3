use std::process::ExitCode;

/// Exit status of the CLI.
///
/// - `Success` (0): Command completed successfully
/// - `Error` (2): Command failed (config error, malformed JSON, I/O error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
