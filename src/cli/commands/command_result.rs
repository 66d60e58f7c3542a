use crate::cli::args::OutputFormat;
use crate::core::EventRecord;
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    /// Extracted records in discovery order.
    pub records: Vec<EventRecord>,
    /// Requested output format for the records.
    pub format: OutputFormat,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running an eventref command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// All issues found during the run.
    pub issues: Vec<Issue>,
    /// Number of Go source files scanned.
    pub source_files_scanned: usize,
}
