//! Report formatting and printing utilities.
//!
//! Records go to stdout so the output can be piped into a docs renderer;
//! issues and the run summary go to stderr in cargo-style format.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::args::OutputFormat;
use super::commands::{CommandResult, CommandSummary, InitSummary, ScanSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::EventRecord;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result: issues to stderr, records to stdout, summary to
/// stderr.
pub fn print(result: &CommandResult) {
    print_issues_to(&result.issues, &mut io::stderr().lock());

    match &result.summary {
        CommandSummary::Scan(summary) => {
            print_records_to(summary, &mut io::stdout().lock());
            print_scan_summary_to(result, summary, &mut io::stderr().lock());
        }
        CommandSummary::Init(summary) => {
            print_init_summary_to(summary, &mut io::stderr().lock());
        }
    }
}

/// Print issues in cargo-style format.
pub fn print_issues_to<W: Write>(issues: &[Issue], writer: &mut W) {
    for issue in issues {
        let severity_str = match issue.report_severity() {
            Severity::Error => "error".bold().red(),
            Severity::Warning => "warning".bold().yellow(),
        };

        let _ = writeln!(
            writer,
            "{}: {}  {}",
            severity_str,
            issue.message(),
            issue.report_rule().to_string().dimmed().cyan()
        );
        let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.file_path());
    }
}

/// Render records in the requested format.
pub fn print_records_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    match summary.format {
        OutputFormat::Text => render_text(&summary.records, writer),
        OutputFormat::Json => render_json(&summary.records, writer),
    }
}

/// Text format: one aligned entry per record, comment lines continued under
/// the first.
fn render_text<W: Write>(records: &[EventRecord], writer: &mut W) {
    let name_width = records
        .iter()
        .map(|r| UnicodeWidthStr::width(r.name.as_str()))
        .max()
        .unwrap_or(0);

    for record in records {
        let mut lines = record.comment.lines();
        match lines.next() {
            Some(first) => {
                let _ = writeln!(writer, "{}  {}", pad_to(&record.name, name_width), first);
                for line in lines {
                    let _ = writeln!(writer, "{}  {}", pad_to("", name_width), line);
                }
            }
            None => {
                let _ = writeln!(writer, "{}", record.name);
            }
        }
    }
}

fn render_json<W: Write>(records: &[EventRecord], writer: &mut W) {
    match serde_json::to_string_pretty(records) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(e) => {
            let _ = writeln!(
                io::stderr(),
                "{} failed to serialize records: {}",
                "error:".bold().red(),
                e
            );
        }
    }
}

/// Pad a string to a display width (not a char count) with trailing spaces.
fn pad_to(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    for _ in current..width {
        out.push(' ');
    }
    out
}

fn print_scan_summary_to<W: Write>(
    result: &CommandResult,
    summary: &ScanSummary,
    writer: &mut W,
) {
    let has_parse_error = result
        .issues
        .iter()
        .any(|i| matches!(i, Issue::ParseError(_)));
    if has_parse_error {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            "Aborted: source tree could not be parsed".red()
        );
        return;
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} event {} from {} source {}",
            summary.records.len(),
            if summary.records.len() == 1 {
                "type"
            } else {
                "types"
            },
            result.source_files_scanned,
            if result.source_files_scanned == 1 {
                "file"
            } else {
                "files"
            }
        )
        .green()
    );

    if !result.issues.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.yellow(),
            format!(
                "{} declaration(s) could not be extracted",
                result.issues.len()
            )
            .yellow()
        );
    }
}

fn print_init_summary_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
