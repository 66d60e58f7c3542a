use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow};

use super::{CommandResult, CommandSummary, ScanSummary};
use crate::{
    cli::args::ScanCommand,
    config::load_config,
    core::{discover_event_types, extract_event_records, parse_units, scan_files},
    issues::Issue,
};

/// Run the scan pipeline: enumerate files, parse, discover, extract.
///
/// The stages run strictly in sequence; the candidate set is fully built
/// before extraction reads it. A file that fails to parse turns into a
/// single `ParseError` issue and an otherwise empty result - partial
/// extraction output is never produced.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let verbose = args.common.verbose;

    // Config is searched from the CLI source root (or the current
    // directory); the CLI value also overrides the file's sourceRoot.
    let search_root = args
        .common
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let search_path = search_root
        .to_str()
        .with_context(|| anyhow!("Invalid path: {:?}", search_root))?;

    let config_result = load_config(Path::new(search_path))?;
    if verbose && !config_result.from_file {
        eprintln!("Note: No .eventrefrc.json found, using default configuration");
    }
    let config = config_result.config;

    let scan_root = match args.common.source_root {
        Some(_) => search_path.to_string(),
        None => config.source_root.clone(),
    };

    let scan_result = scan_files(
        &scan_root,
        &config.ignores,
        config.ignore_test_files,
        verbose,
    );

    if scan_result.skipped_count > 0 {
        eprintln!(
            "Warning: {} path(s) skipped due to access errors{}",
            scan_result.skipped_count,
            if verbose { "" } else { " (use -v for details)" }
        );
    }

    if verbose {
        eprintln!(
            "Scanning {} Go file(s) under {}",
            scan_result.files.len(),
            scan_root
        );
        for file in &scan_result.files {
            eprintln!("  {}", file);
        }
    }

    let units = match parse_units(&scan_result.files) {
        Ok(units) => units,
        Err(parse_error) => {
            return Ok(CommandResult {
                summary: CommandSummary::Scan(ScanSummary {
                    records: Vec::new(),
                    format: args.format,
                }),
                issues: vec![Issue::ParseError(parse_error)],
                source_files_scanned: scan_result.files.len(),
            });
        }
    };

    // Pass 1: build the candidate set
    let candidates = discover_event_types(&units);
    if verbose {
        eprintln!(
            "Discovered {} candidate event type identifier(s)",
            candidates.len()
        );
        for name in &candidates {
            eprintln!("  {}", name);
        }
    }

    // Pass 2: resolve candidates to declarations
    let (records, malformed) = extract_event_records(&units, &candidates);

    Ok(CommandResult {
        summary: CommandSummary::Scan(ScanSummary {
            records,
            format: args.format,
        }),
        issues: malformed.into_iter().map(Issue::MalformedDeclaration).collect(),
        source_files_scanned: scan_result.files.len(),
    })
}
