//! Eventref - audit event reference generator
//!
//! Eventref is a CLI tool and library that scans a tree of Go source files,
//! discovers which identifiers are used as audit event types, and extracts
//! their declarations' doc comments and literal values into records suitable
//! for rendering reference documentation.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands and reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Core extraction engine (scan, parse, discover, extract)
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
