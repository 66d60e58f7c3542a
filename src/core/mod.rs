//! Core extraction engine.
//!
//! The pipeline is composed of four stages, run strictly in sequence by the
//! CLI layer:
//!
//! 1. `file_scanner` - enumerate `.go` files under the source root
//! 2. `parser` - parse each file into an immutable syntax tree
//! 3. `discover` - pass 1: collect the candidate set of event type names
//! 4. `extract` - pass 2: resolve candidates to declarations and build records
//!
//! Both passes are pure functions over the parsed units; the candidate set
//! built in pass 1 is the only state shared with pass 2.

pub mod discover;
pub mod extract;
pub mod file_scanner;
pub mod parser;

pub use discover::discover_event_types;
pub use extract::{EventRecord, extract_event_records};
pub use file_scanner::{ScanResult, scan_files};
pub use parser::{GoNode, GoTree, ParsedUnit, parse_go_source, parse_units};
