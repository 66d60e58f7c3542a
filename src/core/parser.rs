use std::fs;

use ast_grep_core::AstGrep;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::{LanguageExt, SupportLang};

use crate::issues::ParseErrorIssue;

/// The concrete syntax tree type for one parsed Go file.
///
/// Comments are ordinary tree nodes, so doc comments survive parsing and
/// can be recovered as siblings of the declarations they precede.
pub type GoTree = AstGrep<StrDoc<SupportLang>>;

/// A node borrowed from a [`GoTree`].
pub type GoNode<'t> = ast_grep_core::Node<'t, StrDoc<SupportLang>>;

/// One source file parsed into an immutable tree.
///
/// Owned by the loader for the run's lifetime; both extraction passes
/// read it, neither mutates it.
pub struct ParsedUnit {
    pub file_path: String,
    pub tree: GoTree,
}

/// Parse Go source code into a syntax tree.
///
/// tree-sitter always produces a tree; malformed input shows up as ERROR
/// nodes instead of a parse failure. A tree containing any ERROR node is
/// rejected here so the caller sees a hard parse error.
pub fn parse_go_source(code: &str) -> Result<GoTree, String> {
    let tree = SupportLang::Go.ast_grep(code);
    if let Some(line) = first_syntax_error(&tree.root()) {
        return Err(format!("syntax error at line {}", line));
    }
    Ok(tree)
}

/// Line (1-based) of the first ERROR node in the tree, if any.
fn first_syntax_error(node: &GoNode) -> Option<usize> {
    if node.kind().as_ref() == "ERROR" {
        return Some(node.start_pos().line() + 1);
    }
    node.children().find_map(|child| first_syntax_error(&child))
}

/// Read and parse every file into a [`ParsedUnit`], preserving order.
///
/// The first file that cannot be read or parsed aborts the whole batch:
/// partial extraction results would silently understate the event
/// catalogue, so the reference build either sees every unit or none.
pub fn parse_units(files: &[String]) -> Result<Vec<ParsedUnit>, ParseErrorIssue> {
    let mut units = Vec::with_capacity(files.len());
    for file_path in files {
        let code = fs::read_to_string(file_path).map_err(|e| ParseErrorIssue {
            file_path: file_path.clone(),
            error: format!("failed to read file: {}", e),
        })?;
        let tree = parse_go_source(&code).map_err(|error| ParseErrorIssue {
            file_path: file_path.clone(),
            error,
        })?;
        units.push(ParsedUnit {
            file_path: file_path.clone(),
            tree,
        });
    }
    Ok(units)
}
