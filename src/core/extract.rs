//! Pass 2: resolve candidate identifiers to their declarations and build
//! event records.
//!
//! Walks every constant and variable specification; specs declaring a name
//! from the candidate set contribute one record per declared name. The
//! record carries the declaration's literal value (quoting normalized to
//! backticks for safe embedding in generated docs) and its leading doc
//! comment, rewritten to read in terms of the literal rather than the
//! symbolic identifier.

use std::collections::BTreeSet;

use ast_grep_core::matcher::KindMatcher;
use ast_grep_core::ops::Any;
use ast_grep_language::SupportLang;
use serde::Serialize;

use super::parser::{GoNode, ParsedUnit};
use crate::issues::MalformedDeclarationIssue;

/// One documented event type, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// The event type's literal value, quotes normalized to backticks.
    pub name: String,
    /// The declaration's doc comment; when it opened with the declared
    /// identifier, that leading occurrence is replaced by the literal.
    pub comment: String,
}

/// Go literal node kinds accepted as event type initializers.
const LITERAL_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "rune_literal",
];

/// Resolve candidates against declarations and emit records in traversal
/// order (unit order, then declaration order within each unit).
///
/// Candidates with no matching declaration are dropped silently. A matching
/// declaration whose initializer is not a literal cannot be rendered; it is
/// reported as a [`MalformedDeclarationIssue`] instead of aborting the run,
/// and extraction continues with the remaining declarations.
pub fn extract_event_records(
    units: &[ParsedUnit],
    candidates: &BTreeSet<String>,
) -> (Vec<EventRecord>, Vec<MalformedDeclarationIssue>) {
    let mut records = Vec::new();
    let mut issues = Vec::new();

    let matchers = vec![
        KindMatcher::new("const_spec", SupportLang::Go),
        KindMatcher::new("var_spec", SupportLang::Go),
    ];
    let matcher = Any::new(matchers);

    for unit in units {
        for spec in unit.tree.root().find_all(&matcher) {
            let names: Vec<String> = spec
                .children()
                .filter(|c| c.kind().as_ref() == "identifier")
                .map(|n| n.text().to_string())
                .filter(|name| candidates.contains(name))
                .collect();
            if names.is_empty() {
                continue;
            }

            let doc = declaration_doc(&spec);

            match first_initializer(&spec) {
                Some(value) if LITERAL_KINDS.contains(&value.kind().as_ref()) => {
                    let literal = normalize_literal(value.text().as_ref());
                    for name in &names {
                        records.push(EventRecord {
                            name: literal.clone(),
                            comment: substitute_leading_name(&doc, name, &literal),
                        });
                    }
                }
                other => {
                    let reason = match other {
                        Some(value) => format!(
                            "initializer is {} where a literal is required",
                            value.kind()
                        ),
                        None => "declaration has no initializer".to_string(),
                    };
                    for name in names {
                        issues.push(MalformedDeclarationIssue {
                            file_path: unit.file_path.clone(),
                            name,
                            reason: reason.clone(),
                        });
                    }
                }
            }
        }
    }

    (records, issues)
}

/// First expression of the spec's initializer list, if any.
fn first_initializer<'t>(spec: &GoNode<'t>) -> Option<GoNode<'t>> {
    let list = spec
        .children()
        .find(|c| c.kind().as_ref() == "expression_list")?;
    list.children()
        .find(|c| !matches!(c.kind().as_ref(), "," | "comment"))
}

/// Replace double quotes with backticks so the literal can be embedded in
/// generated markup without re-escaping.
fn normalize_literal(raw: &str) -> String {
    raw.replace('"', "`")
}

/// Rewrite a doc comment that opens with the declared identifier to open
/// with the literal value instead; other comments pass through unchanged.
fn substitute_leading_name(doc: &str, name: &str, literal: &str) -> String {
    match doc.strip_prefix(name) {
        Some(rest) => format!("{}{}", literal, rest),
        None => doc.to_string(),
    }
}

/// Doc comment attached to a declaration spec.
///
/// Go attaches docs either to the spec itself (inside a grouped
/// declaration) or to the enclosing `const`/`var` declaration (single
/// form); the spec's own comment block wins when both exist.
fn declaration_doc(spec: &GoNode) -> String {
    let own = leading_comment_text(spec);
    if !own.is_empty() {
        return own;
    }

    let mut parent = spec.parent();
    while let Some(node) = parent {
        match node.kind().as_ref() {
            // var ( ... ) blocks nest specs one level deeper
            "var_spec_list" => parent = node.parent(),
            "const_declaration" | "var_declaration" => return leading_comment_text(&node),
            _ => break,
        }
    }
    String::new()
}

/// Text of the `//` comment block immediately preceding a node.
///
/// Walks backward through sibling comments that sit on consecutive lines
/// directly above the node. A comment trailing another declaration on its
/// own line terminates the walk, as does a blank line.
fn leading_comment_text(node: &GoNode) -> String {
    let mut lines = Vec::new();
    let mut expected_line = node.start_pos().line();
    let mut current = node.prev();

    while let Some(sibling) = current {
        if sibling.kind().as_ref() != "comment" {
            break;
        }
        if sibling.end_pos().line() + 1 != expected_line {
            break;
        }
        // A comment sharing its line with earlier code documents that code,
        // not this declaration.
        let is_trailing = sibling
            .prev()
            .is_some_and(|p| p.end_pos().line() == sibling.start_pos().line());
        if is_trailing {
            break;
        }
        if let Some(stripped) = sibling.text().strip_prefix("//") {
            lines.push(stripped.trim().to_string());
        }
        expected_line = sibling.start_pos().line();
        current = sibling.prev();
    }

    lines.reverse();
    lines.join("\n")
}
