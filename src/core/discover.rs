//! Pass 1: discover which identifiers denote audit event types.
//!
//! An event type is identified structurally, not by name registry: any
//! composite literal carrying a `Metadata` field whose value is itself a
//! `Metadata`-typed composite literal tags its event type through that
//! literal's `Type` field:
//!
//! ```go
//! apievents.UserLogin{
//!     Metadata: apievents.Metadata{
//!         Type: events.UserLoginEvent,
//!     },
//! }
//! ```
//!
//! The trailing identifier of the `Type` value (`UserLoginEvent`) names the
//! constant whose declaration pass 2 resolves. Shapes that do not match are
//! expected and skipped without error.

use std::collections::BTreeSet;

use ast_grep_core::matcher::KindMatcher;
use ast_grep_language::SupportLang;

use super::parser::{GoNode, ParsedUnit};

/// Collect the set of identifiers used as event type tags across all units.
///
/// A pure fold over the trees: the returned set is the only state handed to
/// pass 2. Matching visits every keyed element in the tree, so event
/// constructions nested arbitrarily deep inside larger literals are found.
pub fn discover_event_types(units: &[ParsedUnit]) -> BTreeSet<String> {
    let mut candidates = BTreeSet::new();
    let matcher = KindMatcher::new("keyed_element", SupportLang::Go);

    for unit in units {
        for node in unit.tree.root().find_all(&matcher) {
            collect_candidate(&node, &mut candidates);
        }
    }

    candidates
}

/// Record the `Type` tag of one `Metadata: Metadata{...}` assignment.
///
/// Both conditions must hold before anything is recorded: the key is the
/// identifier `Metadata`, and the value is a composite literal whose
/// unqualified type name is `Metadata`. Partial matches contribute nothing.
fn collect_candidate(node: &GoNode, candidates: &mut BTreeSet<String>) {
    let Some((key, value)) = keyed_element_parts(node) else {
        return;
    };
    if !is_field_key(&key, "Metadata") {
        return;
    }
    if value.kind().as_ref() != "composite_literal" {
        // The Metadata field of something other than an audit event
        return;
    }
    if local_type_name(&value).as_deref() != Some("Metadata") {
        return;
    }

    let Some(body) = value
        .children()
        .find(|c| c.kind().as_ref() == "literal_value")
    else {
        return;
    };

    for element in body.children() {
        if element.kind().as_ref() != "keyed_element" {
            continue;
        }
        let Some((elem_key, elem_value)) = keyed_element_parts(&element) else {
            continue;
        };
        if !is_field_key(&elem_key, "Type") {
            continue;
        }
        // The tag must be a qualified reference (pkg.Identifier); anything
        // else (a bare identifier, a call, a string) is skipped.
        if elem_value.kind().as_ref() != "selector_expression" {
            continue;
        }
        if let Some(name) = trailing_selector_name(&elem_value) {
            candidates.insert(name);
        }
    }
}

/// True when a keyed element's key is a plain field name matching `name`.
///
/// Bare keys surface as `identifier` or `field_identifier` depending on
/// grammar version; computed keys (expressions, literals) never match.
fn is_field_key(key: &GoNode, name: &str) -> bool {
    matches!(key.kind().as_ref(), "identifier" | "field_identifier") && key.text().as_ref() == name
}

/// Split a `keyed_element` into its key and value nodes.
///
/// Depending on grammar version the key and value may be wrapped in
/// `literal_element` nodes; both shapes are accepted.
fn keyed_element_parts<'t>(node: &GoNode<'t>) -> Option<(GoNode<'t>, GoNode<'t>)> {
    let mut parts: Vec<GoNode<'t>> = node
        .children()
        .filter(|c| !matches!(c.kind().as_ref(), ":" | "comment"))
        .collect();
    if parts.len() < 2 {
        return None;
    }
    let value = unwrap_literal_element(parts.pop()?);
    let key = unwrap_literal_element(parts.swap_remove(0));
    Some((key, value))
}

fn unwrap_literal_element(node: GoNode<'_>) -> GoNode<'_> {
    if node.kind().as_ref() == "literal_element"
        && let Some(inner) = node.children().next()
    {
        return inner;
    }
    node
}

/// The unqualified type name of a composite literal (`pkg.Metadata{}` and
/// `Metadata{}` both yield `Metadata`).
fn local_type_name(composite: &GoNode) -> Option<String> {
    for child in composite.children() {
        match child.kind().as_ref() {
            "type_identifier" => return Some(child.text().to_string()),
            "qualified_type" => {
                return child
                    .children()
                    .filter(|c| c.kind().as_ref() == "type_identifier")
                    .last()
                    .map(|n| n.text().to_string());
            }
            "literal_value" => break,
            _ => {}
        }
    }
    None
}

/// The trailing identifier of a selector expression (`events.UserLoginEvent`
/// yields `UserLoginEvent`; `a.b.C` yields `C`).
fn trailing_selector_name(selector: &GoNode) -> Option<String> {
    selector
        .children()
        .filter(|c| c.kind().as_ref() == "field_identifier")
        .last()
        .map(|n| n.text().to_string())
}
