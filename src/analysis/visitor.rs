//! Single-pass syntax tree survey of one Swift file.
//!
//! The walk visits every node at every nesting depth and never prunes, so
//! declarations inside functions, extensions, or accessor blocks are all
//! seen. Extraction degrades instead of failing: unresolvable names become
//! `""` and bindings without a plain identifier type are dropped.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::parser::ParsedSource;

/// Declaration counts for one file, taken at every nesting depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeclarationCounts {
    pub structs: usize,
    pub classes: usize,
    pub enums: usize,
}

/// One function declaration in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    /// Declared name, `""` when the name is not a plain identifier
    /// (operator functions).
    pub name: String,
    /// Rendered line count of the body's statement block. A present but
    /// empty body counts 1; a bodyless declaration counts 0.
    pub body_line_count: usize,
}

/// One stored-property binding that survived extraction: a plain identifier
/// label annotated with a bare single-identifier type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBinding {
    pub label: String,
    pub declared_type: String,
}

/// Per-class member bindings, grouped by the property statement that
/// declared them.
///
/// Classes keep the position of their first declaration; redeclaring a name
/// replaces its groups in place. Groups preserve statement order, and a
/// statement whose bindings were all dropped still contributes an empty
/// group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMemberTable {
    entries: Vec<ClassEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ClassEntry {
    name: String,
    groups: Vec<Vec<MemberBinding>>,
}

impl ClassMemberTable {
    /// Record a class's statement groups, replacing any previous entry
    /// under the same name without moving it.
    pub fn insert(&mut self, name: String, groups: Vec<Vec<MemberBinding>>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.groups = groups,
            None => self.entries.push(ClassEntry { name, groups }),
        }
    }

    /// Classes in first-seen source order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &[Vec<MemberBinding>])> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.groups.as_slice()))
    }

    pub fn groups_for(&self, name: &str) -> Option<&[Vec<MemberBinding>]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.groups.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything one survey pass collects from a file.
#[derive(Debug, Clone, Default)]
pub struct FileTally {
    pub counts: DeclarationCounts,
    /// Function records in source order.
    pub functions: Vec<FunctionRecord>,
    pub members: ClassMemberTable,
    /// Rendered line count of the whole file.
    pub line_count: usize,
}

/// Walk a parsed file and tally declarations, functions, and class members.
pub fn survey(parsed: &ParsedSource) -> FileTally {
    let root = parsed.root();
    let mut tally = FileTally {
        line_count: count_lines(parsed.node_text(root)),
        ..FileTally::default()
    };
    walk(root, parsed, &mut tally);
    tally
}

fn walk(node: Node, parsed: &ParsedSource, tally: &mut FileTally) {
    match node.kind() {
        // class, struct, enum, and actor declarations all share this node
        // kind; the keyword token distinguishes them.
        "class_declaration" => record_type_declaration(node, parsed, tally),
        "function_declaration" | "protocol_function_declaration" => {
            record_function(node, parsed, tally)
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, parsed, tally);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeKind {
    Struct,
    Class,
    Enum,
}

fn declaration_kind(node: Node) -> Option<TypeKind> {
    let mut cursor = node.walk();
    let kind = node.children(&mut cursor).find_map(|child| match child.kind() {
        "struct" => Some(TypeKind::Struct),
        "class" => Some(TypeKind::Class),
        "enum" => Some(TypeKind::Enum),
        _ => None,
    });
    kind
}

fn record_type_declaration(node: Node, parsed: &ParsedSource, tally: &mut FileTally) {
    // Actors and extensions carry neither keyword and stay uncounted.
    let Some(kind) = declaration_kind(node) else {
        return;
    };

    match kind {
        TypeKind::Struct => tally.counts.structs += 1,
        TypeKind::Enum => tally.counts.enums += 1,
        TypeKind::Class => {
            tally.counts.classes += 1;
            let name = declared_type_name(node, parsed);
            let groups = member_groups(node, parsed);
            tally.members.insert(name, groups);
        }
    }
}

fn declared_type_name(node: Node, parsed: &ParsedSource) -> String {
    node.child_by_field_name("name")
        .filter(|n| n.kind() == "type_identifier")
        .map(|n| parsed.node_text(n).to_string())
        .unwrap_or_default()
}

fn record_function(node: Node, parsed: &ParsedSource, tally: &mut FileTally) {
    let name = node
        .child_by_field_name("name")
        .filter(|n| n.kind() == "simple_identifier")
        .map(|n| parsed.node_text(n).to_string())
        .unwrap_or_default();

    let mut cursor = node.walk();
    let body_line_count = node
        .children(&mut cursor)
        .find(|n| n.kind() == "function_body")
        .map(|body| body_statement_lines(body, parsed))
        .unwrap_or(0);

    tally.functions.push(FunctionRecord {
        name,
        body_line_count,
    });
}

/// Line count of the statement block inside a body node. The statements
/// node's range runs up to the closing brace, so its text ends with a
/// newline plus the brace's indentation; trim that before counting. A body
/// with no statements node still counts one line.
fn body_statement_lines(body: Node, parsed: &ParsedSource) -> usize {
    let mut cursor = body.walk();
    let lines = body
        .children(&mut cursor)
        .find(|n| n.kind() == "statements")
        .map(|stmts| count_lines(parsed.node_text(stmts).trim_end()))
        .unwrap_or(1);
    lines
}

/// Collect the statement groups declared directly in a class body. Nested
/// declarations keep their properties to themselves.
fn member_groups(class_node: Node, parsed: &ParsedSource) -> Vec<Vec<MemberBinding>> {
    let mut cursor = class_node.walk();
    let Some(body) = class_node
        .children(&mut cursor)
        .find(|n| n.kind() == "class_body")
    else {
        return Vec::new();
    };

    let mut groups = Vec::new();
    let mut body_cursor = body.walk();
    for item in body.children(&mut body_cursor) {
        if item.kind() == "property_declaration" {
            groups.push(statement_bindings(item, parsed));
        }
    }
    groups
}

/// Scan one property statement left to right. Each pattern opens a pending
/// binding; the next type annotation closes it. An annotation therefore
/// binds only the name that lexically carries it, so `var a, b: Int`
/// records `(b, Int)` alone, while `var a: Int, b: Int` records both.
fn statement_bindings(property: Node, parsed: &ParsedSource) -> Vec<MemberBinding> {
    let mut bindings = Vec::new();
    let mut pending: Option<String> = None;

    let mut cursor = property.walk();
    for child in property.children(&mut cursor) {
        match child.kind() {
            "pattern" | "simple_identifier" => pending = bound_label(child, parsed),
            "type_annotation" => {
                let declared_type = annotated_type(child, parsed);
                if let (Some(label), Some(declared_type)) = (pending.take(), declared_type) {
                    bindings.push(MemberBinding {
                        label,
                        declared_type,
                    });
                }
            }
            _ => {}
        }
    }

    bindings
}

/// The bound name, but only when it is a single plain identifier. Tuple and
/// wildcard patterns yield nothing.
fn bound_label(node: Node, parsed: &ParsedSource) -> Option<String> {
    match node.kind() {
        "simple_identifier" => Some(parsed.node_text(node).to_string()),
        "pattern" => {
            if node.named_child_count() != 1 {
                return None;
            }
            let inner = node.named_child(0)?;
            (inner.kind() == "simple_identifier").then(|| parsed.node_text(inner).to_string())
        }
        _ => None,
    }
}

fn annotated_type(annotation: Node, parsed: &ParsedSource) -> Option<String> {
    let mut cursor = annotation.walk();
    let declared = annotation
        .named_children(&mut cursor)
        .find_map(|child| plain_type_identifier(child, parsed));
    declared
}

/// A type that reduces to one bare identifier. Optionals, collections,
/// tuples, function types, generic applications, and qualified names all
/// fail the shape check and drop the binding.
fn plain_type_identifier(node: Node, parsed: &ParsedSource) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(parsed.node_text(node).to_string()),
        "user_type" => {
            if node.named_child_count() != 1 {
                return None;
            }
            let inner = node.named_child(0)?;
            (inner.kind() == "type_identifier").then(|| parsed.node_text(inner).to_string())
        }
        _ => None,
    }
}

fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}
