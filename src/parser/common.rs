use super::declaration::{Location, TokenRange};
use tree_sitter::Node;

/// Extract text from a node
pub fn node_text<'a>(node: Node<'a>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Location of a node's first token (tree-sitter uses 0-indexed rows/columns)
pub fn node_location(node: Node) -> Location {
    let point = node.start_position();
    Location {
        line: point.row + 1,
        column: point.column + 1,
    }
}

/// Byte range covered by a node
pub fn node_range(node: Node) -> TokenRange {
    TokenRange::new(node.start_byte(), node.end_byte())
}

/// Node kinds tokenized as a single token. String and character literals
/// have quote and content children in the parse tree, but those are not
/// separate C tokens; splitting them would break the literal across lines
/// in the newline-separated output.
fn is_atomic(node: Node) -> bool {
    matches!(
        node.kind(),
        "string_literal" | "char_literal" | "system_lib_string"
    )
}

/// Collect the leaf tokens of `node` whose first byte falls inside `range`,
/// in document order. Leaves are taken whole; a leaf starting inside the
/// range is included even when the range ends mid-leaf, so extents computed
/// from token boundaries never split a token.
pub fn collect_leaves_in_range<'a>(node: Node<'a>, range: &TokenRange, out: &mut Vec<Node<'a>>) {
    if node.end_byte() <= range.start || node.start_byte() >= range.end {
        return;
    }

    if node.child_count() == 0 || is_atomic(node) {
        if node.start_byte() >= range.start && !node_is_empty(node) {
            out.push(node);
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves_in_range(child, range, out);
    }
}

fn node_is_empty(node: Node) -> bool {
    node.start_byte() == node.end_byte()
}

/// Resolve a declarator chain to its innermost identifier.
///
/// C declarators nest: `int *f(void)` wraps the name in a pointer declarator
/// and a function declarator. Walk inward until an identifier is found.
pub fn declarator_identifier(node: Node, source: &str) -> Option<String> {
    let mut declarator = node.child_by_field_name("declarator")?;
    loop {
        match declarator.kind() {
            "identifier" | "type_identifier" | "field_identifier" => {
                return Some(node_text(declarator, source).to_string());
            }
            "function_declarator" | "pointer_declarator" | "array_declarator"
            | "init_declarator" => {
                declarator = declarator
                    .child_by_field_name("declarator")
                    .or_else(|| declarator.named_child(0))?;
            }
            "parenthesized_declarator" => {
                declarator = declarator.named_child(0)?;
            }
            _ => return None,
        }
    }
}

/// Whether a `declaration` node declares a function (a prototype).
///
/// A function-pointer variable like `int (*fp)(void);` also carries a
/// function declarator, but its name sits inside a parenthesized declarator;
/// that one is a variable, not a function.
pub fn declares_function(node: Node) -> bool {
    let mut declarator = match node.child_by_field_name("declarator") {
        Some(d) => d,
        None => return false,
    };
    loop {
        match declarator.kind() {
            "function_declarator" => {
                return declarator
                    .child_by_field_name("declarator")
                    .map(|inner| inner.kind() != "parenthesized_declarator")
                    .unwrap_or(false);
            }
            "pointer_declarator" | "init_declarator" => {
                match declarator.child_by_field_name("declarator") {
                    Some(d) => declarator = d,
                    None => return false,
                }
            }
            _ => return false,
        }
    }
}

/// Line of the first syntax-error node under `node`, for diagnostics
pub fn first_error_line(node: Node) -> usize {
    if node.is_error() || node.is_missing() {
        return node.start_position().row + 1;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            return first_error_line(child);
        }
    }
    node.start_position().row + 1
}
