use super::common::{
    collect_leaves_in_range, declarator_identifier, declares_function, first_error_line,
    node_location, node_range, node_text,
};
use super::declaration::{
    CallSite, Declaration, DeclarationKind, FrontEndError, Token, TokenRange,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::{Node, Parser as TsParser, Tree};

/// C source code parser using tree-sitter
pub struct CParser {
    parser: TsParser,
}

impl CParser {
    pub fn new() -> Self {
        let mut parser = TsParser::new();
        parser
            .set_language(&tree_sitter_c::language())
            .expect("failed to load C grammar");
        Self { parser }
    }

    /// Read and parse a C source file into a translation unit
    pub fn parse_file(&mut self, path: &Path) -> Result<TranslationUnit, FrontEndError> {
        let source = fs::read_to_string(path).map_err(|source| FrontEndError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(path, source)
    }

    /// Parse already-loaded source text. A tree containing syntax errors is
    /// a fatal parse failure; the pruned output of a broken unit would be
    /// meaningless.
    pub fn parse_source(
        &mut self,
        path: &Path,
        source: String,
    ) -> Result<TranslationUnit, FrontEndError> {
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| FrontEndError::Parse {
                path: path.to_path_buf(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(FrontEndError::Syntax {
                path: path.to_path_buf(),
                line: first_error_line(root),
            });
        }

        Ok(TranslationUnit {
            path: path.to_path_buf(),
            source,
            tree,
        })
    }
}

impl Default for CParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The parsed representation of one C source file.
///
/// Owns the source text and the parse tree; everything the selection and
/// emission pipeline consumes (declarations, tokens, call sites) is derived
/// from here, so the rest of the crate never touches tree-sitter types.
pub struct TranslationUnit {
    path: PathBuf,
    source: String,
    tree: Tree,
}

impl TranslationUnit {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Walk the top-level declarations of the unit, in source order.
    ///
    /// Mirrors the C declaration model rather than the parse tree: a bodied
    /// struct/union/enum inside a typedef or variable declaration also
    /// declares its tag at file scope, so such statements yield the tag and
    /// the declarator name as two sibling declarations with overlapping
    /// extents. The tag's extent runs one token past its closing brace, into
    /// the token that introduces the declarator; the emitter's fragment rule
    /// keys off that final token to decide which sibling is the complete one.
    pub fn top_level_declarations(&self) -> Vec<Declaration> {
        let root = self.tree.root_node();
        let mut declarations = Vec::new();
        let mut cursor = root.walk();

        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "function_definition" => {
                    let Some(name) = declarator_identifier(node, &self.source) else {
                        debug!("skipping unnamed function definition at {}", node_location(node));
                        continue;
                    };
                    declarations.push(Declaration {
                        name,
                        kind: DeclarationKind::Function,
                        is_definition: true,
                        extent: node_range(node),
                        location: node_location(node),
                    });
                }
                "declaration" => {
                    if let Some(tag) = self.tag_sibling(node) {
                        declarations.push(tag);
                    }
                    let kind = if declares_function(node) {
                        DeclarationKind::Function
                    } else {
                        DeclarationKind::Variable
                    };
                    let name = declarator_identifier(node, &self.source).unwrap_or_default();
                    declarations.push(Declaration {
                        name,
                        kind,
                        is_definition: false,
                        extent: node_range(node),
                        location: node_location(node),
                    });
                }
                "type_definition" => {
                    if let Some(tag) = self.tag_sibling(node) {
                        declarations.push(tag);
                    }
                    let name = declarator_identifier(node, &self.source).unwrap_or_default();
                    declarations.push(Declaration {
                        name,
                        kind: DeclarationKind::Typedef,
                        is_definition: false,
                        extent: node_range(node),
                        location: node_location(node),
                    });
                }
                // A bare `struct foo { ... };` puts the specifier itself at
                // top level; pull the trailing semicolon into the extent so
                // the emitted declaration is a complete statement.
                "struct_specifier" | "union_specifier" | "enum_specifier" => {
                    let mut extent = node_range(node);
                    if let Some(next) = node.next_sibling() {
                        if next.kind() == ";" {
                            extent.end = next.end_byte();
                        }
                    }
                    declarations.push(Declaration {
                        name: self.tag_name(node),
                        kind: tag_kind(node),
                        is_definition: node.child_by_field_name("body").is_some(),
                        extent,
                        location: node_location(node),
                    });
                }
                // Preprocessor directives, comments and stray semicolons are
                // not declarations
                _ => {}
            }
        }

        declarations
    }

    /// Tokenize a source extent into its lexical tokens, in document order
    pub fn tokenize(&self, range: &TokenRange) -> Vec<Token> {
        let mut leaves = Vec::new();
        collect_leaves_in_range(self.tree.root_node(), range, &mut leaves);
        leaves
            .into_iter()
            .map(|leaf| Token::new(node_text(leaf, &self.source)))
            .collect()
    }

    /// Enumerate every statically-determinable call in the unit: for each
    /// function definition, the named targets of its `call_expression`s.
    /// Calls through pointers and other computed expressions are not
    /// resolvable and are skipped.
    pub fn call_sites(&self) -> Result<Vec<CallSite>, FrontEndError> {
        let root = self.tree.root_node();
        let mut sites = Vec::new();
        let mut cursor = root.walk();

        for node in root.named_children(&mut cursor) {
            if node.kind() != "function_definition" {
                continue;
            }
            let caller = declarator_identifier(node, &self.source).ok_or_else(|| {
                FrontEndError::UnnamedFunction {
                    path: self.path.clone(),
                    line: node_location(node).line,
                }
            })?;
            if let Some(body) = node.child_by_field_name("body") {
                self.collect_calls(body, &caller, &mut sites);
            }
        }

        Ok(sites)
    }

    fn collect_calls(&self, node: Node, caller: &str, out: &mut Vec<CallSite>) {
        if node.kind() == "call_expression" {
            if let Some(function) = node.child_by_field_name("function") {
                if function.kind() == "identifier" {
                    out.push(CallSite {
                        caller: caller.to_string(),
                        callee: node_text(function, &self.source).to_string(),
                    });
                } else {
                    debug!(
                        "ignoring indirect call at {} in `{}`",
                        node_location(node),
                        caller
                    );
                }
            }
        }
        // Arguments and nested expressions may contain further calls
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.collect_calls(child, caller, out);
        }
    }

    /// The overlapping tag declaration of a `typedef struct {...} t;` or
    /// `struct foo {...} v;` statement, when the specifier carries a body
    fn tag_sibling(&self, node: Node) -> Option<Declaration> {
        let specifier = node.child_by_field_name("type")?;
        if !matches!(
            specifier.kind(),
            "struct_specifier" | "union_specifier" | "enum_specifier"
        ) {
            return None;
        }
        specifier.child_by_field_name("body")?;

        // Extent runs through the first token after the specifier (the
        // declarator's leading token)
        let tail = TokenRange::new(specifier.end_byte(), node.end_byte());
        let mut leaves = Vec::new();
        collect_leaves_in_range(node, &tail, &mut leaves);
        let end = leaves
            .first()
            .map(|leaf| leaf.end_byte())
            .unwrap_or_else(|| specifier.end_byte());

        Some(Declaration {
            name: self.tag_name(specifier),
            kind: tag_kind(specifier),
            is_definition: true,
            extent: TokenRange::new(specifier.start_byte(), end),
            location: node_location(specifier),
        })
    }

    fn tag_name(&self, specifier: Node) -> String {
        specifier
            .child_by_field_name("name")
            .map(|name| node_text(name, &self.source).to_string())
            .unwrap_or_default()
    }
}

fn tag_kind(specifier: Node) -> DeclarationKind {
    match specifier.kind() {
        "union_specifier" => DeclarationKind::Union,
        "enum_specifier" => DeclarationKind::Enum,
        _ => DeclarationKind::Struct,
    }
}
