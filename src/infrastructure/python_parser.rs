//! Python Source Parser
//!
//! Parses Python with tree-sitter and lowers the concrete syntax tree into the
//! language-neutral `AstNode` form.

use std::path::Path;

use tracing::debug;
use tree_sitter::{Node, Parser};

use crate::domain::ast::{AstNode, AstNodeKind};
use crate::domain::error::ParseError;
use crate::ports::SourceParser;

/// Maximum nesting depth lowered; deeper sub-trees are dropped.
const MAX_DEPTH: usize = 500;

pub struct TreeSitterPythonParser;

impl SourceParser for TreeSitterPythonParser {
    fn parse(&self, path: &Path, source: &str) -> Result<AstNode, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParseError::Grammar(e.to_string()))?;

        let tree = parser.parse(source, None).ok_or_else(|| ParseError::NoTree {
            path: path.to_path_buf(),
        })?;
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|n| {
                    let p = n.start_position();
                    (p.row + 1, p.column + 1)
                })
                .unwrap_or((1, 1));
            return Err(ParseError::Syntax {
                path: path.to_path_buf(),
                line,
                column,
            });
        }

        let mut lowering = Lowering {
            source: source.as_bytes(),
            truncated: 0,
        };
        let module = AstNode::module(lowering.lower_children(root, 0));
        debug!(
            path = %path.display(),
            nodes = module.node_count(),
            truncated = lowering.truncated,
            "Parsed module"
        );
        Ok(module)
    }
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(found) = first_error(child) {
                return Some(found);
            }
        }
    }
    None
}

struct Lowering<'s> {
    source: &'s [u8],
    truncated: usize,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node) -> String {
        node.utf8_text(self.source)
            .unwrap_or_default()
            .split_whitespace()
            .collect()
    }

    fn field_text(&self, node: Node, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text(n))
            .unwrap_or_default()
    }

    fn lower_children(&mut self, node: Node, depth: usize) -> Vec<AstNode> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.lower(child, depth + 1, &mut out);
        }
        out
    }

    fn lower_field(&mut self, node: Node, field: &str, depth: usize) -> Option<AstNode> {
        let child = node.child_by_field_name(field)?;
        let mut out = Vec::with_capacity(1);
        self.lower(child, depth + 1, &mut out);
        out.pop()
    }

    fn lower_body(&mut self, node: Node, depth: usize) -> Vec<AstNode> {
        node.child_by_field_name("body")
            .map(|body| self.lower_children(body, depth + 1))
            .unwrap_or_default()
    }

    fn lower(&mut self, node: Node, depth: usize, out: &mut Vec<AstNode>) {
        if depth > MAX_DEPTH {
            self.truncated += 1;
            return;
        }

        match node.kind() {
            "class_definition" => {
                let name = self.field_text(node, "name");
                let body = self.lower_body(node, depth);
                out.push(AstNode::new(AstNodeKind::Class, Some(name), body));
            }
            "function_definition" => {
                let name = self.field_text(node, "name");
                let body = self.lower_body(node, depth);
                out.push(AstNode::new(AstNodeKind::Function, Some(name), body));
            }
            // Decorators run in the enclosing scope and are not part of the body.
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.lower(definition, depth + 1, out);
                }
            }
            "call" => {
                let target = self.lower_field(node, "function", depth);
                let args = node
                    .child_by_field_name("arguments")
                    .map(|a| self.lower_children(a, depth + 1))
                    .unwrap_or_default();
                out.push(match target {
                    Some(target) => AstNode::call(target, args),
                    None => AstNode::other(args),
                });
            }
            "attribute" => {
                let attr = self.field_text(node, "attribute");
                let base = self.lower_field(node, "object", depth);
                out.push(AstNode::new(
                    AstNodeKind::Attribute,
                    Some(attr),
                    base.into_iter().collect(),
                ));
            }
            "identifier" => {
                out.push(AstNode::new(AstNodeKind::Identifier, Some(self.text(node)), vec![]));
            }
            "import_statement" => {
                let mut cursor = node.walk();
                for name in node.children_by_field_name("name", &mut cursor) {
                    let module = self.imported_name(name);
                    out.push(AstNode::new(AstNodeKind::Import, Some(module), vec![]));
                }
            }
            "import_from_statement" => {
                let module = self.field_text(node, "module_name");
                let mut cursor = node.walk();
                let names = node
                    .children_by_field_name("name", &mut cursor)
                    .map(|n| AstNode::identifier(&self.imported_name(n)))
                    .collect();
                out.push(AstNode::new(AstNodeKind::Import, Some(module), names));
            }
            "future_import_statement" | "comment" => {}
            // Keyword names are not expressions.
            "keyword_argument" => {
                if let Some(value) = self.lower_field(node, "value", depth) {
                    out.push(AstNode::other(vec![value]));
                }
            }
            _ => {
                let children = self.lower_children(node, depth);
                out.push(AstNode::other(children));
            }
        }
    }

    /// `a.b` for both `dotted_name` and `aliased_import` nodes.
    fn imported_name(&self, node: Node) -> String {
        if node.kind() == "aliased_import" {
            self.field_text(node, "name")
        } else {
            self.text(node)
        }
    }
}
