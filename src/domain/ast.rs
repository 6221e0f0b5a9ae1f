// AST data structures for the consumer-matrix analysis.
// These types represent parsed source code in a language-neutral form that
// keeps only what call-graph recovery needs.

/// A node in the abstract syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: AstNodeKind,
    pub name: Option<String>,
    pub children: Vec<AstNode>,
}

/// Supported AST node types.
///
/// - `Class` / `Function`: `name` is the definition name, children are the body.
/// - `Call`: the first child is the call target, the rest are arguments.
/// - `Attribute`: `name` is the attribute, the single child is the base expression.
/// - `Import`: `name` is the module path as written (leading dots for relative
///   imports), children are `Identifier` nodes for the imported names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstNodeKind {
    Module,
    Class,
    Function,
    Call,
    Attribute,
    Identifier,
    Import,
    Other,
}

impl AstNode {
    pub fn new(kind: AstNodeKind, name: Option<String>, children: Vec<AstNode>) -> Self {
        Self { kind, name, children }
    }

    pub fn module(body: Vec<AstNode>) -> Self {
        Self::new(AstNodeKind::Module, None, body)
    }

    pub fn class(name: &str, body: Vec<AstNode>) -> Self {
        Self::new(AstNodeKind::Class, Some(name.to_string()), body)
    }

    pub fn function(name: &str, body: Vec<AstNode>) -> Self {
        Self::new(AstNodeKind::Function, Some(name.to_string()), body)
    }

    pub fn identifier(name: &str) -> Self {
        Self::new(AstNodeKind::Identifier, Some(name.to_string()), vec![])
    }

    pub fn attribute(base: AstNode, attr: &str) -> Self {
        Self::new(AstNodeKind::Attribute, Some(attr.to_string()), vec![base])
    }

    /// A call whose first child is `target`, followed by `args`.
    pub fn call(target: AstNode, args: Vec<AstNode>) -> Self {
        let mut children = Vec::with_capacity(args.len() + 1);
        children.push(target);
        children.extend(args);
        Self::new(AstNodeKind::Call, None, children)
    }

    pub fn import(module: &str, names: &[&str]) -> Self {
        let children = names.iter().map(|n| Self::identifier(n)).collect();
        Self::new(AstNodeKind::Import, Some(module.to_string()), children)
    }

    pub fn other(children: Vec<AstNode>) -> Self {
        Self::new(AstNodeKind::Other, None, children)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// The call target of a `Call` node, or the base of an `Attribute` node.
    pub fn first_child(&self) -> Option<&AstNode> {
        self.children.first()
    }

    /// Count of nodes in this sub-tree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstNode::node_count).sum::<usize>()
    }
}
