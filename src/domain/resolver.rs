//! Call Target Name Resolution
//!
//! Reconstructs a dotted name from the target sub-tree of a call expression.

use std::collections::VecDeque;

use crate::domain::ast::{AstNode, AstNodeKind};

/// Outcome of resolving a call target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedName {
    /// The target decomposed entirely into identifier/attribute nodes.
    Complete(String),
    /// Some part of the target had another shape; the name was recovered by
    /// scanning nested identifiers and may be partial or empty.
    Partial(String),
}

impl ResolvedName {
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedName::Complete(name) | ResolvedName::Partial(name) => name,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ResolvedName::Complete(_))
    }
}

/// Resolves call targets to dotted names, eliding self-reference bases.
#[derive(Debug, Clone)]
pub struct NameResolver {
    self_names: Vec<String>,
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new(&["self", "cls"])
    }
}

impl NameResolver {
    pub fn new<S: AsRef<str>>(self_names: &[S]) -> Self {
        Self {
            self_names: self_names.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Resolve the target sub-tree of a call. Never fails.
    pub fn resolve(&self, target: &AstNode) -> ResolvedName {
        let mut segments = VecDeque::new();
        let complete = self.collect(target, &mut segments);
        let name = segments.into_iter().collect::<Vec<_>>().join(".");
        if complete {
            ResolvedName::Complete(name)
        } else {
            ResolvedName::Partial(name)
        }
    }

    fn is_self_reference(&self, node: &AstNode) -> bool {
        node.kind == AstNodeKind::Identifier && self.self_names.iter().any(|s| s == node.name())
    }

    /// Prepend the segments of `node`; returns false once any part had to be
    /// recovered by the generic scan.
    fn collect<'a>(&self, node: &'a AstNode, segments: &mut VecDeque<&'a str>) -> bool {
        match node.kind {
            AstNodeKind::Identifier => {
                segments.push_front(node.name());
                true
            }
            AstNodeKind::Attribute => {
                segments.push_front(node.name());
                match node.first_child() {
                    Some(base) if self.is_self_reference(base) => true,
                    Some(base) => self.collect(base, segments),
                    None => false,
                }
            }
            _ => {
                self.scan(node, segments);
                false
            }
        }
    }

    fn scan<'a>(&self, node: &'a AstNode, segments: &mut VecDeque<&'a str>) {
        for child in &node.children {
            match child.kind {
                AstNodeKind::Identifier | AstNodeKind::Attribute => {
                    self.collect(child, segments);
                }
                _ => self.scan(child, segments),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(target: AstNode) -> ResolvedName {
        NameResolver::default().resolve(&target)
    }

    #[test]
    fn test_bare_call() {
        assert_eq!(
            resolve(AstNode::identifier("foo")),
            ResolvedName::Complete("foo".to_string())
        );
    }

    #[test]
    fn test_attribute_chain() {
        let target = AstNode::attribute(AstNode::identifier("obj"), "method");
        assert_eq!(resolve(target), ResolvedName::Complete("obj.method".to_string()));

        let nested = AstNode::attribute(
            AstNode::attribute(AstNode::identifier("os"), "path"),
            "join",
        );
        assert_eq!(resolve(nested).as_str(), "os.path.join");
    }

    #[test]
    fn test_self_reference_is_elided() {
        let target = AstNode::attribute(AstNode::identifier("self"), "method");
        assert_eq!(resolve(target), ResolvedName::Complete("method".to_string()));

        let deep = AstNode::attribute(
            AstNode::attribute(AstNode::identifier("self"), "repo"),
            "save",
        );
        assert_eq!(resolve(deep).as_str(), "repo.save");
    }

    #[test]
    fn test_bare_self_call_is_kept() {
        assert_eq!(resolve(AstNode::identifier("self")).as_str(), "self");
    }

    #[test]
    fn test_custom_self_names() {
        let resolver = NameResolver::new(&["this"]);
        let target = AstNode::attribute(AstNode::identifier("this"), "run");
        assert_eq!(resolver.resolve(&target).as_str(), "run");

        let target = AstNode::attribute(AstNode::identifier("self"), "run");
        assert_eq!(resolver.resolve(&target).as_str(), "self.run");
    }

    #[test]
    fn test_call_on_call_result_falls_back() {
        // factory().build()
        let inner = AstNode::call(AstNode::identifier("factory"), vec![]);
        let target = AstNode::attribute(inner, "build");

        let resolved = resolve(target);
        assert!(!resolved.is_complete());
        assert_eq!(resolved.as_str(), "factory.build");
    }

    #[test]
    fn test_subscript_falls_back() {
        // handlers[key]()
        let target = AstNode::other(vec![
            AstNode::identifier("handlers"),
            AstNode::identifier("key"),
        ]);
        let resolved = resolve(target);
        assert!(!resolved.is_complete());
        assert_eq!(resolved.as_str(), "key.handlers");
    }

    #[test]
    fn test_literal_target_yields_empty_partial() {
        let resolved = resolve(AstNode::other(vec![]));
        assert_eq!(resolved, ResolvedName::Partial(String::new()));
    }
}
