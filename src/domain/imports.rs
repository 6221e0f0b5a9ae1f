//! Import Statement Normalization
//!
//! Turns an `Import` node into the absolute module names the closure should
//! try to load.

use crate::domain::ast::{AstNode, AstNodeKind};
use crate::domain::error::BeyondTopLevel;

/// Absolute module names referenced by `import`, relative to `package`
/// (the dotted package containing the importing module).
///
/// `from . import x` yields the package and `package.x`, since the imported
/// names may be submodules.
pub fn imported_modules(package: &str, import: &AstNode) -> Result<Vec<String>, BeyondTopLevel> {
    debug_assert_eq!(import.kind, AstNodeKind::Import);

    let raw = import.name();
    let level = raw.chars().take_while(|c| *c == '.').count();
    let rest = &raw[level..];

    if level == 0 {
        return Ok(if rest.is_empty() {
            vec![]
        } else {
            vec![rest.to_string()]
        });
    }

    let base: Vec<&str> = package.split('.').filter(|s| !s.is_empty()).collect();
    let up = level - 1;
    if up >= base.len() {
        return Err(BeyondTopLevel {
            import: raw.to_string(),
            package: package.to_string(),
        });
    }
    let anchor = base[..base.len() - up].join(".");

    if !rest.is_empty() {
        return Ok(vec![format!("{}.{}", anchor, rest)]);
    }

    let mut modules = vec![anchor.clone()];
    modules.extend(
        import
            .children
            .iter()
            .filter(|c| c.kind == AstNodeKind::Identifier)
            .map(|c| format!("{}.{}", anchor, c.name())),
    );
    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_import() {
        let node = AstNode::import("os.path", &[]);
        assert_eq!(imported_modules("", &node).unwrap(), vec!["os.path"]);

        let node = AstNode::import("models", &["User", "Group"]);
        assert_eq!(imported_modules("app", &node).unwrap(), vec!["models"]);
    }

    #[test]
    fn test_relative_import_with_module() {
        let node = AstNode::import(".models", &["User"]);
        assert_eq!(imported_modules("shop", &node).unwrap(), vec!["shop.models"]);

        let node = AstNode::import("..core.db", &["connect"]);
        assert_eq!(
            imported_modules("shop.api", &node).unwrap(),
            vec!["shop.core.db"]
        );
    }

    #[test]
    fn test_relative_import_of_siblings() {
        let node = AstNode::import(".", &["views", "forms"]);
        assert_eq!(
            imported_modules("shop", &node).unwrap(),
            vec!["shop", "shop.views", "shop.forms"]
        );
    }

    #[test]
    fn test_relative_import_beyond_top_level() {
        let node = AstNode::import("..models", &["User"]);
        let err = imported_modules("shop", &node).unwrap_err();
        assert_eq!(err.import, "..models");

        let node = AstNode::import(".", &["x"]);
        assert!(imported_modules("", &node).is_err());
    }
}
