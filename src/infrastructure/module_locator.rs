//! Module Locator
//!
//! Resolves dotted module names to Python source files on a search path,
//! without executing anything.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::domain::error::ResolveError;
use crate::ports::{LocatedModule, ModuleLocator};

/// Extensions of importable modules that have no Python source.
const BINARY_EXTENSIONS: &[&str] = &["so", "pyd", "pyc"];

pub struct SearchPathLocator {
    search_paths: Vec<PathBuf>,
}

impl SearchPathLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    fn locate_in(&self, root: &Path, segments: &[&str]) -> Lookup {
        let Some((last, parents)) = segments.split_last() else {
            return Lookup::Missing;
        };
        let parent_dir = parents.iter().fold(root.to_path_buf(), |dir, s| dir.join(s));
        let package = segments.join(".");
        let parent_package = parents.join(".");

        let package_dir = parent_dir.join(last);
        let init = package_dir.join("__init__.py");
        if init.is_file() {
            return Lookup::Found(LocatedModule { path: init, package });
        }

        let module_file = parent_dir.join(format!("{}.py", last));
        if module_file.is_file() {
            return Lookup::Found(LocatedModule {
                path: module_file,
                package: parent_package,
            });
        }

        // Namespace packages carry no source of their own.
        if package_dir.is_dir() {
            return Lookup::NoSource(package_dir);
        }

        match Self::find_binary(&parent_dir, last) {
            Some(path) => Lookup::NoSource(path),
            None => Lookup::Missing,
        }
    }

    fn find_binary(dir: &Path, name: &str) -> Option<PathBuf> {
        let entries = fs::read_dir(dir).ok()?;
        entries.flatten().map(|e| e.path()).find(|path| {
            let stem_matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.split('.').next())
                == Some(name);
            let binary = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| BINARY_EXTENSIONS.contains(&e));
            stem_matches && binary && path.is_file()
        })
    }
}

enum Lookup {
    Found(LocatedModule),
    NoSource(PathBuf),
    Missing,
}

impl ModuleLocator for SearchPathLocator {
    fn locate(&self, module: &str) -> Result<LocatedModule, ResolveError> {
        let segments: Vec<&str> = module.split('.').filter(|s| !s.is_empty()).collect();
        let mut not_source = None;

        for root in &self.search_paths {
            match self.locate_in(root, &segments) {
                Lookup::Found(located) => {
                    trace!(module, path = %located.path.display(), "Located module");
                    return Ok(located);
                }
                Lookup::NoSource(path) => {
                    not_source.get_or_insert(path);
                }
                Lookup::Missing => {}
            }
        }

        Err(match not_source {
            Some(path) => ResolveError::NotSourceBacked {
                module: module.to_string(),
                path,
            },
            None => ResolveError::NotFound(module.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_locates_plain_module() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("helpers.py"));

        let locator = SearchPathLocator::new(vec![dir.path().to_path_buf()]);
        let located = locator.locate("helpers").unwrap();
        assert_eq!(located.path, dir.path().join("helpers.py"));
        assert_eq!(located.package, "");
    }

    #[test]
    fn test_locates_package_and_submodule() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("shop/__init__.py"));
        touch(&dir.path().join("shop/models.py"));

        let locator = SearchPathLocator::new(vec![dir.path().to_path_buf()]);

        let package = locator.locate("shop").unwrap();
        assert_eq!(package.path, dir.path().join("shop/__init__.py"));
        assert_eq!(package.package, "shop");

        let module = locator.locate("shop.models").unwrap();
        assert_eq!(module.path, dir.path().join("shop/models.py"));
        assert_eq!(module.package, "shop");
    }

    #[test]
    fn test_search_path_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(&second.path().join("util.py"));

        let locator = SearchPathLocator::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(locator.locate("util").unwrap().path, second.path().join("util.py"));

        touch(&first.path().join("util.py"));
        assert_eq!(locator.locate("util").unwrap().path, first.path().join("util.py"));
    }

    #[test]
    fn test_missing_module() {
        let dir = tempdir().unwrap();
        let locator = SearchPathLocator::new(vec![dir.path().to_path_buf()]);
        assert!(matches!(
            locator.locate("nowhere"),
            Err(ResolveError::NotFound(name)) if name == "nowhere"
        ));
    }

    #[test]
    fn test_extension_module_is_not_source_backed() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("_speedups.cpython-311-x86_64-linux-gnu.so"));
        fs::create_dir_all(dir.path().join("nspkg")).unwrap();

        let locator = SearchPathLocator::new(vec![dir.path().to_path_buf()]);
        assert!(matches!(
            locator.locate("_speedups"),
            Err(ResolveError::NotSourceBacked { .. })
        ));
        assert!(matches!(
            locator.locate("nspkg"),
            Err(ResolveError::NotSourceBacked { .. })
        ));
    }
}
