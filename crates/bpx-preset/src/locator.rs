use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{PresetError, Result};

/// Resolves a package name to its install directory.
///
/// The factory needs a single lookup (the runtime support package, when
/// `absoluteRuntime` is enabled). Injecting the capability keeps the core
/// free of ambient filesystem assumptions and testable with a stub.
pub trait RuntimeLocator {
    fn locate(&self, package: &str) -> Result<PathBuf>;
}

/// Locator that walks `node_modules` directories upward from a base
/// directory, mirroring how Node resolves `<package>/package.json`.
#[derive(Debug, Clone)]
pub struct NodeModulesLocator {
    base_dir: PathBuf,
}

impl NodeModulesLocator {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl RuntimeLocator for NodeModulesLocator {
    fn locate(&self, package: &str) -> Result<PathBuf> {
        for dir in self.base_dir.ancestors() {
            let candidate = dir.join("node_modules").join(package);
            if candidate.join("package.json").is_file() {
                debug!("resolved '{}' to {}", package, candidate.display());
                return Ok(candidate);
            }
        }

        Err(PresetError::RuntimeNotFound {
            package: package.to_string(),
            searched_from: self.base_dir.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn install_package(root: &Path, package: &str) {
        let dir = root.join("node_modules").join(package);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("package.json"), "{}").unwrap();
    }

    #[test]
    fn test_locates_package_in_base_dir() {
        let temp = TempDir::new().unwrap();
        install_package(temp.path(), "@babel/runtime");

        let locator = NodeModulesLocator::new(temp.path());
        let dir = locator.locate("@babel/runtime").unwrap();

        assert_eq!(dir, temp.path().join("node_modules/@babel/runtime"));
    }

    #[test]
    fn test_walks_up_to_parent_node_modules() {
        let temp = TempDir::new().unwrap();
        install_package(temp.path(), "@babel/runtime");

        let nested = temp.path().join("packages/app");
        fs::create_dir_all(&nested).unwrap();

        let locator = NodeModulesLocator::new(&nested);
        let dir = locator.locate("@babel/runtime").unwrap();

        assert_eq!(dir, temp.path().join("node_modules/@babel/runtime"));
    }

    #[test]
    fn test_missing_package_is_an_error() {
        let temp = TempDir::new().unwrap();

        let locator = NodeModulesLocator::new(temp.path());
        let err = locator.locate("@babel/runtime").unwrap_err();

        match err {
            PresetError::RuntimeNotFound { package, searched_from } => {
                assert_eq!(package, "@babel/runtime");
                assert_eq!(searched_from, temp.path());
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_directory_without_manifest_is_skipped() {
        let temp = TempDir::new().unwrap();
        // Directory exists but carries no package.json.
        fs::create_dir_all(temp.path().join("node_modules/@babel/runtime")).unwrap();

        let locator = NodeModulesLocator::new(temp.path());
        assert!(locator.locate("@babel/runtime").is_err());
    }
}
