//! Output path resolution.

use std::path::{Component, Path, PathBuf};

use crate::config::EmissionConfiguration;
use crate::diagnostic::GeneratorError;
use crate::env::ProjectEnvironment;

/// Resolved output location of one emission call.
///
/// Files always land at `<base>[/<module>]/<source root>/<package dirs>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionTarget {
    pub base_path: PathBuf,
    pub module_segment: Option<String>,
    pub source_root: PathBuf,
    /// Dotted package generated files declare.
    pub namespace: String,
}

impl EmissionTarget {
    /// Resolves the target for `config`.
    ///
    /// 1. the custom path if given, else the project base path
    /// 2. plus the module directory when the module name is non-empty
    /// 3. plus the language source root
    pub fn resolve(
        config: &EmissionConfiguration,
        environment: &dyn ProjectEnvironment,
        source_root: &Path,
    ) -> Result<Self, GeneratorError> {
        let base_path = match &config.custom_path {
            Some(path) => path.clone(),
            None => environment
                .current_base_path()
                .ok_or(GeneratorError::NoProjectContext)?,
        };

        let module_segment = match config.module() {
            Some(module) => {
                validate_module(module)?;
                Some(module.to_string())
            }
            None => None,
        };

        let namespace = config.namespace();
        validate_package(&namespace)?;

        Ok(Self {
            base_path,
            module_segment,
            source_root: source_root.to_path_buf(),
            namespace,
        })
    }

    /// `<base>[/<module>]/<source root>`.
    pub fn destination(&self) -> PathBuf {
        let mut root = self.base_path.clone();
        if let Some(module) = &self.module_segment {
            root = root.join(module);
        }
        root.join(&self.source_root)
    }
}

fn validate_module(module: &str) -> Result<(), GeneratorError> {
    let path = Path::new(module);
    if path.components().all(|c| matches!(c, Component::Normal(_))) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidModuleName {
            name: module.to_string(),
        })
    }
}

fn validate_package(namespace: &str) -> Result<(), GeneratorError> {
    if namespace.is_empty() {
        return Ok(());
    }
    let valid = namespace.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) => {
                (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
            }
            None => false,
        }
    });
    if valid {
        Ok(())
    } else {
        Err(GeneratorError::InvalidPackageName {
            name: namespace.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedProject, NoProject};

    fn resolve(config: &EmissionConfiguration) -> Result<EmissionTarget, GeneratorError> {
        EmissionTarget::resolve(config, &FixedProject(PathBuf::from("/work/app")), Path::new("src/main/java"))
    }

    #[test]
    fn test_project_base_path_by_default() {
        let target = resolve(&EmissionConfiguration::new("com.example")).unwrap();
        assert_eq!(target.destination(), PathBuf::from("/work/app/src/main/java"));
    }

    #[test]
    fn test_module_inserted_after_root() {
        let target = resolve(&EmissionConfiguration::new("com.example").with_module("core")).unwrap();
        assert_eq!(target.destination(), PathBuf::from("/work/app/core/src/main/java"));
    }

    #[test]
    fn test_empty_module_is_ignored() {
        let target = resolve(&EmissionConfiguration::new("com.example").with_module("")).unwrap();
        assert_eq!(target.destination(), PathBuf::from("/work/app/src/main/java"));
    }

    #[test]
    fn test_custom_path_replaces_project() {
        let config = EmissionConfiguration::new("com.example")
            .with_custom_path("/tmp/out")
            .with_module("data");
        let target = EmissionTarget::resolve(&config, &NoProject, Path::new("src/main/java")).unwrap();
        assert_eq!(target.destination(), PathBuf::from("/tmp/out/data/src/main/java"));
    }

    #[test]
    fn test_sub_package_extends_namespace() {
        let config = EmissionConfiguration::new("com.example").with_sub_package("api");
        let target = resolve(&config).unwrap();
        assert_eq!(target.namespace, "com.example.api");
    }

    #[test]
    fn test_missing_project_context() {
        let result = EmissionTarget::resolve(&EmissionConfiguration::new("a"), &NoProject, Path::new("src"));
        assert!(matches!(result, Err(GeneratorError::NoProjectContext)));
    }

    #[test]
    fn test_rejects_escaping_module() {
        for module in ["..", "../other", "/abs"] {
            let result = resolve(&EmissionConfiguration::new("a").with_module(module));
            assert!(matches!(result, Err(GeneratorError::InvalidModuleName { .. })), "{}", module);
        }
        assert!(resolve(&EmissionConfiguration::new("a").with_module("libs/core")).is_ok());
    }

    #[test]
    fn test_rejects_bad_package() {
        for package in ["com..example", "com/example", "1com", "com.example."] {
            let result = resolve(&EmissionConfiguration::new(package));
            assert!(matches!(result, Err(GeneratorError::InvalidPackageName { .. })), "{}", package);
        }
    }
}
