//! Project-path providers.
//!
//! The emitter never looks up "the current project" on its own; the host
//! supplies a [`ProjectEnvironment`].

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Host environment exposing the open project's base path.
pub trait ProjectEnvironment {
    /// Base path of the current project, or `None` when no project is open.
    fn current_base_path(&self) -> Option<PathBuf>;
}

/// A project rooted at a fixed directory.
#[derive(Debug, Clone)]
pub struct FixedProject(pub PathBuf);

impl ProjectEnvironment for FixedProject {
    fn current_base_path(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// No project is open.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProject;

impl ProjectEnvironment for NoProject {
    fn current_base_path(&self) -> Option<PathBuf> {
        None
    }
}

/// The process working directory is the project.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingDirProject;

impl ProjectEnvironment for WorkingDirProject {
    fn current_base_path(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }
}

/// Lists directories directly below `base` that can receive generated code.
///
/// Hidden and read-only directories are skipped. Names are sorted.
pub fn module_candidates(base: &Path) -> Vec<String> {
    let mut modules: Vec<String> = WalkDir::new(base)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| {
            entry
                .metadata()
                .map(|m| !m.permissions().readonly())
                .unwrap_or(false)
        })
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect();
    modules.sort();
    modules
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fixed_and_missing_projects() {
        assert_eq!(FixedProject(PathBuf::from("/work/app")).current_base_path(), Some(PathBuf::from("/work/app")));
        assert_eq!(NoProject.current_base_path(), None);
    }

    #[test]
    fn test_module_candidates() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("app")).unwrap();
        std::fs::create_dir(temp.path().join("core")).unwrap();
        std::fs::create_dir_all(temp.path().join("core/nested")).unwrap();
        std::fs::create_dir(temp.path().join(".gradle")).unwrap();
        std::fs::write(temp.path().join("build.gradle"), "").unwrap();

        assert_eq!(module_candidates(temp.path()), vec!["app".to_string(), "core".to_string()]);
    }
}
