//! Generator configuration.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::diagnostic::GeneratorError;

/// Configuration for the generator itself.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Target language (default: "kotlin").
    pub language: String,

    /// Mirror every rendered file to stdout.
    pub echo: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            language: "kotlin".to_string(),
            echo: true,
        }
    }
}

/// Where and under which package one emission call writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmissionConfiguration {
    /// Replaces the project base path as the output root.
    pub custom_path: Option<PathBuf>,

    /// Module directory between the root and the source root.
    pub module_name: Option<String>,

    pub package_name: String,

    /// Appended to `package_name` as `<package>.<sub_package>`.
    pub sub_package: Option<String>,

    /// Names imported into every generated file.
    pub imports: Vec<String>,
}

impl EmissionConfiguration {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_path = Some(path.into());
        self
    }

    pub fn with_module(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = Some(module_name.into());
        self
    }

    pub fn with_sub_package(mut self, sub_package: impl Into<String>) -> Self {
        self.sub_package = Some(sub_package.into());
        self
    }

    /// The module name, if one is set and non-empty.
    pub fn module(&self) -> Option<&str> {
        self.module_name.as_deref().filter(|m| !m.is_empty())
    }

    /// The package generated files declare.
    pub fn namespace(&self) -> String {
        match self.sub_package.as_deref().filter(|s| !s.is_empty()) {
            Some(sub) if self.package_name.is_empty() => sub.to_string(),
            Some(sub) => format!("{}.{}", self.package_name, sub),
            None => self.package_name.clone(),
        }
    }
}

/// Everything a front end collects about one API component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentConfiguration {
    pub service_endpoint: String,
    pub swagger_url: String,
    pub package_name: String,
    pub component_name: String,
    pub module_name: String,
    pub swagger_file: String,
    /// Path to an additional-methods JSON file; empty when unused.
    pub additional_config: String,
    pub custom_path: Option<PathBuf>,
}

impl ComponentConfiguration {
    /// Name of the generated API interface, e.g. `WidgetApiInterface`.
    pub fn interface_name(&self) -> String {
        format!("{}ApiInterface", self.component_name)
    }

    pub fn emission_configuration(&self) -> EmissionConfiguration {
        EmissionConfiguration {
            custom_path: self.custom_path.clone(),
            module_name: Some(self.module_name.clone()).filter(|m| !m.is_empty()),
            package_name: self.package_name.clone(),
            sub_package: None,
            imports: Vec::new(),
        }
    }
}

/// Reads and deserializes a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, GeneratorError> {
    let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::io(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| GeneratorError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
