//! Front-end field validation.
//!
//! Whatever collects the component details (a wizard, the CLI) asks these
//! helpers whether generation may start.

use crate::config::ComponentConfiguration;
use crate::naming::to_first_upper_case;

/// Raw, user-entered component details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentFields {
    pub component_name: String,
    pub domain_name: String,
    pub swagger_url: String,
    pub service_endpoint: String,
    pub additional_config: String,
}

impl ComponentFields {
    /// Component, domain and schema URL are required.
    pub fn can_proceed(&self) -> bool {
        !self.component_name.is_empty() && !self.domain_name.is_empty() && !self.swagger_url.is_empty()
    }

    /// The package shown while typing: `<domain>.<component>`.
    pub fn package_preview(&self) -> String {
        format!("{}.{}", self.domain_name, self.component_name)
    }

    /// Builds the configuration handed to the generator.
    pub fn into_component_configuration(
        self,
        package_name: impl Into<String>,
        module_name: impl Into<String>,
    ) -> ComponentConfiguration {
        ComponentConfiguration {
            service_endpoint: self.service_endpoint,
            swagger_url: self.swagger_url,
            package_name: package_name.into(),
            component_name: to_first_upper_case(&self.component_name),
            module_name: module_name.into(),
            swagger_file: String::new(),
            additional_config: self.additional_config,
            custom_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ComponentFields {
        ComponentFields {
            component_name: "widget".to_string(),
            domain_name: "com.example".to_string(),
            swagger_url: "https://api.example.com/swagger.json".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_can_proceed_requires_all_fields() {
        assert!(fields().can_proceed());
        assert!(!ComponentFields { component_name: String::new(), ..fields() }.can_proceed());
        assert!(!ComponentFields { domain_name: String::new(), ..fields() }.can_proceed());
        assert!(!ComponentFields { swagger_url: String::new(), ..fields() }.can_proceed());
    }

    #[test]
    fn test_package_preview() {
        assert_eq!(fields().package_preview(), "com.example.widget");
    }

    #[test]
    fn test_component_name_is_capitalized() {
        let config = fields().into_component_configuration("com.example.widget", "app");
        assert_eq!(config.component_name, "Widget");
        assert_eq!(config.interface_name(), "WidgetApiInterface");
        assert_eq!(config.module_name, "app");
    }
}
