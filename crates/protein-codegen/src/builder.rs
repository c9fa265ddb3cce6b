//! API component assembly.
//!
//! Collects everything one component generates: the `<Component>ApiInterface`
//! (upstream operations plus additional methods), the response models and the
//! enums, then emits or renders them together.

use std::path::Path;

use tracing::warn;

use crate::additional::AdditionalConfig;
use crate::codegen::{generate_strings, Renderer};
use crate::config::ComponentConfiguration;
use crate::diagnostic::GeneratorError;
use crate::emit::EmitReport;
use crate::env::ProjectEnvironment;
use crate::ir::{FunctionSpec, Member, TypeDescriptor};
use crate::Generator;

/// Builds the descriptors of one API component.
#[derive(Debug, Clone)]
pub struct ApiBuilder {
    configuration: ComponentConfiguration,
    operations: Vec<FunctionSpec>,
    additional: Option<AdditionalConfig>,
    models: Vec<TypeDescriptor>,
    enums: Vec<TypeDescriptor>,
    interface: Option<TypeDescriptor>,
}

impl ApiBuilder {
    pub fn new(configuration: ComponentConfiguration) -> Self {
        Self {
            configuration,
            operations: Vec::new(),
            additional: None,
            models: Vec::new(),
            enums: Vec::new(),
            interface: None,
        }
    }

    pub fn configuration(&self) -> &ComponentConfiguration {
        &self.configuration
    }

    /// Interface functions produced upstream, one per API operation.
    pub fn with_operations(mut self, operations: impl IntoIterator<Item = FunctionSpec>) -> Self {
        self.operations.extend(operations);
        self
    }

    pub fn with_models(mut self, models: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.models.extend(models);
        self
    }

    /// Adds enums, skipping ones structurally equal to an enum already present.
    pub fn with_enums(mut self, enums: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        for descriptor in enums {
            if !self.enums.contains(&descriptor) {
                self.enums.push(descriptor);
            }
        }
        self
    }

    pub fn with_additional_config(mut self, config: AdditionalConfig) -> Self {
        self.additional = Some(config);
        self
    }

    /// Reads the configured additional-methods file, if one is named.
    pub fn load_additional_config(self) -> Result<Self, GeneratorError> {
        let path = self.configuration.additional_config.trim();
        if path.is_empty() {
            return Ok(self);
        }
        let config = AdditionalConfig::load(Path::new(path))?;
        Ok(self.with_additional_config(config))
    }

    /// Assembles the API interface. Additional methods follow the operations.
    pub fn build(&mut self) -> &TypeDescriptor {
        let mut interface = TypeDescriptor::interface(self.configuration.interface_name());
        interface
            .members
            .extend(self.operations.iter().cloned().map(Member::Function));
        if let Some(additional) = &self.additional {
            interface
                .members
                .extend(additional.functions().into_iter().map(Member::Function));
        }
        self.interface.insert(interface)
    }

    pub fn interface(&self) -> Option<&TypeDescriptor> {
        self.interface.as_ref()
    }

    pub fn models(&self) -> &[TypeDescriptor] {
        &self.models
    }

    pub fn enums(&self) -> &[TypeDescriptor] {
        &self.enums
    }

    /// Interface (when built and non-empty), then models, then enums.
    pub fn descriptors(&self) -> Vec<TypeDescriptor> {
        let mut descriptors = Vec::with_capacity(1 + self.models.len() + self.enums.len());
        match &self.interface {
            Some(interface) if !interface.members.is_empty() => descriptors.push(interface.clone()),
            Some(interface) => warn!(name = %interface.name, "API interface has no methods, skipping"),
            None => {}
        }
        descriptors.extend(self.models.iter().cloned());
        descriptors.extend(self.enums.iter().cloned());
        descriptors
    }

    pub fn generated_api_interface_string(&self, renderer: &dyn Renderer) -> Result<String, GeneratorError> {
        match &self.interface {
            Some(interface) if !interface.members.is_empty() => {
                self.concatenated(renderer, std::slice::from_ref(interface))
            }
            _ => Ok(String::new()),
        }
    }

    pub fn generated_models_string(&self, renderer: &dyn Renderer) -> Result<String, GeneratorError> {
        self.concatenated(renderer, &self.models)
    }

    pub fn generated_enums_string(&self, renderer: &dyn Renderer) -> Result<String, GeneratorError> {
        self.concatenated(renderer, &self.enums)
    }

    /// Writes every descriptor using the component's output settings.
    pub fn generate_files<E: ProjectEnvironment>(
        &self,
        generator: &mut Generator<E>,
    ) -> Result<EmitReport, GeneratorError> {
        let config = self.configuration.emission_configuration();
        generator.generate_files(&config, &self.descriptors(), &[])
    }

    fn concatenated(&self, renderer: &dyn Renderer, descriptors: &[TypeDescriptor]) -> Result<String, GeneratorError> {
        Ok(generate_strings(renderer, &self.configuration.package_name, descriptors)?.concat())
    }
}
