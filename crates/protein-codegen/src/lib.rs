//! # Protein Code Generator
//!
//! This crate turns language-agnostic type descriptors into Kotlin source
//! files and writes them into a project's source tree.
//!
//! ## Architecture
//!
//! ```text
//! Upstream producer (schema reader, JSON, ApiBuilder)
//!        │
//!        ▼
//! ┌──────────────┐
//! │      IR      │  TypeDescriptor: name, kind, members
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Renderer: descriptor → Kotlin text
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Emit     │  <root>[/<module>]/src/main/java/<pkg>/<Name>.kt
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Tracking   │  I/O failures forwarded to an ErrorTracker
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use protein_codegen::{EmissionConfiguration, Generator, GeneratorConfig};
//! use protein_codegen::env::WorkingDirProject;
//!
//! let mut generator = Generator::new(GeneratorConfig::default(), WorkingDirProject)?;
//! let config = EmissionConfiguration::new("com.example").with_module("app");
//! let report = generator.generate_files(&config, &descriptors, &[])?;
//! ```

pub mod additional;
pub mod builder;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod emit;
pub mod env;
pub mod ir;
pub mod naming;
pub mod tracking;
pub mod validate;

pub use builder::ApiBuilder;
pub use config::{ComponentConfiguration, EmissionConfiguration, GeneratorConfig};
pub use diagnostic::{GeneratorError, IoFailure};
pub use emit::{EmitReport, Emitter};
pub use ir::TypeDescriptor;

use codegen::create_renderer;
use env::ProjectEnvironment;
use tracking::{report_failures, ErrorTracker, TracingErrorTracker};

/// Emits descriptors and forwards write failures to an error tracker.
pub struct Generator<E> {
    emitter: Emitter<E>,
    tracker: Box<dyn ErrorTracker>,
}

impl<E: ProjectEnvironment> Generator<E> {
    /// Creates a generator for the configured language, logging failures
    /// through `tracing`.
    pub fn new(config: GeneratorConfig, environment: E) -> Result<Self, GeneratorError> {
        let mut emitter = Emitter::new(environment, create_renderer(&config.language)?);
        if config.echo {
            emitter = emitter.with_stdout_echo();
        }
        Ok(Self::from_parts(emitter, Box::new(TracingErrorTracker)))
    }

    pub fn from_parts(emitter: Emitter<E>, tracker: Box<dyn ErrorTracker>) -> Self {
        Self { emitter, tracker }
    }

    pub fn with_tracker(mut self, tracker: Box<dyn ErrorTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn emitter(&self) -> &Emitter<E> {
        &self.emitter
    }

    /// Writes the descriptors. Every failed descriptor is reported to the
    /// tracker once; the report still lists it.
    pub fn generate_files(
        &mut self,
        config: &EmissionConfiguration,
        descriptors: &[TypeDescriptor],
        import_names: &[String],
    ) -> Result<EmitReport, GeneratorError> {
        let report = self.emitter.emit(config, descriptors, import_names)?;
        let failed = report_failures(&report, self.tracker.as_ref());
        if failed > 0 {
            tracing::warn!(failed, total = report.len(), "some files were not written");
        }
        Ok(report)
    }

    /// Renders the descriptors without writing anything.
    pub fn generate_strings(
        &self,
        namespace: &str,
        descriptors: &[TypeDescriptor],
    ) -> Result<Vec<String>, GeneratorError> {
        codegen::generate_strings(self.emitter.renderer(), namespace, descriptors)
    }
}
