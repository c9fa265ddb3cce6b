//! Writing rendered descriptors into a project.
//!
//! The emitter resolves the output directory, renders each descriptor, makes
//! sure the directory exists, overwrites `<name>.<ext>` and optionally echoes
//! the text to a diagnostic sink.
//!
//! Failures are split in two:
//! - precondition violations (empty batch, invalid descriptor, no project,
//!   bad module or package) abort the call before anything is written;
//! - I/O failures are recorded per descriptor in the [`EmitReport`] and the
//!   rest of the batch is still emitted. Nothing is rolled back.

mod report;
mod target;

use std::io::Write;
use std::path::Path;

use crate::codegen::{validate_descriptor, Renderer, SourceFile};
use crate::config::EmissionConfiguration;
use crate::diagnostic::{GeneratorError, IoFailure};
use crate::env::ProjectEnvironment;
use crate::ir::TypeDescriptor;

pub use report::{DescriptorOutcome, EmitReport};
pub use target::EmissionTarget;

/// Writes descriptors below a project's source root.
pub struct Emitter<E> {
    environment: E,
    renderer: Box<dyn Renderer>,
    echo: Option<Box<dyn Write>>,
}

impl<E: ProjectEnvironment> Emitter<E> {
    /// Creates an emitter without a diagnostic echo.
    pub fn new(environment: E, renderer: Box<dyn Renderer>) -> Self {
        Self {
            environment,
            renderer,
            echo: None,
        }
    }

    /// Mirrors every written file to `sink`. Sink errors are logged and ignored.
    pub fn with_echo(mut self, sink: Box<dyn Write>) -> Self {
        self.echo = Some(sink);
        self
    }

    pub fn with_stdout_echo(self) -> Self {
        self.with_echo(Box::new(std::io::stdout()))
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// Resolves where `config` would write, without touching the filesystem.
    pub fn resolve_target(&self, config: &EmissionConfiguration) -> Result<EmissionTarget, GeneratorError> {
        EmissionTarget::resolve(config, &self.environment, self.renderer.source_root())
    }

    /// Renders and writes every descriptor.
    ///
    /// `import_names` are added to the configuration's imports. Names without a
    /// dot are taken from the configured package.
    pub fn emit(
        &mut self,
        config: &EmissionConfiguration,
        descriptors: &[TypeDescriptor],
        import_names: &[String],
    ) -> Result<EmitReport, GeneratorError> {
        if descriptors.is_empty() {
            return Err(GeneratorError::EmptyBatch);
        }
        for descriptor in descriptors {
            validate_descriptor(descriptor)?;
        }

        let target = self.resolve_target(config)?;
        let destination = target.destination();
        let imports = merge_imports(&config.package_name, &config.imports, import_names);
        tracing::debug!(
            destination = %destination.display(),
            namespace = %target.namespace,
            count = descriptors.len(),
            "emitting descriptors"
        );

        let mut report = EmitReport::default();
        for descriptor in descriptors {
            let file = SourceFile::new(&target.namespace, descriptor).with_imports(&imports);
            let text = self.renderer.render(&file);
            let path = destination.join(file.relative_path(self.renderer.extension()));

            let result = write_file(&path, &text).map_err(|message| IoFailure {
                descriptor_name: descriptor.name.clone(),
                path: path.clone(),
                message,
            });

            match &result {
                Ok(_) => {
                    tracing::info!(path = %path.display(), "wrote {}", descriptor.name);
                    self.echo(&text);
                }
                Err(failure) => tracing::debug!(%failure, "descriptor not written"),
            }

            report.outcomes.push(DescriptorOutcome {
                name: descriptor.name.clone(),
                result: result.map(|_| path),
            });
        }

        Ok(report)
    }

    fn echo(&mut self, text: &str) {
        if let Some(sink) = self.echo.as_mut() {
            if let Err(e) = sink.write_all(text.as_bytes()).and_then(|_| sink.flush()) {
                tracing::warn!(error = %e, "failed to echo generated source");
            }
        }
    }
}

/// Creates the parent directory if needed, then overwrites the file.
fn write_file(path: &Path, text: &str) -> Result<(), String> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            // Another writer may create it first; create_dir_all accepts that.
            std::fs::create_dir_all(dir).map_err(|e| format!("cannot create '{}': {}", dir.display(), e))?;
        }
    }
    std::fs::write(path, text).map_err(|e| e.to_string())
}

/// Configured imports first, then call-site imports, without duplicates.
fn merge_imports(package_name: &str, configured: &[String], extra: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for name in configured.iter().chain(extra).filter(|n| !n.is_empty()) {
        let qualified = if name.contains('.') || package_name.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", package_name, name)
        };
        if !merged.contains(&qualified) {
            merged.push(qualified);
        }
    }
    merged
}
