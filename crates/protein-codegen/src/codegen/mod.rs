//! Source rendering from descriptors.
//!
//! A [`Renderer`] turns one [`SourceFile`] (namespace + descriptor + imports)
//! into complete source text. The emitter decides where the text goes; the
//! renderer only decides what it looks like and how the namespace maps onto
//! directories below the language source root.

mod kotlin;

use std::path::{Path, PathBuf};

use crate::diagnostic::GeneratorError;
use crate::ir::{Member, TypeDescriptor, TypeKind};
use crate::naming::is_valid_identifier;

pub use kotlin::KotlinRenderer;

/// One output file: a descriptor placed in a namespace.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile<'a> {
    /// Dotted package, possibly empty.
    pub namespace: &'a str,
    pub descriptor: &'a TypeDescriptor,
    /// Fully-qualified names imported in addition to the referenced types.
    pub imports: &'a [String],
}

impl<'a> SourceFile<'a> {
    pub fn new(namespace: &'a str, descriptor: &'a TypeDescriptor) -> Self {
        Self {
            namespace,
            descriptor,
            imports: &[],
        }
    }

    pub fn with_imports(mut self, imports: &'a [String]) -> Self {
        self.imports = imports;
        self
    }

    /// Path below the source root: one directory per namespace segment,
    /// then `<name>.<extension>`.
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.namespace.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", self.descriptor.name, extension));
        path
    }
}

/// Trait for target-language backends.
pub trait Renderer {
    /// Returns the language name (e.g., "kotlin").
    fn language(&self) -> &str;

    /// Returns the extension of generated files, without the dot.
    fn extension(&self) -> &str;

    /// Returns the conventional source root below a module directory.
    fn source_root(&self) -> &Path;

    /// Renders a complete, syntactically valid source file.
    ///
    /// The descriptor must already have passed [`validate_descriptor`].
    fn render(&self, file: &SourceFile<'_>) -> String;
}

/// Creates a renderer for the given language.
pub fn create_renderer(language: &str) -> Result<Box<dyn Renderer>, GeneratorError> {
    match language {
        "kotlin" | "kt" => Ok(Box::new(KotlinRenderer::new())),
        _ => Err(GeneratorError::UnsupportedLanguage {
            language: language.to_string(),
        }),
    }
}

/// Checks that a descriptor can be rendered.
pub fn validate_descriptor(descriptor: &TypeDescriptor) -> Result<(), GeneratorError> {
    let name = &descriptor.name;
    if name.is_empty() {
        return Err(GeneratorError::invalid_descriptor("<unnamed>", "the name is empty"));
    }
    if !is_valid_identifier(name) {
        return Err(GeneratorError::invalid_descriptor(
            name,
            format!("'{}' is not a valid identifier", name),
        ));
    }
    if descriptor.members.is_empty() {
        return Err(GeneratorError::invalid_descriptor(name, "it has no members"));
    }

    for member in &descriptor.members {
        let member_name = match member {
            Member::Property(p) => {
                if descriptor.kind == TypeKind::Enum {
                    return Err(GeneratorError::invalid_descriptor(
                        name,
                        format!("enum property '{}' is not supported", p.name),
                    ));
                }
                &p.name
            }
            Member::Function(f) => &f.name,
            Member::EnumConstant { name: constant } => {
                if descriptor.kind != TypeKind::Enum {
                    return Err(GeneratorError::invalid_descriptor(
                        name,
                        format!("enum constant '{}' outside of an enum", constant),
                    ));
                }
                constant
            }
        };
        if member_name.is_empty() {
            return Err(GeneratorError::invalid_descriptor(name, "a member has an empty name"));
        }
    }

    Ok(())
}

/// Renders descriptors to text without writing anything.
///
/// No imports are attached; those only apply when files are written.
pub fn generate_strings(
    renderer: &dyn Renderer,
    namespace: &str,
    descriptors: &[TypeDescriptor],
) -> Result<Vec<String>, GeneratorError> {
    descriptors
        .iter()
        .map(|descriptor| {
            validate_descriptor(descriptor)?;
            Ok(renderer.render(&SourceFile::new(namespace, descriptor)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{FunctionSpec, PropertySpec, TypeRef};

    fn widget() -> TypeDescriptor {
        TypeDescriptor::data_class("Widget")
            .with_member(PropertySpec::new("id", TypeRef::new("kotlin.Long")))
    }

    #[test]
    fn test_relative_path_mirrors_namespace() {
        let descriptor = widget();
        let file = SourceFile::new("com.example", &descriptor);
        assert_eq!(file.relative_path("kt"), PathBuf::from("com/example/Widget.kt"));
    }

    #[test]
    fn test_relative_path_without_namespace() {
        let descriptor = widget();
        let file = SourceFile::new("", &descriptor);
        assert_eq!(file.relative_path("kt"), PathBuf::from("Widget.kt"));
    }

    #[test]
    fn test_create_renderer() {
        assert_eq!(create_renderer("kotlin").unwrap().extension(), "kt");
        assert!(matches!(
            create_renderer("cobol"),
            Err(GeneratorError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_descriptors() {
        assert!(validate_descriptor(&widget()).is_ok());

        let unnamed = TypeDescriptor::data_class("")
            .with_member(PropertySpec::new("id", TypeRef::new("kotlin.Long")));
        assert!(matches!(
            validate_descriptor(&unnamed),
            Err(GeneratorError::InvalidDescriptor { .. })
        ));

        assert!(validate_descriptor(&TypeDescriptor::interface("Empty")).is_err());
        assert!(validate_descriptor(&TypeDescriptor::class("class").with_member(FunctionSpec::new("run"))).is_err());
        assert!(validate_descriptor(&TypeDescriptor::class("Widget").with_constant("A")).is_err());
        assert!(validate_descriptor(
            &TypeDescriptor::enumeration("Status")
                .with_member(PropertySpec::new("code", TypeRef::new("kotlin.Int")))
        )
        .is_err());
    }

    #[test]
    fn test_generate_strings_empty() {
        let renderer = KotlinRenderer::new();
        assert!(generate_strings(&renderer, "com.example", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_generate_strings_one_per_descriptor() {
        let renderer = KotlinRenderer::new();
        let status = TypeDescriptor::enumeration("Status").with_constant("ACTIVE");
        let rendered = generate_strings(&renderer, "com.example", &[widget(), status]).unwrap();

        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains("data class Widget("));
        assert!(rendered[1].contains("enum class Status {"));
    }
}
