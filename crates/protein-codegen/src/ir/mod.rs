//! Language-agnostic descriptor model.
//!
//! Descriptors are produced upstream (a schema reader, a JSON file, the
//! component builder) and consumed by the renderers in [`crate::codegen`].
//! They carry no knowledge of how they are written out.

mod descriptor;
mod types;

pub use descriptor::{FunctionSpec, Member, ParameterSpec, PropertySpec, TypeDescriptor, TypeKind};
pub use types::{Annotation, TypeRef};
