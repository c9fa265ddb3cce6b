//! Type references and annotations.

use serde::{Deserialize, Serialize};

/// A reference to a type, by qualified (`io.reactivex.Single`) or simple
/// (`Widget`) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeRef>,
    #[serde(default)]
    pub nullable: bool,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// `name<arguments...>`.
    pub fn parameterized(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            arguments,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Keeps the type as-is when `required`, otherwise marks it nullable.
    pub fn required_or_nullable(self, required: bool) -> Self {
        if required {
            self
        } else {
            self.nullable()
        }
    }

    /// Splits the name into `(package, class path)`.
    ///
    /// The package is the leading run of segments that start with a lowercase
    /// letter; everything after it is the class, possibly nested
    /// (`okhttp3.MultipartBody.Part` -> `("okhttp3", "MultipartBody.Part")`).
    pub fn split_name(&self) -> (&str, &str) {
        let mut offset = 0;
        for segment in self.name.split('.') {
            if segment.chars().next().is_some_and(|c| c.is_uppercase()) {
                break;
            }
            offset += segment.len() + 1;
        }

        if offset == 0 {
            return ("", &self.name);
        }
        if offset > self.name.len() {
            // No class segment at all: treat the last segment as the class.
            return match self.name.rsplit_once('.') {
                Some((package, class)) => (package, class),
                None => ("", &self.name),
            };
        }
        (&self.name[..offset - 1], &self.name[offset..])
    }

    /// Iterates over this reference and every nested type argument.
    pub fn walk(&self) -> Vec<&TypeRef> {
        let mut refs = vec![self];
        for argument in &self.arguments {
            refs.extend(argument.walk());
        }
        refs
    }
}

/// An annotation such as `@GET("users/{id}")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Raw Kotlin expressions placed between the parentheses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl Annotation {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_ref: TypeRef::new(type_name),
            arguments: Vec::new(),
        }
    }

    /// An annotation with a single string literal argument. `$` is escaped so
    /// the literal stays a compile-time constant.
    pub fn with_string(type_name: impl Into<String>, value: &str) -> Self {
        let escaped = value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('$', "\\$");
        Self {
            type_ref: TypeRef::new(type_name),
            arguments: vec![format!("\"{}\"", escaped)],
        }
    }
}
