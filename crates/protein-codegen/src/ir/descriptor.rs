//! Type descriptors: the unit of work consumed by the emitter.

use serde::{Deserialize, Serialize};

use super::types::{Annotation, TypeRef};

/// The kind of declaration a descriptor produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Class {
        #[serde(default)]
        data: bool,
    },
    Interface,
    Enum,
}

/// One generatable type.
///
/// `name` is both the declared type name and the base name of its output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(flatten)]
    pub kind: TypeKind,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: Vec::new(),
            doc: None,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class { data: false })
    }

    pub fn data_class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class { data: true })
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn with_constant(self, name: impl Into<String>) -> Self {
        self.with_member(Member::EnumConstant { name: name.into() })
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertySpec> {
        self.members.iter().filter_map(|m| match m {
            Member::Property(p) => Some(p),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionSpec> {
        self.members.iter().filter_map(|m| match m {
            Member::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn constants(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|m| match m {
            Member::EnumConstant { name } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Every type referenced by the descriptor, including annotation types.
    pub fn referenced_types(&self) -> Vec<&TypeRef> {
        let mut refs = Vec::new();
        for member in &self.members {
            match member {
                Member::Property(p) => {
                    refs.extend(p.annotations.iter().flat_map(|a| a.type_ref.walk()));
                    refs.extend(p.type_ref.walk());
                }
                Member::Function(f) => {
                    refs.extend(f.annotations.iter().flat_map(|a| a.type_ref.walk()));
                    for param in &f.parameters {
                        refs.extend(param.annotations.iter().flat_map(|a| a.type_ref.walk()));
                        refs.extend(param.type_ref.walk());
                    }
                    if let Some(ret) = &f.return_type {
                        refs.extend(ret.walk());
                    }
                }
                Member::EnumConstant { .. } => {}
            }
        }
        refs
    }
}

/// A member of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Property(PropertySpec),
    Function(FunctionSpec),
    EnumConstant { name: String },
}

impl From<PropertySpec> for Member {
    fn from(p: PropertySpec) -> Self {
        Member::Property(p)
    }
}

impl From<FunctionSpec> for Member {
    fn from(f: FunctionSpec) -> Self {
        Member::Function(f)
    }
}

/// A `val` property. In classes it becomes a primary constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            annotations: Vec::new(),
            doc: None,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A function. Without a body it is abstract, which only interfaces allow
/// as-is; classes get a `TODO()` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Expression body, rendered as `= <body>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            annotations: Vec::new(),
            doc: None,
            body: None,
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, type_ref: TypeRef) -> Self {
        self.return_type = Some(type_ref);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
