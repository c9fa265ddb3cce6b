//! Additional API methods declared in a JSON side file.
//!
//! Lets a component carry endpoints its schema does not describe:
//!
//! ```json
//! {
//!   "additional_methods": [{
//!     "api_paths": [{ "type": "Url", "path": null }],
//!     "method_name": "getMyExternalIp",
//!     "return_type": "com.example.entity.InfoIpExternal",
//!     "parameters": [{ "annotation": "Url", "type": "String", "name": "url" }]
//!   }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::config::load_json;
use crate::diagnostic::GeneratorError;
use crate::ir::{Annotation, FunctionSpec, ParameterSpec, TypeRef};
use crate::naming::camelize_dotted;

const RETROFIT: &str = "retrofit2.http";
const SINGLE: &str = "io.reactivex.Single";
const COMPLETABLE: &str = "io.reactivex.Completable";
const MULTIPART_PART: &str = "okhttp3.MultipartBody.Part";

/// Root of the additional-methods file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdditionalConfig {
    pub additional_methods: Vec<AdditionalMethod>,
}

impl AdditionalConfig {
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        load_json(path)
    }

    /// Interface functions for every declared method, in file order.
    pub fn functions(&self) -> Vec<FunctionSpec> {
        self.additional_methods.iter().map(AdditionalMethod::to_function).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdditionalMethod {
    pub api_paths: Vec<ApiPath>,
    pub method_name: String,
    pub return_type: String,
    pub parameters: Vec<MethodParameter>,
}

impl AdditionalMethod {
    /// An abstract `fun` returning `Single<return_type>`, or `Completable`
    /// when no return type is declared.
    pub fn to_function(&self) -> FunctionSpec {
        let return_type = if self.return_type.trim().is_empty() {
            TypeRef::new(COMPLETABLE)
        } else {
            TypeRef::parameterized(SINGLE, vec![TypeRef::new(self.return_type.trim())])
        };

        let mut function = FunctionSpec::new(&self.method_name)
            .returns(return_type)
            .with_doc(self.summary());
        function.annotations = self.api_paths.iter().map(ApiPath::annotation).collect();
        function.parameters = self.parameters.iter().map(MethodParameter::to_parameter).collect();
        function
    }

    fn summary(&self) -> String {
        let mut doc = format!("Additional method `{}`.", self.method_name);
        for api_path in &self.api_paths {
            match &api_path.path {
                Some(path) => doc.push_str(&format!("\n{} {}", api_path.kind, path)),
                None => doc.push_str(&format!("\n{}", api_path.kind)),
            }
        }
        for parameter in &self.parameters {
            let line = format!("@param {} {} {}", parameter.name, parameter.annotation, parameter.type_name);
            doc.push('\n');
            doc.push_str(line.trim_end());
        }
        doc
    }
}

/// An HTTP verb (or `Multipart`) with an optional relative path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiPath {
    #[serde(rename = "type")]
    pub kind: String,
    pub path: Option<String>,
}

impl ApiPath {
    /// Maps the declared type onto a Retrofit annotation. Unknown types fall
    /// back to `GET`.
    pub fn annotation(&self) -> Annotation {
        let kind = self.kind.to_ascii_uppercase();
        let verb = ["GET", "POST", "PUT", "PATCH", "DELETE"]
            .into_iter()
            .find(|verb| kind.contains(verb));

        let verb = match verb {
            Some(verb) => verb,
            None if kind.contains("MULTIPART") => return Annotation::new(format!("{}.Multipart", RETROFIT)),
            None => "GET",
        };

        let type_name = format!("{}.{}", RETROFIT, verb);
        match &self.path {
            Some(path) => Annotation::with_string(type_name, path.strip_prefix('/').unwrap_or(path)),
            None => Annotation::new(type_name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MethodParameter {
    pub annotation: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
}

impl MethodParameter {
    pub fn to_parameter(&self) -> ParameterSpec {
        let name = camelize_dotted(&self.name);
        let annotation = self.annotation.to_ascii_lowercase();

        if annotation.trim().is_empty() {
            ParameterSpec::new(name, TypeRef::new(MULTIPART_PART))
        } else if annotation.contains("body") {
            ParameterSpec::new(name, TypeRef::new(self.type_name.trim()))
                .with_annotation(Annotation::new(format!("{}.Body", RETROFIT)))
        } else if annotation.contains("formdata") {
            ParameterSpec::new(name, TypeRef::new(MULTIPART_PART))
                .with_annotation(Annotation::new(format!("{}.Part", RETROFIT)))
        } else if annotation.contains("url") {
            ParameterSpec::new(name, TypeRef::new("kotlin.String"))
                .with_annotation(Annotation::new(format!("{}.Url", RETROFIT)))
        } else {
            ParameterSpec::new(name, TypeRef::new("kotlin.Any"))
        }
    }
}
