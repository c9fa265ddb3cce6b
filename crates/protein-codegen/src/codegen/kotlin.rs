//! Kotlin source rendering.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::ir::{Annotation, FunctionSpec, ParameterSpec, PropertySpec, TypeDescriptor, TypeKind, TypeRef};
use crate::naming::escape_identifier;

use super::{Renderer, SourceFile};

const INDENT: &str = "  ";

/// Packages Kotlin/JVM imports implicitly.
const DEFAULT_PACKAGES: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.jvm",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
    "java.lang",
];

/// Renders descriptors as Kotlin files below `src/main/java`.
#[derive(Debug, Default)]
pub struct KotlinRenderer;

impl KotlinRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for KotlinRenderer {
    fn language(&self) -> &str {
        "kotlin"
    }

    fn extension(&self) -> &str {
        "kt"
    }

    fn source_root(&self) -> &Path {
        Path::new("src/main/java")
    }

    fn render(&self, file: &SourceFile<'_>) -> String {
        let imports = ImportTable::build(file);
        let mut output = String::new();

        if !file.namespace.is_empty() {
            output.push_str(&format!("package {}\n\n", escape_qualified(file.namespace)));
        }

        if !imports.imports.is_empty() {
            for import in &imports.imports {
                output.push_str(&format!("import {}\n", escape_qualified(import)));
            }
            output.push('\n');
        }

        let writer = DeclarationWriter { imports: &imports };
        writer.write_type(&mut output, file.descriptor);
        output
    }
}

// =============================================================================
// Imports
// =============================================================================

/// Decides which names are imported and how each type reference is spelled.
struct ImportTable {
    imports: BTreeSet<String>,
    /// Simple (top-level) class name -> the qualified class that owns it.
    claimed: HashMap<String, String>,
}

impl ImportTable {
    fn build(file: &SourceFile<'_>) -> Self {
        let mut table = Self {
            imports: BTreeSet::new(),
            claimed: HashMap::new(),
        };

        let own = qualify(file.namespace, &file.descriptor.name);
        table.claimed.insert(file.descriptor.name.clone(), own);

        // An import whose simple name is already taken would shadow or clash.
        for import in file.imports {
            let simple = import.rsplit('.').next().unwrap_or(import);
            match table.claimed.get(simple) {
                Some(owner) if owner != import => {
                    tracing::debug!(%import, %owner, "skipping clashing import");
                }
                Some(_) => {}
                None => {
                    table.claimed.insert(simple.to_string(), import.clone());
                    table.imports.insert(import.clone());
                }
            }
        }

        for type_ref in file.descriptor.referenced_types() {
            let (package, class) = type_ref.split_name();
            if package.is_empty() {
                continue;
            }
            let top = top_level(class);
            let qualified = qualify(package, top);
            if table.claimed.contains_key(top) {
                continue;
            }
            table.claimed.insert(top.to_string(), qualified.clone());
            if package != file.namespace && !DEFAULT_PACKAGES.contains(&package) {
                table.imports.insert(qualified);
            }
        }

        table
    }

    /// The spelling of a type reference's class name in this file.
    fn spell(&self, type_ref: &TypeRef) -> String {
        let (package, class) = type_ref.split_name();
        if package.is_empty() {
            return escape_qualified(class);
        }
        let top = top_level(class);
        match self.claimed.get(top) {
            Some(owner) if *owner == qualify(package, top) => escape_qualified(class),
            _ => escape_qualified(&type_ref.name),
        }
    }

    fn type_name(&self, type_ref: &TypeRef) -> String {
        let mut name = self.spell(type_ref);
        if !type_ref.arguments.is_empty() {
            let arguments: Vec<String> = type_ref.arguments.iter().map(|a| self.type_name(a)).collect();
            name.push_str(&format!("<{}>", arguments.join(", ")));
        }
        if type_ref.nullable {
            name.push('?');
        }
        name
    }
}

fn qualify(package: &str, class: &str) -> String {
    if package.is_empty() {
        class.to_string()
    } else {
        format!("{}.{}", package, class)
    }
}

fn top_level(class: &str) -> &str {
    class.split('.').next().unwrap_or(class)
}

fn escape_qualified(name: &str) -> String {
    name.split('.').map(escape_identifier).collect::<Vec<_>>().join(".")
}

// =============================================================================
// Declarations
// =============================================================================

struct DeclarationWriter<'a> {
    imports: &'a ImportTable,
}

impl DeclarationWriter<'_> {
    fn write_type(&self, out: &mut String, descriptor: &TypeDescriptor) {
        if let Some(doc) = &descriptor.doc {
            write_doc(out, doc, 0);
        }

        let name = escape_identifier(&descriptor.name);
        match descriptor.kind {
            TypeKind::Class { data } => self.write_class(out, descriptor, &name, data),
            TypeKind::Interface => self.write_interface(out, descriptor, &name),
            TypeKind::Enum => self.write_enum(out, descriptor, &name),
        }
    }

    fn write_class(&self, out: &mut String, descriptor: &TypeDescriptor, name: &str, data: bool) {
        let properties: Vec<&PropertySpec> = descriptor.properties().collect();
        let functions: Vec<&FunctionSpec> = descriptor.functions().collect();

        // A data class needs at least one constructor property.
        let keyword = if data && !properties.is_empty() { "data class" } else { "class" };
        out.push_str(&format!("{} {}", keyword, name));

        if !properties.is_empty() {
            out.push_str("(\n");
            let params: Vec<String> = properties
                .iter()
                .map(|p| format!("{}{}val {}", INDENT, self.inline_annotations(&p.annotations), self.declaration(&p.name, &p.type_ref)))
                .collect();
            out.push_str(&params.join(",\n"));
            out.push_str("\n)");
        }

        if functions.is_empty() {
            out.push('\n');
            return;
        }

        out.push_str(" {\n");
        self.write_functions(out, &functions, true);
        out.push_str("}\n");
    }

    fn write_interface(&self, out: &mut String, descriptor: &TypeDescriptor, name: &str) {
        out.push_str(&format!("interface {} {{\n", name));

        let properties: Vec<&PropertySpec> = descriptor.properties().collect();
        for property in &properties {
            if let Some(doc) = &property.doc {
                write_doc(out, doc, 1);
            }
            self.write_annotations(out, &property.annotations, 1);
            out.push_str(&format!("{}val {}\n", INDENT, self.declaration(&property.name, &property.type_ref)));
        }

        let functions: Vec<&FunctionSpec> = descriptor.functions().collect();
        if !properties.is_empty() && !functions.is_empty() {
            out.push('\n');
        }
        self.write_functions(out, &functions, false);
        out.push_str("}\n");
    }

    fn write_enum(&self, out: &mut String, descriptor: &TypeDescriptor, name: &str) {
        out.push_str(&format!("enum class {} {{\n", name));

        let constants: Vec<String> = descriptor
            .constants()
            .map(|c| format!("{}{}", INDENT, escape_identifier(c)))
            .collect();
        out.push_str(&constants.join(",\n"));

        let functions: Vec<&FunctionSpec> = descriptor.functions().collect();
        if functions.is_empty() {
            out.push('\n');
        } else {
            out.push_str(";\n\n");
            self.write_functions(out, &functions, true);
        }
        out.push_str("}\n");
    }

    /// Writes functions separated by blank lines. `needs_body` gives abstract
    /// functions a `TODO()` body where abstract members are not allowed.
    fn write_functions(&self, out: &mut String, functions: &[&FunctionSpec], needs_body: bool) {
        for (i, function) in functions.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if let Some(doc) = &function.doc {
                write_doc(out, doc, 1);
            }
            self.write_annotations(out, &function.annotations, 1);

            let params: Vec<String> = function.parameters.iter().map(|p| self.parameter(p)).collect();
            out.push_str(&format!("{}fun {}({})", INDENT, escape_identifier(&function.name), params.join(", ")));
            if let Some(ret) = &function.return_type {
                out.push_str(&format!(": {}", self.imports.type_name(ret)));
            }
            match (&function.body, needs_body) {
                (Some(body), _) => out.push_str(&format!(" = {}", body)),
                (None, true) => out.push_str(" = TODO()"),
                (None, false) => {}
            }
            out.push('\n');
        }
    }

    fn write_annotations(&self, out: &mut String, annotations: &[Annotation], level: usize) {
        for annotation in annotations {
            out.push_str(&INDENT.repeat(level));
            out.push_str(&self.annotation(annotation));
            out.push('\n');
        }
    }

    fn inline_annotations(&self, annotations: &[Annotation]) -> String {
        annotations.iter().map(|a| format!("{} ", self.annotation(a))).collect()
    }

    fn annotation(&self, annotation: &Annotation) -> String {
        let name = self.imports.type_name(&annotation.type_ref);
        if annotation.arguments.is_empty() {
            format!("@{}", name)
        } else {
            format!("@{}({})", name, annotation.arguments.join(", "))
        }
    }

    fn parameter(&self, parameter: &ParameterSpec) -> String {
        format!(
            "{}{}",
            self.inline_annotations(&parameter.annotations),
            self.declaration(&parameter.name, &parameter.type_ref)
        )
    }

    fn declaration(&self, name: &str, type_ref: &TypeRef) -> String {
        format!("{}: {}", escape_identifier(name), self.imports.type_name(type_ref))
    }
}

fn write_doc(out: &mut String, doc: &str, level: usize) {
    let indent = INDENT.repeat(level);
    out.push_str(&format!("{}/**\n", indent));
    for line in doc.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{} *\n", indent));
        } else {
            out.push_str(&format!("{} * {}\n", indent, escape_doc(line)));
        }
    }
    out.push_str(&format!("{} */\n", indent));
}

/// Kotlin block comments nest, so neither `/*` nor `*/` may survive in KDoc.
fn escape_doc(line: &str) -> String {
    line.replace("*/", "&#42;/").replace("/*", "/&#42;")
}
