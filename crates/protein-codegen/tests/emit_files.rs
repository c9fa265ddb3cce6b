use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use protein_codegen::env::{FixedProject, NoProject};
use protein_codegen::ir::{PropertySpec, TypeRef};
use protein_codegen::tracking::{ErrorTracker, FailureCategory};
use protein_codegen::{
    ApiBuilder, ComponentConfiguration, EmissionConfiguration, Generator, GeneratorConfig, GeneratorError,
    TypeDescriptor,
};

#[derive(Clone, Default)]
struct RecordingTracker(Rc<RefCell<Vec<(FailureCategory, String)>>>);

impl ErrorTracker for RecordingTracker {
    fn track(&self, category: FailureCategory, message: &str) {
        self.0.borrow_mut().push((category, message.to_string()));
    }
}

fn quiet() -> GeneratorConfig {
    GeneratorConfig {
        echo: false,
        ..GeneratorConfig::default()
    }
}

fn generator(root: &Path, tracker: &RecordingTracker) -> Generator<FixedProject> {
    Generator::new(quiet(), FixedProject(root.to_path_buf()))
        .unwrap()
        .with_tracker(Box::new(tracker.clone()))
}

fn model(name: &str) -> TypeDescriptor {
    TypeDescriptor::data_class(name)
        .with_member(PropertySpec::new("id", TypeRef::new("kotlin.Long")))
        .with_member(PropertySpec::new("label", TypeRef::new("kotlin.String").nullable()))
}

#[test]
fn widget_lands_under_package_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let mut generator = generator(dir.path(), &tracker);

    let report = generator
        .generate_files(&EmissionConfiguration::new("com.example"), &[model("Widget")], &[])
        .unwrap();

    let expected = dir.path().join("src/main/java/com/example/Widget.kt");
    assert_eq!(report.written_paths().collect::<Vec<_>>(), vec![expected.as_path()]);

    let content = std::fs::read_to_string(&expected).unwrap();
    assert!(content.starts_with("package com.example\n"));
    assert!(content.contains("data class Widget("));
    assert!(tracker.0.borrow().is_empty());
}

#[test]
fn module_directory_sits_between_root_and_source_root() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let mut generator = generator(dir.path(), &tracker);

    let config = EmissionConfiguration::new("com.example").with_module("core");
    generator.generate_files(&config, &[model("Widget")], &[]).unwrap();

    assert!(dir.path().join("core/src/main/java/com/example/Widget.kt").is_file());
    assert!(!dir.path().join("src").exists());
}

#[test]
fn custom_path_works_without_a_project() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut generator = Generator::new(quiet(), NoProject).unwrap();

    let config = EmissionConfiguration::new("com.example").with_custom_path(dir.path());
    generator.generate_files(&config, &[model("Widget")], &[]).unwrap();

    assert!(dir.path().join("src/main/java/com/example/Widget.kt").is_file());
}

#[test]
fn reemission_is_idempotent() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let mut generator = generator(dir.path(), &tracker);
    let config = EmissionConfiguration::new("com.example");
    let path = dir.path().join("src/main/java/com/example/Widget.kt");

    generator.generate_files(&config, &[model("Widget")], &[]).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();

    let report = generator.generate_files(&config, &[model("Widget")], &[]).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert!(report.is_success());
    assert_eq!(first, second);
}

#[test]
fn reemission_overwrites_previous_content() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let mut generator = generator(dir.path(), &tracker);
    let config = EmissionConfiguration::new("com.example");
    let path = dir.path().join("src/main/java/com/example/Widget.kt");

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "stale content that is much longer than anything generated ".repeat(20)).unwrap();

    generator.generate_files(&config, &[model("Widget")], &[]).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(!content.contains("stale"));
}

#[test]
fn failed_descriptor_does_not_stop_the_batch() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let mut generator = generator(dir.path(), &tracker);

    // A directory where the second file should go makes that write fail.
    let package_dir = dir.path().join("src/main/java/com/example");
    std::fs::create_dir_all(package_dir.join("Broken.kt")).unwrap();

    let descriptors = vec![model("First"), model("Broken"), model("Third")];
    let report = generator
        .generate_files(&EmissionConfiguration::new("com.example"), &descriptors, &[])
        .unwrap();

    assert_eq!(report.len(), 3);
    assert!(!report.is_success());
    assert!(package_dir.join("First.kt").is_file());
    assert!(package_dir.join("Third.kt").is_file());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].descriptor_name, "Broken");

    let tracked = tracker.0.borrow();
    assert_eq!(tracked.len(), 1);
    assert_eq!(tracked[0].0, FailureCategory::Io);
    assert!(tracked[0].1.contains("Broken"));
}

#[test]
fn precondition_violations_are_not_tracked() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let mut generator = generator(dir.path(), &tracker);

    let result = generator.generate_files(&EmissionConfiguration::new("com.example"), &[], &[]);
    assert!(matches!(result, Err(GeneratorError::EmptyBatch)));

    let empty = TypeDescriptor::interface("NoMethods");
    let result = generator.generate_files(&EmissionConfiguration::new("com.example"), &[empty], &[]);
    assert!(matches!(result, Err(GeneratorError::InvalidDescriptor { .. })));

    assert!(tracker.0.borrow().is_empty());
}

#[test]
fn generate_strings_performs_no_io() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let generator = generator(dir.path(), &tracker);

    assert!(generator.generate_strings("com.example", &[]).unwrap().is_empty());

    let rendered = generator.generate_strings("com.example", &[model("Widget")]).unwrap();
    assert_eq!(rendered.len(), 1);
    assert!(rendered[0].starts_with("package com.example\n"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn api_builder_emits_component() {
    let dir = tempfile::TempDir::new().unwrap();
    let tracker = RecordingTracker::default();
    let mut generator = generator(dir.path(), &tracker);

    let additional_path = dir.path().join("additional.json");
    std::fs::write(
        &additional_path,
        r#"{ "additional_methods": [ {
            "api_paths": [ { "type": "GET", "path": "/health" } ],
            "method_name": "health",
            "return_type": "com.example.api.Health"
        } ] }"#,
    )
    .unwrap();

    let component = ComponentConfiguration {
        package_name: "com.example.api".to_string(),
        component_name: "Status".to_string(),
        module_name: "app".to_string(),
        additional_config: additional_path.to_string_lossy().into_owned(),
        ..Default::default()
    };

    let mut builder = ApiBuilder::new(component)
        .with_models(vec![model("Health")])
        .load_additional_config()
        .unwrap();
    builder.build();

    let report = builder.generate_files(&mut generator).unwrap();
    assert!(report.is_success());

    let package_dir = dir.path().join("app/src/main/java/com/example/api");
    let interface = std::fs::read_to_string(package_dir.join("StatusApiInterface.kt")).unwrap();
    assert!(interface.contains("import retrofit2.http.GET\n"));
    assert!(interface.contains("@GET(\"health\")\n  fun health(): Single<Health>\n"));
    assert!(!interface.contains("import com.example.api.Health"));
    assert!(package_dir.join("Health.kt").is_file());
}
