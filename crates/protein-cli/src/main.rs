//! Protein CLI.
//!
//! Generates Kotlin API components from JSON descriptor files.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use protein_codegen::codegen::create_renderer;
use protein_codegen::config::load_json;
use protein_codegen::env::{module_candidates, WorkingDirProject};
use protein_codegen::ir::FunctionSpec;
use protein_codegen::tracking::{ErrorTracker, FailureCategory, TracingErrorTracker};
use protein_codegen::validate::ComponentFields;
use protein_codegen::{
    ApiBuilder, ComponentConfiguration, EmissionConfiguration, EmitReport, Generator, GeneratorConfig,
    GeneratorError, TypeDescriptor,
};

mod ui;

#[derive(Parser)]
#[command(name = "protein")]
#[command(version, about = "Protein - generates Kotlin API components from descriptors")]
struct Cli {
    /// Target language
    #[arg(short, long, global = true, default_value = "kotlin")]
    language: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write descriptors into the project's source tree
    Generate {
        /// JSON file with an array of type descriptors
        #[arg(short, long)]
        descriptors: PathBuf,

        /// Package of the generated files
        #[arg(short, long)]
        package: String,

        /// Sub-package appended to the package
        #[arg(long)]
        sub_package: Option<String>,

        /// Module directory below the project root
        #[arg(short, long)]
        module: Option<String>,

        /// Output root used instead of the current directory
        #[arg(short, long)]
        custom_path: Option<PathBuf>,

        /// Extra import (repeatable); bare names are taken from the package
        #[arg(short, long = "import")]
        imports: Vec<String>,

        /// Do not mirror generated files to stdout
        #[arg(long)]
        no_echo: bool,
    },

    /// Build and write a whole API component from its configuration
    Component {
        /// Component configuration JSON
        #[arg(short, long)]
        config: PathBuf,

        /// JSON array of interface functions (one per API operation)
        #[arg(long)]
        operations: Option<PathBuf>,

        /// JSON array of model descriptors
        #[arg(long)]
        models: Option<PathBuf>,

        /// JSON array of enum descriptors
        #[arg(long)]
        enums: Option<PathBuf>,

        /// Do not mirror generated files to stdout
        #[arg(long)]
        no_echo: bool,
    },

    /// Print rendered descriptors without writing files
    Preview {
        /// JSON file with an array of type descriptors
        #[arg(short, long)]
        descriptors: PathBuf,

        /// Package of the generated files
        #[arg(short, long, default_value = "")]
        package: String,
    },

    /// List directories that can receive generated code
    Modules {
        /// Project root
        #[arg(default_value = ".")]
        base: PathBuf,
    },

    /// Check whether component details are complete
    Check {
        /// Component name
        #[arg(long, default_value = "")]
        component: String,

        /// Domain (package prefix)
        #[arg(long, default_value = "")]
        domain: String,

        /// Schema URL
        #[arg(long, default_value = "")]
        swagger_url: String,
    },
}

fn main() -> miette::Result<()> {
    // stdout carries generated sources and listings; logs and status go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "protein_codegen=info,protein=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            descriptors,
            package,
            sub_package,
            module,
            custom_path,
            imports,
            no_echo,
        } => {
            let descriptors: Vec<TypeDescriptor> = load_json(&descriptors)?;
            let config = EmissionConfiguration {
                custom_path,
                module_name: module,
                package_name: package,
                sub_package,
                imports: Vec::new(),
            };

            let mut generator = generator(&cli.language, no_echo)?;
            let report = generator.generate_files(&config, &descriptors, &imports)?;
            finish(&report)?;
        }

        Commands::Component {
            config,
            operations,
            models,
            enums,
            no_echo,
        } => {
            let component: ComponentConfiguration = track_config(load_json(&config))?;
            ui::info(&format!("Building {}", component.interface_name()));

            let builder = ApiBuilder::new(component)
                .with_operations(load_optional::<FunctionSpec>(operations.as_deref())?)
                .with_models(load_optional::<TypeDescriptor>(models.as_deref())?)
                .with_enums(load_optional::<TypeDescriptor>(enums.as_deref())?);
            let mut builder = track_config(builder.load_additional_config())?;
            builder.build();

            let mut generator = generator(&cli.language, no_echo)?;
            let report = builder.generate_files(&mut generator)?;
            finish(&report)?;
        }

        Commands::Preview { descriptors, package } => {
            let descriptors: Vec<TypeDescriptor> = load_json(&descriptors)?;
            let renderer = create_renderer(&cli.language)?;
            let rendered = protein_codegen::codegen::generate_strings(renderer.as_ref(), &package, &descriptors)?;
            for text in rendered {
                println!("{}", text);
            }
        }

        Commands::Modules { base } => {
            let modules = module_candidates(&base);
            if modules.is_empty() {
                ui::dim("No module directories found.");
            }
            for module in modules {
                println!("{}", module);
            }
        }

        Commands::Check {
            component,
            domain,
            swagger_url,
        } => {
            let fields = ComponentFields {
                component_name: component,
                domain_name: domain,
                swagger_url,
                ..Default::default()
            };

            ui::info(&format!("Package {} {}", ui::symbols::DOT, fields.package_preview()));
            if fields.can_proceed() {
                ui::success("Ready to generate");
            } else {
                ui::error("Component name, domain and schema URL are required");
                return Err(miette::miette!("incomplete component details"));
            }
        }
    }

    Ok(())
}

fn generator(language: &str, no_echo: bool) -> miette::Result<Generator<WorkingDirProject>> {
    let config = GeneratorConfig {
        language: language.to_string(),
        echo: !no_echo,
    };
    let generator = Generator::new(config, WorkingDirProject)?;
    ui::print_compact_header(env!("CARGO_PKG_VERSION"), generator.emitter().renderer().language());
    Ok(generator)
}

/// Forwards configuration failures to the error tracker before returning them.
fn track_config<T>(result: Result<T, GeneratorError>) -> Result<T, GeneratorError> {
    result.inspect_err(|e| TracingErrorTracker.track(FailureCategory::Config, &e.to_string()))
}

fn load_optional<T: serde::de::DeserializeOwned>(path: Option<&Path>) -> miette::Result<Vec<T>> {
    match path {
        Some(path) => Ok(load_json(path)?),
        None => Ok(Vec::new()),
    }
}

/// Prints the outcome of each descriptor; fails when anything was not written.
fn finish(report: &EmitReport) -> miette::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_default();
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => ui::success(&ui::display_path(path, &cwd)),
            Err(failure) => ui::error(&failure.to_string()),
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        return Err(miette::miette!("{} of {} files were not written", failed, report.len()));
    }
    tracing::debug!(written = report.len(), "generation finished");
    Ok(())
}
