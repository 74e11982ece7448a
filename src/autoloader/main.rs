use autoloader::api::Registries;
use autoloader::component::Component;
use autoloader::config::{RegistryConfig, CONFIG_FILENAME};
use autoloader::error::{AutoloadError, Result};
use autoloader::namespace::Namespace;
use autoloader::render::JinjaRenderer;
use clap::Parser;
use colored::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    match cli.command {
        Commands::Resolve {
            namespace,
            identifiers,
        } => handle_resolve(&root, namespace, &identifiers),
        Commands::Path {
            namespace,
            identifier,
        } => handle_path(&root, namespace, &identifier),
        Commands::Render { view, context } => handle_render(&root, &view, context.as_deref()),
        Commands::Config { init } => handle_config(&root, init),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "autoloader=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn handle_resolve(root: &Path, namespace: Namespace, identifiers: &[String]) -> Result<()> {
    let registries = Registries::open(root)?;
    for (i, identifier) in identifiers.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let component = registries.resolve(namespace, identifier)?;
        print_component(&component)?;
    }
    Ok(())
}

fn handle_path(root: &Path, namespace: Namespace, identifier: &str) -> Result<()> {
    let registries = Registries::open(root)?;
    let paths = registries.registry(namespace).paths(identifier);
    println!("{}", paths.unit.display());
    if let Some(template) = paths.template {
        println!("{}", template.display());
    }
    Ok(())
}

fn handle_render(root: &Path, view: &str, context: Option<&str>) -> Result<()> {
    let context = match context {
        Some(raw) => serde_json::from_str(raw).map_err(AutoloadError::Serialization)?,
        None => Value::Null,
    };
    if !matches!(context, Value::Object(_) | Value::Null) {
        return Err(AutoloadError::Render("--context must be a JSON object".to_string()));
    }

    let registries = Registries::open(root)?;
    let output = registries.render_view(&JinjaRenderer::new(), view, &context)?;
    println!("{}", output);
    Ok(())
}

fn handle_config(root: &Path, init: bool) -> Result<()> {
    let config = RegistryConfig::load(root)?;
    if init {
        config.save(root)?;
        println!(
            "{}",
            format!("Wrote {}", root.join(CONFIG_FILENAME).display()).green()
        );
        return Ok(());
    }

    for namespace in Namespace::ALL {
        let ns = config.namespace(namespace);
        println!(
            "{:<11} {}/*{}",
            namespace.to_string().bold(),
            ns.search_root.display(),
            ns.extension
        );
    }
    println!(
        "{:<11} {}/*{}",
        "templates".bold(),
        config.template_root.display(),
        config.template_ext
    );
    Ok(())
}

fn print_component(component: &Component) -> Result<()> {
    println!(
        "{} {}  {}",
        component.namespace().to_string().dimmed(),
        component.identifier().bold(),
        component.unit_path().display().to_string().dimmed()
    );
    let body =
        serde_json::to_string_pretty(component.value()).map_err(AutoloadError::Serialization)?;
    println!("{}", body);
    if let Some(template) = component.template() {
        println!("{}", "--- template ---".yellow());
        println!("{}", template);
    }
    Ok(())
}
