use autoloader::namespace::Namespace;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "autoloader", version = get_version())]
#[command(about = "Resolve models, controllers and views by naming convention", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root holding autoloader.json, classes/ and templates/
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one or more components and print them
    #[command(alias = "r")]
    Resolve {
        /// Namespace: model, controller or view
        namespace: Namespace,

        /// Identifiers to resolve (e.g. Foo_Bar)
        #[arg(required = true, num_args = 1..)]
        identifiers: Vec<String>,
    },

    /// Print where an identifier's unit (and template) would live
    #[command(alias = "p")]
    Path {
        /// Namespace: model, controller or view
        namespace: Namespace,

        /// Identifier (e.g. Foo_Bar)
        identifier: String,
    },

    /// Render a view through its template
    Render {
        /// View identifier (e.g. Home_Index)
        view: String,

        /// JSON object merged over the view's own fields
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to autoloader.json
        #[arg(long)]
        init: bool,
    },
}
