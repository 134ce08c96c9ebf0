//! `obt`: build and demo tooling for Origami components.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use obt_sdk::build::BuildEnv;
use obt_sdk::demo::DemoFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "obt", version, about = "Origami build tools")]
#[command(styles = output::clap_styles())]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build demo pages into <cwd>/demos/
    Demo(DemoArgs),
    /// Compile the component's JavaScript and Sass into the build folder
    Build(BuildArgs),
}

#[derive(Debug, Args)]
pub(crate) struct DemoArgs {
    /// Component directory
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Demo config file, relative to the component directory
    #[arg(long)]
    pub demo_config: Option<PathBuf>,

    /// Comma-separated demo names to build, e.g. `test1,test2`
    #[arg(long)]
    pub demo_filter: Option<DemoFilter>,

    /// Brand applied to every demo stylesheet
    #[arg(long, env = "OBT_BRAND")]
    pub brand: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct BuildArgs {
    /// Component directory
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// JavaScript entry point (defaults to main.js when declared in bower.json)
    #[arg(long)]
    pub js: Option<PathBuf>,

    /// Sass entry point (defaults to main.scss when declared in bower.json)
    #[arg(long)]
    pub sass: Option<PathBuf>,

    /// Output directory (default: <cwd>/build)
    #[arg(long)]
    pub build_folder: Option<PathBuf>,

    /// Output JavaScript file name (default: main.js)
    #[arg(long)]
    pub build_js: Option<String>,

    /// Output CSS file name (default: main.css)
    #[arg(long)]
    pub build_css: Option<String>,

    /// Build environment: development or production
    #[arg(long, default_value_t = BuildEnv::Development, env = "OBT_ENV")]
    pub env: BuildEnv,

    /// Write source maps outside development
    #[arg(long)]
    pub source_maps: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Demo(args) => {
            let cli_config = cli_config::load_cli_config(&args.cwd);
            commands::handle_demo_command(args, &cli_config).await
        }
        Commands::Build(args) => {
            let cli_config = cli_config::load_cli_config(&args.cwd);
            commands::handle_build_command(args, &cli_config).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "obt=debug,obt_sdk=debug"
    } else {
        "obt=info,obt_sdk=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
