use anyhow::Result;
use clap::{Parser, Subcommand};
use skyline_keys::Settings;
use std::path::PathBuf;

mod cli;

use cli::{ImportArgs, ImportFileArgs, InstallBundledArgs, OutputFormat};

#[derive(Parser)]
#[command(name = "skyline-keys")]
#[command(about = "Import and install Skyline emulator key files", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Key store directory (overrides store.keys_dir)
    #[arg(long, global = true)]
    keys_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import every key file found in a directory
    Import(ImportArgs),

    /// Import a single key file
    ImportFile(ImportFileArgs),

    /// Install a bundled fallback key file
    InstallBundled(InstallBundledArgs),

    /// Show installed key files
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(keys_dir) = cli.keys_dir {
        settings.store.keys_dir = keys_dir;
    }
    settings.validate()?;

    init_logging(&settings.logging.level);

    match cli.command {
        Commands::Import(args) => cli::handle_import(args, &settings, cli.format),
        Commands::ImportFile(args) => cli::handle_import_file(args, &settings, cli.format),
        Commands::InstallBundled(args) => cli::handle_install_bundled(args, &settings, cli.format),
        Commands::Status => cli::handle_status(&settings, cli.format),
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
