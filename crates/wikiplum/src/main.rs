//! wikiplum CLI - markdown wiki site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "wikiplum")]
#[command(about = "Markdown wiki site generator and frontmatter API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to wikiplum.toml config file
    #[arg(short, long, default_value = "wikiplum.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold content, templates and static directories
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the static site
    Build,

    /// Serve the frontmatter API
    Serve {
        /// Port to listen on (defaults to config or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to config or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Fetch pages from the remote repository instead of the content directory
        #[arg(long)]
        remote: bool,

        /// Also serve the built site
        #[arg(long)]
        site: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes)?;
        }
        Commands::Build => {
            commands::build::run(&cli.config)?;
        }
        Commands::Serve {
            port,
            host,
            remote,
            site,
        } => {
            let options = commands::serve::ServeOptions {
                port,
                host,
                remote,
                site,
            };
            commands::serve::run(&cli.config, options).await?;
        }
    }

    Ok(())
}
