//! Vitrine command-line entry point.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_engine::cli;
use vitrine_engine::config::Config;
use vitrine_engine::content::ContentTypeRegistry;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compose and render catalog-block pages", long_about = None)]
struct Args {
    /// Base URL asset references resolve against.
    #[arg(long, global = true)]
    asset_base_url: Option<String>,

    /// Directory of Tera templates overriding the built-in page shell.
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,

    /// Site name used in the page title.
    #[arg(long, global = true)]
    site_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a stored page document to HTML.
    Render {
        /// Document JSON file, or `-` for stdin.
        file: PathBuf,
        /// Emit only the document markup, without the page shell.
        #[arg(long)]
        fragment: bool,
        /// Write HTML here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the authoring preview of each section and modal block.
    Preview {
        /// Document JSON file, or `-` for stdin.
        file: PathBuf,
    },
    /// Check a document against the authoring rules.
    Validate {
        /// Document JSON file, or `-` for stdin.
        file: PathBuf,
    },
    /// List the registered block variants and sections.
    Catalog,
}

fn main() -> Result<ExitCode> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = apply_overrides(
        Config::from_env().context("failed to load configuration")?,
        &args,
    )?;
    debug!(?config, "configuration loaded");

    let registry = ContentTypeRegistry::with_standard_catalog();
    let mut stdout = std::io::stdout().lock();

    match args.command {
        Command::Render {
            file,
            fragment,
            output,
        } => {
            let value = cli::load_document(&file)?;
            let rendered = cli::cmd_render(&config, &value, fragment)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered.html)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote rendered page");
                }
                None => stdout.write_all(rendered.html.as_bytes())?,
            }
        }
        Command::Preview { file } => {
            let value = cli::load_document(&file)?;
            cli::cmd_preview(&registry, &value, &mut stdout)?;
        }
        Command::Validate { file } => {
            let value = cli::load_document(&file)?;
            if cli::cmd_validate(&registry, &value, &mut stdout)? > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Catalog => cli::cmd_catalog(&registry, &mut stdout)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Command-line flags take precedence over the environment.
fn apply_overrides(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(url) = &args.asset_base_url {
        Config::check_base_url(url).context("--asset-base-url must be an http(s) URL")?;
        config.asset_base_url = url.clone();
    }
    if let Some(dir) = &args.template_dir {
        config.template_dir = Some(dir.clone());
    }
    if let Some(name) = &args.site_name {
        config.site_name = name.clone();
    }
    Ok(config)
}

/// Logs go to stderr so rendered HTML can be piped from stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
