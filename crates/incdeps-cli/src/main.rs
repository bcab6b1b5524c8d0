//! incdeps CLI
//!
//! Command-line interface for header dependency generation.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use incdeps_core::Config;
use incdeps_parser::{HeaderResolver, IncludeWalker};
use incdeps_rules::{generate, is_up_to_date, write_makefile};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Configuration file picked up from the root when `--config` is not given
const DEFAULT_CONFIG: &str = "incdeps.yaml";

#[derive(Parser)]
#[command(name = "incdeps")]
#[command(author, version, about = "Header dependency generator for makefiles", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArgs {
    /// Configuration file (default: incdeps.yaml under the root, if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Project root, overrides the configured one
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the dependency makefile
    Generate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Output file, relative to the root (default: from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the headers a file depends on
    Show {
        /// Source or header file, relative to the root
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Fail if the dependency makefile is missing or out of date
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate { config, output } => {
            let mut config = load_config(&config)?;
            if let Some(output) = output {
                config.rules.output = output;
            }
            cmd_generate(&config)?;
        }
        Commands::Show { file, config } => {
            cmd_show(&load_config(&config)?, &file)?;
        }
        Commands::Check { config } => {
            cmd_check(&load_config(&config)?)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ConfigArgs) -> Result<Config> {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Some(root.join(DEFAULT_CONFIG)).filter(|p| p.is_file()),
    };

    let mut config = match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            Config::load(&path)
                .with_context(|| format!("loading configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    config.validate()?;
    Ok(config)
}

fn cmd_generate(config: &Config) -> Result<()> {
    let generated = generate(config).context("generating dependencies")?;
    let out_path = config.output_path();

    write_makefile(&out_path, &generated.content)
        .with_context(|| format!("writing {}", out_path.display()))?;

    info!(
        "{} rules for {} of {} sources",
        generated.rules, generated.entries, generated.sources
    );
    Ok(())
}

fn cmd_show(config: &Config, file: &Path) -> Result<()> {
    let resolver = HeaderResolver::from_config(config);
    let mut walker = IncludeWalker::new(&resolver);

    let deps = walker
        .includes_of(file)
        .with_context(|| format!("walking includes of {}", file.display()))?;

    for dep in deps.iter() {
        println!("{}", dep.display());
    }
    debug!("{} headers, {:?}", deps.len(), walker.stats());
    Ok(())
}

fn cmd_check(config: &Config) -> Result<()> {
    let generated = generate(config).context("generating dependencies")?;
    let out_path = config.output_path();

    if !is_up_to_date(&out_path, &generated.content)? {
        bail!(
            "{} is out of date, run `incdeps generate`",
            out_path.display()
        );
    }

    info!("{} is up to date", out_path.display());
    Ok(())
}
