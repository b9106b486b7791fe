use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use bpx_preset::{create, NodeModulesLocator, RawOptions};

/// Resolve a react-app Babel configuration and print it as JSON.
#[derive(Parser, Debug)]
#[command(name = "bpx", version, about)]
struct Cli {
    /// Build environment (overrides BABEL_ENV / NODE_ENV)
    #[arg(long)]
    env: Option<String>,

    /// Path to a JSON file with partial preset options
    #[arg(long)]
    options: Option<PathBuf>,

    /// Project directory used to resolve node_modules packages
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // BABEL_ENV takes precedence over NODE_ENV, matching the transform
    // engine's own environment handling. A missing selector becomes the
    // empty string so the factory reports it in its validation error.
    let environment = match cli.env {
        Some(env) => env,
        None => std::env::var("BABEL_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .unwrap_or_default(),
    };
    debug!("resolving configuration for environment {:?}", environment);

    let raw = match &cli.options {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RawOptions::from_json(&contents)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => RawOptions::new(),
    };

    let locator = NodeModulesLocator::new(&cli.project_dir);
    let config = create(&environment, &raw, &locator)?;

    let output = if cli.compact {
        config.to_json()?
    } else {
        config.to_json_pretty()?
    };
    println!("{}", output);

    Ok(())
}
