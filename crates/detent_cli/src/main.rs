//! Detent CLI
//!
//! Format slider values, apply keys and replay interaction scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use detent_core::{KeyCode, SliderController, SliderEngine};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod script;

use config::DetentConfig;
use script::Script;

#[derive(Parser)]
#[command(name = "detent")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless slider value engine", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clamp and snap raw values
    Format {
        /// Slider config file (default: ./detent.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Raw values
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Apply one key press to a handle
    Key {
        /// Slider config file (default: ./detent.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Current values, comma separated
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Handle index
        #[arg(short, long, default_value = "0")]
        index: usize,

        /// Key name (ArrowLeft, ArrowRight, ArrowUp, ArrowDown, Home, End,
        /// PageUp, PageDown, Backspace, Delete)
        key: String,
    },

    /// Replay an interaction script and print every event as JSON
    Replay {
        /// Script file
        script: PathBuf,
    },

    /// Write a default detent.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a slider config
    Check {
        /// Slider config file (default: ./detent.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Format { config, values } => cmd_format(config.as_deref(), &values),

        Commands::Key {
            config,
            values,
            index,
            key,
        } => cmd_key(config.as_deref(), &values, index, &key),

        Commands::Replay { script } => cmd_replay(&script),

        Commands::Init { force } => cmd_init(force),

        Commands::Check { config } => cmd_check(config.as_deref()),
    }
}

fn cmd_format(config: Option<&Path>, values: &[f64]) -> Result<()> {
    let config = DetentConfig::load(config)?;
    let (engine, _) = SliderEngine::from_config(&config.slider);

    for raw in values {
        println!("{}", engine.format_value(*raw));
    }

    Ok(())
}

fn cmd_key(config: Option<&Path>, values: &[f64], index: usize, key: &str) -> Result<()> {
    let config = DetentConfig::load(config)?;
    let key: KeyCode = key.parse()?;

    let mut slider = SliderController::new(&config.slider, values);
    if index >= slider.values().len() {
        anyhow::bail!(
            "Handle index {} out of range ({} handle(s))",
            index,
            slider.values().len()
        );
    }

    if slider.key_down(key, index).is_empty() {
        warn!("{} ignored (slider disabled or keyboard off)", key);
    }

    println!(
        "{}",
        serde_json::to_string(slider.values()).context("Failed to serialize values")?
    );
    Ok(())
}

fn cmd_replay(path: &Path) -> Result<()> {
    let script = Script::load(path)?;
    info!("Replaying {} step(s) from {}", script.steps.len(), path.display());

    let replay = script.replay()?;
    for line in &replay.events {
        println!(
            "{}",
            serde_json::to_string(line).context("Failed to serialize event")?
        );
    }

    info!("Final values: {:?}", replay.values.as_slice());
    Ok(())
}

fn cmd_check(config: Option<&Path>) -> Result<()> {
    let config = DetentConfig::load(config)?;
    let (resolved, warnings) = config.resolve();

    if warnings.is_empty() {
        info!("Config OK");
    } else {
        for warning in &warnings {
            warn!("{}", warning);
        }
    }

    println!("{:#?}", resolved);
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = Path::new(config::DEFAULT_CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let content = DetentConfig::default().to_toml()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Created {}", path.display());
    Ok(())
}
