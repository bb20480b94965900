//! Avakio CLI
//!
//! Validate chart configurations and render them without a host UI:
//! - `render` writes one chart as SVG, PNG or JPEG
//! - `check` prints configuration diagnostics
//! - `demos` renders every configuration in a directory

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use avakio_cli::{chart_files, load_chart, render_chart_file, OutputFormat, RenderOptions};

/// Render and validate Avakio chart configurations
#[derive(Parser)]
#[command(name = "avakio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a chart configuration to an image
    Render {
        /// Chart configuration (.toml or .json)
        config: PathBuf,

        /// Output path (defaults to the config path with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Container width override
        #[arg(long)]
        width: Option<f32>,

        /// Container height override
        #[arg(long)]
        height: Option<f32>,
    },

    /// Print diagnostics for a chart configuration
    Check {
        /// Chart configuration (.toml or .json)
        config: PathBuf,
    },

    /// Render every configuration in a directory
    Demos {
        /// Directory of chart configurations
        #[arg(default_value = "demos")]
        dir: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "target/demos")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            config,
            output,
            format,
            width,
            height,
        } => {
            let format = format
                .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
                .unwrap_or_default();
            let output = output.unwrap_or_else(|| config.with_extension(format.extension()));
            let options = RenderOptions {
                format,
                width,
                height,
            };
            let written = render_chart_file(&config, &output, &options)?;
            println!("{}", written.display());
        }
        Commands::Check { config } => {
            let chart = load_chart(&config)?;
            let warnings = chart.diagnostics();
            if warnings.is_empty() {
                println!("{}: ok", config.display());
            } else {
                for warning in &warnings {
                    println!("{}: warning: {}", config.display(), warning);
                }
            }
        }
        Commands::Demos {
            dir,
            output,
            format,
        } => {
            let files = chart_files(&dir)?;
            if files.is_empty() {
                anyhow::bail!("No chart configurations found in {}", dir.display());
            }
            fs::create_dir_all(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;

            let options = RenderOptions {
                format,
                ..RenderOptions::default()
            };
            let mut failed = 0;
            for file in &files {
                let Some(stem) = file.file_stem() else {
                    continue;
                };
                let target = output.join(stem).with_extension(format.extension());
                if let Err(error) = render_chart_file(file, &target, &options) {
                    warn!("{:#}", error);
                    failed += 1;
                }
            }
            info!(rendered = files.len() - failed, failed, "demos finished");
            if failed > 0 {
                anyhow::bail!("{failed} of {} demos failed to render", files.len());
            }
        }
    }

    Ok(())
}
