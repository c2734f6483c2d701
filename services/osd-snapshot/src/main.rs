//! Headless OSD renderer.
//!
//! Loads an OSD config, feeds one JSON telemetry snapshot through the
//! engine and writes the resulting overlay to a PNG.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use osd_common::OsdConfig;
use renderer::OsdContext;

#[derive(Parser, Debug)]
#[command(name = "osd-snapshot")]
#[command(about = "Render one OSD frame from a telemetry snapshot")]
struct Args {
    /// OSD config file (JSON); built-in defaults when omitted
    #[arg(short, long, env = "OSD_CONFIG")]
    config: Option<PathBuf>,

    /// Telemetry snapshot (JSON)
    #[arg(short, long)]
    telemetry: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "osd.png")]
    output: PathBuf,

    /// Override the config's resource root
    #[arg(long, env = "OSD_RESOURCE_ROOT")]
    resource_root: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => OsdConfig::from_file(path)?,
        None => OsdConfig::default(),
    };
    if let Some(root) = args.resource_root {
        config.resource_root = root;
    }
    info!(
        config = ?args.config,
        resource_root = %config.resource_root,
        width = config.width,
        height = config.height,
        "Starting OSD snapshot"
    );

    let payload = std::fs::read(&args.telemetry)
        .with_context(|| format!("reading telemetry {}", args.telemetry.display()))?;

    let mut context = OsdContext::new(config)?;
    context.update_state(&payload)?;
    if !context.render() {
        bail!("nothing was rendered for {}", args.telemetry.display());
    }

    let fb = context.framebuffer();
    let image = image::RgbaImage::from_raw(fb.width(), fb.height(), fb.to_rgba_bytes())
        .context("framebuffer size does not match its pixel data")?;
    image
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        drawn_pixels = fb.count_drawn(),
        "Snapshot written"
    );
    Ok(())
}
