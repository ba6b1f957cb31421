use anyhow::{Context, Result};
use blockfilter_core::{AppConfig, BlockDevice, LogFormat, LoggingConfig};
use blockfilter_filter::{register_builtin_filters, Controller, ControllerBroadcast};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// blockfilter - decide which discovered block devices to expose
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the filter configuration file
    #[arg(short, long, env = "BLOCKFILTER_CONFIG")]
    config: Option<PathBuf>,

    /// YAML file with the discovered devices to evaluate
    #[arg(short, long)]
    devices: PathBuf,
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_config_builder(path)
            .with_context(|| format!("Failed to load config file: {:?}", path)),
        None => Ok(AppConfig::default()),
    }
}

fn load_devices(path: &Path) -> Result<Vec<BlockDevice>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read devices file: {:?}", path))?;
    serde_yaml::from_str(&contents).context("Failed to parse devices file")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config.logging);

    let devices = load_devices(&args.devices)?;
    info!(count = devices.len(), "Loaded devices");

    let broadcast = ControllerBroadcast::global();
    let controller = Arc::new(Controller::new(config));

    let registering = tokio::spawn(register_builtin_filters(broadcast));
    broadcast.publish(Arc::clone(&controller))?;
    let registered = registering.await??;
    info!(registered, "Filters registered");

    controller.start_filters();

    for device in &devices {
        if controller.apply_filters(device) {
            info!(device = %device.path, model = %device.attributes.model, "Device accepted");
        } else {
            warn!(device = %device.path, model = %device.attributes.model, "Device filtered out");
        }
    }

    Ok(())
}
