use heartbeat::{run_2d, Scene, Settings, SettingsConfig};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Settings file in `scenarios/`; built-in parameters when omitted
    #[arg(short, long)]
    file_name: Option<String>,

    /// Seed for the particle start positions
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    #[arg(long, default_value_t = 720.0)]
    height: f64,
}

// load here to keep main clean
fn load_settings(file_name: Option<&str>) -> Result<Settings> {
    let Some(file_name) = file_name else {
        return Ok(Settings::default());
    };

    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let config = SettingsConfig::from_path(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let settings = config
        .into_settings()
        .with_context(|| format!("validating {}", config_path.display()))?;

    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.file_name.as_deref())?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    let scene = Scene::new(settings, args.width, args.height);
    run_2d(scene);

    Ok(())
}
