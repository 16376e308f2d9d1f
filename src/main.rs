use anyhow::{Context, Result};
use biota_lib::app::App;
use biota_lib::model::config::AppConfig;
use biota_lib::model::metrics::init_logging;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to simulate (overrides the config file)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Random seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level: tracing::Level = args
        .log_level
        .parse()
        .with_context(|| format!("invalid log level {:?}", args.log_level))?;
    init_logging(level);

    let mut config = AppConfig::load(&args.config)?;
    if let Some(ticks) = args.ticks {
        config.simulation.ticks = ticks;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    config.validate()?;

    let mut app = App::new(config)?;
    tracing::info!(
        seed = app.world.seed(),
        fingerprint = %app.world.config.fingerprint(),
        ticks = app.target_ticks,
        "Starting headless simulation"
    );

    let summary = app.run();
    let json = serde_json::to_string_pretty(&summary)?;
    tracing::info!(summary = %json, "Final population");
    Ok(())
}
