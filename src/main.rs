use clap::Parser;
use scout::core::config::{self, CliOverrides, ScoutConfig};
use scout::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scout", about = "Terminal chat front-end for a research agent")]
struct Args {
    /// Research endpoint URL (overrides config and SCOUT_ENDPOINT)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Request timeout in seconds, 0 waits indefinitely
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Where to write the debug log
    #[arg(long, default_value = "scout.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            log::warn!("Config load failed: {e}");
            ScoutConfig::default()
        }
    };

    let cli = CliOverrides {
        endpoint: args.endpoint,
        timeout_secs: args.timeout,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Scout starting up with endpoint: {}", resolved.endpoint);

    tui::run(resolved)
}
