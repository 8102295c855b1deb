use clap::Parser;
use hamsi::core::config::{self, CliOverrides, HamsiConfig};
use hamsi::core::mode::ModeId;
use hamsi::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "hamsi", about = "Simulated Turkish chat assistant for the terminal")]
struct Args {
    /// Conversation mode to start in
    #[arg(short, long, value_enum)]
    mode: Option<ModeId>,

    /// Milliseconds before the assistant replies
    #[arg(long = "delay-ms")]
    delay_ms: Option<u64>,

    /// Seed for reply selection (repeatable conversations)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to hamsi.log in current directory.
    // Opened wide so config loading is logged; narrowed once the level is resolved.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("hamsi.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        HamsiConfig::default()
    });
    let cli = CliOverrides {
        mode: args.mode,
        reply_delay_ms: args.delay_ms,
        rng_seed: args.seed,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::set_max_level(resolved.log_level);

    log::info!(
        "Hamsi starting up (mode: {}, reply delay: {:?}, seed: {:?})",
        resolved.default_mode,
        resolved.reply_delay,
        resolved.rng_seed
    );

    tui::run(resolved)
}
