use campus_chat::core::config::{self, CliOverrides};
use campus_chat::core::topic::Topic;
use campus_chat::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "campus-chat", about = "Terminal client for the college assistant")]
struct Args {
    /// Topic to open with (starts a new conversation if it differs from the stored one)
    #[arg(short, long, value_enum)]
    topic: Option<Topic>,

    /// Discard the stored conversation for this terminal session
    #[arg(long)]
    fresh: bool,

    /// Keep the conversation in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using defaults");
        config::ChatConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            topic: args.topic,
            fresh: args.fresh,
            ephemeral: args.ephemeral,
        },
    );

    // Initialize file logger - writes to campus-chat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("campus-chat.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "campus-chat starting up against {} (session dir {})",
        resolved.api_base_url,
        resolved.session_dir.display()
    );

    tui::run(resolved)
}
