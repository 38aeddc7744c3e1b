//! Terminal WebSocket chat client.
//!
//! Connects to a relay endpoint, sends every line typed at the prompt as a
//! plain text message, and prints every message the relay delivers.
//! There is no reconnection: the client exits when the connection ends.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tegami-client
//! cargo run --bin tegami-client -- --url ws://127.0.0.1:9000
//! ```

use clap::Parser;

use tegami_client::{ClientConfig, config};
use tegami_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tegami-client")]
#[command(about = "Minimal WebSocket chat client", long_about = None)]
struct Args {
    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = config::DEFAULT_ENDPOINT)]
    url: String,

    /// Prompt shown before the input line
    #[arg(short = 'p', long, default_value = config::DEFAULT_PROMPT)]
    prompt: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Library and binary share the `tegami_client` target
    setup_logger(&[env!("CARGO_PKG_NAME")], "info");
    tracing::info!("Running");

    let args = Args::parse();

    let config = match ClientConfig::new(args.url, args.prompt) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = tegami_client::run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
