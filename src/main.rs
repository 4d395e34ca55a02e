mod api;
mod config;
mod session;

use std::io::Write;

use log::{debug, info};
use tokio::io::BufReader;

use api::BridgeClient;
use config::BridgeConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            debug!("Exiting on error: {:?}", e);
            println!("❌ Error: {}", e);
            1
        }
    };
    // Stdin is read on a blocking thread which would otherwise hold the
    // runtime open after an interrupt.
    std::process::exit(code);
}

async fn run() -> anyhow::Result<()> {
    let config = BridgeConfig::from_env()?;
    info!("Using bridge api at {}", config.api_url);
    let client = BridgeClient::new(config)?;

    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    tokio::select! {
        outcome = session::run(&client, input, &mut stdout) => {
            let outcome = outcome?;
            debug!("Session finished: {:?}", outcome);
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\n{}", session::GOODBYE);
        }
    }
    stdout.flush()?;
    Ok(())
}
