//! Expenseweb main entry point

use clap::Parser;
use expenseweb_api::start_server;
use expenseweb_client::BackendClient;
use expenseweb_config::Config;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "expenseweb")]
#[command(author = "Expenseweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight expense dashboard gateway over a REST backend", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = if args.config.exists() {
            match Config::load(args.config.clone()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("[ERROR] Failed to load configuration: {}", e);
                    return;
                }
            }
        } else {
            eprintln!(
                "[WARN] Config file not found: {}, falling back to defaults",
                args.config.display()
            );
            Config::default()
        };

        eprintln!(
            "[INFO] Config loaded: backend={}, listen={}:{}",
            config.backend.base_url, config.server.host, config.server.port
        );

        let timeout = Duration::from_secs(config.backend.timeout_secs);
        let backend = match BackendClient::new(&config.backend.base_url, timeout) {
            Ok(backend) => backend,
            Err(e) => {
                eprintln!("[ERROR] Failed to build backend client: {}", e);
                return;
            }
        };

        start_server(config, backend).await
    });

    Ok(())
}
