use std::sync::Arc;

use sessionboot::config::{load_config, print_schema};
use sessionboot::startup::{build_context, run};
use sessionboot::utils::logger::init_logging;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--schema") {
        if let Err(e) = print_schema() {
            eprintln!("Error printing schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config_path =
        std::env::var("SESSIONBOOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config(&config_path) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Error loading configuration from {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if args.iter().any(|a| a == "--clear-auto-login-disabled") {
        let cleared = build_context(config).map_err(|e| e.to_string()).and_then(|ctx| {
            ctx.clear_auto_login_disabled().map_err(|e| e.to_string())
        });
        match cleared {
            Ok(()) => info!("Auto-login may be attempted again on next boot"),
            Err(e) => {
                error!("Failed to clear auto-login disabled flag: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match run(config).await {
        Ok(report) => {
            info!("Auto-login finished as {:?}", report.auto_login);
            match report.user {
                Some(user) => match serde_json::to_string_pretty(&user) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Could not serialize current user: {}", e);
                        std::process::exit(1);
                    }
                },
                None => {
                    info!("No authenticated user");
                    std::process::exit(2);
                }
            }
        }
        Err(e) => {
            error!("Session bootstrap failed: {}", e);
            std::process::exit(1);
        }
    }
}
