use std::process::ExitCode;
use std::sync::Arc;

use rds_export_notifier::config::Config;
use rds_export_notifier::logging::{init_tracing, LogConfig};
use rds_export_notifier::runtime::{invoke_exporter, invoke_monitor};
use rds_export_notifier::scheduler::UnitScheduler;
use tokio::sync::broadcast;

const USAGE: &str = "usage: rds-export-notifier [export | monitor | schedule]";

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    init_tracing(&LogConfig::from(&config));

    let command = std::env::args().nth(1).unwrap_or_else(|| "schedule".to_string());
    tracing::info!(command = %command, "Starting rds-export-notifier");

    match command.as_str() {
        "export" => match invoke_exporter(&config).await {
            Ok(outcome) => match outcome.response_text() {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to render exporter response");
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Exporter failed");
                ExitCode::FAILURE
            }
        },
        "monitor" => match invoke_monitor(&config).await {
            Ok(report) => match serde_json::to_string(&report) {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to render monitor report");
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "Monitor failed");
                ExitCode::FAILURE
            }
        },
        "schedule" => run_scheduler(config).await,
        other => {
            eprintln!("unknown command '{other}'\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

async fn run_scheduler(config: Config) -> ExitCode {
    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let scheduler = UnitScheduler::new(Arc::new(config), shutdown_tx.subscribe());

    tokio::spawn(shutdown_signal(shutdown_tx));

    match scheduler.start().await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Scheduler failed");
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler, waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(());
}
