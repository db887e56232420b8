use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use common::utils::logging::init_logging_json;

fn init_logging() {
    dotenv().ok();
    // JSON output: this service runs containerized next to a log collector.
    init_logging_json();
    info!(service = "users-api", event = "logger_init", "tracing subscriber initialized");
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "users-api",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    info!(service = "users-api", event = "start", %service_id, pid, version, "users service starting");

    let exit_code = tokio::select! {
        res = server::run_users() => {
            match res {
                Ok(()) => {
                    info!(service = "users-api", event = "stop", %service_id, pid, "users service stopped normally");
                    std::process::ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "users-api", event = "run_failed", error = %e, "server::run_users returned error");
                    std::process::ExitCode::FAILURE
                }
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!(service = "users-api", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
            std::process::ExitCode::SUCCESS
        }
    };

    exit_code
}
