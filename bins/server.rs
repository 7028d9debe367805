use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Worker threads from config.toml, else `TOKIO_WORKER_THREADS`.
fn worker_threads(config: Option<&configs::AppConfig>) -> Option<usize> {
    match config {
        Some(cfg) => cfg.server.worker_threads,
        None => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse().ok()),
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    let config = configs::AppConfig::load_and_validate().ok();
    common::utils::logging::init_logging(config.as_ref().map(|c| c.logging.format).unwrap_or_default());

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |panic| {
        error!(%instance, message = %panic, "panic");
    }));

    let threads = worker_threads(config.as_ref());
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(n) = threads {
        builder.worker_threads(n);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "cannot build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(%instance, version = env!("CARGO_PKG_VERSION"), threads = ?threads, "academy starting");
    // run() returns after Ctrl+C once in-flight requests have drained
    match rt.block_on(server::run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%instance, error = %e, "academy server failed");
            ExitCode::FAILURE
        }
    }
}
