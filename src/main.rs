use capitol_scraper::{
    config::{Config, DEFAULT_LOG_FILE},
    logging, pipeline,
};
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // ─── 1) config + logging ─────────────────────────────────────────
    let cfg = Config::from_env();
    let log_file = cfg
        .as_ref()
        .map(|c| c.log_file.clone())
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE));
    if let Err(e) = logging::init(&log_file) {
        eprintln!("failed to set up logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    std::panic::set_hook(Box::new(|info| {
        error!("panic: {}", info);
    }));

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // ─── 2) scrape → normalize → write ───────────────────────────────
    info!("scrape start: {}", cfg.url);
    match pipeline::run(&cfg).await {
        Ok(report) => {
            info!(
                "done: {} rows seen, {} skipped, {} dropped, {} written",
                report.rows_seen, report.skipped, report.dropped, report.summary.rows
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("An error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
