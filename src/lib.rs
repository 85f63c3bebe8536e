//! Shared pipeline behind the four lab-report analyzer pages (Full Blood
//! Count, Lipid Panel, Liver Function, Thyroid Function): panel field
//! schemas, per-keystroke and pre-submit validation, the analysis backend
//! client, report-row data binding and the encrypted-cookie identity
//! enrichment for report headers. Rendering, styling and PDF export live in
//! the host UI.

pub mod client;
pub mod config;
pub mod identity;
pub mod models;
pub mod report;
pub mod session;
pub mod validate;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for hosts that do not install their own subscriber.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
