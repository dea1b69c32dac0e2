use crate::config::Config;
use crate::validation::Summary;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .ok();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config
        .timeout
        .map_or_else(|| "none".to_string(), |t| format!("{t}s"));
    let crawl = config.crawl.as_deref().unwrap_or("false");
    let same_host = config.same_host.unwrap_or(true);
    let fallback = config.discovery_fallback.unwrap_or(false);

    info!(
        "Configuration: endpoint={}, timeout={timeout}",
        config.validator_endpoint()
    );
    info!("Discovery: crawl={crawl}, same_host={same_host}, fallback={fallback}");
    debug!("User agent: {}", config.user_agent());
}

/// Log URL discovery information
pub fn log_url_discovery(seed: &str, urls: &[String]) {
    info!("Found {} URLs to validate from {seed}", urls.len());
    for (i, url) in urls.iter().enumerate() {
        debug!("  {}. {url}", i + 1);
    }
}

/// Log validation progress
pub fn log_validation_start(url_count: usize) {
    info!("Starting validation of {url_count} documents");
}

/// Log validation completion
pub fn log_validation_complete(document_count: usize, message_count: usize, duration_ms: u128) {
    info!(
        "Validation complete: {document_count} documents, {message_count} messages ({duration_ms}ms)"
    );
}

/// Log summary totals
pub fn log_summary(summary: &Summary) {
    if summary.error.count == 0 {
        info!(
            "✅ No errors, {} infos, {} non-document errors",
            summary.info.count, summary.non_document_error.count
        );
    } else {
        warn!(
            "❌ {} errors, {} infos, {} non-document errors",
            summary.error.count, summary.info.count, summary.non_document_error.count
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
