use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// The library logs as `city_mapper`, the binary as `city_lookup`.
const DEFAULT_FILTER: &str = "city_mapper=info,city_lookup=info";
const VERBOSE_FILTER: &str = "city_mapper=debug,city_lookup=debug,info";

/// RUST_LOG 優先，其次是 verbose，最後才是設定檔的層級
fn filter_directives(env: Option<&str>, verbose: bool, level: Option<&str>) -> String {
    match (env.map(str::trim).filter(|e| !e.is_empty()), verbose, level) {
        (Some(env), _, _) => env.to_string(),
        (None, true, _) => VERBOSE_FILTER.to_string(),
        (None, false, Some(level)) => format!("city_mapper={0},city_lookup={0}", level),
        (None, false, None) => DEFAULT_FILTER.to_string(),
    }
}

fn build_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::try_new(filter_directives(env.as_deref(), verbose, level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Logs go to stderr so stdout only carries the lookup result.
pub fn init_cli_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for log collectors.
pub fn init_json_logger(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
