pub mod toml_config;

#[cfg(feature = "cli")]
mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation;

pub const SCRIPT_EXTENSIONS: &[&str] = &["sql"];
pub const MAX_ACQUIRE_TIMEOUT_SECONDS: u64 = 3600;

/// 共用的資料來源設定檢查
pub(crate) fn validate_datasource_settings(
    prefix: &str,
    url: &str,
    max_connections: u32,
    acquire_timeout_seconds: u64,
) -> Result<()> {
    validation::validate_database_url(&format!("{}url", prefix), url)?;
    validation::validate_positive_number(
        &format!("{}max_connections", prefix),
        max_connections,
        1,
    )?;
    validation::validate_range(
        &format!("{}acquire_timeout_seconds", prefix),
        acquire_timeout_seconds,
        1,
        MAX_ACQUIRE_TIMEOUT_SECONDS,
    )
}
