use crate::domain::model::{City, Hotel};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Read-only accessor for the `city` table.
///
/// Every lookup returns [`MapperError::NotFound`](crate::utils::error::MapperError::NotFound)
/// when no row matches and passes backend failures through unchanged.
/// When several rows match, the one with the lowest id wins.
#[async_trait]
pub trait CityMapper: Send + Sync {
    async fn find_by_state(&self, state: &str) -> Result<City>;
    async fn find_by_id(&self, id: i64) -> Result<City>;
    async fn find_by_name(&self, name: &str) -> Result<City>;
    async fn find_by_country(&self, country: &str) -> Result<City>;
}

#[async_trait]
pub trait HotelMapper: Send + Sync {
    async fn select_by_city_id(&self, city_id: i64) -> Result<Hotel>;
}

/// When the schema and data scripts are applied on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InitMode {
    Always,
    /// Only for in-memory databases.
    #[default]
    Embedded,
    Never,
}

pub trait ConfigProvider: Send + Sync {
    fn database_url(&self) -> &str;
    fn max_connections(&self) -> u32;
    fn acquire_timeout_seconds(&self) -> u64;
    fn init_mode(&self) -> InitMode;
    /// Empty means the bundled schema.
    fn schema_locations(&self) -> &[String];
    /// Empty means the bundled data.
    fn data_locations(&self) -> &[String];
    fn log_level(&self) -> Option<&str> {
        None
    }
}
