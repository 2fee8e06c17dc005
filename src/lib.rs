pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod fixture;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{Datasource, SqliteCityMapper, SqliteHotelMapper};
pub use crate::core::runner::{LookupQuery, LookupReport, LookupRequest, LookupRunner, OutputFormat};
pub use domain::model::{City, Hotel, NewCity};
pub use domain::ports::{CityMapper, ConfigProvider, HotelMapper, InitMode};
pub use fixture::CityFixture;
pub use utils::error::{MapperError, Result};
