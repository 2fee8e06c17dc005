// Adapters layer: concrete implementations for external systems (datasource, mappers).

pub mod datasource;
pub mod sqlite;

pub use datasource::{Datasource, InitReport};
pub use sqlite::{SqliteCityMapper, SqliteHotelMapper};
