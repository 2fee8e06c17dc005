pub mod runner;

pub use crate::domain::model::{City, Hotel, NewCity};
pub use crate::domain::ports::{CityMapper, ConfigProvider, HotelMapper, InitMode};
pub use crate::utils::error::Result;
