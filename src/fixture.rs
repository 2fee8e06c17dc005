//! Isolated, pre-seeded databases for tests and demos.
//!
//! Each [`CityFixture`] owns a private in-memory SQLite database. Nothing is
//! shared between fixtures, and the data disappears once the fixture is torn
//! down or dropped.

use crate::adapters::{Datasource, SqliteCityMapper, SqliteHotelMapper};
use crate::domain::model::{City, Hotel, NewCity};
use crate::utils::error::Result;

const INSERT_CITY: &str = "INSERT INTO city (name, state, country) VALUES (?, ?, ?)";
const INSERT_HOTEL: &str = "INSERT INTO hotel (city, name, address, zip) VALUES (?, ?, ?, ?)";

pub struct CityFixture {
    datasource: Datasource,
}

impl CityFixture {
    /// Bundled schema and data: San Francisco (id 1) and its hotel.
    pub async fn seeded() -> Result<Self> {
        let fixture = Self::empty().await?;
        fixture.datasource.apply_bundled_data().await?;
        Ok(fixture)
    }

    /// Bundled schema, no rows.
    pub async fn empty() -> Result<Self> {
        let datasource = Datasource::in_memory().await?;
        datasource.apply_bundled_schema().await?;
        Ok(Self { datasource })
    }

    pub fn datasource(&self) -> &Datasource {
        &self.datasource
    }

    pub fn city_mapper(&self) -> SqliteCityMapper {
        SqliteCityMapper::new(self.datasource.pool().clone())
    }

    pub fn hotel_mapper(&self) -> SqliteHotelMapper {
        SqliteHotelMapper::new(self.datasource.pool().clone())
    }

    pub async fn insert_city(&self, city: NewCity) -> Result<City> {
        let result = sqlx::query(INSERT_CITY)
            .bind(&city.name)
            .bind(&city.state)
            .bind(&city.country)
            .execute(self.datasource.pool())
            .await?;

        Ok(City {
            id: result.last_insert_rowid(),
            name: city.name,
            state: city.state,
            country: city.country,
        })
    }

    pub async fn insert_hotel(&self, hotel: &Hotel) -> Result<()> {
        sqlx::query(INSERT_HOTEL)
            .bind(hotel.city)
            .bind(&hotel.name)
            .bind(&hotel.address)
            .bind(&hotel.zip)
            .execute(self.datasource.pool())
            .await?;
        Ok(())
    }

    pub async fn teardown(self) {
        self.datasource.close().await;
    }
}
