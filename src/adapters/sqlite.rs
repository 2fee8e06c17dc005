use crate::domain::model::{City, Hotel};
use crate::domain::ports::{CityMapper, HotelMapper};
use crate::utils::error::{MapperError, Result};
use async_trait::async_trait;
use sqlx::SqlitePool;

// Ties on the filter column resolve to the lowest id.
const FIND_BY_STATE: &str =
    "SELECT id, name, state, country FROM city WHERE state = ? ORDER BY id LIMIT 1";
const FIND_BY_ID: &str = "SELECT id, name, state, country FROM city WHERE id = ?";
const FIND_BY_NAME: &str =
    "SELECT id, name, state, country FROM city WHERE name = ? ORDER BY id LIMIT 1";
const FIND_BY_COUNTRY: &str =
    "SELECT id, name, state, country FROM city WHERE country = ? ORDER BY id LIMIT 1";

const SELECT_HOTEL_BY_CITY_ID: &str =
    "SELECT city, name, address, zip FROM hotel WHERE city = ? ORDER BY rowid LIMIT 1";

#[derive(Debug, Clone)]
pub struct SqliteCityMapper {
    pool: SqlitePool,
}

impl SqliteCityMapper {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityMapper for SqliteCityMapper {
    async fn find_by_state(&self, state: &str) -> Result<City> {
        tracing::debug!("find_by_state state={:?}", state);
        sqlx::query_as::<_, City>(FIND_BY_STATE)
            .bind(state)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| MapperError::not_found("city", format!("state = {:?}", state)))
    }

    async fn find_by_id(&self, id: i64) -> Result<City> {
        tracing::debug!("find_by_id id={}", id);
        sqlx::query_as::<_, City>(FIND_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| MapperError::not_found("city", format!("id = {}", id)))
    }

    async fn find_by_name(&self, name: &str) -> Result<City> {
        tracing::debug!("find_by_name name={:?}", name);
        sqlx::query_as::<_, City>(FIND_BY_NAME)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| MapperError::not_found("city", format!("name = {:?}", name)))
    }

    async fn find_by_country(&self, country: &str) -> Result<City> {
        tracing::debug!("find_by_country country={:?}", country);
        sqlx::query_as::<_, City>(FIND_BY_COUNTRY)
            .bind(country)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| MapperError::not_found("city", format!("country = {:?}", country)))
    }
}

#[derive(Debug, Clone)]
pub struct SqliteHotelMapper {
    pool: SqlitePool,
}

impl SqliteHotelMapper {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HotelMapper for SqliteHotelMapper {
    async fn select_by_city_id(&self, city_id: i64) -> Result<Hotel> {
        tracing::debug!("select_by_city_id city_id={}", city_id);
        sqlx::query_as::<_, Hotel>(SELECT_HOTEL_BY_CITY_ID)
            .bind(city_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| MapperError::not_found("hotel", format!("city = {}", city_id)))
    }
}
