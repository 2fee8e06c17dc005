use crate::core::{City, CityMapper, Hotel, HotelMapper};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    ByState(String),
    ById(i64),
    ByName(String),
    ByCountry(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub query: LookupQuery,
    pub with_hotel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupReport {
    pub city: City,
    pub hotel: Option<Hotel>,
}

impl LookupRequest {
    pub fn by_state(state: impl Into<String>) -> Self {
        Self {
            query: LookupQuery::ByState(state.into()),
            with_hotel: false,
        }
    }

    pub fn with_hotel(mut self, with_hotel: bool) -> Self {
        self.with_hotel = with_hotel;
        self
    }
}

impl LookupReport {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => {
                let mut lines = vec![self.city.to_string()];
                if let Some(hotel) = &self.hotel {
                    lines.push(hotel.to_string());
                }
                Ok(lines.join("\n"))
            }
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Runs one lookup against the mappers it was built with.
pub struct LookupRunner<C: CityMapper, H: HotelMapper> {
    cities: C,
    hotels: H,
}

impl<C: CityMapper, H: HotelMapper> LookupRunner<C, H> {
    pub fn new(cities: C, hotels: H) -> Self {
        Self { cities, hotels }
    }

    pub async fn run(&self, request: &LookupRequest) -> Result<LookupReport> {
        let city = match &request.query {
            LookupQuery::ByState(state) => self.cities.find_by_state(state).await?,
            LookupQuery::ById(id) => self.cities.find_by_id(*id).await?,
            LookupQuery::ByName(name) => self.cities.find_by_name(name).await?,
            LookupQuery::ByCountry(country) => self.cities.find_by_country(country).await?,
        };
        tracing::info!("🏙️ Found city: {}", city);

        let hotel = if request.with_hotel {
            match self.hotels.select_by_city_id(city.id).await {
                Ok(hotel) => Some(hotel),
                Err(e) if e.is_not_found() => {
                    tracing::debug!("No hotel for city #{}", city.id);
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        Ok(LookupReport { city, hotel })
    }
}
