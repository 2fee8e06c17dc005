use crate::core::runner::{LookupQuery, LookupRequest, OutputFormat};
use crate::core::{ConfigProvider, InitMode};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "city-lookup")]
#[command(about = "Look up cities and their hotels in a SQLite database")]
pub struct CliConfig {
    /// TOML file with datasource settings; replaces the datasource flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "sqlite::memory:")]
    pub database_url: String,

    #[arg(long, default_value = "5")]
    pub max_connections: u32,

    #[arg(long, default_value = "30")]
    pub acquire_timeout_seconds: u64,

    #[arg(long, value_enum, default_value_t = InitMode::Embedded)]
    pub init_mode: InitMode,

    #[arg(long, value_delimiter = ',')]
    pub schema: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub data: Vec<String>,

    #[arg(long, default_value = "CA")]
    pub state: String,

    #[arg(long, conflicts_with_all = ["name", "country"])]
    pub id: Option<i64>,

    #[arg(long, conflicts_with = "country")]
    pub name: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long, help = "Also print the city's hotel")]
    pub with_hotel: bool,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs to stderr as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// `--id`, `--name` and `--country` take precedence over `--state`.
    pub fn lookup_request(&self) -> LookupRequest {
        let query = if let Some(id) = self.id {
            LookupQuery::ById(id)
        } else if let Some(name) = &self.name {
            LookupQuery::ByName(name.clone())
        } else if let Some(country) = &self.country {
            LookupQuery::ByCountry(country.clone())
        } else {
            LookupQuery::ByState(self.state.clone())
        };

        LookupRequest {
            query,
            with_hotel: self.with_hotel,
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl ConfigProvider for CliConfig {
    fn database_url(&self) -> &str {
        &self.database_url
    }

    fn max_connections(&self) -> u32 {
        self.max_connections
    }

    fn acquire_timeout_seconds(&self) -> u64 {
        self.acquire_timeout_seconds
    }

    fn init_mode(&self) -> InitMode {
        self.init_mode
    }

    fn schema_locations(&self) -> &[String] {
        &self.schema
    }

    fn data_locations(&self) -> &[String] {
        &self.data
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        super::validate_datasource_settings(
            "",
            &self.database_url,
            self.max_connections,
            self.acquire_timeout_seconds,
        )?;
        validation::validate_file_extensions("schema", &self.schema, super::SCRIPT_EXTENSIONS)?;
        validation::validate_file_extensions("data", &self.data, super::SCRIPT_EXTENSIONS)?;
        if let Some(config) = &self.config {
            validation::validate_path("config", config)?;
        }
        Ok(())
    }
}
