use crate::domain::ports::{ConfigProvider, InitMode};
use crate::utils::error::{MapperError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub const BUNDLED_SCHEMA: &str = include_str!("../../sql/schema.sql");
pub const BUNDLED_DATA: &str = include_str!("../../sql/data.sql");

const BUNDLED_SCHEMA_NAME: &str = "bundled:schema.sql";
const BUNDLED_DATA_NAME: &str = "bundled:data.sql";

pub const IN_MEMORY_URL: &str = "sqlite::memory:";
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Scripts applied by [`Datasource::initialize`], in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub scripts: Vec<String>,
}

impl InitReport {
    pub fn skipped(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// A SQLite connection pool plus the URL it was opened with.
///
/// In-memory databases live exactly as long as the pool: one connection is
/// pinned open and never recycled, and closing the pool discards the data.
#[derive(Debug, Clone)]
pub struct Datasource {
    pool: SqlitePool,
    url: String,
}

pub fn is_in_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

impl Datasource {
    pub async fn connect(config: &dyn ConfigProvider) -> Result<Self> {
        Self::connect_with(
            config.database_url(),
            config.max_connections(),
            Duration::from_secs(config.acquire_timeout_seconds()),
        )
        .await
    }

    pub async fn connect_with(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| MapperError::InvalidConfigValueError {
                field: "database_url".to_string(),
                value: url.to_string(),
                reason: e.to_string(),
            })?
            .create_if_missing(true);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);
        let pool_options = if is_in_memory_url(url) {
            if max_connections != 1 {
                tracing::debug!(
                    "In-memory database {} uses a single connection (configured max_connections={})",
                    url,
                    max_connections
                );
            }
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!("🔌 Connected to {}", url);

        Ok(Self {
            pool,
            url: url.to_string(),
        })
    }

    /// 建立一個全新且獨立的記憶體資料庫
    pub async fn in_memory() -> Result<Self> {
        Self::connect_with(IN_MEMORY_URL, 1, DEFAULT_ACQUIRE_TIMEOUT).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_in_memory(&self) -> bool {
        is_in_memory_url(&self.url)
    }

    /// Applies schema then data scripts according to the configured [`InitMode`].
    pub async fn initialize(&self, config: &dyn ConfigProvider) -> Result<InitReport> {
        let enabled = match config.init_mode() {
            InitMode::Always => true,
            InitMode::Embedded => self.is_in_memory(),
            InitMode::Never => false,
        };

        if !enabled {
            tracing::debug!(
                "Skipping init scripts (mode {:?}, url {})",
                config.init_mode(),
                self.url
            );
            return Ok(InitReport::default());
        }

        let mut scripts =
            load_scripts(config.schema_locations(), BUNDLED_SCHEMA_NAME, BUNDLED_SCHEMA).await?;
        scripts.extend(
            load_scripts(config.data_locations(), BUNDLED_DATA_NAME, BUNDLED_DATA).await?,
        );

        let mut report = InitReport::default();
        for (name, sql) in scripts {
            self.run_script(&name, &sql).await?;
            report.scripts.push(name);
        }

        tracing::info!("📜 Applied {} init script(s)", report.scripts.len());
        Ok(report)
    }

    pub async fn apply_bundled_schema(&self) -> Result<()> {
        self.run_script(BUNDLED_SCHEMA_NAME, BUNDLED_SCHEMA).await
    }

    pub async fn apply_bundled_data(&self) -> Result<()> {
        self.run_script(BUNDLED_DATA_NAME, BUNDLED_DATA).await
    }

    pub async fn run_script(&self, name: &str, sql: &str) -> Result<()> {
        tracing::debug!("Running script {}", name);
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|source| MapperError::InitScriptError {
                script: name.to_string(),
                source,
            })?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("Closed datasource {}", self.url);
    }
}

async fn load_scripts(
    locations: &[String],
    bundled_name: &str,
    bundled_sql: &str,
) -> Result<Vec<(String, String)>> {
    if locations.is_empty() {
        return Ok(vec![(bundled_name.to_string(), bundled_sql.to_string())]);
    }

    let mut scripts = Vec::with_capacity(locations.len());
    for location in locations {
        let sql = tokio::fs::read_to_string(location).await?;
        scripts.push((location.clone(), sql));
    }
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestConfig {
        url: String,
        mode: InitMode,
        schema: Vec<String>,
        data: Vec<String>,
    }

    impl TestConfig {
        fn memory(mode: InitMode) -> Self {
            Self {
                url: IN_MEMORY_URL.to_string(),
                mode,
                schema: vec![],
                data: vec![],
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn database_url(&self) -> &str {
            &self.url
        }

        fn max_connections(&self) -> u32 {
            4
        }

        fn acquire_timeout_seconds(&self) -> u64 {
            5
        }

        fn init_mode(&self) -> InitMode {
            self.mode
        }

        fn schema_locations(&self) -> &[String] {
            &self.schema
        }

        fn data_locations(&self) -> &[String] {
            &self.data
        }
    }

    #[test]
    fn test_is_in_memory_url() {
        assert!(is_in_memory_url("sqlite::memory:"));
        assert!(is_in_memory_url("sqlite://file:cities?mode=memory&cache=shared"));
        assert!(!is_in_memory_url("sqlite://data/cities.db"));
    }

    #[tokio::test]
    async fn test_embedded_mode_seeds_in_memory_database() {
        let config = TestConfig::memory(InitMode::Embedded);
        let datasource = Datasource::connect(&config).await.unwrap();

        let report = datasource.initialize(&config).await.unwrap();
        assert_eq!(
            report.scripts,
            vec![BUNDLED_SCHEMA_NAME.to_string(), BUNDLED_DATA_NAME.to_string()]
        );

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM city")
            .fetch_one(datasource.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_in_memory_pool_pins_single_connection() {
        let config = TestConfig::memory(InitMode::Never);
        assert_eq!(config.max_connections(), 4);

        let datasource = Datasource::connect(&config).await.unwrap();
        assert_eq!(datasource.pool().options().get_max_connections(), 1);
    }

    #[tokio::test]
    async fn test_never_mode_skips_scripts() {
        let config = TestConfig::memory(InitMode::Never);
        let datasource = Datasource::connect(&config).await.unwrap();

        let report = datasource.initialize(&config).await.unwrap();
        assert!(report.skipped());

        let missing = sqlx::query("SELECT * FROM city")
            .fetch_all(datasource.pool())
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_broken_script_reports_its_name() {
        let datasource = Datasource::in_memory().await.unwrap();
        let err = datasource
            .run_script("broken.sql", "create tabel city (id integer);")
            .await
            .unwrap_err();

        match err {
            MapperError::InitScriptError { script, .. } => assert_eq!(script, "broken.sql"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_script_file_is_io_error() {
        let mut config = TestConfig::memory(InitMode::Always);
        config.schema = vec!["does/not/exist.sql".to_string()];
        let datasource = Datasource::connect(&config).await.unwrap();

        let err = datasource.initialize(&config).await.unwrap_err();
        assert!(matches!(err, MapperError::IoError(_)));
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let first = Datasource::in_memory().await.unwrap();
        let second = Datasource::in_memory().await.unwrap();

        first.apply_bundled_schema().await.unwrap();

        assert!(sqlx::query("SELECT * FROM city")
            .fetch_all(second.pool())
            .await
            .is_err());
    }
}
