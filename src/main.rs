use city_mapper::utils::{error::MapperError, logger, validation::Validate};
use city_mapper::{
    CliConfig, ConfigProvider, Datasource, LookupRunner, SqliteCityMapper, SqliteHotelMapper,
    TomlConfig,
};
use clap::Parser;

/// 依設定來源建立 provider，並在連線前完成驗證
fn load_provider(cli: &CliConfig) -> Result<Box<dyn ConfigProvider>, MapperError> {
    match &cli.config {
        Some(path) => {
            let config = TomlConfig::from_file(path)?;
            config.validate()?;
            Ok(Box::new(config))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli.clone()))
        }
    }
}

async fn run(cli: &CliConfig, provider: &dyn ConfigProvider) -> Result<String, MapperError> {
    let datasource = Datasource::connect(provider).await?;
    let report = datasource.initialize(provider).await?;
    if !report.skipped() {
        tracing::debug!("Init scripts: {:?}", report.scripts);
    }

    let runner = LookupRunner::new(
        SqliteCityMapper::new(datasource.pool().clone()),
        SqliteHotelMapper::new(datasource.pool().clone()),
    );
    let result = runner.run(&cli.lookup_request()).await;
    datasource.close().await;

    result?.render(cli.output_format())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let provider = match load_provider(&cli) {
        Ok(provider) => provider,
        Err(e) => {
            // logger 尚未初始化，直接輸出到 stderr
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if cli.log_json {
        logger::init_json_logger(cli.verbose, provider.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, provider.log_level());
    }

    tracing::info!("Starting city-lookup");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli, provider.as_ref()).await {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            tracing::error!(
                "❌ Lookup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
