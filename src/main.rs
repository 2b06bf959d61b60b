use bikeshare_stats::core::ConfigProvider;
use bikeshare_stats::utils::{logger, validation::Validate};
use bikeshare_stats::{
    BikeshareError, CliConfig, Console, LocalStorage, Session, SessionOptions, StatsEngine,
    TomlConfig, TripPipeline,
};
use std::io::{self, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse_args();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting bikeshare-stats");
    tracing::debug!("CLI config: {:?}", cli);

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(mut config) => {
                    config.apply_cli_overrides(&cli);
                    run(config, &cli).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(cli.clone(), &cli).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ bikeshare-stats failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C>(config: C, cli: &CliConfig) -> Result<(), BikeshareError>
where
    C: ConfigProvider + Validate + 'static,
{
    config.validate()?;

    let options = SessionOptions {
        page_size: config.page_size(),
        format: config.output_format(),
        preset: cli.preset_filters(),
    };
    let storage = LocalStorage::new(config.data_dir().to_string());
    let engine = StatsEngine::new(TripPipeline::new(storage, config));
    let session = Session::new(engine, options);

    let mut console = Console::new(BufReader::new(io::stdin()), io::stdout());
    session.run(&mut console).await?;
    Ok(())
}
