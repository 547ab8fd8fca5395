use farfor_scraper::collector::{collect_catalog, discover_categories};
use farfor_scraper::config::{base_url, load_cities, load_config, AppConfig, ConfigError};
use farfor_scraper::export::export;
use farfor_scraper::fetcher::{HttpFetcher, RetryPolicy};
use farfor_scraper::model::{CollectError, ExportError, ScraperError};
use farfor_scraper::prompt::{choose_city, choose_export_format, PromptError};
use farfor_scraper::utils::today;
use std::io;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Scraper(#[from] ScraperError),
    #[error(transparent)]
    Collect(#[from] CollectError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config: AppConfig = load_config("config.json")?;
    let cities = load_cities(&config.cities_file)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let city = choose_city(&cities, &mut input, &mut output)?;
    let url = base_url(city);
    info!("Выбранный город: {}. Подключаюсь к домену {}...", city.name, url);

    let retry = RetryPolicy {
        max_attempts: config.retry.max_attempts,
        delay: config.retry.delay(),
    };
    let fetcher = HttpFetcher::new(&config.user_agent, retry)?;

    let categories = discover_categories(&fetcher, &url)?;
    info!("Категории получены. Собираю данные о товарах...");
    let catalog = collect_catalog(&fetcher, &url, &categories, config.on_malformed_listing)?;

    let format = choose_export_format(&mut input, &mut output)?;
    let path = export(&catalog, &city.name, format, today(), &config.output_dir)?;
    info!("Готово: {}", path.display());
    Ok(())
}
