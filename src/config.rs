use crate::model::{City, ListingPolicy};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("city list is empty")]
    EmptyCityTable,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: Option<u32>,
    pub delay_ms: Option<u64>,
}

impl RetryConfig {
    pub fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cities_file: PathBuf,
    pub output_dir: PathBuf,
    pub retry: RetryConfig,
    pub user_agent: String,
    pub on_malformed_listing: ListingPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cities_file: PathBuf::from("cities.json"),
            output_dir: PathBuf::from("."),
            retry: RetryConfig::default(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) FarforScraper/0.1".to_string(),
            on_malformed_listing: ListingPolicy::Abort,
        }
    }
}

/// Loads `config.json`; a missing file means "all defaults".
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Cities in file order. Read once at startup and passed around explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTable {
    cities: Vec<City>,
}

impl CityTable {
    pub fn new(cities: Vec<City>) -> Result<Self, ConfigError> {
        if cities.is_empty() {
            return Err(ConfigError::EmptyCityTable);
        }
        Ok(Self { cities })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// 1-based lookup, as shown in the city menu.
    pub fn by_number(&self, number: usize) -> Option<&City> {
        number.checked_sub(1).and_then(|idx| self.cities.get(idx))
    }
}

pub fn base_url(city: &City) -> String {
    format!("https://{}", city.domain)
}

pub fn load_cities(path: impl AsRef<Path>) -> Result<CityTable, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cities = parse_cities(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    CityTable::new(cities)
}

fn parse_cities(content: &str) -> Result<Vec<City>, serde_json::Error> {
    serde_json::from_str(content)
}
