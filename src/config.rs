use anyhow::{Context, Result};
use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::domain::{default_buildings, Building, BuildingCatalog};
use crate::simulation::cache::{DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS};
use crate::simulation::{SeriesParams, SessionRegistry};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "CAMPUS__";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    pub campus: CampusConfig,
    pub sessions: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            enable_cors: false,
            cors_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub start_date: NaiveDate,
    pub day_count: i64,
    /// Base seed for every session; unset means fresh entropy per generation
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let series = SeriesParams::default();
        Self {
            start_date: series.start_date,
            day_count: series.day_count,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusConfig {
    pub solar_capacity_kw: f64,
    pub buildings: Vec<Building>,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            solar_capacity_kw: 500.0,
            buildings: default_buildings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on live sessions; the least recently used is evicted past it
    pub max_sessions: usize,
    pub idle_timeout_secs: u64,
    /// How often idle sessions are swept
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn registry(&self, base_seed: Option<u64>) -> SessionRegistry {
        SessionRegistry::with_limits(base_seed, self.max_sessions, self.idle_timeout())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT.as_secs(),
            sweep_interval_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generation: GenerationConfig::default(),
            campus: CampusConfig::default(),
            sessions: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Built-in defaults, then `config/default.toml`, then `CAMPUS__*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.series_params()?;
        self.catalog()?;
        if self.sessions.max_sessions == 0 {
            anyhow::bail!("invalid [sessions] settings: max_sessions must be at least 1");
        }
        if self.sessions.sweep_interval_secs == 0 {
            anyhow::bail!("invalid [sessions] settings: sweep_interval_secs must be positive");
        }
        Ok(())
    }

    pub fn series_params(&self) -> Result<SeriesParams> {
        SeriesParams::new(self.generation.start_date, self.generation.day_count)
            .context("invalid [generation] settings")
    }

    pub fn catalog(&self) -> Result<BuildingCatalog> {
        BuildingCatalog::new(self.campus.buildings.clone()).context("invalid [campus] buildings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generation.day_count, 3650);
        assert_eq!(config.campus.buildings.len(), 5);
        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from("does-not-exist.toml").unwrap();
            assert_eq!(config.generation.seed, None);
            Ok(())
        });
    }

    #[test]
    fn test_toml_and_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "campus.toml",
                r#"
                [generation]
                day_count = 365

                [campus]
                solar_capacity_kw = 250.0
                "#,
            )?;
            jail.set_env("CAMPUS__GENERATION__SEED", "42");

            let config = Config::load_from("campus.toml").unwrap();
            assert_eq!(config.generation.day_count, 365);
            assert_eq!(config.generation.seed, Some(42));
            assert_eq!(config.campus.solar_capacity_kw, 250.0);
            Ok(())
        });
    }

    #[test]
    fn test_session_limits_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CAMPUS__SESSIONS__MAX_SESSIONS", "8");
            let config = Config::load_from("does-not-exist.toml").unwrap();
            assert_eq!(config.sessions.max_sessions, 8);
            assert_eq!(config.sessions.registry(None).max_sessions(), 8);

            jail.set_env("CAMPUS__SESSIONS__MAX_SESSIONS", "0");
            assert!(Config::load_from("does-not-exist.toml").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_rejects_empty_catalog() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("empty.toml", "[campus]\nbuildings = []\n")?;
            assert!(Config::load_from("empty.toml").is_err());
            Ok(())
        });
    }
}
