use super::{
    logging::LoggingConfig,
    solver::SolverConfig,
    traits::ConfigSection,
};
use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment overrides, e.g. `GENESOLVER_SOLVER__POPULATION_SIZE=500`
pub const ENV_PREFIX: &str = "GENESOLVER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub solver: SolverConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SolverError> {
        self.solver.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SolverError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;

        self.replace(config)
    }

    /// Load an optional TOML file, then apply `GENESOLVER_*` environment overrides
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), SolverError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path.as_ref()).format(::config::FileFormat::Toml),
            );
        }
        let config: AppConfig = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SolverError> {
        let toml_str = toml::to_string_pretty(&self.get()?)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, SolverError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| poisoned())
    }

    pub fn update<F>(&self, f: F) -> Result<(), SolverError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get()?;
        f(&mut candidate);
        candidate.validate()?;
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), SolverError> {
        *self.config.write().map_err(|_| poisoned())? = config;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> SolverError {
    SolverError::Configuration("Config lock poisoned".to_string())
}
