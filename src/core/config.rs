use std::env;
use std::path::PathBuf;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;


#[derive(Debug, Deserialize, Clone)]
pub struct RbcConfig {
    pub server_url: String,
    pub frontend_origin: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    pub log_level: String,
}

fn default_poll_interval() -> u64 {
    5
}

impl RbcConfig {
    pub fn new_config(run_mode: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("default.config.toml"))
            .add_source(File::with_name(&format!("{run_mode}.config.toml")).required(false))
            .add_source(Environment::default())
            .build()?;
        config.try_deserialize()
    }

    /// Where the localStorage analog lives. Falls back to the platform data
    /// dir, and to the temp dir on headless systems without one.
    pub fn storage_path(&self) -> PathBuf {
        match &self.storage_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir().unwrap_or_else(env::temp_dir).join("rbc"),
        }
    }
}
