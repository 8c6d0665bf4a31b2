use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::validation::MAX_UPCOMING_LIMIT;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub database_path: String,
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    pub upcoming_limit: usize,
    pub calendar_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: "course_schedule.db".to_string(),
            debug: false,
            enable_swagger: true,
            port: 5000,
            upcoming_limit: crate::upcoming::DEFAULT_LIMIT,
            calendar_name: "Course Schedule".to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let defaults = Settings::default();

        let config = Config::builder()
            .set_default("database_path", defaults.database_path)?
            .set_default("debug", defaults.debug)?
            .set_default("enable_swagger", defaults.enable_swagger)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("upcoming_limit", defaults.upcoming_limit as u64)?
            .set_default("calendar_name", defaults.calendar_name)?
            .add_source(File::with_name("config").required(false))
            // APP_DATABASE_PATH etc.; double underscore would nest
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        if !(1..=MAX_UPCOMING_LIMIT).contains(&settings.upcoming_limit) {
            return Err(ConfigError::Message(format!(
                "upcoming_limit must be between 1 and {MAX_UPCOMING_LIMIT}, got {}",
                settings.upcoming_limit
            )));
        }
        Ok(settings)
    }
}
