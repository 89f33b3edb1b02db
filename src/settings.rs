use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::pagination::QUESTIONS_PER_PAGE;

/// Runtime settings, read from `TRIVIA_*` environment variables (a `.env`
/// file is honored) on top of built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub questions_per_page: u32,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_environment(Environment::with_prefix("TRIVIA"))
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("database_path", "trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("questions_per_page", i64::from(QUESTIONS_PER_PAGE))?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        if settings.questions_per_page == 0 {
            return Err(ConfigError::Message(
                "questions_per_page must be positive".to_owned(),
            ));
        }
        Ok(settings)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
