use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::Serialize;
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::summary::SummaryConfig;

/// Looked up in the working directory when no config file is given
pub const CONFIG_FILE_NAME: &str = "csv-summary.toml";
pub const ENV_PREFIX: &str = "CSV_SUMMARY_";

/// Layered config: defaults < TOML file < environment < explicit overrides
pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    pub fn new(config_file: Option<&Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(SummaryConfig::default()));

        let figment = match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::ConfigError(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                debug!(path = %path.display(), "using config file");
                figment.merge(Toml::file(path))
            }
            // Missing default file is skipped by the provider
            None => figment.merge(Toml::file(CONFIG_FILE_NAME)),
        };

        Ok(Self {
            figment: figment.merge(Env::prefixed(ENV_PREFIX)),
        })
    }

    /// Layer values on top of everything else; `None` fields must be skipped when serializing
    pub fn with_overrides<T: Serialize>(mut self, overrides: &T) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(overrides));
        self
    }

    /// Extract and validate the merged configuration
    pub fn load(&self) -> Result<SummaryConfig> {
        let config: SummaryConfig = self.figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[derive(Serialize)]
    struct Overrides {
        #[serde(skip_serializing_if = "Option::is_none")]
        sample_count: Option<usize>,
    }

    #[test]
    fn test_defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = ConfigService::new(None).unwrap().load().unwrap();
            assert_eq!(config, SummaryConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_layer_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                category_threshold = 10
                sample_count = 4
                ignore_values = ["?", "N/A"]
                "#,
            )?;
            jail.set_env("CSV_SUMMARY_SAMPLE_COUNT", "6");

            let service = ConfigService::new(None).unwrap();
            let config = service.load().unwrap();
            assert_eq!(config.category_threshold, 10);
            assert_eq!(config.sample_count, 6);
            assert_eq!(config.ignore_values, vec!["?", "N/A"]);

            let config = service
                .with_overrides(&Overrides {
                    sample_count: Some(9),
                })
                .load()
                .unwrap();
            assert_eq!(config.sample_count, 9);
            assert_eq!(config.category_threshold, 10);
            Ok(())
        });
    }

    #[test]
    fn test_skipped_override_keeps_lower_layer() {
        Jail::expect_with(|jail| {
            jail.set_env("CSV_SUMMARY_SAMPLE_COUNT", "2");
            let config = ConfigService::new(None)
                .unwrap()
                .with_overrides(&Overrides { sample_count: None })
                .load()
                .unwrap();
            assert_eq!(config.sample_count, 2);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_config_file_must_exist() {
        let result = ConfigService::new(Some(Path::new("/nonexistent/csv-summary.toml")));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_pattern_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"date_pattern = "([""#)?;
            let service = ConfigService::new(Some(Path::new("custom.toml"))).unwrap();
            assert!(matches!(
                service.load(),
                Err(AppError::InvalidPattern { .. })
            ));
            Ok(())
        });
    }
}
