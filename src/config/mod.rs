use serde::Deserialize;

/// Log output format for the subscriber.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Log output format (`pretty` or `json`)
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "LABEL_JOBS_";

fn default_log_filter() -> String {
    "warn".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX).from_env()
    }

    /// Build from an explicit set of `(name, value)` pairs, names prefixed.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(Vec::new()).unwrap();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = AppConfig::from_vars(vec![
            ("LABEL_JOBS_LOG_FILTER".to_string(), "label_jobs=debug".to_string()),
            ("LABEL_JOBS_LOG_FORMAT".to_string(), "json".to_string()),
            ("LOG_FORMAT".to_string(), "pretty".to_string()),
        ])
        .unwrap();
        assert_eq!(config.log_filter, "label_jobs=debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = AppConfig::from_vars(vec![(
            "LABEL_JOBS_LOG_FORMAT".to_string(),
            "xml".to_string(),
        )]);
        assert!(result.is_err());
    }
}
