use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound on one call to the inference endpoint.
const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 30;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub inference: InferenceConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Full URL the generation request is POSTed to. `None` when unset or empty.
    pub api_url: Option<String>,
    pub timeout_secs: u64,
}

impl InferenceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Attach CORS headers to failure results too. Off by default: only
    /// successful results carry them.
    pub on_errors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the relay settings from `lookup`, which resolves variable names.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = parse_var(
            &lookup,
            "INFERENCE_TIMEOUT_SECS",
            DEFAULT_INFERENCE_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "INFERENCE_TIMEOUT_SECS must be greater than zero"
            )));
        }

        Ok(RelayConfig {
            common,
            inference: InferenceConfig {
                api_url: non_empty(lookup("INFERENCE_API_URL")),
                timeout_secs,
            },
            cors: CorsConfig {
                on_errors: parse_var(&lookup, "RELAY_CORS_ON_ERRORS", false)?,
            },
            observability: ObservabilityConfig {
                log_level: non_empty(lookup("LOG_LEVEL"))
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                otlp_endpoint: non_empty(lookup("OTLP_ENDPOINT")),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<RelayConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RelayConfig::from_lookup(core_config::Config { port: 0 }, |key| {
            vars.get(key).cloned()
        })
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.inference.api_url, None);
        assert_eq!(config.inference.timeout(), Duration::from_secs(30));
        assert!(!config.cors.on_errors);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.otlp_endpoint, None);
    }

    #[test]
    fn empty_url_counts_as_unset() {
        let config = load(&[("INFERENCE_API_URL", "")]).unwrap();
        assert_eq!(config.inference.api_url, None);
    }

    #[test]
    fn url_is_kept_verbatim() {
        let config = load(&[("INFERENCE_API_URL", "http://model:8000/generate")]).unwrap();
        assert_eq!(
            config.inference.api_url.as_deref(),
            Some("http://model:8000/generate")
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("INFERENCE_TIMEOUT_SECS", "5"),
            ("RELAY_CORS_ON_ERRORS", "true"),
            ("OTLP_ENDPOINT", "http://tempo:4317"),
        ])
        .unwrap();

        assert_eq!(config.inference.timeout_secs, 5);
        assert!(config.cors.on_errors);
        assert_eq!(
            config.observability.otlp_endpoint.as_deref(),
            Some("http://tempo:4317")
        );
    }

    #[test]
    fn invalid_timeout_is_a_config_error() {
        let err = load(&[("INFERENCE_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn zero_timeout_is_a_config_error() {
        let err = load(&[("INFERENCE_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
