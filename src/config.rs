use std::time::Duration;

use crate::application::controller::SubmitPolicy;
use crate::domain::annotation::MAX_INPUT_CHARS;
use crate::domain::errors::{AnnotationError, AnnotationResult};
use crate::infrastructure::http::{AnnotateEndpoint, DEFAULT_BASE_URL};

/// Settings for wiring the annotation client in the smoke binary
///
/// The library types never read the environment themselves; this struct is
/// the only place that does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoint: AnnotateEndpoint,
    pub health_path: String,
    pub request_timeout: Duration,
    pub max_input_chars: usize,
    pub submit_policy: SubmitPolicy,
    pub smoke_text: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: AnnotateEndpoint::Api,
            health_path: "/api/health".to_string(),
            request_timeout: Duration::from_secs(30),
            max_input_chars: MAX_INPUT_CHARS,
            submit_policy: SubmitPolicy::Supersede,
            smoke_text: "Hello world".to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> AnnotationResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup
    ///
    /// Missing keys fall back to defaults; present but malformed values are
    /// a `Config` error.
    pub fn from_lookup<F>(lookup: F) -> AnnotationResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = get("FANNO_API_URL")
            .or_else(|| get("BASE_URL"))
            .unwrap_or_else(|| {
                tracing::warn!("FANNO_API_URL not set, using default");
                defaults.base_url.clone()
            });

        let endpoint = match get("FANNO_ANNOTATE_ENDPOINT") {
            Some(value) => value.parse()?,
            None => defaults.endpoint,
        };

        let submit_policy = match get("FANNO_SUBMIT_POLICY") {
            Some(value) => value.parse()?,
            None => defaults.submit_policy,
        };

        let request_timeout = match get("FANNO_REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                Duration::from_secs(parse_positive("FANNO_REQUEST_TIMEOUT_SECS", &value)?)
            }
            None => defaults.request_timeout,
        };

        let max_input_chars = match get("FANNO_MAX_INPUT_CHARS") {
            Some(value) => {
                let chars = parse_positive("FANNO_MAX_INPUT_CHARS", &value)?;
                usize::try_from(chars).map_err(|_| {
                    AnnotationError::Config(format!(
                        "FANNO_MAX_INPUT_CHARS is too large for this platform: {chars}"
                    ))
                })?
            }
            None => defaults.max_input_chars,
        };

        Ok(Self {
            base_url,
            endpoint,
            health_path: get("FANNO_HEALTH_PATH").unwrap_or(defaults.health_path),
            request_timeout,
            max_input_chars,
            submit_policy,
            smoke_text: get("FANNO_SMOKE_TEXT").unwrap_or(defaults.smoke_text),
        })
    }
}

fn parse_positive(key: &str, value: &str) -> AnnotationResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AnnotationError::Config(format!(
            "{key} must be a positive integer, got {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.max_input_chars, 10_000);
    }

    #[test]
    fn reads_all_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("FANNO_API_URL", "http://api.internal:8080"),
            ("FANNO_ANNOTATE_ENDPOINT", "simple"),
            ("FANNO_HEALTH_PATH", "/health"),
            ("FANNO_REQUEST_TIMEOUT_SECS", "5"),
            ("FANNO_MAX_INPUT_CHARS", "500"),
            ("FANNO_SUBMIT_POLICY", "block"),
            ("FANNO_SMOKE_TEXT", "Build a microservice with REST API"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://api.internal:8080");
        assert_eq!(config.endpoint, AnnotateEndpoint::Simple);
        assert_eq!(config.health_path, "/health");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.max_input_chars, 500);
        assert_eq!(config.submit_policy, SubmitPolicy::Block);
        assert_eq!(config.smoke_text, "Build a microservice with REST API");
    }

    #[test]
    fn base_url_falls_back_to_legacy_variable() {
        let config =
            ClientConfig::from_lookup(lookup(&[("BASE_URL", "http://legacy:5000")])).unwrap();
        assert_eq!(config.base_url, "http://legacy:5000");
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[("FANNO_SMOKE_TEXT", "  ")])).unwrap();
        assert_eq!(config.smoke_text, "Hello world");
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = ClientConfig::from_lookup(lookup(&[("FANNO_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("FANNO_REQUEST_TIMEOUT_SECS"));

        assert!(ClientConfig::from_lookup(lookup(&[("FANNO_MAX_INPUT_CHARS", "0")])).is_err());
    }

    #[test]
    fn max_input_chars_accepts_large_values() {
        let config =
            ClientConfig::from_lookup(lookup(&[("FANNO_MAX_INPUT_CHARS", "4294967295")])).unwrap();
        assert_eq!(config.max_input_chars as u64, u32::MAX as u64);
    }

    #[test]
    fn rejects_max_input_chars_out_of_range() {
        let err = ClientConfig::from_lookup(lookup(&[(
            "FANNO_MAX_INPUT_CHARS",
            "99999999999999999999999",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("FANNO_MAX_INPUT_CHARS"));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("FANNO_SUBMIT_POLICY", "queue")])),
            Err(AnnotationError::Config(_))
        ));
    }
}
