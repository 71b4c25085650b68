//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use thiserror::Error;

use wickbiz_observability::LogFormat;

pub const BIND_ADDR_VAR: &str = "WICKBIZ_BIND_ADDR";
pub const SEED_SAMPLE_VAR: &str = "WICKBIZ_SEED_SAMPLE";
pub const STUB_SEED_VAR: &str = "WICKBIZ_STUB_SEED";
pub const LOG_FORMAT_VAR: &str = "WICKBIZ_LOG_FORMAT";
pub const MAX_UPLOAD_BYTES_VAR: &str = "WICKBIZ_MAX_UPLOAD_BYTES";

/// Room for a few full-resolution phone photos or a scanned multi-page PDF.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{key}={value:?} is invalid: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Start the session with the sample purchases loaded.
    pub seed_sample_data: bool,
    /// Fixed seed for the stub receipt parser; `None` draws from OS entropy.
    pub stub_seed: Option<u64>,
    pub log_format: LogFormat,
    /// Largest accepted receipt upload (whole multipart body).
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_sample_data: true,
            stub_seed: None,
            log_format: LogFormat::Json,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| invalid(BIND_ADDR_VAR, &bind_raw, e))?;

        let seed_sample_data = match get(SEED_SAMPLE_VAR) {
            None => true,
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid(SEED_SAMPLE_VAR, &raw, "expected true/false, 1/0 or yes/no")
            })?,
        };

        let stub_seed = get(STUB_SEED_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| invalid(STUB_SEED_VAR, &raw, e))
            })
            .transpose()?;

        let log_format = get(LOG_FORMAT_VAR)
            .map(|raw| raw.parse::<LogFormat>().map_err(|e| invalid(LOG_FORMAT_VAR, &raw, e)))
            .transpose()?
            .unwrap_or_default();

        let max_upload_bytes = match get(MAX_UPLOAD_BYTES_VAR) {
            None => DEFAULT_MAX_UPLOAD_BYTES,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) => return Err(invalid(MAX_UPLOAD_BYTES_VAR, &raw, "must be greater than zero")),
                Ok(n) => n,
                Err(e) => return Err(invalid(MAX_UPLOAD_BYTES_VAR, &raw, e)),
            },
        };

        Ok(Self {
            bind_addr,
            seed_sample_data,
            stub_seed,
            log_format,
            max_upload_bytes,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ApiConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
            (SEED_SAMPLE_VAR, "no"),
            (STUB_SEED_VAR, "42"),
            (LOG_FORMAT_VAR, "pretty"),
            (MAX_UPLOAD_BYTES_VAR, "1048576"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert!(!config.seed_sample_data);
        assert_eq!(config.stub_seed, Some(42));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.max_upload_bytes, 1024 * 1024);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "  "), (STUB_SEED_VAR, "")])).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn rejects_malformed_values() {
        let err = ApiConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert_eq!(err.key, BIND_ADDR_VAR);

        let err = ApiConfig::from_lookup(lookup(&[(SEED_SAMPLE_VAR, "maybe")])).unwrap_err();
        assert_eq!(err.key, SEED_SAMPLE_VAR);

        let err = ApiConfig::from_lookup(lookup(&[(STUB_SEED_VAR, "-1")])).unwrap_err();
        assert_eq!(err.key, STUB_SEED_VAR);

        let err = ApiConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert_eq!(err.key, LOG_FORMAT_VAR);

        let err = ApiConfig::from_lookup(lookup(&[(MAX_UPLOAD_BYTES_VAR, "0")])).unwrap_err();
        assert_eq!(err.key, MAX_UPLOAD_BYTES_VAR);
    }
}
