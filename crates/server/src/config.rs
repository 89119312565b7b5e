use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use shared::{ExtractionMode, Language};

use crate::error::ServiceError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Настройки сервиса, читаются один раз при старте
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    pub language: Language,
    pub extraction: ExtractionMode,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `lookup` возвращает значение переменной окружения по имени
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("GEMINI_API_KEY").ok_or_else(|| {
            ServiceError::Configuration(
                "GEMINI_API_KEY is not set; add it to .env or export it"
                    .to_string(),
            )
        })?;

        let addr = var("KITCHEN_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr.parse::<SocketAddr>().map_err(|e| {
            ServiceError::Configuration(format!("KITCHEN_ADDR '{}' is invalid: {}", addr, e))
        })?;

        let language = match var("KITCHEN_LANGUAGE") {
            Some(v) => v.parse::<Language>().map_err(|e| {
                ServiceError::Configuration(format!("KITCHEN_LANGUAGE: {}", e))
            })?,
            None => Language::default(),
        };

        let extraction = match var("KITCHEN_EXTRACTION") {
            Some(v) => v.parse::<ExtractionMode>().map_err(|e| {
                ServiceError::Configuration(format!("KITCHEN_EXTRACTION: {}", e))
            })?,
            None => ExtractionMode::default(),
        };

        let timeout_secs = match var("KITCHEN_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ServiceError::Configuration(format!(
                        "KITCHEN_TIMEOUT_SECS '{}' must be a positive number of seconds",
                        v
                    ))
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            api_base: var("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: var("KITCHEN_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            addr,
            static_dir: var("KITCHEN_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            language,
            extraction,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ServiceError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[("GEMINI_API_KEY", "secret")]).unwrap();
        assert_eq!(cfg.api_key, "secret");
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
        assert_eq!(cfg.language, Language::Finnish);
        assert_eq!(cfg.extraction, ExtractionMode::Lenient);
        assert_eq!(cfg.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_missing_api_key() {
        let err = config(&[]).unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
        assert!(err.to_string().contains(".env"));

        let err = config(&[("GEMINI_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_BASE", "http://localhost:9999/"),
            ("KITCHEN_MODEL", "gemini-2.5-pro"),
            ("KITCHEN_ADDR", "127.0.0.1:3001"),
            ("KITCHEN_STATIC_DIR", "/srv/kitchen"),
            ("KITCHEN_LANGUAGE", "en"),
            ("KITCHEN_EXTRACTION", "strict"),
            ("KITCHEN_TIMEOUT_SECS", "15"),
        ])
        .unwrap();
        assert_eq!(cfg.api_base, "http://localhost:9999");
        assert_eq!(cfg.model, "gemini-2.5-pro");
        assert_eq!(cfg.addr.port(), 3001);
        assert_eq!(cfg.static_dir, PathBuf::from("/srv/kitchen"));
        assert_eq!(cfg.language, Language::English);
        assert_eq!(cfg.extraction, ExtractionMode::Strict);
        assert_eq!(cfg.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("KITCHEN_ADDR", "not-an-addr"),
            ("KITCHEN_LANGUAGE", "klingon"),
            ("KITCHEN_EXTRACTION", "fuzzy"),
            ("KITCHEN_TIMEOUT_SECS", "0"),
            ("KITCHEN_TIMEOUT_SECS", "soon"),
        ] {
            let err = config(&[("GEMINI_API_KEY", "k"), (key, value)]).unwrap_err();
            assert!(err.to_string().contains(key), "{key}={value}: {err}");
        }
    }
}
