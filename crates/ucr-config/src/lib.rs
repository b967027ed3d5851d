//! Typed configuration loading and the production-readiness guard.
//!
//! This is the **single source of truth** for environment variables: every
//! other crate receives a constructed [`AppConfig`] rather than calling
//! `std::env::var` itself. `Debug` on [`AppConfig`] redacts every secret
//! field, mirroring the contract the teacher workspace documents for its own
//! `ResolvedSecrets` type.

use std::fmt;

mod errors;
mod retry_policy;

pub use errors::ConfigError;
pub use retry_policy::RetryPolicy;

/// Runtime environment the production base-URL guard keys off of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Environment {
    fn from_env_value(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Production default GUS/KRS/CEIDG endpoints. Used when the corresponding
/// env var is absent; the production guard checks whether this default was
/// actually taken, not just what the resolved value equals (an operator is
/// free to explicitly set the base URL to this exact string).
pub const DEFAULT_GUS_BASE_URL: &str = "https://wyszukiwarkaregonjst.stat.gov.pl/wsBir";
pub const DEFAULT_GUS_WSDL_URL: &str = "https://wyszukiwarkaregonjst.stat.gov.pl/wsBir/wsdl/UslugaBIRzewnPubl-ver11-prod.wsdl";
pub const DEFAULT_KRS_BASE_URL: &str = "https://api-krs.ms.gov.pl";
pub const DEFAULT_CEIDG_BASE_URL: &str = "https://dane.biznes.gov.pl/api/ceidg/v3";

const DEFAULT_GUS_MAX_REQUESTS_PER_SECOND: u32 = 10;
const DEFAULT_GUS_MAX_RETRIES: u32 = 2;
const DEFAULT_GUS_INITIAL_DELAY_MS: u64 = 100;
const DEFAULT_KRS_MAX_RETRIES: u32 = 2;
const DEFAULT_KRS_INITIAL_DELAY_MS: u64 = 200;
const DEFAULT_CEIDG_MAX_RETRIES: u32 = 2;
const DEFAULT_CEIDG_INITIAL_DELAY_MS: u64 = 150;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_EXTERNAL_API_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_INCOMING_RATE_LIMIT_PER_SECOND: u32 = 20;

/// Fully resolved, validated application configuration.
///
/// Construct once at startup via [`AppConfig::from_env`]. Never scatter
/// `std::env::var` calls elsewhere in the codebase.
#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub bind_addr: String,

    pub gus_user_key: String,
    pub gus_base_url: String,
    pub gus_wsdl_url: String,
    pub gus_max_requests_per_second: u32,
    pub gus_retry: RetryPolicy,

    pub krs_base_url: String,
    pub krs_retry: RetryPolicy,

    pub ceidg_base_url: String,
    pub ceidg_jwt_token: String,
    pub ceidg_retry: RetryPolicy,

    pub request_timeout_ms: u64,
    pub external_api_timeout_ms: u64,

    /// Accepted bearer API keys. Empty outside production means the collaborator
    /// auth middleware passes every request through unauthenticated.
    pub api_keys: Vec<String>,
    pub incoming_rate_limit_per_second: u32,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("bind_addr", &self.bind_addr)
            .field("gus_user_key", &"<redacted>")
            .field("gus_base_url", &self.gus_base_url)
            .field("gus_wsdl_url", &self.gus_wsdl_url)
            .field("gus_max_requests_per_second", &self.gus_max_requests_per_second)
            .field("gus_retry", &self.gus_retry)
            .field("krs_base_url", &self.krs_base_url)
            .field("krs_retry", &self.krs_retry)
            .field("ceidg_base_url", &self.ceidg_base_url)
            .field("ceidg_jwt_token", &"<redacted>")
            .field("ceidg_retry", &self.ceidg_retry)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("external_api_timeout_ms", &self.external_api_timeout_ms)
            .field("api_keys", &format!("<redacted x{}>", self.api_keys.len()))
            .field(
                "incoming_rate_limit_per_second",
                &self.incoming_rate_limit_per_second,
            )
            .finish()
    }
}

/// Resolution of one env var: the value, and whether the default was taken.
struct Resolved {
    value: String,
    defaulted: bool,
}

fn resolve_with_default(var: &str, default: &str) -> Resolved {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Resolved {
            value: v,
            defaulted: false,
        },
        _ => Resolved {
            value: default.to_string(),
            defaulted: true,
        },
    }
}

fn resolve_required(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingRequired { var: var.to_string() }),
    }
}

fn resolve_u32(var: &str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value: v,
            }),
        _ => Ok(default),
    }
}

fn resolve_u64(var: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value: v,
            }),
        _ => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from the process environment and run the
    /// production base-URL guard (spec.md §6: if `APP_ENVIRONMENT=production`
    /// and any of the four base URLs was left at its default, fail startup).
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = std::env::var("APP_ENVIRONMENT")
            .map(|v| Environment::from_env_value(&v))
            .unwrap_or(Environment::Development);

        let bind_addr = std::env::var("APP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let gus_user_key = resolve_required("GUS_USER_KEY")?;
        let gus_base_url = resolve_with_default("GUS_BASE_URL", DEFAULT_GUS_BASE_URL);
        let gus_wsdl_url = resolve_with_default("GUS_WSDL_URL", DEFAULT_GUS_WSDL_URL);
        let gus_max_requests_per_second =
            resolve_u32("GUS_MAX_REQUESTS_PER_SECOND", DEFAULT_GUS_MAX_REQUESTS_PER_SECOND)?;
        let gus_retry = RetryPolicy {
            max_retries: resolve_u32("GUS_MAX_RETRIES", DEFAULT_GUS_MAX_RETRIES)?,
            initial_delay_ms: resolve_u64("GUS_INITIAL_DELAY", DEFAULT_GUS_INITIAL_DELAY_MS)?,
        };

        let krs_base_url = resolve_with_default("KRS_BASE_URL", DEFAULT_KRS_BASE_URL);
        let krs_retry = RetryPolicy {
            max_retries: resolve_u32("KRS_MAX_RETRIES", DEFAULT_KRS_MAX_RETRIES)?,
            initial_delay_ms: resolve_u64("KRS_INITIAL_DELAY", DEFAULT_KRS_INITIAL_DELAY_MS)?,
        };

        let ceidg_base_url = resolve_with_default("CEIDG_BASE_URL", DEFAULT_CEIDG_BASE_URL);
        let ceidg_jwt_token = resolve_required("CEIDG_JWT_TOKEN")?;
        let ceidg_retry = RetryPolicy {
            max_retries: resolve_u32("CEIDG_MAX_RETRIES", DEFAULT_CEIDG_MAX_RETRIES)?,
            initial_delay_ms: resolve_u64("CEIDG_INITIAL_DELAY", DEFAULT_CEIDG_INITIAL_DELAY_MS)?,
        };

        let request_timeout_ms = resolve_u64("APP_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_MS)?;
        let external_api_timeout_ms =
            resolve_u64("APP_EXTERNAL_API_TIMEOUT", DEFAULT_EXTERNAL_API_TIMEOUT_MS)?;

        let api_keys = std::env::var("APP_API_KEYS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let incoming_rate_limit_per_second = resolve_u32(
            "APP_INCOMING_RATE_LIMIT_PER_SECOND",
            DEFAULT_INCOMING_RATE_LIMIT_PER_SECOND,
        )?;

        if environment == Environment::Production {
            let mut defaulted_vars = Vec::new();
            if gus_base_url.defaulted {
                defaulted_vars.push("GUS_BASE_URL");
            }
            if gus_wsdl_url.defaulted {
                defaulted_vars.push("GUS_WSDL_URL");
            }
            if krs_base_url.defaulted {
                defaulted_vars.push("KRS_BASE_URL");
            }
            if ceidg_base_url.defaulted {
                defaulted_vars.push("CEIDG_BASE_URL");
            }
            if !defaulted_vars.is_empty() {
                return Err(ConfigError::ProductionGuardFailed {
                    vars: defaulted_vars.into_iter().map(str::to_string).collect(),
                });
            }
            if api_keys.is_empty() {
                return Err(ConfigError::MissingRequired {
                    var: "APP_API_KEYS".to_string(),
                });
            }
        }

        Ok(Self {
            environment,
            bind_addr,
            gus_user_key,
            gus_base_url: gus_base_url.value,
            gus_wsdl_url: gus_wsdl_url.value,
            gus_max_requests_per_second,
            gus_retry,
            krs_base_url: krs_base_url.value,
            krs_retry,
            ceidg_base_url: ceidg_base_url.value,
            ceidg_jwt_token,
            ceidg_retry,
            request_timeout_ms,
            external_api_timeout_ms,
            api_keys,
            incoming_rate_limit_per_second,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; serialize tests that touch them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all() {
        for var in [
            "APP_ENVIRONMENT",
            "APP_BIND_ADDR",
            "GUS_USER_KEY",
            "GUS_BASE_URL",
            "GUS_WSDL_URL",
            "GUS_MAX_REQUESTS_PER_SECOND",
            "GUS_MAX_RETRIES",
            "GUS_INITIAL_DELAY",
            "KRS_BASE_URL",
            "KRS_MAX_RETRIES",
            "KRS_INITIAL_DELAY",
            "CEIDG_BASE_URL",
            "CEIDG_JWT_TOKEN",
            "CEIDG_MAX_RETRIES",
            "CEIDG_INITIAL_DELAY",
            "APP_REQUEST_TIMEOUT",
            "APP_EXTERNAL_API_TIMEOUT",
            "APP_API_KEYS",
            "APP_INCOMING_RATE_LIMIT_PER_SECOND",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn missing_required_secret_fails_load() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { var } if var == "GUS_USER_KEY"));
    }

    #[test]
    fn development_defaults_do_not_require_explicit_urls() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        std::env::set_var("GUS_USER_KEY", "test-key");
        std::env::set_var("CEIDG_JWT_TOKEN", "test-jwt");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.gus_base_url, DEFAULT_GUS_BASE_URL);
        assert_eq!(cfg.gus_retry.max_retries, DEFAULT_GUS_MAX_RETRIES);
        clear_all();
    }

    #[test]
    fn production_with_defaulted_urls_fails_guard() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        std::env::set_var("APP_ENVIRONMENT", "production");
        std::env::set_var("GUS_USER_KEY", "test-key");
        std::env::set_var("CEIDG_JWT_TOKEN", "test-jwt");
        std::env::set_var("APP_API_KEYS", "abc123");
        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::ProductionGuardFailed { .. }));
        clear_all();
    }

    #[test]
    fn production_with_explicit_urls_and_keys_succeeds() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        std::env::set_var("APP_ENVIRONMENT", "production");
        std::env::set_var("GUS_USER_KEY", "test-key");
        std::env::set_var("CEIDG_JWT_TOKEN", "test-jwt");
        std::env::set_var("GUS_BASE_URL", "https://gus.example/prod");
        std::env::set_var("GUS_WSDL_URL", "https://gus.example/prod.wsdl");
        std::env::set_var("KRS_BASE_URL", "https://krs.example/prod");
        std::env::set_var("CEIDG_BASE_URL", "https://ceidg.example/prod");
        std::env::set_var("APP_API_KEYS", "key-one, key-two");
        let cfg = AppConfig::from_env().unwrap();
        assert_eq!(cfg.api_keys, vec!["key-one".to_string(), "key-two".to_string()]);
        clear_all();
    }

    #[test]
    fn debug_redacts_secrets() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        std::env::set_var("GUS_USER_KEY", "super-secret");
        std::env::set_var("CEIDG_JWT_TOKEN", "super-secret-jwt");
        let cfg = AppConfig::from_env().unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
        clear_all();
    }
}
