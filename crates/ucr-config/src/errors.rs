use std::fmt;

/// Failures surfaced while loading and validating [`crate::AppConfig`].
#[derive(Debug)]
pub enum ConfigError {
    MissingRequired { var: String },
    InvalidValue { var: String, value: String },
    /// `APP_ENVIRONMENT=production` but one or more base URLs (or the API
    /// key allowlist) were left at their non-production defaults.
    ProductionGuardFailed { vars: Vec<String> },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { var } => write!(f, "missing required config value: {var}"),
            Self::InvalidValue { var, value } => {
                write!(f, "invalid value for {var}: {value:?}")
            }
            Self::ProductionGuardFailed { vars } => write!(
                f,
                "production environment requires explicit values for: {}",
                vars.join(", ")
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
