#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "www.cure.fit";
pub const DEFAULT_OS_NAME: &str = "ios";
pub const DEFAULT_SLOT: &str = "07:00:00";
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 6;
pub const DEFAULT_RETRY_DELAY_SECONDS: u64 = 20;

/// 不會出現在 Debug/Display 輸出中的字串
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[derive(Debug, Clone)]
pub struct BookingConfig {
    pub host: String,
    pub session_token: SecretString,
    pub auth_token: SecretString,
    pub os_name: String,
    pub center_id: String,
    pub workout_ids: Vec<String>,
    pub slot: String,
    pub retry_attempts: u32,
    pub retry_delay_seconds: u64,
}

impl BookingConfig {
    /// 從行程環境變數載入配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| validation::validate_required_field(name, lookup(name));
        let optional = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = optional("CUREFIT_HOST", DEFAULT_HOST);
        let session_token = SecretString::new(required("CUREFIT_ST")?);
        let auth_token = SecretString::new(required("CUREFIT_AT")?);
        let os_name = optional("CUREFIT_OSNAME", DEFAULT_OS_NAME);
        let center_id = required("CUREFIT_CENTER_ID")?;

        let workout_ids = validation::parse_list(&required("CUREFIT_WORKOUT_IDS")?);
        if workout_ids.is_empty() {
            return Err(BookingError::MissingConfigError {
                field: "CUREFIT_WORKOUT_IDS".to_string(),
            });
        }

        let slot = optional("CUREFIT_SLOT", DEFAULT_SLOT);

        let retry_attempts = validation::parse_integer::<u32>(
            "RETRY_ATTEMPTS",
            &optional("RETRY_ATTEMPTS", &DEFAULT_RETRY_ATTEMPTS.to_string()),
        )?;
        let retry_delay_seconds = validation::parse_integer::<u64>(
            "RETRY_DELAY_SECONDS",
            &optional("RETRY_DELAY_SECONDS", &DEFAULT_RETRY_DELAY_SECONDS.to_string()),
        )?;

        let config = Self {
            host,
            session_token,
            auth_token,
            os_name,
            center_id,
            workout_ids,
            slot,
            retry_attempts,
            retry_delay_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}

impl Validate for BookingConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_host("CUREFIT_HOST", &self.host)?;
        validation::validate_non_empty_string("CUREFIT_OSNAME", &self.os_name)?;
        validation::validate_positive_number("RETRY_ATTEMPTS", self.retry_attempts, 1)?;

        tracing::debug!("✅ Booking configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("CUREFIT_ST", "st-token"),
            ("CUREFIT_AT", "at-token"),
            ("CUREFIT_CENTER_ID", "101"),
            ("CUREFIT_WORKOUT_IDS", "37,9"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<BookingConfig> {
        BookingConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_env()).unwrap();

        assert_eq!(config.host, "www.cure.fit");
        assert_eq!(config.os_name, "ios");
        assert_eq!(config.slot, "07:00:00");
        assert_eq!(config.retry_attempts, 6);
        assert_eq!(config.retry_delay(), Duration::from_secs(20));
        assert_eq!(config.session_token.expose(), "st-token");
        assert_eq!(config.workout_ids, vec!["37", "9"]);
    }

    #[test]
    fn test_overrides_and_workout_list_parsing() {
        let mut env = base_env();
        env.insert("CUREFIT_HOST", "staging.cure.fit");
        env.insert("CUREFIT_SLOT", "18:00:00");
        env.insert("CUREFIT_WORKOUT_IDS", "37, 9 ,8");
        env.insert("RETRY_ATTEMPTS", "3");
        env.insert("RETRY_DELAY_SECONDS", "0");

        let config = load(&env).unwrap();

        assert_eq!(config.host, "staging.cure.fit");
        assert_eq!(config.slot, "18:00:00");
        assert_eq!(config.workout_ids, vec!["37", "9", "8"]);
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay_seconds, 0);
    }

    #[test]
    fn test_blank_required_value_is_missing() {
        for field in ["CUREFIT_ST", "CUREFIT_AT", "CUREFIT_CENTER_ID", "CUREFIT_WORKOUT_IDS"] {
            let mut unset = base_env();
            unset.remove(field);
            let unset_err = load(&unset).unwrap_err();

            let mut blank = base_env();
            blank.insert(field, "   ");
            let blank_err = load(&blank).unwrap_err();

            assert!(unset_err.is_configuration());
            assert_eq!(unset_err.to_string(), blank_err.to_string());
            assert_eq!(
                unset_err.to_string(),
                format!("Missing required env var: {}", field)
            );
        }
    }

    #[test]
    fn test_workout_list_with_only_separators_fails() {
        let mut env = base_env();
        env.insert("CUREFIT_WORKOUT_IDS", " , ,");

        let err = load(&env).unwrap_err();
        assert!(matches!(err, BookingError::MissingConfigError { ref field } if field == "CUREFIT_WORKOUT_IDS"));
    }

    #[test]
    fn test_blank_optional_value_uses_default() {
        let mut env = base_env();
        env.insert("CUREFIT_SLOT", "  ");
        env.insert("RETRY_ATTEMPTS", "");

        let config = load(&env).unwrap();
        assert_eq!(config.slot, DEFAULT_SLOT);
        assert_eq!(config.retry_attempts, DEFAULT_RETRY_ATTEMPTS);
    }

    #[test]
    fn test_non_numeric_retry_values_fail_fast() {
        let mut env = base_env();
        env.insert("RETRY_ATTEMPTS", "many");
        assert!(matches!(
            load(&env).unwrap_err(),
            BookingError::InvalidConfigValueError { ref field, .. } if field == "RETRY_ATTEMPTS"
        ));

        let mut env = base_env();
        env.insert("RETRY_DELAY_SECONDS", "1.5");
        assert!(matches!(
            load(&env).unwrap_err(),
            BookingError::InvalidConfigValueError { ref field, .. } if field == "RETRY_DELAY_SECONDS"
        ));
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut env = base_env();
        env.insert("RETRY_ATTEMPTS", "0");
        assert!(load(&env).unwrap_err().is_configuration());
    }

    #[test]
    fn test_debug_output_redacts_tokens() {
        let config = load(&base_env()).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("st-token"));
        assert!(!debug.contains("at-token"));
        assert!(debug.contains("***"));
    }
}
