use crate::utils::error::{BookingError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 讀取必填值，空白字串視同未設定
pub fn validate_required_field(field_name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(BookingError::MissingConfigError {
            field: field_name.to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_host(field_name: &str, host: &str) -> Result<Url> {
    validate_non_empty_string(field_name, host)?;

    let url = Url::parse(&format!("https://{}", host)).map_err(|e| {
        BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: format!("Invalid host: {}", e),
        }
    })?;

    // host 不可帶 scheme 或路徑
    if url.path() != "/" || url.query().is_some() || host.contains("://") {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: "Expected a bare host name such as www.cure.fit".to_string(),
        });
    }

    Ok(url)
}

pub fn parse_integer<T>(field_name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Not a valid integer: {}", e),
        })
}

/// 逗號分隔清單：逐項 trim，捨棄空項目，保留順序
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
