use crate::config::BookingConfig;
use crate::domain::model::{ApiResponse, ProviderId};
use crate::domain::ports::BookingApi;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_host;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use url::Url;

pub const SCHEDULE_PATH: &str = "/api/cult/classes/v2?productType=FITNESS";
pub const BOT_USER_AGENT: &str = "GH-Actions-Booking-Bot";

pub fn booking_path(activity_id: &ProviderId) -> String {
    format!("/api/cult/class/{}/book", activity_id)
}

/// cult.fit API client；每個請求都帶上 session token 與 osname header
#[derive(Debug, Clone)]
pub struct CultClient {
    client: Client,
    base_url: Url,
}

impl CultClient {
    pub fn new(config: &BookingConfig) -> Result<Self> {
        let base_url = validate_host("CUREFIT_HOST", &config.host)?;
        Self::build(config, base_url)
    }

    /// 測試時指向 mock server
    pub fn with_base_url(config: &BookingConfig, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| BookingError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        Self::build(config, base_url)
    }

    fn build(config: &BookingConfig, base_url: Url) -> Result<Self> {
        let client = Client::builder()
            .default_headers(build_headers(config)?)
            .build()
            .map_err(|e| BookingError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, base_url })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let url = self.base_url.join(path).map_err(|e| BookingError::ConfigError {
            message: format!("Failed to build request URL for {}: {}", path, e),
        })?;

        tracing::debug!("Making API request: {} {}", method, url);
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = response.text().await?;
        let parsed = decode_body(&content_type, text);

        if !status.is_success() {
            return Err(BookingError::ApiError {
                status: status.as_u16(),
                method: method.to_string(),
                path: path.to_string(),
                body: parsed.to_string(),
            });
        }

        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl BookingApi for CultClient {
    async fn fetch_schedule(&self) -> Result<ApiResponse> {
        self.send(Method::GET, SCHEDULE_PATH, None).await
    }

    async fn book_class(&self, activity_id: &ProviderId) -> Result<ApiResponse> {
        // API 需要 JSON body，空物件即可
        let body = serde_json::json!({});
        self.send(Method::POST, &booking_path(activity_id), Some(&body))
            .await
    }
}

fn build_headers(config: &BookingConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BOT_USER_AGENT));

    headers.insert(
        HeaderName::from_static("st"),
        secret_header("CUREFIT_ST", config.session_token.expose())?,
    );
    headers.insert(
        HeaderName::from_static("at"),
        secret_header("CUREFIT_AT", config.auth_token.expose())?,
    );
    headers.insert(
        HeaderName::from_static("osname"),
        HeaderValue::from_str(&config.os_name).map_err(|_| {
            BookingError::InvalidConfigValueError {
                field: "CUREFIT_OSNAME".to_string(),
                value: config.os_name.clone(),
                reason: "Not a valid HTTP header value".to_string(),
            }
        })?,
    );

    Ok(headers)
}

fn secret_header(field: &str, value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value).map_err(|_| BookingError::ConfigError {
        message: format!("{} is not a valid HTTP header value", field),
    })?;
    header.set_sensitive(true);
    Ok(header)
}

/// 非 JSON 或解析失敗時回傳原始字串，讓供應商的錯誤訊息得以呈現
fn decode_body(content_type: &str, text: String) -> ApiResponse {
    if !text.is_empty() && content_type.contains("application/json") {
        if let Ok(value) = serde_json::from_str(&text) {
            return ApiResponse::Json(value);
        }
        tracing::debug!("Response declared JSON but failed to parse, keeping raw text");
    }
    ApiResponse::Text(text)
}
