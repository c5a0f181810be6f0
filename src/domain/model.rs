use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::fmt;

/// 供應商的 id 可能是字串也可能是數字，一律正規化為字串比較
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderId(pub String);

impl ProviderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 物件、陣列與 null 不是合法 id
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(normalize_number(n))),
            Value::Bool(b) => Some(Self(b.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 整數值的浮點數 (7.0) 輸出為 "7"
fn normalize_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassState {
    Available,
    Other(String),
}

impl ClassState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Other(s) => s,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl From<String> for ClassState {
    fn from(value: String) -> Self {
        if value == "AVAILABLE" {
            Self::Available
        } else {
            Self::Other(value)
        }
    }
}

impl fmt::Display for ClassState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 只有 `days` 與 `classByDateMap` 在解析時嚴格檢查，各日內容留待選取時再解析
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    pub days: Vec<Value>,
    pub class_by_date_map: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<ProviderId>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub center_wise_classes: Vec<CenterBlock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterBlock {
    #[serde(default, deserialize_with = "lenient_id")]
    pub center_id: Option<ProviderId>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub classes: Vec<ClassOffering>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOffering {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<ProviderId>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub workout_id: Option<ProviderId>,
    #[serde(default, deserialize_with = "lenient_state")]
    pub state: Option<ClassState>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_time: Option<String>,
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ProviderId>, D::Error> {
    Ok(ProviderId::from_value(&Value::deserialize(deserializer)?))
}

fn lenient_state<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ClassState>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(ClassState::from(s))),
        _ => Ok(None),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Ok(None),
    }
}

/// null 或非陣列視為空清單，形狀不符的元素直接略過
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// 通過篩選、可預約的課程；rank 為 workout id 在偏好清單中的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub activity_id: ProviderId,
    pub workout_id: ProviderId,
    pub state: ClassState,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub rank: Option<usize>,
}

/// content-type 為 JSON 且可解析時為 Json，否則保留原始文字
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}
