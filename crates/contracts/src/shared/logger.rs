use serde::{Deserialize, Serialize};

use super::api_response::ApiResponse;

/// Тип записи лога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogType {
    /// Filter value meaning "any type"; never stored
    All,
    Topup,
    Consume,
    Manage,
    System,
}

impl LogType {
    pub const ALL: [LogType; 5] = [
        LogType::All,
        LogType::Topup,
        LogType::Consume,
        LogType::Manage,
        LogType::System,
    ];

    pub fn code(self) -> i32 {
        match self {
            LogType::All => 0,
            LogType::Topup => 1,
            LogType::Consume => 2,
            LogType::Manage => 3,
            LogType::System => 4,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            LogType::All => "Все",
            LogType::Topup => "Пополнение",
            LogType::Consume => "Расход",
            LogType::Manage => "Управление",
            LogType::System => "Система",
        }
    }
}

/// Запись лога использования API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub user_id: String,
    /// Unix seconds
    pub created_at: i64,
    #[serde(rename = "type")]
    pub log_type: i32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub quota: i64,
    #[serde(default)]
    pub prompt_tokens: i64,
    #[serde(default)]
    pub completion_tokens: i64,
    /// Channel id, 0 when the record is not tied to a channel
    #[serde(default)]
    pub channel: i64,
    /// Request duration in milliseconds
    #[serde(default)]
    pub elapsed_time: i64,
    #[serde(default)]
    pub is_stream: bool,
}

/// Query parameters of `GET /api/log/` and `GET /api/log/self/`
///
/// `username` and `channel` are privileged filters: they stay `None` for
/// non-admin callers and are then left out of the query string entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogQuery {
    /// Zero-based page index
    pub p: i64,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub token_name: String,
    pub model_name: String,
    pub start_timestamp: i64,
    pub end_timestamp: i64,
    #[serde(rename = "type")]
    pub log_type: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl LogQuery {
    /// Drops the filters only administrators may use
    pub fn strip_privileged(mut self) -> Self {
        self.username = None;
        self.channel = None;
        self
    }

    /// Channel filter as an id; empty, zero or malformed values mean "any"
    pub fn channel_id(&self) -> Option<i64> {
        self.channel
            .as_deref()
            .and_then(|c| c.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
    }
}

pub type LogListResponse = ApiResponse<Vec<LogRecord>>;

/// DTO для создания новой записи лога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogRequest {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "type")]
    pub log_type: i32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub quota: i64,
    #[serde(default)]
    pub prompt_tokens: i64,
    #[serde(default)]
    pub completion_tokens: i64,
    #[serde(default)]
    pub channel: i64,
    #[serde(default)]
    pub elapsed_time: i64,
    #[serde(default)]
    pub is_stream: bool,
}

/// Query of `DELETE /api/log/`: records older than `target_timestamp` are removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLogsRequest {
    pub target_timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_query() -> LogQuery {
        LogQuery {
            p: 2,
            page_size: Some(25),
            username: Some("alice".into()),
            token_name: "prod".into(),
            model_name: "gpt-4o".into(),
            start_timestamp: 0,
            end_timestamp: 1_700_000_000,
            log_type: 2,
            channel: Some("7".into()),
        }
    }

    #[test]
    fn test_strip_privileged_omits_keys() {
        let value = serde_json::to_value(sample_query().strip_privileged()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("username"));
        assert!(!obj.contains_key("channel"));
        assert_eq!(obj["pageSize"], 25);
        assert_eq!(obj["type"], 2);
        assert_eq!(obj["token_name"], "prod");
    }

    #[test]
    fn test_channel_id_parsing() {
        let mut q = sample_query();
        assert_eq!(q.channel_id(), Some(7));
        q.channel = Some(String::new());
        assert_eq!(q.channel_id(), None);
        q.channel = Some("0".into());
        assert_eq!(q.channel_id(), None);
        q.channel = Some("abc".into());
        assert_eq!(q.channel_id(), None);
    }

    #[test]
    fn test_log_type_codes() {
        for t in LogType::ALL {
            assert_eq!(LogType::from_code(t.code()), Some(t));
        }
        assert_eq!(LogType::from_code(42), None);
    }

    #[test]
    fn test_record_uses_type_key() {
        let raw = r#"{"id":1,"user_id":"u1","created_at":10,"type":2,"model_name":"m"}"#;
        let rec: LogRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.log_type, 2);
        assert_eq!(rec.model_name, "m");
        assert_eq!(rec.quota, 0);
    }
}
