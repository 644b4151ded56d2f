use serde::{Deserialize, Serialize};

/// Конверт ответа API: `{ success, message, data, total }`
///
/// Ошибки уровня приложения приходят с `success: false` и текстом в `message`,
/// поэтому клиент должен проверять флаг даже при HTTP 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: T,
    /// Total number of matching rows on the server (list endpoints only)
    #[serde(default)]
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, total: i64) -> Self {
        Self {
            success: true,
            message: String::new(),
            data,
            total,
        }
    }
}

impl<T: Default> ApiResponse<T> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: T::default(),
            total: 0,
        }
    }

    /// Splits the envelope into data/total or the server message
    pub fn into_result(self) -> Result<(T, i64), String> {
        if self.success {
            Ok((self.data, self.total))
        } else {
            Err(self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let resp: ApiResponse<Vec<i64>> =
            serde_json::from_str(r#"{"success":false,"message":"нет доступа"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_empty());
        assert_eq!(resp.total, 0);
        assert_eq!(resp.into_result(), Err("нет доступа".to_string()));
    }

    #[test]
    fn test_into_result_success() {
        let resp: ApiResponse<Vec<i64>> =
            serde_json::from_str(r#"{"success":true,"message":"","data":[1,2],"total":7}"#)
                .unwrap();
        assert_eq!(resp.into_result(), Ok((vec![1, 2], 7)));
    }
}
