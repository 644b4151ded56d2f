use contracts::shared::logger::{LogQuery, LogType};
use thiserror::Error;

use crate::shared::config::LogsConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogQueryError {
    #[error("Начало периода ({start}) позже его окончания ({end})")]
    InvalidTimeRange { start: i64, end: i64 },
    #[error("Неизвестный тип лога: {0}")]
    UnknownLogType(i32),
}

/// Чьи записи видит запрос
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogScope {
    /// Администратор: все записи, доступны фильтры по пользователю и каналу
    All,
    /// Обычный пользователь: только свои записи
    User(String),
}

/// Фильтр выборки логов; `None` означает «без ограничения»
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub token_name: Option<String>,
    pub model_name: Option<String>,
    pub start_timestamp: Option<i64>,
    pub end_timestamp: Option<i64>,
    pub log_type: Option<i32>,
    pub channel_id: Option<i64>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn positive(value: i64) -> Option<i64> {
    (value > 0).then_some(value)
}

impl LogFilter {
    pub fn from_query(query: &LogQuery, scope: &LogScope) -> Result<Self, LogQueryError> {
        let log_type = LogType::from_code(query.log_type)
            .ok_or(LogQueryError::UnknownLogType(query.log_type))?;

        let start_timestamp = positive(query.start_timestamp);
        let end_timestamp = positive(query.end_timestamp);
        if let (Some(start), Some(end)) = (start_timestamp, end_timestamp) {
            if start > end {
                return Err(LogQueryError::InvalidTimeRange { start, end });
            }
        }

        let mut filter = LogFilter {
            token_name: non_empty(&query.token_name),
            model_name: non_empty(&query.model_name),
            start_timestamp,
            end_timestamp,
            log_type: (log_type != LogType::All).then(|| log_type.code()),
            ..Default::default()
        };

        match scope {
            LogScope::All => {
                filter.username = query.username.as_deref().and_then(non_empty);
                filter.channel_id = query.channel_id();
            }
            LogScope::User(user_id) => {
                filter.user_id = Some(user_id.clone());
            }
        }

        Ok(filter)
    }
}

/// Номер и размер страницы после приведения к допустимым границам
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn from_query(query: &LogQuery, limits: &LogsConfig) -> Self {
        let max = limits.max_page_size.max(1);
        let page_size = match query.page_size {
            Some(size) if size > 0 => (size as u64).min(max),
            _ => limits.default_page_size.clamp(1, max),
        };

        // OFFSET = page * page_size должен помещаться в i64
        let last_page = i64::MAX as u64 / page_size;

        Self {
            page: (query.p.max(0) as u64).min(last_page),
            page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_query() -> LogQuery {
        LogQuery {
            p: 1,
            page_size: Some(25),
            username: Some(" alice ".into()),
            token_name: String::new(),
            model_name: "gpt-4o".into(),
            start_timestamp: 0,
            end_timestamp: 1_700_000_000,
            log_type: 2,
            channel: Some("3".into()),
        }
    }

    #[test]
    fn test_admin_scope_keeps_privileged_filters() {
        let filter = LogFilter::from_query(&admin_query(), &LogScope::All).unwrap();
        assert_eq!(filter.username.as_deref(), Some("alice"));
        assert_eq!(filter.channel_id, Some(3));
        assert_eq!(filter.user_id, None);
        assert_eq!(filter.token_name, None);
        assert_eq!(filter.model_name.as_deref(), Some("gpt-4o"));
        assert_eq!(filter.start_timestamp, None);
        assert_eq!(filter.end_timestamp, Some(1_700_000_000));
        assert_eq!(filter.log_type, Some(2));
    }

    #[test]
    fn test_user_scope_ignores_username_and_channel() {
        let scope = LogScope::User("u-1".into());
        let filter = LogFilter::from_query(&admin_query(), &scope).unwrap();
        assert_eq!(filter.user_id.as_deref(), Some("u-1"));
        assert_eq!(filter.username, None);
        assert_eq!(filter.channel_id, None);
    }

    #[test]
    fn test_type_all_means_no_type_filter() {
        let query = LogQuery {
            log_type: 0,
            ..admin_query()
        };
        let filter = LogFilter::from_query(&query, &LogScope::All).unwrap();
        assert_eq!(filter.log_type, None);
    }

    #[test]
    fn test_rejects_bad_input() {
        let unknown = LogQuery {
            log_type: 9,
            ..admin_query()
        };
        assert_eq!(
            LogFilter::from_query(&unknown, &LogScope::All),
            Err(LogQueryError::UnknownLogType(9))
        );

        let reversed = LogQuery {
            start_timestamp: 200,
            end_timestamp: 100,
            ..admin_query()
        };
        assert_eq!(
            LogFilter::from_query(&reversed, &LogScope::All),
            Err(LogQueryError::InvalidTimeRange {
                start: 200,
                end: 100
            })
        );
    }

    #[test]
    fn test_page_request_bounds() {
        let limits = LogsConfig::default();

        let q = LogQuery {
            p: -3,
            page_size: None,
            ..Default::default()
        };
        assert_eq!(
            PageRequest::from_query(&q, &limits),
            PageRequest {
                page: 0,
                page_size: 10
            }
        );

        let q = LogQuery {
            p: 4,
            page_size: Some(500),
            ..Default::default()
        };
        assert_eq!(PageRequest::from_query(&q, &limits).page_size, 100);
        assert_eq!(PageRequest::from_query(&q, &limits).page, 4);

        let q = LogQuery {
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(PageRequest::from_query(&q, &limits).page_size, 10);
    }

    #[test]
    fn test_huge_page_index_keeps_offset_in_range() {
        let limits = LogsConfig::default();
        for size in [Some(100), Some(1), None] {
            let q = LogQuery {
                p: i64::MAX,
                page_size: size,
                ..Default::default()
            };
            let page = PageRequest::from_query(&q, &limits);
            let offset = page.page.checked_mul(page.page_size);
            assert!(offset.is_some_and(|o| o <= i64::MAX as u64), "{page:?}");
        }
    }
}
