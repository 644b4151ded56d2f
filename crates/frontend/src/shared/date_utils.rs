//! Unix-время и поле `<input type="datetime-local">`
//!
//! Смещение часового пояса передаётся явно (минуты к востоку от UTC), чтобы
//! функции можно было проверять без браузера.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

fn offset(offset_minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix())
}

fn local(ts: i64, offset_minutes: i32) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.with_timezone(&offset(offset_minutes)))
}

/// Значение для datetime-local; пустая строка для 0 (граница не задана)
pub fn unix_to_input(ts: i64, offset_minutes: i32) -> String {
    if ts <= 0 {
        return String::new();
    }
    local(ts, offset_minutes)
        .map(|dt| dt.format(INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// Разбор datetime-local (с секундами или без); 0 для пустого или неверного значения
pub fn input_to_unix(value: &str, offset_minutes: i32) -> i64 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    NaiveDateTime::parse_from_str(value, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .and_then(|naive| offset(offset_minutes).from_local_datetime(&naive).single())
        .map(|dt| dt.timestamp())
        .unwrap_or(0)
}

/// Время записи для таблицы: `DD.MM.YYYY HH:MM:SS`
pub fn format_unix(ts: i64, offset_minutes: i32) -> String {
    local(ts, offset_minutes)
        .map(|dt| dt.format("%d.%m.%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}

pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Смещение часового пояса браузера в минутах к востоку от UTC
pub fn local_offset_minutes() -> i32 {
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSK: i32 = 180;

    #[test]
    fn test_unix_to_input() {
        assert_eq!(unix_to_input(0, MSK), "");
        assert_eq!(unix_to_input(1_700_000_000, 0), "2023-11-14T22:13");
        assert_eq!(unix_to_input(1_700_000_000, MSK), "2023-11-15T01:13");
    }

    #[test]
    fn test_input_to_unix() {
        assert_eq!(input_to_unix("", MSK), 0);
        assert_eq!(input_to_unix("garbage", MSK), 0);
        assert_eq!(input_to_unix("2023-11-14T22:13", 0), 1_699_999_980);
        assert_eq!(input_to_unix("2023-11-15T01:13", MSK), 1_699_999_980);
        assert_eq!(input_to_unix("2023-11-14T22:13:20", 0), 1_700_000_000);
    }

    #[test]
    fn test_format_unix() {
        assert_eq!(format_unix(1_700_000_000, 0), "14.11.2023 22:13:20");
        assert_eq!(format_unix(1_700_000_000, MSK), "15.11.2023 01:13:20");
    }
}
