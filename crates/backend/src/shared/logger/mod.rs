pub mod query;
pub mod repository;

use contracts::shared::logger::LogType;
use repository::log_event_internal;

/// Системное событие сервера в журнал `usage_log`
///
/// # Примеры
/// ```ignore
/// logger::log("Сервер запущен");
/// ```
pub fn log(message: &str) {
    log_event_internal("server", "system", LogType::System, message);
}

/// Действие администратора (например, очистка истории)
pub fn log_manage(user_id: &str, username: &str, message: &str) {
    log_event_internal(user_id, username, LogType::Manage, message);
}
