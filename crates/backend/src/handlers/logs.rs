use axum::{extract::Query, Json};
use contracts::shared::api_response::ApiResponse;
use contracts::shared::logger::{CreateLogRequest, DeleteLogsRequest, LogListResponse, LogQuery, LogType};

use crate::shared::config::logs_config;
use crate::shared::logger::{
    self,
    query::{LogFilter, LogScope, PageRequest},
    repository,
};
use crate::system::auth::extractor::CurrentUser;

async fn fetch_page(query: LogQuery, scope: LogScope) -> LogListResponse {
    let filter = match LogFilter::from_query(&query, &scope) {
        Ok(filter) => filter,
        Err(e) => return ApiResponse::fail(e.to_string()),
    };
    let page = PageRequest::from_query(&query, &logs_config());

    match repository::list_page(&filter, page).await {
        Ok((items, total)) => ApiResponse::ok(items, total),
        Err(e) => {
            tracing::error!("Failed to list logs (page {}): {}", page.page, e);
            ApiResponse::fail(format!("Не удалось загрузить логи: {}", e))
        }
    }
}

/// GET /api/log/ - все записи, только для администратора
pub async fn list_all(Query(query): Query<LogQuery>) -> Json<LogListResponse> {
    Json(fetch_page(query, LogScope::All).await)
}

/// GET /api/log/self/ - записи текущего пользователя
pub async fn list_self(
    CurrentUser(claims): CurrentUser,
    Query(query): Query<LogQuery>,
) -> Json<LogListResponse> {
    Json(fetch_page(query, LogScope::User(claims.sub)).await)
}

/// POST /api/log/
pub async fn create(Json(req): Json<CreateLogRequest>) -> Json<ApiResponse<i64>> {
    if LogType::from_code(req.log_type).map_or(true, |t| t == LogType::All) {
        return Json(ApiResponse::fail(format!(
            "Недопустимый тип записи: {}",
            req.log_type
        )));
    }

    match repository::insert(&req).await {
        Ok(id) => Json(ApiResponse::ok(id, 1)),
        Err(e) => {
            tracing::error!("Failed to insert log record: {}", e);
            Json(ApiResponse::fail(e.to_string()))
        }
    }
}

/// DELETE /api/log/?target_timestamp=T - удаляет записи старше T
pub async fn delete_history(
    CurrentUser(claims): CurrentUser,
    Query(req): Query<DeleteLogsRequest>,
) -> Json<ApiResponse<u64>> {
    if req.target_timestamp <= 0 {
        return Json(ApiResponse::fail("target timestamp is required"));
    }

    match repository::delete_before(req.target_timestamp).await {
        Ok(removed) => {
            tracing::info!(
                "{} removed {} log records older than {}",
                claims.username,
                removed,
                req.target_timestamp
            );
            logger::log_manage(
                &claims.sub,
                &claims.username,
                &format!("Удалено записей лога: {}", removed),
            );
            Json(ApiResponse::ok(removed, removed as i64))
        }
        Err(e) => {
            tracing::error!("Failed to delete log history: {}", e);
            Json(ApiResponse::fail(e.to_string()))
        }
    }
}
