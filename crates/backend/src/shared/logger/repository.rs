use chrono::Utc;
use contracts::shared::logger::{CreateLogRequest, LogRecord, LogType};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select, Set};

use super::query::{LogFilter, PageRequest};
use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "usage_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub created_at: i64,
    pub log_type: i32,
    pub content: String,
    pub username: String,
    pub token_name: String,
    pub model_name: String,
    pub quota: i64,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub channel_id: i64,
    pub elapsed_time: i64,
    pub is_stream: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LogRecord {
    fn from(m: Model) -> Self {
        LogRecord {
            id: m.id,
            user_id: m.user_id,
            created_at: m.created_at,
            log_type: m.log_type,
            content: m.content,
            username: m.username,
            token_name: m.token_name,
            model_name: m.model_name,
            quota: m.quota,
            prompt_tokens: m.prompt_tokens,
            completion_tokens: m.completion_tokens,
            channel: m.channel_id,
            elapsed_time: m.elapsed_time,
            is_stream: m.is_stream,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Накладывает фильтры на выборку; пустые поля фильтра не участвуют
pub fn apply_filters(mut q: Select<Entity>, filter: &LogFilter) -> Select<Entity> {
    if let Some(ref user_id) = filter.user_id {
        q = q.filter(Column::UserId.eq(user_id.as_str()));
    }
    if let Some(ref username) = filter.username {
        q = q.filter(Column::Username.eq(username.as_str()));
    }
    if let Some(ref token_name) = filter.token_name {
        q = q.filter(Column::TokenName.eq(token_name.as_str()));
    }
    if let Some(ref model_name) = filter.model_name {
        q = q.filter(Column::ModelName.eq(model_name.as_str()));
    }
    if let Some(start) = filter.start_timestamp {
        q = q.filter(Column::CreatedAt.gte(start));
    }
    if let Some(end) = filter.end_timestamp {
        q = q.filter(Column::CreatedAt.lte(end));
    }
    if let Some(log_type) = filter.log_type {
        q = q.filter(Column::LogType.eq(log_type));
    }
    if let Some(channel_id) = filter.channel_id {
        q = q.filter(Column::ChannelId.eq(channel_id));
    }
    q
}

/// Одна страница логов (новые сверху) и общее число подходящих записей
pub async fn list_page(
    filter: &LogFilter,
    page: PageRequest,
) -> anyhow::Result<(Vec<LogRecord>, i64)> {
    let paginator = apply_filters(Entity::find(), filter)
        .order_by_desc(Column::Id)
        .paginate(conn(), page.page_size);

    let total = paginator.num_items().await?;
    let items = paginator
        .fetch_page(page.page)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total as i64))
}

/// Добавить запись в лог
pub async fn insert(req: &CreateLogRequest) -> anyhow::Result<i64> {
    let active = ActiveModel {
        id: sea_orm::ActiveValue::NotSet,
        user_id: Set(req.user_id.clone()),
        created_at: Set(Utc::now().timestamp()),
        log_type: Set(req.log_type),
        content: Set(req.content.clone()),
        username: Set(req.username.clone()),
        token_name: Set(req.token_name.clone()),
        model_name: Set(req.model_name.clone()),
        quota: Set(req.quota),
        prompt_tokens: Set(req.prompt_tokens),
        completion_tokens: Set(req.completion_tokens),
        channel_id: Set(req.channel),
        elapsed_time: Set(req.elapsed_time),
        is_stream: Set(req.is_stream),
    };

    let saved = active.insert(conn()).await?;
    Ok(saved.id)
}

/// Удалить записи старше `target_timestamp`, вернуть количество удалённых
pub async fn delete_before(target_timestamp: i64) -> anyhow::Result<u64> {
    let result = Entity::delete_many()
        .filter(Column::CreatedAt.lt(target_timestamp))
        .exec(conn())
        .await?;
    Ok(result.rows_affected)
}

/// Запись системного события в фоне
pub fn log_event_internal(user_id: &str, username: &str, log_type: LogType, content: &str) {
    let req = CreateLogRequest {
        user_id: user_id.to_string(),
        username: username.to_string(),
        log_type: log_type.code(),
        content: content.to_string(),
        token_name: String::new(),
        model_name: String::new(),
        quota: 0,
        prompt_tokens: 0,
        completion_tokens: 0,
        channel: 0,
        elapsed_time: 0,
        is_stream: false,
    };

    tokio::spawn(async move {
        if let Err(e) = insert(&req).await {
            tracing::error!("Failed to log event: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn where_clause(filter: &LogFilter) -> String {
        let sql = apply_filters(Entity::find(), filter)
            .build(DbBackend::Sqlite)
            .to_string();
        sql.split_once("WHERE")
            .map(|(_, w)| w.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_filter_has_no_where() {
        assert_eq!(where_clause(&LogFilter::default()), "");
    }

    #[test]
    fn test_admin_filters_are_applied() {
        let filter = LogFilter {
            username: Some("alice".into()),
            model_name: Some("gpt-4o".into()),
            start_timestamp: Some(100),
            end_timestamp: Some(200),
            log_type: Some(2),
            channel_id: Some(7),
            ..Default::default()
        };
        let w = where_clause(&filter);
        assert!(w.contains(r#""usage_log"."username" = 'alice'"#), "{w}");
        assert!(w.contains(r#""usage_log"."model_name" = 'gpt-4o'"#), "{w}");
        assert!(w.contains(r#""usage_log"."created_at" >= 100"#), "{w}");
        assert!(w.contains(r#""usage_log"."created_at" <= 200"#), "{w}");
        assert!(w.contains(r#""usage_log"."log_type" = 2"#), "{w}");
        assert!(w.contains(r#""usage_log"."channel_id" = 7"#), "{w}");
        assert!(!w.contains("user_id"), "{w}");
    }

    #[test]
    fn test_self_scope_pins_user() {
        let filter = LogFilter {
            user_id: Some("u-42".into()),
            token_name: Some("default".into()),
            ..Default::default()
        };
        let w = where_clause(&filter);
        assert!(w.contains(r#""usage_log"."user_id" = 'u-42'"#), "{w}");
        assert!(w.contains(r#""usage_log"."token_name" = 'default'"#), "{w}");
        assert!(!w.contains("username"), "{w}");
    }
}
