use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{CreateUserDto, User};

use super::repository;
use crate::system::auth::password;

/// Создать пользователя, вернуть его id
pub async fn create(dto: CreateUserDto) -> Result<String> {
    let username = dto.username.trim().to_string();
    if username.is_empty() {
        anyhow::bail!("Username cannot be empty");
    }
    if repository::get_by_username(&username).await?.is_some() {
        anyhow::bail!("Username already exists");
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        full_name: dto.full_name,
        is_active: true,
        is_admin: dto.is_admin,
        created_at: Utc::now().to_rfc3339(),
        last_login_at: None,
    };
    repository::create_with_password(&user, &password_hash).await?;

    Ok(user.id)
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// Проверка логина и пароля; `None` при любом несовпадении
/// и для заблокированных пользователей
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_username(username.trim()).await? else {
        return Ok(None);
    };
    if !user.is_active {
        return Ok(None);
    }

    let Some(hash) = repository::get_password_hash(&user.id).await? else {
        return Ok(None);
    };
    if !password::verify_password(password, &hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(&user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.username, e);
    }

    Ok(Some(user))
}
