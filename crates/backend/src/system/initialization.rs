use anyhow::Result;
use contracts::system::users::CreateUserDto;

use crate::system::users::{repository, service};

/// Создаёт пользователя `admin`, если таблица пользователей пуста
pub async fn ensure_admin_user_exists() -> Result<()> {
    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let admin_id = service::create(CreateUserDto {
        username: "admin".to_string(),
        password: "admin".to_string(),
        full_name: Some("Administrator".to_string()),
        is_admin: true,
    })
    .await?;

    tracing::warn!("Default admin user created (id {})", admin_id);
    tracing::warn!("Login: admin / admin. Change the password before exposing the server.");
    Ok(())
}
