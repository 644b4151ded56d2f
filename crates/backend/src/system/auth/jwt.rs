use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 90;
const SECRET_KEY: &str = "jwt_secret";

static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// Claims для access-токена пользователя
pub fn build_claims(user_id: &str, username: &str, is_admin: bool) -> TokenClaims {
    let now = Utc::now();
    TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp: (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(data.claims)
}

pub async fn generate_access_token(user_id: &str, username: &str, is_admin: bool) -> Result<String> {
    let secret = jwt_secret().await?;
    encode_claims(&build_claims(user_id, username, is_admin), secret)
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = jwt_secret().await?;
    decode_claims(token, secret)
}

/// Refresh-токен: случайный UUID, в базе хранится только его хеш
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn refresh_token_expiration() -> String {
    (Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS)).to_rfc3339()
}

/// Секрет подписи. Читается из sys_settings один раз; при первом запуске
/// генерируется и сохраняется.
async fn jwt_secret() -> Result<&'static str> {
    if let Some(secret) = JWT_SECRET.get() {
        return Ok(secret.as_str());
    }

    let secret = match load_secret().await? {
        Some(secret) => secret,
        None => {
            let secret = generate_secret();
            save_secret(&secret).await?;
            tracing::info!("Generated new JWT secret");
            secret
        }
    };

    Ok(JWT_SECRET.get_or_init(|| secret).as_str())
}

fn generate_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let bytes: [u8; 32] = rand::thread_rng().gen();
    general_purpose::STANDARD.encode(bytes)
}

async fn load_secret() -> Result<Option<String>> {
    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [SECRET_KEY.into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_secret(secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                SECRET_KEY.into(),
                secret.to_string().into(),
                "JWT signing secret".into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await
        .context("Failed to store JWT secret")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_survive_encoding() {
        let claims = build_claims("u-1", "alice", true);
        let token = encode_claims(&claims, "secret").unwrap();
        let decoded = decode_claims(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "u-1");
        assert_eq!(decoded.username, "alice");
        assert!(decoded.is_admin);
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_claims(&build_claims("u-1", "bob", false), "one").unwrap();
        assert!(decode_claims(&token, "two").is_err());
    }

    #[test]
    fn test_generated_secret_is_256_bit() {
        use base64::{engine::general_purpose, Engine as _};
        let raw = general_purpose::STANDARD.decode(generate_secret()).unwrap();
        assert_eq!(raw.len(), 32);
    }
}
