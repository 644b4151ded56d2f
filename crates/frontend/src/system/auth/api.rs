use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::shared::api_utils::api_base;

async fn parse<T: DeserializeOwned>(response: Response, action: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(format!("{} failed: {}", action, response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

async fn post_refresh_token(path: &str, refresh_token: String) -> Result<Response, String> {
    Request::post(&format!("{}{}", api_base(), path))
        .json(&RefreshRequest { refresh_token })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))
}

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let response = Request::post(&format!("{}/api/system/auth/login", api_base()))
        .json(&LoginRequest { username, password })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if response.status() == 401 {
        return Err("Неверный логин или пароль".to_string());
    }
    parse(response, "Login").await
}

pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let response = post_refresh_token("/api/system/auth/refresh", refresh_token).await?;
    parse(response, "Refresh").await
}

/// Отзыв refresh-токена на сервере
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = post_refresh_token("/api/system/auth/logout", refresh_token).await?;
    if !response.ok() {
        return Err(format!("Logout failed: {}", response.status()));
    }
    Ok(())
}

pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&format!("{}/api/system/auth/me", api_base()))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    parse(response, "Get current user").await
}
