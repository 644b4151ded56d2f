use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

/// Достаёт Bearer-токен из заголовка Authorization
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn authenticate(token: Option<String>) -> Result<TokenClaims, StatusCode> {
    let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
    super::jwt::validate_token(&token).await.map_err(|e| {
        tracing::debug!("Rejected token: {:#}", e);
        StatusCode::UNAUTHORIZED
    })
}

/// Любой вошедший пользователь; claims кладутся в extensions запроса
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(bearer_token(&req).map(str::to_owned)).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Только администратор
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = authenticate(bearer_token(&req).map(str::to_owned)).await?;
    if !claims.is_admin {
        tracing::warn!("User {} tried to reach admin route {}", claims.username, req.uri().path());
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/log/");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&request_with(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&request_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request_with(Some("Bearer "))), None);
        assert_eq!(bearer_token(&request_with(None)), None);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        assert_eq!(authenticate(None).await.unwrap_err(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_guarded_routers_build() {
        let _ = crate::routes::configure_log_routes();
        let _ = crate::system::api::routes::configure_system_routes();
    }
}
