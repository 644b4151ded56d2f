use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use std::time::Duration;

use crate::shared::format::format_size;

/// Московское время для консоли
fn msk_now() -> String {
    (Utc::now() + chrono::Duration::hours(3))
        .format("%H:%M:%S")
        .to_string()
}

fn request_line(
    time: &str,
    elapsed: Duration,
    size: &str,
    status: StatusCode,
    method: &Method,
    path: &str,
) -> String {
    // голубой для 200, коричневый для остальных
    let color = if status == StatusCode::OK { "36" } else { "33" };
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>10} | {} {:>6} {}",
        color,
        time,
        elapsed.as_millis(),
        size,
        status.as_u16(),
        method.as_str(),
        path
    )
}

/// Журнал HTTP-запросов: время, длительность, размер ответа, статус, метод, путь
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let (parts, body) = next.run(req).await.into_parts();

    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            println!(
                "{}",
                request_line(
                    &msk_now(),
                    start.elapsed(),
                    &format_size(bytes.len()),
                    parts.status,
                    &method,
                    &path
                )
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::warn!("Failed to read response body for {} {}: {}", method, path, e);
            println!(
                "{}",
                request_line(&msk_now(), start.elapsed(), "error", parts.status, &method, &path)
            );
            Response::from_parts(parts, Body::empty())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_layout() {
        let line = request_line(
            "12:00:00",
            Duration::from_millis(42),
            "1.024 B",
            StatusCode::OK,
            &Method::GET,
            "/api/log/",
        );
        assert!(line.starts_with("\x1b[36m12:00:00"));
        assert!(line.contains("|    42ms |"));
        assert!(line.ends_with("200    GET /api/log/"));
    }

    #[test]
    fn test_non_ok_status_is_highlighted() {
        let line = request_line(
            "12:00:00",
            Duration::ZERO,
            "0 B",
            StatusCode::FORBIDDEN,
            &Method::DELETE,
            "/api/log/",
        );
        assert!(line.starts_with("\x1b[33m"));
        assert!(line.contains("403 DELETE"));
    }
}
