use contracts::shared::logger::{LogListResponse, LogQuery};
use gloo_net::http::Request;

use super::loader::LogSource;
use super::model::endpoint;
use crate::shared::api_utils::api_base;
use crate::system::auth::storage;

/// Логи через HTTP API бэкенда с Bearer-токеном из localStorage
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpLogSource;

impl LogSource for HttpLogSource {
    async fn fetch(&self, privileged: bool, query: &LogQuery) -> Result<LogListResponse, String> {
        let params =
            serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
        let url = format!("{}{}?{}", api_base(), endpoint(privileged), params);

        let mut request = Request::get(&url).header("Accept", "application/json");
        if let Some(token) = storage::get_access_token() {
            request = request.header("Authorization", &format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(format!(
                "Сервер ответил {} {}",
                response.status(),
                response.status_text()
            ));
        }

        response
            .json::<LogListResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    }
}
