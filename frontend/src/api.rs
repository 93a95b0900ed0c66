//! HTTP client for the Registra AI backend.

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, warn};
use web_sys::RequestCredentials;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{HistoryData, HomeContent, RecordKind, RegisterRequest, RegisterResponse, UserData};

pub const AUTH_HEADER: &str = "X-Is-Authenticated";

/// Backend operations the view controller depends on.
#[async_trait(?Send)]
pub trait FinanceApi {
    async fn home_content(&self) -> Result<HomeContent, ApiError>;
    async fn user_data(&self) -> Result<UserData, ApiError>;
    async fn register(
        &self,
        kind: RecordKind,
        amount: f64,
        description: &str,
    ) -> Result<RegisterResponse, ApiError>;
    async fn history(&self) -> Result<HistoryData, ApiError>;
}

#[derive(Clone, Copy, Debug)]
enum Method {
    Get,
    Post,
}

/// Error payload produced by the backend's abort helper.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct HttpApi {
    config: AppConfig,
}

impl HttpApi {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn builder(method: Method, url: &str) -> RequestBuilder {
        let builder = match method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
        };
        builder
            .credentials(RequestCredentials::Include)
            .header("Content-Type", "application/json")
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        route: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let url = self.config.api_url(route);
        debug!(?method, %url, "sending request");

        let result = self.send(method, &url, body).await;
        if let Err(err) = &result {
            error!(%url, %err, "request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let builder = Self::builder(method, url);
        let request = match body {
            Some(body) => builder.json(&body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(status_error(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl FinanceApi for HttpApi {
    async fn home_content(&self) -> Result<HomeContent, ApiError> {
        let url = self.config.content_url();
        debug!(%url, "fetching home content");

        let response = Request::get(&url)
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let header = response.headers().get(AUTH_HEADER);
        let html = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(home_from_response(response.status(), header.as_deref(), html))
    }

    async fn user_data(&self) -> Result<UserData, ApiError> {
        self.request(Method::Get, "/user_data", None).await
    }

    async fn register(
        &self,
        kind: RecordKind,
        amount: f64,
        description: &str,
    ) -> Result<RegisterResponse, ApiError> {
        let body = serde_json::to_value(RegisterRequest {
            amount,
            description,
        })
        .map_err(|e| ApiError::Encode(e.to_string()))?;

        self.request(Method::Post, &format!("/{}", kind), Some(body))
            .await
    }

    async fn history(&self) -> Result<HistoryData, ApiError> {
        self.request(Method::Get, "/history", None).await
    }
}

/// The backend only ever sends the literal `True` for a live session.
pub fn is_authenticated(header: Option<&str>) -> bool {
    header == Some("True")
}

/// Error statuses still carry a fragment (usually the login screen), so it is rendered anyway.
fn home_from_response(status: u16, header: Option<&str>, html: String) -> HomeContent {
    if !(200..300).contains(&status) {
        warn!(status, "home content served with an error status");
    }
    HomeContent {
        html,
        is_authenticated: is_authenticated(header),
    }
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    ApiError::Status {
        status,
        message: status_message(response.text().await),
    }
}

fn status_message(body: Result<String, gloo_net::Error>) -> String {
    match body {
        Ok(text) => error_message(&text),
        Err(err) => {
            warn!(%err, "could not read error body");
            format!("unreadable error body: {}", err)
        }
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("True"), true)]
    #[case(Some("true"), false)]
    #[case(Some("False"), false)]
    #[case(Some(" True"), false)]
    #[case(None, false)]
    fn only_exact_true_header_authenticates(#[case] header: Option<&str>, #[case] expected: bool) {
        assert_eq!(is_authenticated(header), expected);
    }

    #[test]
    fn error_message_prefers_backend_message_field() {
        let body = r#"{"message": "Body sem campo 'amount'", "status_code": 400}"#;
        assert_eq!(error_message(body), "Body sem campo 'amount'");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("  <h1>Bad Gateway</h1>\n"), "<h1>Bad Gateway</h1>");
        assert_eq!(error_message(""), "");
    }

    #[test]
    fn unreadable_error_body_is_reported() {
        let message = status_message(Err(gloo_net::Error::GlooError("stream closed".to_string())));
        assert!(message.contains("stream closed"));
        assert_eq!(
            status_message(Ok(r#"{"message": "Faltou o body"}"#.to_string())),
            "Faltou o body"
        );
    }

    #[rstest]
    #[case(200, Some("True"), true)]
    #[case(401, None, false)]
    #[case(403, Some("False"), false)]
    fn home_fragment_is_kept_for_any_status(
        #[case] status: u16,
        #[case] header: Option<&str>,
        #[case] authenticated: bool,
    ) {
        let content = home_from_response(status, header, "<form id=\"login\"></form>".to_string());
        assert_eq!(content.html, "<form id=\"login\"></form>");
        assert_eq!(content.is_authenticated, authenticated);
    }
}
