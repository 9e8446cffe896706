//! HTTP helpers for the backend JSON API with consistent timeouts, headers,
//! and error handling. Every request attaches the CSRF token read fresh from
//! the `csrftoken` cookie plus a bearer token when the session store holds
//! one; every failure passes through a single logging interception point
//! before being returned with its status and payload intact.

use super::config::AppConfig;
use super::errors::{classify_response, ApiError};
use crate::features::auth::store::SessionStore;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::to_string;
use web_sys::{AbortController, RequestCredentials};

/// Default request timeout (milliseconds) applied to all HTTP helpers.
const DEFAULT_TIMEOUT_MS: u32 = 10_000;
/// Cookie the backend sets for CSRF protection; echoed back on every request.
const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "X-CSRFToken";

/// Fetches JSON from the backend with session headers and cookies.
pub async fn get_json<T: DeserializeOwned>(store: &SessionStore, path: &str) -> Result<T, ApiError> {
    let url = build_url(path);
    let headers = request_headers(store);
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::get(&url)
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal));
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        builder
            .build()
            .map_err(|err| ApiError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Posts JSON to the backend and parses a JSON response.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    store: &SessionStore,
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let url = build_url(path);
    let headers = request_headers(store);
    let payload = to_string(body)
        .map_err(|err| ApiError::Serialization(format!("Failed to encode request: {err}")))?;
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::post(&url)
            .header("Content-Type", "application/json")
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal));
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        builder
            .body(payload)
            .map_err(|err| ApiError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Posts an empty body, used for action endpoints that take no payload.
pub async fn post_empty<T: DeserializeOwned>(
    store: &SessionStore,
    path: &str,
) -> Result<T, ApiError> {
    let url = build_url(path);
    let headers = request_headers(store);
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal));
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        builder
            .body("")
            .map_err(|err| ApiError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Posts multipart form data (file uploads). The browser supplies the
/// multipart boundary, so no Content-Type header is set here.
pub async fn post_form<T: DeserializeOwned>(
    store: &SessionStore,
    path: &str,
    form: web_sys::FormData,
) -> Result<T, ApiError> {
    let url = build_url(path);
    let headers = request_headers(store);
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::post(&url)
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal));
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        builder
            .body(form)
            .map_err(|err| ApiError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Issues a DELETE and parses a JSON response.
pub async fn delete_json<T: DeserializeOwned>(
    store: &SessionStore,
    path: &str,
) -> Result<T, ApiError> {
    let url = build_url(path);
    let headers = request_headers(store);
    let response = send_with_timeout(move |signal| {
        let mut builder = Request::delete(&url)
            .credentials(RequestCredentials::Include)
            .abort_signal(Some(signal));
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        builder
            .build()
            .map_err(|err| ApiError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Builds a URL from the configured API base URL and the provided path.
fn build_url(path: &str) -> String {
    let config = AppConfig::load();
    let base = config.api_base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Headers attached to every outgoing request. The CSRF cookie is read fresh
/// per request rather than cached.
fn request_headers(store: &SessionStore) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    if let Some(csrf) = cookie_string().as_deref().and_then(|c| cookie_value(c, CSRF_COOKIE)) {
        headers.push((CSRF_HEADER.to_string(), csrf));
    }
    if let Some(token) = store.token() {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }
    headers
}

/// Extracts one cookie value from a `document.cookie` string.
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

#[cfg(target_arch = "wasm32")]
fn cookie_string() -> Option<String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    let html_document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    html_document.cookie().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn cookie_string() -> Option<String> {
    None
}

/// Single interception point for failed requests: log, then hand the error
/// back unchanged so callers keep the status code and server payload.
fn fail(err: ApiError) -> ApiError {
    log::error!("api request failed: {err}");
    err
}

/// Maps network errors into user-facing `ApiError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> ApiError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        fail(ApiError::Timeout("Request timed out. Please try again.".to_string()))
    } else {
        fail(ApiError::Network(format!("Unable to reach the server: {message}")))
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<gloo_net::http::Request, ApiError>,
) -> Result<gloo_net::http::Response, ApiError> {
    let controller = AbortController::new()
        .map_err(|_| ApiError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

/// Parses JSON responses and classifies HTTP errors.
async fn handle_json_response<T: DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<T, ApiError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| fail(ApiError::Parse(format!("Failed to decode response: {err}"))))
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(fail(classify_response(status, &body)))
    }
}

#[cfg(test)]
mod tests {
    use super::cookie_value;

    #[test]
    fn cookie_value_finds_named_cookie() {
        let cookies = "sessionid=abc123; csrftoken=tok-456; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken"), Some("tok-456".to_string()));
    }

    #[test]
    fn cookie_value_handles_missing_or_empty() {
        assert_eq!(cookie_value("", "csrftoken"), None);
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
        assert_eq!(cookie_value("other=1", "csrftoken"), None);
    }
}
