//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making
//! authenticated JSON requests. Errors are plain `String`s, the convention
//! of every domain adapter.

use gloo_net::http::{Request, RequestBuilder, Response};
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value;

const DEFAULT_API_PORT: u16 = 3000;

static API_PORT: OnceCell<u16> = OnceCell::new();

/// Sets the backend port once at startup (from `ConsoleConfig`).
pub fn init_api(port: u16) {
    if API_PORT.set(port).is_err() {
        log::warn!("API port already initialized, ignoring {}", port);
    }
}

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location and the
/// configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = API_PORT.get().copied().unwrap_or(DEFAULT_API_PORT);
    format!("{}//{}:{}", protocol, hostname, port)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url("/api/chargers/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Path segment with reserved characters escaped.
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", &format!("Bearer {}", token))
}

/// Body as JSON; an empty body is `null`.
async fn read_json(response: Response, what: &str) -> Result<Value, String> {
    if !response.ok() {
        return Err(format!("Failed to {}: {}", what, response.status()));
    }
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_json(path: &str, token: &str, what: &str) -> Result<Value, String> {
    let response = bearer(Request::get(&api_url(path)), token)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, what).await
}

pub async fn post_json<B: Serialize>(
    path: &str,
    body: &B,
    token: &str,
    what: &str,
) -> Result<Value, String> {
    let response = bearer(Request::post(&api_url(path)), token)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, what).await
}

pub async fn put_json<B: Serialize>(
    path: &str,
    body: &B,
    token: &str,
    what: &str,
) -> Result<Value, String> {
    let response = bearer(Request::put(&api_url(path)), token)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response, what).await
}

pub async fn delete(path: &str, token: &str, what: &str) -> Result<(), String> {
    let response = bearer(Request::delete(&api_url(path)), token)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    if !response.ok() {
        return Err(format!("Failed to {}: {}", what, response.status()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(path_segment("CP 01/A"), "CP%2001%2FA");
        assert_eq!(path_segment("c-1"), "c-1");
    }
}
