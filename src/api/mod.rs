//! REST API Client
//!
//! Fetch-based bindings to the pencil API, organized by resource.
//! JSON in, JSON out, bearer token from localStorage.

pub mod books;
pub mod brands;
pub mod color_combos;
pub mod color_palettes;
pub mod colored_pencil_sets;
pub mod colors;
pub mod inspiration;
pub mod journal_entries;
pub mod user;

use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::Page;
use crate::storage;

/// Unreserved characters stay as they are in query values
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Install the configuration; later calls are ignored
pub fn configure(config: AppConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("[API] configure called twice, keeping the first config");
    }
}

pub fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

// ========================
// Token
// ========================

pub fn token() -> Option<String> {
    storage::get(&config().token_storage_key).filter(|t| !t.is_empty())
}

pub fn set_token(token: &str) {
    storage::set(&config().token_storage_key, token);
}

pub fn clear_token() {
    storage::remove(&config().token_storage_key);
}

pub fn is_signed_in() -> bool {
    token().is_some()
}

// ========================
// Request Core
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Single resources may come wrapped in `{"data": ...}`
#[derive(Deserialize)]
#[serde(untagged)]
enum Single<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Single<T> {
    fn into_inner(self) -> T {
        match self {
            Single::Wrapped { data } | Single::Bare(data) => data,
        }
    }
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Decode a response body; an empty body decodes as JSON `null`
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a single resource, unwrapping `{"data": ...}` if present
pub fn decode_single<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    decode::<Single<T>>(body).map(Single::into_inner)
}

pub fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// `path?k=v&...` with percent-encoded values
pub fn with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, QUERY_ENCODE_SET)))
        .collect::<Vec<_>>()
        .join("&");
    let sep = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, sep, query)
}

/// Send a request and return the raw body of a 2xx response
async fn send(method: Method, path: &str, body: Option<String>) -> Result<String, ApiError> {
    let url = config().url(path);
    log::debug!("[API] {} {}", method.as_str(), url);

    let opts = RequestInit::new();
    opts.set_method(method.as_str());
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| ApiError::Network(js_error(e)))?;
    let headers = request.headers();
    headers.set("Accept", "application/json").map_err(|e| ApiError::Network(js_error(e)))?;
    if body.is_some() {
        headers.set("Content-Type", "application/json").map_err(|e| ApiError::Network(js_error(e)))?;
    }
    if let Some(token) = token() {
        headers
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(|e| ApiError::Network(js_error(e)))?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(js_error(e)))?
        .dyn_into()
        .map_err(|e| ApiError::Network(js_error(e)))?;

    let text = JsFuture::from(response.text().map_err(|e| ApiError::Network(js_error(e)))?)
        .await
        .map_err(|e| ApiError::Network(js_error(e)))?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        let err = ApiError::from_status(response.status(), &text);
        if err.is_unauthorized() {
            clear_token();
        }
        log::warn!("[API] {} {} failed: {}", method.as_str(), path, err);
        return Err(err);
    }
    Ok(text)
}

/// Generic GET of any JSON shape
pub async fn api_get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let text = send(Method::Get, path, None).await?;
    decode(&text)
}

pub async fn get_one<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let text = send(Method::Get, path, None).await?;
    decode_single(&text)
}

pub async fn post<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let text = send(Method::Post, path, Some(encode(body)?)).await?;
    decode_single(&text)
}

pub async fn put<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let text = send(Method::Put, path, Some(encode(body)?)).await?;
    decode_single(&text)
}

/// DELETE; the body, if any, is ignored
pub async fn delete(path: &str) -> Result<(), ApiError> {
    send(Method::Delete, path, None).await.map(|_| ())
}

/// GET a list, following pagination until `last_page`
pub async fn get_all_pages<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ApiError> {
    let first: Page<T> = api_get(&with_query(path, &[("page", "1".to_string())])).await?;
    let last_page = first.last_page().unwrap_or(1);
    let mut items = first.into_items();

    for page in 2..=last_page {
        let next: Page<T> = api_get(&with_query(path, &[("page", page.to_string())])).await?;
        items.extend(next.into_items());
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Brand, PencilSet};

    #[test]
    fn test_with_query_encodes_values() {
        assert_eq!(with_query("brands", &[]), "brands");
        assert_eq!(
            with_query("colored-pencil-sets", &[("search", "Caran d'Ache & co".to_string()), ("page", "2".to_string())]),
            "colored-pencil-sets?search=Caran%20d%27Ache%20%26%20co&page=2"
        );
        assert_eq!(with_query("sets?brand_id=1", &[("page", "1".to_string())]), "sets?brand_id=1&page=1");
        assert_eq!(with_query("x", &[("d", "2024-05-01".to_string())]), "x?d=2024-05-01");
    }

    #[test]
    fn test_decode_empty_body_as_unit() {
        let unit: () = decode("").unwrap();
        assert_eq!(unit, ());
        let none: Option<Brand> = decode("  ").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_decode_error_is_reported() {
        let err = decode::<Brand>("{not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_decode_single_unwraps_data() {
        let wrapped: PencilSet = decode_single(r#"{"data":{"id":3,"name":"Luminance","brand":"Caran d'Ache","count":76}}"#).unwrap();
        let bare: PencilSet = decode_single(r#"{"id":3,"name":"Luminance","brand":"Caran d'Ache","count":76}"#).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn test_encode() {
        let body = encode(&serde_json::json!({"title": "Sunset", "pencils": [1, 2]})).unwrap();
        assert_eq!(body, r#"{"pencils":[1,2],"title":"Sunset"}"#);
    }
}
