//! Common utilities for NetBox API client
//!
//! Provides shared functionality used across all API modules.

pub mod query;

use crate::error::NetBoxError;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Paginated response wrapper from NetBox API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Write-only request fields whose values are masked in debug logs
const SECRET_FIELDS: &[&str] = &["secret", "auth_key", "password", "token"];

/// Pretty-printed request body with secret values masked
pub(crate) fn redacted(body: &serde_json::Value) -> String {
    let mut body = body.clone();
    if let Some(fields) = body.as_object_mut() {
        for (key, value) in fields.iter_mut() {
            if SECRET_FIELDS.contains(&key.as_str()) && !value.is_null() {
                *value = serde_json::Value::String("<redacted>".to_string());
            }
        }
    }
    serde_json::to_string_pretty(&body).unwrap_or_default()
}

/// HTTP client wrapper with authentication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Map a non-success response onto the error taxonomy
    async fn check(method: &str, path: &str, response: Response) -> Result<Response, NetBoxError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            404 => Err(NetBoxError::NotFound(format!(
                "{} {} - {}",
                method, path, body
            ))),
            401 | 403 => Err(NetBoxError::Authentication(format!(
                "{} {} failed: {} - {}",
                method, path, status, body
            ))),
            code => Err(NetBoxError::Api {
                method: method.to_string(),
                path: path.to_string(),
                status: code,
                body,
            }),
        }
    }

    /// Decode a JSON body, keeping a prefix of the payload in the error
    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, NetBoxError> {
        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            NetBoxError::InvalidRequest(format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                response_text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Fetch all pages of a paginated response
    pub async fn fetch_all_pages<T: for<'de> Deserialize<'de>>(
        &self,
        mut url: String,
    ) -> Result<Vec<T>, NetBoxError> {
        let mut all_results = Vec::new();

        loop {
            debug!("Fetching page: {}", url);

            let response = self.client
                .get(&url)
                .header("Authorization", self.auth_header())
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(NetBoxError::Http)?;

            let response = Self::check("GET", &url, response).await?;
            let page: PaginatedResponse<T> = Self::decode(response).await?;
            all_results.extend(page.results);

            match page.next {
                Some(next_url) => {
                    url = self.build_url(&next_url);
                }
                None => break,
            }
        }

        Ok(all_results)
    }

    /// Make a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
    ) -> Result<T, NetBoxError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(NetBoxError::Http)?;

        let response = Self::check("GET", path, response).await?;
        Self::decode(response).await
    }

    /// Make a POST request
    pub async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, NetBoxError> {
        let url = self.build_url(path);
        debug!("POST {} with body: {}", url, redacted(body));

        let response = self.client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(NetBoxError::Http)?;

        let response = Self::check("POST", path, response).await?;
        Self::decode(response).await
    }

    /// Make a PUT request (full replacement)
    pub async fn put<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, NetBoxError> {
        let url = self.build_url(path);
        debug!("PUT {} with body: {}", url, redacted(body));

        let response = self.client
            .put(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(NetBoxError::Http)?;

        let response = Self::check("PUT", path, response).await?;
        Self::decode(response).await
    }

    /// Make a PATCH request
    pub async fn patch<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, NetBoxError> {
        let url = self.build_url(path);
        debug!("PATCH {} with body: {}", url, redacted(body));

        let response = self.client
            .patch(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(NetBoxError::Http)?;

        let response = Self::check("PATCH", path, response).await?;
        Self::decode(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), NetBoxError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(NetBoxError::Http)?;

        Self::check("DELETE", path, response).await?;
        Ok(())
    }

    /// Build query string from filters
    pub fn build_query_string(&self, filters: &[(&str, &str)]) -> String {
        if filters.is_empty() {
            String::new()
        } else {
            filters
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> HttpClient {
        HttpClient::new(Client::new(), "http://netbox:8000/".to_string(), "abc".to_string())
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(http().base_url(), "http://netbox:8000");
        assert_eq!(http().build_url("/api/dcim/sites/"), "http://netbox:8000/api/dcim/sites/");
    }

    #[test]
    fn test_absolute_next_url_kept() {
        let next = "http://netbox:8000/api/dcim/sites/?limit=50&offset=50";
        assert_eq!(http().build_url(next), next);
    }

    #[test]
    fn test_logged_body_masks_secrets() {
        let body = serde_json::json!({
            "name": "deploy",
            "secret": "hunter2",
            "auth_key": "k3y",
            "ca_file_path": null,
        });
        let logged = redacted(&body);
        assert!(!logged.contains("hunter2"));
        assert!(!logged.contains("k3y"));
        assert!(logged.contains("deploy"));
        assert!(logged.contains("<redacted>"));
        assert_eq!(body["secret"], "hunter2");
    }

    #[test]
    fn test_query_string_encoding() {
        let qs = http().build_query_string(&[("name", "rack 1"), ("slug", "a&b")]);
        assert_eq!(qs, "name=rack%201&slug=a%26b");
        assert_eq!(http().build_query_string(&[]), "");
    }
}
