//! HTTP utilities for making requests to search APIs

use crate::error::{SearchError, SearchResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("gsearch/", env!("CARGO_PKG_VERSION"));

/// A decoded JSON body together with the status it arrived with
#[derive(Debug, Clone)]
pub struct JsonResponse<T> {
    pub status: u16,
    pub body: T,
}

impl<T> JsonResponse<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper with search-specific functionality
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: Option<u64>,
}

impl HttpClient {
    /// Create a new HTTP client that keeps reqwest's default timeout behaviour
    pub fn new() -> SearchResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SearchError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_ms: None,
        })
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout_ms: u64) -> SearchResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| SearchError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_ms: Some(timeout_ms),
        })
    }

    /// Make a GET request and deserialize the JSON body whatever the status.
    ///
    /// Connection failures come back as [`SearchError::HttpError`] or
    /// [`SearchError::Timeout`]. A body that does not decode as `T` comes back
    /// as [`SearchError::ParseError`], naming the status when it was not a
    /// success. A non-success status with a decodable body is not an error.
    pub async fn get_json<T>(&self, url: &str) -> SearchResult<JsonResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        self.handle_response_json(response).await
    }

    /// Read the whole body, then deserialize it as JSON
    async fn handle_response_json<T>(&self, response: Response) -> SearchResult<JsonResponse<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        // The body is consumed here; the connection goes back to the pool
        // whether or not decoding succeeds.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match serde_json::from_slice(&bytes) {
            Ok(body) => Ok(JsonResponse {
                status: status.as_u16(),
                body,
            }),
            Err(e) if status.is_success() => Err(e.into()),
            Err(e) => Err(SearchError::ParseError(format!(
                "JSON parsing failed for response with status {status}: {e}"
            ))),
        }
    }

    fn map_transport_error(&self, error: reqwest::Error) -> SearchError {
        match self.timeout_ms {
            Some(timeout_ms) if error.is_timeout() => SearchError::Timeout { timeout_ms },
            _ => SearchError::from(error),
        }
    }
}

/// Build a URL with query parameters, appended in the given order.
///
/// Values are form-urlencoded, so spaces become `+`.
pub fn build_url(base_url: &str, params: &[(&str, &str)]) -> SearchResult<String> {
    let mut url = Url::parse(base_url)?;

    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_keeps_param_order() {
        let url = build_url(
            "http://ajax.googleapis.com/ajax/services/search/web",
            &[("v", "1.0"), ("rsz", "8"), ("q", "golang")],
        )
        .unwrap();

        assert_eq!(
            url,
            "http://ajax.googleapis.com/ajax/services/search/web?v=1.0&rsz=8&q=golang"
        );
    }

    #[test]
    fn test_build_url_encodes_spaces_as_plus() {
        let url = build_url("http://localhost/search", &[("q", "foo bar")]).unwrap();
        assert!(url.ends_with("?q=foo+bar"));
    }

    #[test]
    fn test_build_url_escapes_reserved_characters() {
        let url = build_url("http://localhost/search", &[("q", "a&b=c#d")]).unwrap();
        assert!(url.ends_with("?q=a%26b%3Dc%23d"));
    }

    #[test]
    fn test_build_url_rejects_invalid_base() {
        let result = build_url("not a url", &[("q", "x")]);
        assert!(matches!(result, Err(SearchError::InvalidInput(_))));
    }

    #[test]
    fn test_json_response_success_range() {
        let ok = JsonResponse { status: 200, body: () };
        let teapot = JsonResponse { status: 418, body: () };
        let error = JsonResponse { status: 500, body: () };
        assert!(ok.is_success());
        assert!(!teapot.is_success());
        assert!(!error.is_success());
    }

    #[test]
    fn test_client_construction() {
        assert!(HttpClient::new().is_ok());
        let client = HttpClient::with_timeout(250).unwrap();
        assert_eq!(client.timeout_ms, Some(250));
    }
}
