//! Google AJAX Search API searcher

use crate::{
    error::{SearchError, SearchResult},
    types::{
        DebugOptions, Diagnostic, DiagnosticSender, FailureStage, ProviderConfig, ResultSender,
        SearchResult as SearchResultType, Searcher,
    },
    utils::{debug, http::HttpClient},
};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use url::Url;

/// Engine name stamped on every result this searcher produces
pub const ENGINE_NAME: &str = "Google";

/// Largest page the AJAX API will return
pub const MAX_PAGE_SIZE: u8 = 8;

/// One result document as the API returns it.
///
/// Only the fields that are mapped forward are decoded; the rest of the
/// record (`GsearchResultClass`, `visibleUrl`, `cacheUrl`, ...) is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoogleResult {
    #[serde(deserialize_with = "nullable_string")]
    url: String,
    #[serde(deserialize_with = "nullable_string")]
    title: String,
    #[serde(deserialize_with = "nullable_string")]
    content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoogleResponseData {
    results: Option<Vec<GoogleResult>>,
}

/// Top level document.
///
/// `responseStatus` and `responseDetails` are only logged, so they are kept
/// untyped; a surprising value there must not cost the results.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoogleResponse {
    response_data: Option<GoogleResponseData>,
    response_details: Option<serde_json::Value>,
    response_status: Option<serde_json::Value>,
}

impl GoogleResponse {
    /// Map raw records into normalized results, keeping provider order
    fn into_results(self) -> Vec<SearchResultType> {
        self.response_data
            .and_then(|data| data.results)
            .unwrap_or_default()
            .into_iter()
            .map(|result| SearchResultType {
                engine: ENGINE_NAME.to_string(),
                title: result.title,
                link: result.url,
                content: result.content,
            })
            .collect()
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn display_value(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Google AJAX Search configuration
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value of the `v` parameter
    pub api_version: String,
    /// Value of the `rsz` parameter
    pub page_size: u8,
    /// Client timeout; `None` keeps the HTTP client default
    pub timeout_ms: Option<u64>,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://ajax.googleapis.com/ajax/services/search/web".to_string(),
            api_version: "1.0".to_string(),
            page_size: MAX_PAGE_SIZE,
            timeout_ms: None,
        }
    }
}

impl ProviderConfig for GoogleConfig {
    fn validate(&self) -> Result<(), SearchError> {
        if self.base_url.is_empty() {
            return Err(SearchError::ConfigError(
                "Google base URL is required".to_string(),
            ));
        }
        Url::parse(&self.base_url).map_err(|e| {
            SearchError::ConfigError(format!("Google base URL is invalid: {e}"))
        })?;
        if self.api_version.is_empty() {
            return Err(SearchError::ConfigError(
                "Google API version is required".to_string(),
            ));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(SearchError::ConfigError(format!(
                "Google page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        Ok(())
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Searcher backed by the Google AJAX Search API
#[derive(Debug)]
pub struct GoogleProvider {
    config: GoogleConfig,
    http_client: HttpClient,
    debug: Option<DebugOptions>,
    diagnostics: Option<DiagnosticSender>,
}

impl GoogleProvider {
    /// Create a new Google searcher against the public endpoint
    pub fn new() -> SearchResult<Self> {
        Self::with_config(GoogleConfig::default())
    }

    /// Create a new Google searcher with custom configuration
    pub fn with_config(config: GoogleConfig) -> SearchResult<Self> {
        config.validate()?;

        let http_client = match config.timeout_ms {
            Some(timeout_ms) => HttpClient::with_timeout(timeout_ms)?,
            None => HttpClient::new()?,
        };

        Ok(Self {
            config,
            http_client,
            debug: None,
            diagnostics: None,
        })
    }

    /// Point the searcher at a different endpoint (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> SearchResult<Self> {
        self.config.base_url = base_url.to_string();
        self.config.validate()?;
        Ok(self)
    }

    /// Attach debug logging options
    pub fn with_debug(mut self, debug: DebugOptions) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Report transport and decode failures on `diagnostics`
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticSender) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Build the search URL with parameters
    fn build_search_url(&self, search_term: &str) -> SearchResult<String> {
        let page_size = self.config.page_size.to_string();

        crate::utils::http::build_url(
            &self.config.base_url,
            &[
                ("v", self.config.api_version.as_str()),
                ("rsz", page_size.as_str()),
                ("q", search_term),
            ],
        )
    }

    async fn fetch(&self, search_term: &str) -> SearchResult<Vec<SearchResultType>> {
        let url = self.build_search_url(search_term)?;
        debug::log_request(&self.debug, "Google Search URL", &url);

        let response = self.http_client.get_json::<GoogleResponse>(&url).await?;
        if !response.is_success() {
            debug::log_response(
                &self.debug,
                &format!(
                    "Google Search answered with status {}, decoding body anyway",
                    response.status
                ),
            );
        }

        let response = response.body;
        if response.response_data.is_none() {
            debug::log_response(
                &self.debug,
                &format!(
                    "Google Search returned no responseData: status[{}] details[{}]",
                    display_value(response.response_status.as_ref()),
                    display_value(response.response_details.as_ref())
                ),
            );
        }

        let results = response.into_results();
        debug::log_response(
            &self.debug,
            &format!("Google Search returned {} results", results.len()),
        );

        Ok(results)
    }

    fn report(&self, error: SearchError) {
        let stage = if error.is_decode() {
            FailureStage::Decode
        } else {
            FailureStage::Transport
        };

        debug::log_failure(ENGINE_NAME, &stage.to_string(), &error);

        if let Some(diagnostics) = &self.diagnostics {
            // A closed diagnostic channel just means nobody is listening.
            let _ = diagnostics.send(Diagnostic {
                engine: ENGINE_NAME.to_string(),
                stage,
                error,
            });
        }
    }
}

#[async_trait::async_trait]
impl Searcher for GoogleProvider {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    async fn search(&self, search_term: &str, results: ResultSender) {
        debug::log(
            &self.debug,
            "Google Search",
            &format!("Started : searchTerm[{search_term}]"),
        );

        let batch = match self.fetch(search_term).await {
            Ok(batch) => batch,
            Err(error) => {
                self.report(error);
                Vec::new()
            }
        };

        if results.send(batch).await.is_err() {
            log::warn!(target: "gsearch", "Google Search : result receiver dropped before delivery");
        }

        debug::log(&self.debug, "Google Search", "Completed");
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        config.insert("base_url".to_string(), self.config.base_url.clone());
        config.insert("api_version".to_string(), self.config.api_version.clone());
        config.insert("page_size".to_string(), self.config.page_size.to_string());
        config
    }
}
