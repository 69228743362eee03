use crate::models;
use serde_json::Value;
use std::sync::Arc;

/// Configuration for the CKAN client
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL for the CKAN API (e.g., "https://data.boston.gov/api/3")
    pub base_path: String,
    /// User agent string for HTTP requests
    pub user_agent: Option<String>,
    /// HTTP client instance
    pub client: reqwest::Client,
}

impl Configuration {
    /// Create a new configuration with default values
    pub fn new() -> Configuration {
        Configuration::default()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            base_path: "https://data.boston.gov/api/3".to_owned(),
            user_agent: Some("boston-data-rs/0.1".to_owned()),
            client: reqwest::Client::new(),
        }
    }
}

/// # CKAN Client
///
/// A small async client for the CKAN action API. It targets data.boston.gov
/// by default but works against any CKAN instance that exposes the datastore
/// extension.
///
/// Responses are returned as untyped [`serde_json::Value`] documents. The
/// client does not look inside the CKAN `{"help", "success", "result"}`
/// envelope; callers get the whole document back.
///
/// ## Usage
///
/// ```rust,no_run
/// use boston_ckan::{CkanClient, Configuration, DatastoreQuery};
/// use std::sync::Arc;
/// use uuid::Uuid;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CkanClient::new(Arc::new(Configuration::default()));
///
///     let query = DatastoreQuery::new(Uuid::parse_str("e4bfe397-6bfc-49c5-9367-c879fac7401d")?)
///         .with_limit(5)
///         .with_q("title:jones");
///
///     let document = client.datastore_search(&query).await?;
///     println!("{}", document);
///
///     Ok(())
/// }
/// ```
pub struct CkanClient {
    configuration: Arc<Configuration>,
}

impl std::fmt::Debug for CkanClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CkanClient")
            .field("base_path", &self.configuration.base_path)
            .finish()
    }
}

/// Errors that can occur when interacting with the CKAN API
///
/// # Examples
///
/// ```rust
/// # use boston_ckan::CkanError;
/// # async fn example() {
/// match some_api_call().await {
///     Ok(result) => println!("Success: {:?}", result),
///     Err(CkanError::RequestError(e)) => {
///         eprintln!("Network or HTTP error: {}", e);
///     },
///     Err(CkanError::ParseError(e)) => {
///         eprintln!("Failed to parse API response: {}", e);
///     },
///     Err(CkanError::ApiError { status, message }) => {
///         eprintln!("CKAN API returned error {}: {}", status, message);
///     }
/// }
/// # async fn some_api_call() -> Result<(), CkanError> { Ok(()) }
/// # }
/// ```
#[derive(Debug)]
pub enum CkanError {
    /// Connection, DNS, TLS or body transfer failures
    RequestError(Box<dyn std::error::Error + Send + Sync>),

    /// The response body was not a valid JSON document
    ParseError(serde_json::Error),

    /// The server answered with a non-success HTTP status
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body, or a placeholder if it could not be read
        message: String,
    },
}

impl std::fmt::Display for CkanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CkanError::RequestError(e) => write!(f, "Request error: {}", e),
            CkanError::ParseError(e) => write!(f, "Parse error: {}", e),
            CkanError::ApiError { status, message } => {
                write!(f, "CKAN API error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for CkanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CkanError::RequestError(e) => Some(e.as_ref()),
            CkanError::ParseError(e) => Some(e),
            CkanError::ApiError { .. } => None,
        }
    }
}

impl CkanClient {
    /// Create a new CKAN client instance
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use boston_ckan::{CkanClient, Configuration};
    /// # use std::sync::Arc;
    /// let config = Arc::new(Configuration {
    ///     base_path: "https://data.boston.gov/api/3".to_string(),
    ///     user_agent: Some("my-rust-app/1.0".to_string()),
    ///     client: reqwest::Client::new(),
    /// });
    ///
    /// let client = CkanClient::new(config);
    /// ```
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    /// URL of a CKAN action endpoint, without query string
    pub fn action_url(&self, action: &str) -> String {
        format!(
            "{}/action/{}",
            self.configuration.base_path.trim_end_matches('/'),
            action
        )
    }

    /// Full GET URL for a `datastore_search` call
    ///
    /// Parameters appear in the order `resource_id`, `limit`, `q`. Values are
    /// percent-encoded, except that `:` is kept literal so Solr field syntax
    /// such as `title:jones` is sent as written.
    pub fn datastore_search_url(&self, query: &models::DatastoreQuery) -> String {
        let query_string = query
            .query_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_query_value(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.action_url("datastore_search"), query_string)
    }

    /// Query a datastore resource and return the response document
    ///
    /// Sends a single GET request. There is no retry and no timeout beyond
    /// whatever the configured `reqwest::Client` applies.
    ///
    /// # Errors
    ///
    /// - [`CkanError::RequestError`] if the request cannot be sent or the body
    ///   cannot be read
    /// - [`CkanError::ApiError`] if the server answers with a non-success status
    /// - [`CkanError::ParseError`] if the body is not valid JSON
    pub async fn datastore_search(
        &self,
        query: &models::DatastoreQuery,
    ) -> Result<Value, CkanError> {
        let url = self.datastore_search_url(query);

        let mut request = self.configuration.client.get(&url);
        if let Some(ref user_agent) = self.configuration.user_agent {
            request = request.header(reqwest::header::USER_AGENT, user_agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CkanError::RequestError(Box::new(e)))?;

        if response.status().is_success() {
            // Raw bytes: invalid UTF-8 must fail parsing rather than be replaced
            let body = response
                .bytes()
                .await
                .map_err(|e| CkanError::RequestError(Box::new(e)))?;

            serde_json::from_slice(&body).map_err(CkanError::ParseError)
        } else {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CkanError::ApiError {
                status,
                message: error_text,
            })
        }
    }
}

fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value).replace("%3A", ":")
}
