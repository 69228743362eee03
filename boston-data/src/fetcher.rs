use std::io::Write;
use std::sync::Arc;

use boston_ckan::{CkanClient, DatastoreQuery};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::FetchConfig;
use crate::error::Result;

/// Boston dataset the fetcher always queries
pub const RESOURCE_ID: Uuid = Uuid::from_u128(0xe4bfe397_6bfc_49c5_9367_c879fac7401d);
pub const LIMIT: u32 = 5;
pub const SEARCH_TERM: &str = "title:jones";

/// The fixed `datastore_search` query
pub fn fixed_query() -> DatastoreQuery {
    DatastoreQuery::new(RESOURCE_ID)
        .with_limit(LIMIT)
        .with_q(SEARCH_TERM)
}

/// Fetches the fixed query once and prints the response document
///
/// ```rust,no_run
/// # use boston_data::Fetcher;
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = Fetcher::with_defaults()?;
/// fetcher.run(&mut std::io::stdout().lock()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Fetcher {
    ckan: CkanClient,
    query: DatastoreQuery,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let ckan = CkanClient::new(Arc::new(config.ckan_configuration()?));

        Ok(Self {
            ckan,
            query: fixed_query(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(FetchConfig::default())
    }

    /// The URL [`Fetcher::fetch`] will request
    pub fn request_url(&self) -> String {
        self.ckan.datastore_search_url(&self.query)
    }

    /// Send the request and return the parsed response document
    pub async fn fetch(&self) -> Result<Value> {
        debug!(url = %self.request_url(), "requesting datastore_search");

        let document = self
            .ckan
            .datastore_search(&self.query)
            .await
            .inspect_err(|e| warn!(error = %e, "datastore_search failed"))?;

        debug!("response parsed");
        Ok(document)
    }

    /// Fetch and write the document to `out` as one line of JSON
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let document = self.fetch().await?;
        writeln!(out, "{}", document)?;
        out.flush()?;
        Ok(())
    }
}
