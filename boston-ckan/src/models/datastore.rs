use uuid::Uuid;

/// Parameters for the CKAN `datastore_search` action
///
/// Only the parameters this client sends are modelled. Unset optional
/// parameters are left off the query string entirely so the server applies
/// its own defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatastoreQuery {
    /// Resource (table) to search
    pub resource_id: Uuid,
    /// Maximum number of records to return
    pub limit: Option<u32>,
    /// Full-text or `field:value` search term
    pub q: Option<String>,
}

impl DatastoreQuery {
    pub fn new(resource_id: Uuid) -> DatastoreQuery {
        DatastoreQuery {
            resource_id,
            limit: None,
            q: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_q<S: Into<String>>(mut self, q: S) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Query string pairs in the order they are sent: `resource_id`, `limit`, `q`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("resource_id", self.resource_id.to_string())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(ref q) = self.q {
            pairs.push(("q", q.clone()));
        }
        pairs
    }
}
