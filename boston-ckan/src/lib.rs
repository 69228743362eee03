pub mod models;
pub mod client;

// Re-export the client, its configuration and the query model for easy access
pub use client::{CkanClient, CkanError, Configuration};
pub use models::DatastoreQuery;
