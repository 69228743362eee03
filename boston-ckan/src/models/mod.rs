pub mod datastore;

pub use datastore::DatastoreQuery;
