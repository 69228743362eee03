pub use boston_ckan as ckan;
pub mod config;
pub mod error;
pub mod fetcher;

pub use config::FetchConfig;
pub use error::{FetchError, Result};
pub use fetcher::{Fetcher, fixed_query};
