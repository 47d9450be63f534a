pub mod credentials;
pub mod postgres;

pub use credentials::StoreCredentials;
pub use postgres::PgCityStore;

use anyhow::Result;
use std::future::Future;

use crate::domain::City;

/// Destination for catalog uploads.
///
/// A store stages every city in a batch as a new document whose identity
/// the store assigns, then commits the batch atomically: either every
/// document in the batch is created or none are. The uploader depends only
/// on this capability, so tests can inject an in-memory store.
pub trait CityStore {
    fn insert_batch(&self, batch: &[City]) -> impl Future<Output = Result<()>> + Send;
}
