use async_trait::async_trait;

use crate::error::CatalogError;
use crate::types::AnimeSummary;

/// The slice of the catalog the fortune draw needs. Kept narrow so tests can
/// stub it without standing up an HTTP server.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Currently-airing shows, paged from 1.
    async fn ongoing(&self, page: u32) -> Result<Vec<AnimeSummary>, CatalogError>;
}
