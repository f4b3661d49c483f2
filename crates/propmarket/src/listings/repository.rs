use super::domain::{Listing, ListingId};
use super::query::{ListingPredicate, ListingQuery};

/// Storage capability for the listing collection.
///
/// `find` and `count` are two independent reads with no shared snapshot:
/// under concurrent writes the count may be stale relative to the fetched
/// page. Callers accept that staleness window; no transactional guarantee is
/// assumed or enforced here.
pub trait ListingStore: Send + Sync {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError>;
    fn update(&self, listing: Listing) -> Result<(), StoreError>;
    fn delete(&self, id: &ListingId) -> Result<(), StoreError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError>;
    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Listing>, StoreError>;
    /// Matching listings in sort order, bounded by the query's skip/limit.
    fn find(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError>;
    /// Count of all matches across every page.
    fn count(&self, predicate: &ListingPredicate) -> Result<u64, StoreError>;
    fn increment_views(&self, id: &ListingId) -> Result<(), StoreError>;
    /// All listings posted by one seller, regardless of status.
    fn find_by_owner(&self, owner: &str) -> Result<Vec<Listing>, StoreError>;
}

/// Error enumeration for store failures. Propagated unchanged; nothing here
/// retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("listing already exists")]
    Conflict,
    #[error("listing not found")]
    NotFound,
    #[error("listing store unavailable: {0}")]
    Unavailable(String),
}
