use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use propmarket::listings::query::{self, ListingPredicate, ListingQuery};
use propmarket::listings::{Listing, ListingId, ListingStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local listing store. Stands in for the document database behind
/// the same capability trait; a real deployment swaps in a backed
/// implementation without touching the service layer.
#[derive(Default, Clone)]
pub(crate) struct InMemoryListingStore {
    records: Arc<Mutex<HashMap<ListingId, Listing>>>,
}

impl ListingStore for InMemoryListingStore {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if guard.contains_key(&listing.id)
            || guard.values().any(|stored| stored.slug == listing.slug)
        {
            return Err(StoreError::Conflict);
        }
        guard.insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if guard.contains_key(&listing.id) {
            guard.insert(listing.id.clone(), listing);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn delete(&self, id: &ListingId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Listing>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard.values().find(|listing| listing.slug == slug).cloned())
    }

    fn find(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        let mut rows: Vec<Listing> = guard
            .values()
            .filter(|listing| query.predicate.matches(listing))
            .cloned()
            .collect();
        rows.sort_by(|a, b| query::compare(query.sort, a, b));
        Ok(rows.into_iter().skip(query.skip).take(query.limit).collect())
    }

    fn count(&self, predicate: &ListingPredicate) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard
            .values()
            .filter(|listing| predicate.matches(listing))
            .count() as u64)
    }

    fn increment_views(&self, id: &ListingId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        let listing = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        listing.views += 1;
        Ok(())
    }

    fn find_by_owner(&self, owner: &str) -> Result<Vec<Listing>, StoreError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        let mut rows: Vec<Listing> = guard
            .values()
            .filter(|listing| listing.posted_by.as_deref() == Some(owner))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
