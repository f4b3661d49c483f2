use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::listings::domain::{
    Listing, ListingId, ListingStatus, ListingType, Price, PropertyType,
};
use crate::listings::query::{self, ListingPredicate, ListingQuery};
use crate::listings::repository::{ListingStore, StoreError};
use crate::listings::service::ListingService;

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<ListingId, Listing>>>,
}

impl ListingStore for MemoryStore {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&listing.id)
            || guard.values().any(|stored| stored.slug == listing.slug)
        {
            return Err(StoreError::Conflict);
        }
        guard.insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("lock");
        if !guard.contains_key(&listing.id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(listing.id.clone(), listing);
        Ok(())
    }

    fn delete(&self, id: &ListingId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("lock");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Listing>, StoreError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.values().find(|listing| listing.slug == slug).cloned())
    }

    fn find(&self, query: &ListingQuery) -> Result<Vec<Listing>, StoreError> {
        let guard = self.records.lock().expect("lock");
        let mut rows: Vec<Listing> = guard
            .values()
            .filter(|listing| query.predicate.matches(listing))
            .cloned()
            .collect();
        rows.sort_by(|a, b| query::compare(query.sort, a, b));
        Ok(rows.into_iter().skip(query.skip).take(query.limit).collect())
    }

    fn count(&self, predicate: &ListingPredicate) -> Result<u64, StoreError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard
            .values()
            .filter(|listing| predicate.matches(listing))
            .count() as u64)
    }

    fn increment_views(&self, id: &ListingId) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("lock");
        let listing = guard.get_mut(id).ok_or(StoreError::NotFound)?;
        listing.views += 1;
        Ok(())
    }

    fn find_by_owner(&self, owner: &str) -> Result<Vec<Listing>, StoreError> {
        let guard = self.records.lock().expect("lock");
        let mut rows: Vec<Listing> = guard
            .values()
            .filter(|listing| listing.posted_by.as_deref() == Some(owner))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

pub(super) fn created(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0)
        .single()
        .expect("valid fixture date")
}

/// Published apartment-for-sale baseline; tests override what they need.
pub(super) fn listing(id: &str, title: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        title: title.to_string(),
        slug: format!("{}-{id}", title.to_lowercase().replace(' ', "-")),
        price: Price::Amount(500_000.0),
        price_per_sqft: None,
        listing_type: ListingType::Sale,
        property_type: PropertyType::Apartment,
        property_sub_type: None,
        address: "12 Green Road".to_string(),
        city: "Dhaka".to_string(),
        area: Some("Dhanmondi".to_string()),
        description: None,
        bedrooms: Some(3),
        bathrooms: Some(2),
        area_sq_ft: Some(1400),
        completion_status: None,
        furnishing_status: None,
        amenities: vec!["Parking".to_string(), "Lift".to_string()],
        posted_by: Some("user-1".to_string()),
        is_featured: false,
        is_verified: false,
        status: ListingStatus::Published,
        views: 0,
        created_at: created(10),
    }
}

pub(super) fn build_service() -> (Arc<ListingService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(ListingService::new(store.clone()));
    (service, store)
}

pub(super) fn seed(store: &MemoryStore, listings: Vec<Listing>) {
    for entry in listings {
        store.insert(entry).expect("seed insert");
    }
}
