use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::domain::{
    Listing, ListingId, ListingStatus, ListingUpdate, ListingWithCategory, NewListing,
    PaginatedResponse,
};
use super::filters::{RawListingQuery, SearchFilters};
use super::query::ListingQuery;
use super::repository::{ListingStore, StoreError};
use super::slug::generate_slug;

/// Service composing the filter normalizer, query translator, and store into
/// the public catalog operations.
pub struct ListingService<S> {
    store: Arc<S>,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("lst-{id:06}"))
}

impl<S> ListingService<S>
where
    S: ListingStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Runs a listing search from raw query parameters.
    ///
    /// Count and fetch are two independent store reads; the returned `total`
    /// can be stale relative to `data` under concurrent writes. Each result
    /// carries its category, recomputed in memory.
    pub fn search(
        &self,
        raw: &RawListingQuery,
    ) -> Result<PaginatedResponse<ListingWithCategory>, ListingServiceError> {
        let filters = SearchFilters::from_query(raw);
        let query = ListingQuery::from_filters(&filters);

        let total = self.store.count(&query.predicate)?;
        let rows = self.store.find(&query)?;
        debug!(total, page = filters.page, returned = rows.len(), "listing search");

        let data = rows.into_iter().map(ListingWithCategory::from).collect();
        Ok(PaginatedResponse::new(
            data,
            total,
            filters.page,
            filters.limit,
        ))
    }

    /// Detail fetch by slug, bumping the view counter as a side effect. The
    /// returned record carries the pre-increment view count.
    pub fn get_by_slug(&self, slug: &str) -> Result<ListingWithCategory, ListingServiceError> {
        let listing = self
            .store
            .fetch_by_slug(slug)?
            .ok_or(StoreError::NotFound)?;
        self.store.increment_views(&listing.id)?;
        Ok(ListingWithCategory::from(listing))
    }

    /// Stores a new listing. Slug and identifier are assigned here; the
    /// square-foot rate is derived when the price is numeric and an area is
    /// known. Submissions without an explicit status land in moderation.
    pub fn create(&self, submission: NewListing) -> Result<Listing, ListingServiceError> {
        let id = next_listing_id();
        let suffix = id.0.trim_start_matches("lst-").to_string();

        let price_per_sqft = submission.price_per_sqft.or_else(|| {
            match (submission.price.numeric(), submission.area_sq_ft) {
                (Some(price), Some(sq_ft)) if sq_ft > 0 => {
                    Some((price / f64::from(sq_ft)).round() as u32)
                }
                _ => None,
            }
        });

        let listing = Listing {
            slug: generate_slug(&submission.title, &suffix),
            id,
            title: submission.title,
            price: submission.price,
            price_per_sqft,
            listing_type: submission.listing_type,
            property_type: submission.property_type,
            property_sub_type: submission.property_sub_type,
            address: submission.address,
            city: submission.city,
            area: submission.area,
            description: submission.description,
            bedrooms: submission.bedrooms,
            bathrooms: submission.bathrooms,
            area_sq_ft: submission.area_sq_ft,
            completion_status: submission.completion_status,
            furnishing_status: submission.furnishing_status,
            amenities: submission.amenities,
            posted_by: submission.posted_by,
            is_featured: submission.is_featured,
            is_verified: submission.is_verified,
            status: submission.status.unwrap_or(ListingStatus::Pending),
            views: 0,
            created_at: Utc::now(),
        };

        let stored = self.store.insert(listing)?;
        Ok(stored)
    }

    /// Applies a partial update; absent fields keep their stored values.
    pub fn update(
        &self,
        id: &ListingId,
        update: ListingUpdate,
    ) -> Result<Listing, ListingServiceError> {
        let mut listing = self.store.fetch(id)?.ok_or(StoreError::NotFound)?;

        if let Some(title) = update.title {
            listing.title = title;
        }
        if let Some(price) = update.price {
            listing.price = price;
        }
        if let Some(description) = update.description {
            listing.description = Some(description);
        }
        if let Some(bedrooms) = update.bedrooms {
            listing.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = update.bathrooms {
            listing.bathrooms = Some(bathrooms);
        }
        if let Some(area_sq_ft) = update.area_sq_ft {
            listing.area_sq_ft = Some(area_sq_ft);
        }
        if let Some(completion_status) = update.completion_status {
            listing.completion_status = Some(completion_status);
        }
        if let Some(furnishing_status) = update.furnishing_status {
            listing.furnishing_status = Some(furnishing_status);
        }
        if let Some(amenities) = update.amenities {
            listing.amenities = amenities;
        }
        if let Some(is_featured) = update.is_featured {
            listing.is_featured = is_featured;
        }
        if let Some(is_verified) = update.is_verified {
            listing.is_verified = is_verified;
        }
        if let Some(status) = update.status {
            listing.status = status;
        }

        self.store.update(listing.clone())?;
        Ok(listing)
    }

    pub fn delete(&self, id: &ListingId) -> Result<(), ListingServiceError> {
        self.store.delete(id)?;
        Ok(())
    }

    /// A seller's own listings, newest first, in a single-page envelope.
    pub fn owned_by(
        &self,
        owner: &str,
    ) -> Result<PaginatedResponse<Listing>, ListingServiceError> {
        let data = self.store.find_by_owner(owner)?;
        let total = data.len() as u64;
        Ok(PaginatedResponse {
            limit: data.len() as u32,
            data,
            total,
            page: 1,
            total_pages: 1,
        })
    }
}

/// Error raised by catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
