//! Listing catalog: domain model, derived categories, and the search
//! pipeline.
//!
//! Raw query parameters flow one direction: normalization into typed
//! filters, translation into a store query (with category expansion), then
//! paginated execution against the [`repository::ListingStore`] capability.

pub mod category;
pub mod domain;
pub mod filters;
pub mod query;
pub mod repository;
pub mod router;
pub mod service;

mod slug;

#[cfg(test)]
mod tests;

pub use category::{CategoryFilter, ListingCategory};
pub use domain::{
    CompletionStatus, FurnishingStatus, Listing, ListingId, ListingStatus, ListingType,
    ListingUpdate, ListingWithCategory, NewListing, PaginatedResponse, Price, PropertyType,
};
pub use filters::{RawListingQuery, SearchFilters, SortKey};
pub use query::{ListingPredicate, ListingQuery};
pub use repository::{ListingStore, StoreError};
pub use router::listing_router;
pub use service::{ListingService, ListingServiceError};
