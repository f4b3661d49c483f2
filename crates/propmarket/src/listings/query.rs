//! Translation of typed search filters into a store query descriptor.
//!
//! The descriptor is what the store capability consumes: a predicate, a sort
//! key, and skip/limit pagination. The in-memory store evaluates it directly;
//! a document-store backend would compile the same fields into its native
//! query language.

use std::cmp::Ordering;

use super::domain::{
    CompletionStatus, FurnishingStatus, Listing, ListingStatus, ListingType, PropertyType,
};
use super::filters::{SearchFilters, SortKey};

/// Predicate over the listing collection. Only published listings are ever
/// searchable; all other constraints are AND-ed on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPredicate {
    pub text: Option<String>,
    pub listing_type: Option<ListingType>,
    pub property_type: Option<PropertyType>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub completion_status: Option<CompletionStatus>,
    pub furnishing_status: Option<FurnishingStatus>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
    pub min_area_sq_ft: Option<u32>,
    pub max_area_sq_ft: Option<u32>,
    pub amenities: Vec<String>,
    pub featured_only: bool,
    pub verified_only: bool,
}

impl ListingPredicate {
    pub fn from_filters(filters: &SearchFilters) -> Self {
        // Category expansion wins: when a category is supplied, the
        // individually supplied listing/property type fields are ignored.
        let (listing_type, property_type) = match filters.category {
            Some(category) => {
                let expansion = category.filters();
                (expansion.listing_type, expansion.property_type)
            }
            None => (filters.listing_type, filters.property_type),
        };

        Self {
            text: filters.q.clone(),
            listing_type,
            property_type,
            city: filters.city.clone(),
            area: filters.area.clone(),
            completion_status: filters.completion_status,
            furnishing_status: filters.furnishing_status,
            min_price: filters.min_price.map(f64::from),
            max_price: filters.max_price.map(f64::from),
            min_bedrooms: filters.bedrooms,
            min_bathrooms: filters.bathrooms,
            min_area_sq_ft: filters.min_area,
            max_area_sq_ft: filters.max_area,
            amenities: filters.amenities.clone(),
            featured_only: filters.is_featured,
            verified_only: filters.is_verified,
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if listing.status != ListingStatus::Published {
            return false;
        }

        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let hit = listing.title.to_lowercase().contains(&needle)
                || listing.address.to_lowercase().contains(&needle)
                || listing.city.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(listing_type) = self.listing_type {
            if listing.listing_type != listing_type {
                return false;
            }
        }
        if let Some(property_type) = self.property_type {
            if listing.property_type != property_type {
                return false;
            }
        }

        if let Some(city) = &self.city {
            if &listing.city != city {
                return false;
            }
        }
        if let Some(area) = &self.area {
            let needle = area.to_lowercase();
            match &listing.area {
                Some(stored) if stored.to_lowercase().contains(&needle) => {}
                _ => return false,
            }
        }

        if let Some(completion) = self.completion_status {
            if listing.completion_status != Some(completion) {
                return false;
            }
        }
        if let Some(furnishing) = self.furnishing_status {
            if listing.furnishing_status != Some(furnishing) {
                return false;
            }
        }

        // Price bounds coerce the stored value; unparsable text prices count
        // as zero, so they pass only a zero lower bound.
        if self.min_price.is_some() || self.max_price.is_some() {
            let price = listing.price.numeric_or_zero();
            if let Some(min) = self.min_price {
                if price < min {
                    return false;
                }
            }
            if let Some(max) = self.max_price {
                if price > max {
                    return false;
                }
            }
        }

        // Lower bounds on counts: a listing without the field fails a
        // supplied bound, matching document-store $gte on a missing field.
        if let Some(min) = self.min_bedrooms {
            if listing.bedrooms.map_or(true, |count| count < min) {
                return false;
            }
        }
        if let Some(min) = self.min_bathrooms {
            if listing.bathrooms.map_or(true, |count| count < min) {
                return false;
            }
        }

        if let Some(min) = self.min_area_sq_ft {
            if listing.area_sq_ft.map_or(true, |sq_ft| sq_ft < min) {
                return false;
            }
        }
        if let Some(max) = self.max_area_sq_ft {
            if listing.area_sq_ft.map_or(true, |sq_ft| sq_ft > max) {
                return false;
            }
        }

        // Superset test: every requested tag must be present.
        if !self.amenities.is_empty() {
            let has_all = self
                .amenities
                .iter()
                .all(|tag| listing.amenities.iter().any(|stored| stored == tag));
            if !has_all {
                return false;
            }
        }

        if self.featured_only && !listing.is_featured {
            return false;
        }
        if self.verified_only && !listing.is_verified {
            return false;
        }

        true
    }
}

/// Comparator for the active sort key. Price sorts force numeric coercion so
/// string-stored amounts order by value rather than lexicographically; text
/// prices key as zero but are never dropped.
pub fn compare(sort: SortKey, a: &Listing, b: &Listing) -> Ordering {
    match sort {
        SortKey::PriceAsc => a
            .price
            .numeric_or_zero()
            .total_cmp(&b.price.numeric_or_zero()),
        SortKey::PriceDesc => b
            .price
            .numeric_or_zero()
            .total_cmp(&a.price.numeric_or_zero()),
        SortKey::Oldest => a.created_at.cmp(&b.created_at),
        SortKey::Popular => b.views.cmp(&a.views),
        SortKey::Newest => b.created_at.cmp(&a.created_at),
    }
}

/// Full query descriptor handed to the store: predicate, sort, pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub predicate: ListingPredicate,
    pub sort: SortKey,
    pub skip: usize,
    pub limit: usize,
}

impl ListingQuery {
    pub fn from_filters(filters: &SearchFilters) -> Self {
        Self {
            predicate: ListingPredicate::from_filters(filters),
            sort: filters.sort_by,
            skip: (filters.page.saturating_sub(1) as usize) * filters.limit as usize,
            limit: filters.limit as usize,
        }
    }
}
