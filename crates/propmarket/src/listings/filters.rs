//! Boundary between untyped query strings and typed search filters.
//!
//! Normalization is pure best-effort coercion: a malformed numeric value
//! degrades to "no filter on that field", never to an error. The raw form
//! must not travel past [`SearchFilters::from_query`].

use serde::Deserialize;

use super::category::ListingCategory;
use super::domain::{CompletionStatus, FurnishingStatus, ListingType, PropertyType};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Raw query-string parameters as they arrive on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListingQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub completion_status: Option<String>,
    #[serde(default)]
    pub furnishing_status: Option<String>,
    #[serde(default)]
    pub min_price: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<String>,
    #[serde(default)]
    pub bathrooms: Option<String>,
    #[serde(default)]
    pub min_area: Option<String>,
    #[serde(default)]
    pub max_area: Option<String>,
    /// Comma-separated tag list.
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub is_featured: Option<String>,
    #[serde(default)]
    pub is_verified: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Result ordering. Everything the sort parameter does not name, including
/// the documented `newest` key, collapses to newest-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    Oldest,
    Popular,
    #[default]
    Newest,
}

impl SortKey {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            Some("oldest") => Self::Oldest,
            Some("popular") => Self::Popular,
            _ => Self::Newest,
        }
    }
}

/// Typed search constraints. Every field optional; pagination always set.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    pub q: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub listing_type: Option<ListingType>,
    pub property_type: Option<PropertyType>,
    pub category: Option<ListingCategory>,
    pub completion_status: Option<CompletionStatus>,
    pub furnishing_status: Option<FurnishingStatus>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub min_area: Option<u32>,
    pub max_area: Option<u32>,
    pub amenities: Vec<String>,
    pub is_featured: bool,
    pub is_verified: bool,
    pub sort_by: SortKey,
    pub page: u32,
    pub limit: u32,
}

/// Defaults must honor the pagination invariant: `page >= 1`, `limit > 0`.
impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            q: None,
            city: None,
            area: None,
            listing_type: None,
            property_type: None,
            category: None,
            completion_status: None,
            furnishing_status: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            bathrooms: None,
            min_area: None,
            max_area: None,
            amenities: Vec::new(),
            is_featured: false,
            is_verified: false,
            sort_by: SortKey::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchFilters {
    /// Coerces the raw query into typed filters. Unparsable numbers and
    /// unknown enum labels silently become absent filters; `minPrice <=
    /// maxPrice` is deliberately not checked.
    pub fn from_query(raw: &RawListingQuery) -> Self {
        Self {
            q: non_empty(raw.q.as_deref()),
            city: non_empty(raw.city.as_deref()),
            area: non_empty(raw.area.as_deref()),
            listing_type: raw.listing_type.as_deref().and_then(ListingType::parse),
            property_type: raw.property_type.as_deref().and_then(PropertyType::parse),
            category: raw.category.as_deref().and_then(ListingCategory::parse),
            completion_status: raw
                .completion_status
                .as_deref()
                .and_then(CompletionStatus::parse),
            furnishing_status: raw
                .furnishing_status
                .as_deref()
                .and_then(FurnishingStatus::parse),
            min_price: parse_u32(raw.min_price.as_deref()),
            max_price: parse_u32(raw.max_price.as_deref()),
            bedrooms: parse_u32(raw.bedrooms.as_deref()),
            bathrooms: parse_u32(raw.bathrooms.as_deref()),
            min_area: parse_u32(raw.min_area.as_deref()),
            max_area: parse_u32(raw.max_area.as_deref()),
            amenities: parse_amenities(raw.amenities.as_deref()),
            is_featured: is_true(raw.is_featured.as_deref()),
            is_verified: is_true(raw.is_verified.as_deref()),
            sort_by: SortKey::parse(raw.sort_by.as_deref()),
            page: parse_u32(raw.page.as_deref())
                .unwrap_or(DEFAULT_PAGE)
                .max(1),
            limit: parse_u32(raw.limit.as_deref())
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .max(1),
        }
    }
}

fn parse_u32(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Boolean flags are true only for the literal string "true".
fn is_true(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn parse_amenities(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
