use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::ListingCategory;

/// Opaque listing identifier, assigned by the service at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    Sale,
    Rent,
}

impl ListingType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sale" => Some(Self::Sale),
            "rent" => Some(Self::Rent),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Flat,
    Land,
    Commercial,
    Office,
    Shop,
}

impl PropertyType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "apartment" => Some(Self::Apartment),
            "house" => Some(Self::House),
            "flat" => Some(Self::Flat),
            "land" => Some(Self::Land),
            "commercial" => Some(Self::Commercial),
            "office" => Some(Self::Office),
            "shop" => Some(Self::Shop),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Flat => "flat",
            Self::Land => "land",
            Self::Commercial => "commercial",
            Self::Office => "office",
            Self::Shop => "shop",
        }
    }

    /// Commercial, office, and shop listings share one derived category per
    /// listing type.
    pub const fn is_commercial(self) -> bool {
        matches!(self, Self::Commercial | Self::Office | Self::Shop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Pending,
    Published,
    Sold,
    Rented,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Ready,
    UnderConstruction,
}

impl CompletionStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ready" => Some(Self::Ready),
            "under_construction" => Some(Self::UnderConstruction),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnishingStatus {
    Furnished,
    SemiFurnished,
    Unfurnished,
}

impl FurnishingStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "furnished" => Some(Self::Furnished),
            "semi_furnished" => Some(Self::SemiFurnished),
            "unfurnished" => Some(Self::Unfurnished),
            _ => None,
        }
    }
}

/// Listing price as stored: either a proper amount or seller-supplied text
/// such as "Contact for Price". Comparison sites must decide their own
/// coercion policy via [`Price::numeric`] instead of relying on an implicit
/// cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Numeric view of the price. Text prices that parse as numbers (legacy
    /// records store amounts as strings) count as numeric.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Price::Amount(value) => Some(*value),
            Price::Text(raw) => raw.trim().parse::<f64>().ok(),
        }
    }

    /// Coercion used by range filters and price sorts: unparsable text
    /// prices count as zero. A "Contact for Price" listing therefore matches
    /// a minPrice of 0 and fails any positive minPrice.
    pub fn numeric_or_zero(&self) -> f64 {
        self.numeric().unwrap_or(0.0)
    }
}

/// A property record available for sale or rent. The derived category is not
/// part of this struct; it is recomputed on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub slug: String,
    pub price: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_sqft: Option<u32>,
    pub listing_type: ListingType,
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_sub_type: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sq_ft: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_status: Option<CompletionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furnishing_status: Option<FurnishingStatus>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_by: Option<String>,
    pub is_featured: bool,
    pub is_verified: bool,
    pub status: ListingStatus,
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

impl Listing {
    pub fn category(&self) -> ListingCategory {
        ListingCategory::derive(
            self.listing_type,
            self.property_type,
            self.property_sub_type.as_deref(),
        )
    }
}

/// Payload accepted when a seller or broker submits a new listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub price_per_sqft: Option<u32>,
    pub listing_type: ListingType,
    pub property_type: PropertyType,
    #[serde(default)]
    pub property_sub_type: Option<String>,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub area_sq_ft: Option<u32>,
    #[serde(default)]
    pub completion_status: Option<CompletionStatus>,
    #[serde(default)]
    pub furnishing_status: Option<FurnishingStatus>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub posted_by: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_verified: bool,
    /// Moderation entry point: defaults to pending review when omitted.
    #[serde(default)]
    pub status: Option<ListingStatus>,
}

/// Partial update applied by owners and moderators. Absent fields keep their
/// stored values; status flips cover approve/reject/feature moderation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub area_sq_ft: Option<u32>,
    #[serde(default)]
    pub completion_status: Option<CompletionStatus>,
    #[serde(default)]
    pub furnishing_status: Option<FurnishingStatus>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub status: Option<ListingStatus>,
}

/// Search result row: the stored listing plus its derived category.
#[derive(Debug, Clone, Serialize)]
pub struct ListingWithCategory {
    #[serde(flatten)]
    pub listing: Listing,
    pub category: ListingCategory,
}

impl From<Listing> for ListingWithCategory {
    fn from(listing: Listing) -> Self {
        let category = listing.category();
        Self { listing, category }
    }
}

/// Envelope containing one page of results plus total-count metadata.
///
/// `total` comes from an independent count query, so it is only consistent
/// with `data` in the absence of concurrent writes between the two reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = (total as u32).div_ceil(limit.max(1));
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
