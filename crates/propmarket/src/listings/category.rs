//! Derived listing categories.
//!
//! Categories are never persisted: they are a pure function of the listing's
//! type fields, recomputed on every read. Changing the mapping reclassifies
//! every listing with no data migration.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{ListingType, PropertyType};

/// Closed set of storefront categories, serialized as their display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingCategory {
    #[serde(rename = "Land For Sale")]
    LandForSale,
    #[serde(rename = "Apartments For Sale")]
    ApartmentsForSale,
    #[serde(rename = "Apartment Rentals")]
    ApartmentRentals,
    #[serde(rename = "Commercial Property Rentals")]
    CommercialPropertyRentals,
    #[serde(rename = "Property Rentals")]
    PropertyRentals,
    #[serde(rename = "Houses For Sale")]
    HousesForSale,
    #[serde(rename = "Commercial Properties For Sale")]
    CommercialPropertiesForSale,
    #[serde(rename = "Room Rentals")]
    RoomRentals,
    #[serde(rename = "House Rentals")]
    HouseRentals,
    #[serde(rename = "Land Rentals")]
    LandRentals,
    #[serde(rename = "Other Properties")]
    OtherProperties,
}

/// Partial filter produced by the reverse mapping. The two commercial
/// categories span three property types, so they constrain the listing type
/// only; callers must not narrow them further.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub listing_type: Option<ListingType>,
    pub property_type: Option<PropertyType>,
}

impl ListingCategory {
    /// Derives the category for a listing. Total and deterministic; any
    /// combination without a dedicated bucket lands in "Other Properties".
    ///
    /// Rented apartments whose sub-type mentions "room" (any case) are
    /// classified as room rentals.
    pub fn derive(
        listing_type: ListingType,
        property_type: PropertyType,
        property_sub_type: Option<&str>,
    ) -> Self {
        match listing_type {
            ListingType::Sale => match property_type {
                PropertyType::Land => Self::LandForSale,
                PropertyType::Apartment => Self::ApartmentsForSale,
                PropertyType::House => Self::HousesForSale,
                PropertyType::Commercial | PropertyType::Office | PropertyType::Shop => {
                    Self::CommercialPropertiesForSale
                }
                // No sale bucket exists for flats.
                PropertyType::Flat => Self::OtherProperties,
            },
            ListingType::Rent => match property_type {
                PropertyType::Land => Self::LandRentals,
                PropertyType::House => Self::HouseRentals,
                PropertyType::Apartment => {
                    let is_room = property_sub_type
                        .map(|sub| sub.to_lowercase().contains("room"))
                        .unwrap_or(false);
                    if is_room {
                        Self::RoomRentals
                    } else {
                        Self::ApartmentRentals
                    }
                }
                PropertyType::Flat => Self::PropertyRentals,
                PropertyType::Commercial | PropertyType::Office | PropertyType::Shop => {
                    Self::CommercialPropertyRentals
                }
            },
        }
    }

    /// Reverse mapping from a selected category to listing filters.
    ///
    /// "Room Rentals" cannot express its sub-type substring condition here,
    /// so filtering by it over-matches plain apartment rentals. Known
    /// precision loss, kept as-is.
    pub fn filters(self) -> CategoryFilter {
        let (listing_type, property_type) = match self {
            Self::LandForSale => (Some(ListingType::Sale), Some(PropertyType::Land)),
            Self::ApartmentsForSale => (Some(ListingType::Sale), Some(PropertyType::Apartment)),
            Self::ApartmentRentals => (Some(ListingType::Rent), Some(PropertyType::Apartment)),
            Self::CommercialPropertyRentals => (Some(ListingType::Rent), None),
            Self::PropertyRentals => (Some(ListingType::Rent), Some(PropertyType::Flat)),
            Self::HousesForSale => (Some(ListingType::Sale), Some(PropertyType::House)),
            Self::CommercialPropertiesForSale => (Some(ListingType::Sale), None),
            Self::RoomRentals => (Some(ListingType::Rent), Some(PropertyType::Apartment)),
            Self::HouseRentals => (Some(ListingType::Rent), Some(PropertyType::House)),
            Self::LandRentals => (Some(ListingType::Rent), Some(PropertyType::Land)),
            Self::OtherProperties => (None, None),
        };
        CategoryFilter {
            listing_type,
            property_type,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LandForSale => "Land For Sale",
            Self::ApartmentsForSale => "Apartments For Sale",
            Self::ApartmentRentals => "Apartment Rentals",
            Self::CommercialPropertyRentals => "Commercial Property Rentals",
            Self::PropertyRentals => "Property Rentals",
            Self::HousesForSale => "Houses For Sale",
            Self::CommercialPropertiesForSale => "Commercial Properties For Sale",
            Self::RoomRentals => "Room Rentals",
            Self::HouseRentals => "House Rentals",
            Self::LandRentals => "Land Rentals",
            Self::OtherProperties => "Other Properties",
        }
    }

    /// Parses a category from its display label, as received in query
    /// strings. Unknown labels yield `None` and are dropped by the filter
    /// normalizer.
    pub fn parse(value: &str) -> Option<Self> {
        Self::selectable()
            .iter()
            .chain(std::iter::once(&Self::OtherProperties))
            .copied()
            .find(|category| category.label() == value)
    }

    /// The ten categories offered to users for browsing; the catch-all is
    /// excluded.
    pub const fn selectable() -> [Self; 10] {
        [
            Self::LandForSale,
            Self::ApartmentsForSale,
            Self::ApartmentRentals,
            Self::CommercialPropertyRentals,
            Self::PropertyRentals,
            Self::HousesForSale,
            Self::CommercialPropertiesForSale,
            Self::RoomRentals,
            Self::HouseRentals,
            Self::LandRentals,
        ]
    }

    pub const fn is_commercial(self) -> bool {
        matches!(
            self,
            Self::CommercialPropertiesForSale | Self::CommercialPropertyRentals
        )
    }
}

impl fmt::Display for ListingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
