use std::sync::Arc;

use clap::Args;
use propmarket::error::AppError;
use propmarket::listings::{
    ListingService, ListingStatus, ListingType, NewListing, Price, PropertyType, RawListingQuery,
};

use crate::infra::InMemoryListingStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Page size used for the demo searches
    #[arg(long)]
    pub(crate) limit: Option<u32>,
}

fn entry(
    title: &str,
    listing_type: ListingType,
    property_type: PropertyType,
    price: Price,
) -> NewListing {
    NewListing {
        title: title.to_string(),
        price,
        price_per_sqft: None,
        listing_type,
        property_type,
        property_sub_type: None,
        address: "House 7, Road 11".to_string(),
        city: "Dhaka".to_string(),
        area: Some("Banani".to_string()),
        description: None,
        bedrooms: Some(3),
        bathrooms: Some(2),
        area_sq_ft: Some(1250),
        completion_status: None,
        furnishing_status: None,
        amenities: vec!["Parking".to_string(), "Generator".to_string()],
        posted_by: Some("demo-seller".to_string()),
        is_featured: false,
        is_verified: true,
        status: Some(ListingStatus::Published),
    }
}

/// Representative catalog covering every derived category plus the
/// text-price edge case.
pub(crate) fn sample_listings() -> Vec<NewListing> {
    let mut room = entry(
        "Room near North South University",
        ListingType::Rent,
        PropertyType::Apartment,
        Price::Amount(9_000.0),
    );
    room.property_sub_type = Some("Room with attached bath".to_string());
    room.bedrooms = Some(1);
    room.bathrooms = Some(1);

    let mut negotiable = entry(
        "Lakefront Duplex",
        ListingType::Sale,
        PropertyType::House,
        Price::Text("Contact for Price".to_string()),
    );
    negotiable.is_featured = true;

    vec![
        entry(
            "Corner Plot in Purbachal",
            ListingType::Sale,
            PropertyType::Land,
            Price::Amount(14_500_000.0),
        ),
        entry(
            "Sunny 3-Bed Apartment",
            ListingType::Sale,
            PropertyType::Apartment,
            Price::Amount(9_800_000.0),
        ),
        entry(
            "Family Flat in Mirpur",
            ListingType::Rent,
            PropertyType::Flat,
            Price::Amount(28_000.0),
        ),
        entry(
            "Office Floor on Gulshan Avenue",
            ListingType::Rent,
            PropertyType::Office,
            Price::Amount(160_000.0),
        ),
        room,
        negotiable,
    ]
}

pub(crate) fn seed_catalog(
    service: &ListingService<InMemoryListingStore>,
) -> Result<usize, AppError> {
    let listings = sample_listings();
    let count = listings.len();
    for listing in listings {
        service.create(listing).map_err(AppError::Catalog)?;
    }
    Ok(count)
}

fn price_label(price: &Price) -> String {
    match price {
        Price::Amount(value) => format!("{value:.0}"),
        Price::Text(text) => text.clone(),
    }
}

fn print_page(
    heading: &str,
    service: &ListingService<InMemoryListingStore>,
    raw: &RawListingQuery,
) -> Result<(), AppError> {
    let page = service.search(raw).map_err(AppError::Catalog)?;
    println!("{heading}");
    println!(
        "  {} of {} matches (page {}/{})",
        page.data.len(),
        page.total,
        page.page,
        page.total_pages.max(1)
    );
    for row in &page.data {
        println!(
            "  - {} | {} | {}",
            row.listing.title,
            price_label(&row.listing.price),
            row.category
        );
    }
    println!();
    Ok(())
}

/// Seeds an in-memory catalog and walks through the search surface on the
/// command line.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = ListingService::new(Arc::new(InMemoryListingStore::default()));
    let seeded = seed_catalog(&service)?;
    println!("seeded {seeded} demo listings\n");

    let limit = args.limit.map(|value| value.to_string());

    print_page(
        "All published listings, newest first:",
        &service,
        &RawListingQuery {
            limit: limit.clone(),
            ..RawListingQuery::default()
        },
    )?;

    print_page(
        "Category \"Room Rentals\":",
        &service,
        &RawListingQuery {
            category: Some("Room Rentals".to_string()),
            limit: limit.clone(),
            ..RawListingQuery::default()
        },
    )?;

    print_page(
        "Sales above 10,000,000 by price (text prices coerce to zero):",
        &service,
        &RawListingQuery {
            listing_type: Some("sale".to_string()),
            min_price: Some("10000000".to_string()),
            sort_by: Some("price_desc".to_string()),
            limit,
            ..RawListingQuery::default()
        },
    )?;

    Ok(())
}
