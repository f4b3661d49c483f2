use crate::listings::category::ListingCategory;
use crate::listings::domain::{
    CompletionStatus, FurnishingStatus, ListingStatus, ListingType, Price, PropertyType,
};
use crate::listings::filters::{RawListingQuery, SearchFilters};
use crate::listings::query::{ListingPredicate, ListingQuery};

use super::common::{build_service, created, listing, seed};

fn raw(overrides: impl FnOnce(&mut RawListingQuery)) -> RawListingQuery {
    let mut query = RawListingQuery::default();
    overrides(&mut query);
    query
}

#[test]
fn only_published_listings_are_searchable() {
    let (service, store) = build_service();
    let mut draft = listing("l-1", "Draft flat");
    draft.status = ListingStatus::Draft;
    let mut sold = listing("l-2", "Sold flat");
    sold.status = ListingStatus::Sold;
    seed(&store, vec![draft, sold, listing("l-3", "Live flat")]);

    let page = service.search(&RawListingQuery::default()).expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].listing.title, "Live flat");
}

#[test]
fn free_text_matches_title_address_or_city() {
    let (service, store) = build_service();
    let mut by_address = listing("l-1", "Plain listing");
    by_address.address = "7 Lakeside Avenue".to_string();
    let mut by_city = listing("l-2", "Another listing");
    by_city.city = "Lakeland".to_string();
    seed(
        &store,
        vec![by_address, by_city, listing("l-3", "Unrelated")],
    );

    let page = service
        .search(&raw(|q| q.q = Some("lake".to_string())))
        .expect("search");
    assert_eq!(page.total, 2);
}

#[test]
fn category_filter_wins_over_individual_type_fields() {
    let (service, store) = build_service();
    let mut land = listing("l-1", "Corner plot");
    land.property_type = PropertyType::Land;
    let mut rented_house = listing("l-2", "Family house");
    rented_house.listing_type = ListingType::Rent;
    rented_house.property_type = PropertyType::House;
    seed(&store, vec![land, rented_house]);

    // Contradictory individual fields must be ignored entirely.
    let page = service
        .search(&raw(|q| {
            q.category = Some("Land For Sale".to_string());
            q.listing_type = Some("rent".to_string());
            q.property_type = Some("house".to_string());
        }))
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].listing.title, "Corner plot");
    assert_eq!(page.data[0].category, ListingCategory::LandForSale);
}

#[test]
fn commercial_category_spans_all_three_property_types() {
    let (service, store) = build_service();
    for (id, property_type) in [
        ("l-1", PropertyType::Commercial),
        ("l-2", PropertyType::Office),
        ("l-3", PropertyType::Shop),
    ] {
        let mut entry = listing(id, "Workspace");
        entry.slug = format!("workspace-{id}");
        entry.property_type = property_type;
        seed(&store, vec![entry]);
    }

    let page = service
        .search(&raw(|q| {
            q.category = Some("Commercial Properties For Sale".to_string());
        }))
        .expect("search");
    assert_eq!(page.total, 3);
}

#[test]
fn text_price_counts_as_zero_for_range_bounds() {
    let (service, store) = build_service();
    let mut numeric = listing("l-1", "Priced flat");
    numeric.price = Price::Text("500000".to_string());
    let mut contact = listing("l-2", "Contact flat");
    contact.price = Price::Text("Contact for Price".to_string());
    seed(&store, vec![numeric, contact]);

    // A positive lower bound must exclude the zero-coerced text price but
    // keep the numeric-string price.
    let page = service
        .search(&raw(|q| q.min_price = Some("100000".to_string())))
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].listing.title, "Priced flat");

    // A zero lower bound lets the text-price listing through.
    let page = service
        .search(&raw(|q| q.min_price = Some("0".to_string())))
        .expect("search");
    assert_eq!(page.total, 2);
}

#[test]
fn amenities_require_every_requested_tag() {
    let (service, store) = build_service();
    let mut both = listing("l-1", "Full amenity flat");
    both.amenities = vec!["Parking".to_string(), "Gym".to_string()];
    let mut one = listing("l-2", "Parking only flat");
    one.amenities = vec!["Parking".to_string()];
    seed(&store, vec![both, one]);

    let page = service
        .search(&raw(|q| q.amenities = Some("Parking,Gym".to_string())))
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].listing.title, "Full amenity flat");
}

#[test]
fn zero_valued_bounds_are_real_constraints() {
    // A supplied 0 is a bound like any other: maxPrice=0 keeps only
    // zero-coerced prices, and bedrooms=0 still demands the field exist.
    let mut priced = listing("l-1", "Priced flat");
    priced.price = Price::Amount(500_000.0);
    let mut contact = listing("l-2", "Contact flat");
    contact.price = Price::Text("Contact for Price".to_string());
    let mut plot = listing("l-3", "Land plot");
    plot.bedrooms = None;

    let predicate = ListingPredicate::from_filters(&SearchFilters {
        max_price: Some(0),
        ..SearchFilters::default()
    });
    assert!(!predicate.matches(&priced));
    assert!(predicate.matches(&contact));

    let predicate = ListingPredicate::from_filters(&SearchFilters {
        bedrooms: Some(0),
        ..SearchFilters::default()
    });
    assert!(predicate.matches(&priced));
    assert!(!predicate.matches(&plot));
}

#[test]
fn bedroom_bound_excludes_listings_without_the_field() {
    let mut with_rooms = listing("l-1", "Three bed");
    with_rooms.bedrooms = Some(3);
    let mut without = listing("l-2", "Land plot");
    without.bedrooms = None;

    let filters = SearchFilters {
        bedrooms: Some(2),
        page: 1,
        limit: 12,
        ..SearchFilters::default()
    };
    let predicate = ListingPredicate::from_filters(&filters);
    assert!(predicate.matches(&with_rooms));
    assert!(!predicate.matches(&without));
}

#[test]
fn city_filter_requires_an_exact_match() {
    let (service, store) = build_service();
    let mut dhaka = listing("l-1", "Dhaka flat");
    dhaka.city = "Dhaka".to_string();
    let mut narayanganj = listing("l-2", "Narayanganj flat");
    narayanganj.city = "Narayanganj".to_string();
    seed(&store, vec![dhaka, narayanganj]);

    let page = service
        .search(&raw(|q| q.city = Some("Dhaka".to_string())))
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].listing.title, "Dhaka flat");

    // Unlike the area filter, a prefix is not enough.
    let page = service
        .search(&raw(|q| q.city = Some("Dhak".to_string())))
        .expect("search");
    assert_eq!(page.total, 0);
}

#[test]
fn completion_and_furnishing_filters_exclude_listings_without_the_field() {
    let (service, store) = build_service();
    let mut ready = listing("l-1", "Ready flat");
    ready.completion_status = Some(CompletionStatus::Ready);
    ready.furnishing_status = Some(FurnishingStatus::Furnished);
    let mut building = listing("l-2", "Under construction flat");
    building.completion_status = Some(CompletionStatus::UnderConstruction);
    building.furnishing_status = Some(FurnishingStatus::Unfurnished);
    let unspecified = listing("l-3", "Unspecified flat");
    seed(&store, vec![ready, building, unspecified]);

    let page = service
        .search(&raw(|q| q.completion_status = Some("ready".to_string())))
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].listing.title, "Ready flat");

    let page = service
        .search(&raw(|q| q.furnishing_status = Some("unfurnished".to_string())))
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].listing.title, "Under construction flat");
}

#[test]
fn area_sq_ft_range_is_inclusive_and_fails_on_missing_field() {
    let filters = SearchFilters {
        min_area: Some(1000),
        max_area: Some(1400),
        ..SearchFilters::default()
    };
    let predicate = ListingPredicate::from_filters(&filters);

    let mut at_lower = listing("l-1", "Lower bound");
    at_lower.area_sq_ft = Some(1000);
    let mut at_upper = listing("l-2", "Upper bound");
    at_upper.area_sq_ft = Some(1400);
    let mut below = listing("l-3", "Below");
    below.area_sq_ft = Some(999);
    let mut above = listing("l-4", "Above");
    above.area_sq_ft = Some(1401);
    let mut r#unsized = listing("l-5", "Land plot");
    r#unsized.area_sq_ft = None;

    assert!(predicate.matches(&at_lower));
    assert!(predicate.matches(&at_upper));
    assert!(!predicate.matches(&below));
    assert!(!predicate.matches(&above));
    assert!(!predicate.matches(&r#unsized));
}

#[test]
fn featured_flag_never_excludes_featured_items_when_absent() {
    let (service, store) = build_service();
    let mut featured = listing("l-1", "Featured flat");
    featured.is_featured = true;
    seed(&store, vec![featured, listing("l-2", "Plain flat")]);

    let all = service.search(&RawListingQuery::default()).expect("search");
    assert_eq!(all.total, 2);

    let only_featured = service
        .search(&raw(|q| q.is_featured = Some("true".to_string())))
        .expect("search");
    assert_eq!(only_featured.total, 1);
    assert_eq!(only_featured.data[0].listing.title, "Featured flat");
}

#[test]
fn price_desc_orders_mixed_prices_numerically_without_dropping_text() {
    let (service, store) = build_service();
    let mut low = listing("l-1", "Low");
    low.price = Price::Text("300".to_string());
    let mut high = listing("l-2", "High");
    high.price = Price::Amount(2000.0);
    let mut text = listing("l-3", "Text");
    text.price = Price::Text("Contact for Price".to_string());
    seed(&store, vec![low, high, text]);

    let page = service
        .search(&raw(|q| q.sort_by = Some("price_desc".to_string())))
        .expect("search");
    let titles: Vec<&str> = page
        .data
        .iter()
        .map(|row| row.listing.title.as_str())
        .collect();
    // "2000" must not sort before "300" lexicographically; the text price
    // keys as zero and stays in the result set.
    assert_eq!(titles, vec!["High", "Low", "Text"]);
    assert_eq!(page.total, 3);
}

#[test]
fn popular_sort_orders_by_views_descending() {
    let (service, store) = build_service();
    let mut quiet = listing("l-1", "Quiet");
    quiet.views = 3;
    let mut busy = listing("l-2", "Busy");
    busy.views = 90;
    seed(&store, vec![quiet, busy]);

    let page = service
        .search(&raw(|q| q.sort_by = Some("popular".to_string())))
        .expect("search");
    assert_eq!(page.data[0].listing.title, "Busy");
}

#[test]
fn default_sort_is_newest_first() {
    let (service, store) = build_service();
    let mut old = listing("l-1", "Old");
    old.created_at = created(1);
    let mut new = listing("l-2", "New");
    new.created_at = created(20);
    seed(&store, vec![old, new]);

    let page = service.search(&RawListingQuery::default()).expect("search");
    assert_eq!(page.data[0].listing.title, "New");

    let oldest = service
        .search(&raw(|q| q.sort_by = Some("oldest".to_string())))
        .expect("search");
    assert_eq!(oldest.data[0].listing.title, "Old");
}

#[test]
fn pagination_bounds_data_and_reports_total_pages() {
    let (service, store) = build_service();
    for index in 0..30 {
        let mut entry = listing(&format!("l-{index}"), "Bulk flat");
        entry.slug = format!("bulk-flat-{index}");
        entry.created_at = created(1 + (index % 28) as u32);
        seed(&store, vec![entry]);
    }

    let first = service.search(&RawListingQuery::default()).expect("search");
    assert_eq!(first.total, 30);
    assert_eq!(first.data.len(), 12);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.page, 1);
    assert_eq!(first.limit, 12);

    let last = service
        .search(&raw(|q| q.page = Some("3".to_string())))
        .expect("search");
    assert_eq!(last.data.len(), 6);
    assert_eq!(last.page, 3);
}

#[test]
fn empty_result_set_has_zero_pages() {
    let (service, _store) = build_service();
    let page = service.search(&RawListingQuery::default()).expect("search");
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.data.is_empty());
}

#[test]
fn default_filters_translate_to_the_first_page_without_skip() {
    let filters = SearchFilters::default();
    assert_eq!(filters.page, 1);
    assert_eq!(filters.limit, 12);

    let query = ListingQuery::from_filters(&filters);
    assert_eq!(query.skip, 0);
    assert_eq!(query.limit, 12);
}

#[test]
fn skip_is_page_minus_one_times_limit() {
    let filters = SearchFilters {
        page: 4,
        limit: 25,
        ..SearchFilters::default()
    };
    let query = ListingQuery::from_filters(&filters);
    assert_eq!(query.skip, 75);
    assert_eq!(query.limit, 25);
}

#[test]
fn results_carry_their_derived_category() {
    let (service, store) = build_service();
    let mut room = listing("l-1", "Room near campus");
    room.listing_type = ListingType::Rent;
    room.property_sub_type = Some("Room with balcony".to_string());
    seed(&store, vec![room]);

    let page = service.search(&RawListingQuery::default()).expect("search");
    assert_eq!(page.data[0].category, ListingCategory::RoomRentals);
}

#[test]
fn area_filter_is_a_case_insensitive_substring() {
    let (service, store) = build_service();
    let mut in_area = listing("l-1", "Dhanmondi flat");
    in_area.area = Some("Dhanmondi 27".to_string());
    let mut elsewhere = listing("l-2", "Uttara flat");
    elsewhere.area = Some("Uttara".to_string());
    seed(&store, vec![in_area, elsewhere]);

    let page = service
        .search(&raw(|q| q.area = Some("dhanmondi".to_string())))
        .expect("search");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].listing.title, "Dhanmondi flat");
}
