use chrono::Utc;
use hotel_booking_api::{
    domain::search::{HotelSearchParams, SearchCriteria, filter_hotels},
    models::{Hotel, Room},
};
use test_case::test_case;
use uuid::Uuid;

fn room(capacity: i32) -> Room {
    Room {
        id: Uuid::new_v4(),
        name: format!("Room for {capacity}"),
        description: String::new(),
        price: 100.0,
        original_price: None,
        discount: None,
        capacity,
        bed_type: "Queen".into(),
        size: 25,
        view: "City".into(),
        image: String::new(),
    }
}

fn hotel(
    name: &str,
    location: &str,
    price: f64,
    rating: f64,
    property_type: &str,
    amenities: &[&str],
    capacities: &[i32],
) -> Hotel {
    let now = Utc::now();
    Hotel {
        id: Uuid::new_v4(),
        name: name.into(),
        location: location.into(),
        description: String::new(),
        price,
        original_price: None,
        discount: None,
        rating,
        review_count: 0,
        images: vec![],
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        property_type: property_type.into(),
        rooms: capacities.iter().copied().map(room).collect(),
        featured: false,
        created_at: now,
        updated_at: now,
    }
}

fn catalog() -> Vec<Hotel> {
    vec![
        hotel("Grand Plaza Hotel", "New York, NY", 299.0, 4.8, "hotel", &["wifi", "breakfast", "gym", "restaurant"], &[2, 4]),
        hotel("Seaside Resort & Spa", "Miami, FL", 349.0, 4.7, "resort", &["wifi", "breakfast", "gym", "restaurant"], &[2, 3]),
        hotel("Mountain View Lodge", "Denver, CO", 199.0, 4.5, "lodge", &["wifi", "breakfast", "restaurant"], &[2]),
        hotel("Historic Downtown Inn", "Boston, MA", 229.0, 4.4, "inn", &["wifi", "breakfast"], &[2]),
        hotel("Riverside Suites", "New Orleans, LA", 189.0, 3.9, "apartment", &["wifi"], &[]),
    ]
}

fn names(params: HotelSearchParams) -> Vec<String> {
    let criteria = SearchCriteria::from_params(&params);
    filter_hotels(catalog(), &criteria)
        .into_iter()
        .map(|h| h.name)
        .collect()
}

fn params() -> HotelSearchParams {
    HotelSearchParams::default()
}

#[test]
fn empty_criteria_keep_every_hotel_in_order() {
    let all: Vec<String> = catalog().into_iter().map(|h| h.name).collect();
    assert_eq!(names(params()), all);
}

#[test]
fn malformed_price_min_behaves_like_unset() {
    let malformed = HotelSearchParams {
        price_min: Some("abc".into()),
        ..params()
    };
    assert_eq!(names(malformed), names(params()));
}

#[test]
fn dates_do_not_filter() {
    let dated = HotelSearchParams {
        start_date: Some("2025-06-10".into()),
        end_date: Some("2025-06-01".into()),
        ..params()
    };
    assert_eq!(names(dated).len(), catalog().len());
}

#[test_case(HotelSearchParams { location: Some("new".into()), ..Default::default() },
    &["Grand Plaza Hotel", "Riverside Suites"]; "location is a case insensitive substring")]
#[test_case(HotelSearchParams { guests: Some("3".into()), ..Default::default() },
    &["Grand Plaza Hotel", "Seaside Resort & Spa"]; "guests need a large enough room")]
#[test_case(HotelSearchParams { price_min: Some("200".into()), price_max: Some("300".into()), ..Default::default() },
    &["Grand Plaza Hotel", "Historic Downtown Inn"]; "price range is inclusive")]
#[test_case(HotelSearchParams { rating: Some("4.7,3".into()), ..Default::default() },
    &["Grand Plaza Hotel", "Seaside Resort & Spa", "Mountain View Lodge", "Historic Downtown Inn", "Riverside Suites"]; "any rating threshold is enough")]
#[test_case(HotelSearchParams { rating: Some("4.6".into()), ..Default::default() },
    &["Grand Plaza Hotel", "Seaside Resort & Spa"]; "single rating threshold")]
#[test_case(HotelSearchParams { amenities: Some("gym,breakfast".into()), ..Default::default() },
    &["Grand Plaza Hotel", "Seaside Resort & Spa"]; "every amenity is required")]
#[test_case(HotelSearchParams { property_type: Some("lodge,inn".into()), ..Default::default() },
    &["Mountain View Lodge", "Historic Downtown Inn"]; "property types are alternatives")]
#[test_case(HotelSearchParams { guests: Some("1".into()), ..Default::default() },
    &["Grand Plaza Hotel", "Seaside Resort & Spa", "Mountain View Lodge", "Historic Downtown Inn"]; "roomless hotel sleeps nobody")]
fn filters_narrow_the_catalog(params: HotelSearchParams, expected: &[&str]) {
    assert_eq!(names(params), expected);
}

#[test]
fn adding_a_filter_never_grows_the_result() {
    let base = HotelSearchParams {
        amenities: Some("wifi".into()),
        ..params()
    };
    let narrower = HotelSearchParams {
        amenities: Some("wifi,restaurant".into()),
        price_max: Some("300".into()),
        ..base.clone()
    };
    let wide = names(base);
    let narrow = names(narrower);
    assert!(narrow.iter().all(|name| wide.contains(name)));
    assert!(narrow.len() <= wide.len());
}

#[test]
fn rating_and_amenity_lists_combine_differently() {
    let mut catalog = catalog();
    catalog.push(hotel("Garden Hostel", "Austin, TX", 60.0, 4.0, "hostel", &["wifi"], &[6]));

    let by_rating = SearchCriteria::from_params(&HotelSearchParams {
        rating: Some("3,5".into()),
        ..Default::default()
    });
    assert!(by_rating.matches(&catalog[5]));

    let by_amenity = SearchCriteria::from_params(&HotelSearchParams {
        amenities: Some("wifi,pool".into()),
        ..Default::default()
    });
    assert!(!by_amenity.matches(&catalog[5]));
}
