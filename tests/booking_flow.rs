use chrono::NaiveDate;
use hotel_booking_api::{
    db::{create_pool, run_migrations},
    domain::{
        booking::BookingStatus,
        search::HotelSearchParams,
    },
    dto::{
        bookings::{CreateBookingRequest, UpdateBookingStatusRequest},
        hotels::{CreateHotelRequest, RoomInput, UpdateHotelRequest},
        profile::UpdateProfileRequest,
        reviews::CreateReviewRequest,
    },
    entity::{
        rooms::{Column as RoomCol, Entity as Rooms},
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::{AuthUser, ROLE_ADMIN, ROLE_USER},
    routes::params::BookingListQuery,
    services::{
        admin_service, booking_service, hotel_service, profile_service, review_service,
    },
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    Statement,
};
use uuid::Uuid;

// Integration flow: admin creates a hotel -> user books and cancels -> admin
// status rules -> user reviews the stay -> admin edits and deletes the hotel.
#[tokio::test]
async fn book_cancel_and_review_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let guest = AuthUser {
        user_id: create_user(&state, ROLE_USER, "guest@example.com").await?,
        role: ROLE_USER.into(),
    };
    let admin = AuthUser {
        user_id: create_user(&state, ROLE_ADMIN, "admin@example.com").await?,
        role: ROLE_ADMIN.into(),
    };

    profile_service::update_profile(
        &state,
        &guest,
        UpdateProfileRequest {
            display_name: Some("Jamie Guest".into()),
            avatar_url: None,
            phone: Some(String::new()),
        },
    )
    .await?;

    let hotel = hotel_service::create_hotel(&state, &admin, harbor_inn())
        .await?
        .data
        .expect("hotel");
    assert_eq!(hotel.rooms[0].name, "Standard Room");

    // Search sees the new hotel only when its amenities match.
    let found = hotel_service::search_hotels(
        &state,
        HotelSearchParams {
            location: Some("portland".into()),
            amenities: Some("wifi".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("search result");
    assert_eq!(found.items.len(), 1);

    // Too many guests for the default room.
    let err = booking_service::create_booking(
        &state,
        &guest,
        booking_request(hotel.id, None, 3),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let booking = booking_service::create_booking(
        &state,
        &guest,
        booking_request(hotel.id, None, 2),
    )
    .await?
    .data
    .expect("booking");
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.nights, 3);
    assert_eq!(booking.subtotal, 300.0);
    assert_eq!(booking.total, 336.0);
    assert_eq!(booking.user_name, "Jamie Guest");
    assert_eq!(booking.room_name, "Standard Room");

    let mine = booking_service::list_user_bookings(&state, &guest)
        .await?
        .data
        .expect("bookings");
    assert_eq!(mine.items.len(), 1);

    let cancelled = booking_service::cancel_booking(&state, &guest, booking.id)
        .await?
        .data
        .expect("cancelled booking");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    // Cancelled is terminal.
    let err = admin_service::update_booking_status(
        &state,
        &admin,
        booking.id,
        UpdateBookingStatusRequest {
            status: BookingStatus::Completed,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let listed = admin_service::list_all_bookings(
        &state,
        &admin,
        BookingListQuery {
            status: Some("cancelled".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(listed.meta.expect("meta").total, Some(1));

    review_service::add_review(
        &state,
        &guest,
        hotel.id,
        CreateReviewRequest {
            rating: 3,
            comment: "Quiet room".into(),
        },
    )
    .await?;
    review_service::add_review(
        &state,
        &admin,
        hotel.id,
        CreateReviewRequest {
            rating: 5,
            comment: "  Great breakfast  ".into(),
        },
    )
    .await?;

    let reviews = review_service::list_reviews(&state, hotel.id)
        .await?
        .data
        .expect("reviews");
    assert_eq!(reviews.summary.total, 2);
    assert_eq!(reviews.summary.average, 4.0);
    assert_eq!(reviews.items[0].comment, "Great breakfast");
    assert_eq!(reviews.items[0].user_name, "Anonymous");

    // Same name and location is a separate listing, not a conflict.
    let twin = hotel_service::create_hotel(&state, &admin, harbor_inn())
        .await?
        .data
        .expect("second hotel");
    assert_ne!(twin.id, hotel.id);
    assert_eq!(twin.name, hotel.name);

    let discounted = hotel_service::update_hotel(
        &state,
        &admin,
        twin.id,
        UpdateHotelRequest {
            original_price: Some(Some(180.0)),
            discount: Some(Some(15)),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("discounted hotel");
    assert_eq!(discounted.discount, Some(15));

    let cleared = hotel_service::update_hotel(
        &state,
        &admin,
        twin.id,
        UpdateHotelRequest {
            original_price: Some(None),
            discount: Some(None),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("cleared hotel");
    assert_eq!(cleared.discount, None);
    assert_eq!(cleared.original_price, None);
    assert_eq!(cleared.rooms.len(), 2);

    // Deleting a hotel drops its rooms but keeps the guest's booking history.
    hotel_service::delete_hotel(&state, &admin, hotel.id).await?;
    let rooms_left = Rooms::find()
        .filter(RoomCol::HotelId.eq(hotel.id))
        .count(&state.orm)
        .await?;
    assert_eq!(rooms_left, 0);

    let err = hotel_service::delete_hotel(&state, &admin, hotel.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let history = booking_service::list_user_bookings(&state, &guest)
        .await?
        .data
        .expect("bookings after delete");
    assert_eq!(history.items.len(), 1);
    assert_eq!(history.items[0].id, booking.id);
    assert_eq!(history.items[0].hotel_id, None);
    assert_eq!(history.items[0].hotel_name, "Harbor Inn");
    assert_eq!(history.items[0].status, BookingStatus::Cancelled);

    Ok(())
}

fn harbor_inn() -> CreateHotelRequest {
    CreateHotelRequest {
        name: "Harbor Inn".into(),
        location: "Portland, ME".into(),
        description: "Waterfront rooms".into(),
        price: 150.0,
        original_price: None,
        discount: None,
        rating: 4.2,
        review_count: 0,
        images: vec![],
        amenities: vec!["wifi".into(), "breakfast".into()],
        property_type: "inn".into(),
        rooms: vec![
            room_input("Standard Room", 100.0, 2),
            room_input("Harbor Suite", 240.0, 4),
        ],
        featured: true,
    }
}

fn room_input(name: &str, price: f64, capacity: i32) -> RoomInput {
    RoomInput {
        name: name.into(),
        description: String::new(),
        price,
        original_price: None,
        discount: None,
        capacity,
        bed_type: "Queen".into(),
        size: 30,
        view: "Harbor".into(),
        image: String::new(),
    }
}

fn booking_request(hotel_id: Uuid, room_id: Option<Uuid>, guests: i32) -> CreateBookingRequest {
    CreateBookingRequest {
        hotel_id,
        room_id,
        guests,
        check_in: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url, 5).await?;
    let state = AppState::new(pool, "flow-test-secret");
    run_migrations(&state.orm).await?;

    // Clean tables between runs
    let backend = state.orm.get_database_backend();
    state
        .orm
        .execute(Statement::from_string(
            backend,
            "TRUNCATE TABLE audit_logs, bookings, reviews, rooms, hotels, users CASCADE",
        ))
        .await?;

    Ok(state)
}

async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        display_name: Set(None),
        avatar_url: Set(None),
        phone: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}
