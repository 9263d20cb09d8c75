use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    domain::{
        booking::BookingStatus,
        pricing::{PriceBreakdown, PriceDisplay},
        ratings::{ReviewSummary, StarBucket},
        search::{HotelSearchParams, SearchCriteria},
    },
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        bookings::{BookingList, CreateBookingRequest, UpdateBookingStatusRequest},
        hotels::{
            CreateHotelRequest, HotelList, HotelSearchResult, Quote, RoomInput, UpdateHotelRequest,
        },
        profile::UpdateProfileRequest,
        reviews::{CreateReviewRequest, HotelReviews},
    },
    models::{Booking, Hotel, Review, Room, User},
    response::{ApiResponse, Meta},
    routes::{admin, auth, bookings, health, hotels, params, profile},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        profile::get_profile,
        profile::update_profile,
        hotels::search_hotels,
        hotels::featured_hotels,
        hotels::get_hotel,
        hotels::quote,
        hotels::list_reviews,
        hotels::add_review,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::cancel_booking,
        admin::create_hotel,
        admin::update_hotel,
        admin::delete_hotel,
        admin::list_all_bookings,
        admin::update_booking_status
    ),
    components(
        schemas(
            User,
            Hotel,
            Room,
            Review,
            Booking,
            BookingStatus,
            HotelSearchParams,
            SearchCriteria,
            PriceBreakdown,
            PriceDisplay,
            ReviewSummary,
            StarBucket,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            CreateHotelRequest,
            UpdateHotelRequest,
            RoomInput,
            HotelList,
            HotelSearchResult,
            Quote,
            CreateReviewRequest,
            HotelReviews,
            CreateBookingRequest,
            UpdateBookingStatusRequest,
            BookingList,
            params::Pagination,
            params::SortOrder,
            params::BookingListQuery,
            Meta,
            ApiResponse<Hotel>,
            ApiResponse<HotelList>,
            ApiResponse<HotelSearchResult>,
            ApiResponse<Booking>,
            ApiResponse<BookingList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Profile", description = "Current user profile"),
        (name = "Hotels", description = "Hotel search, details and price quotes"),
        (name = "Reviews", description = "Hotel reviews"),
        (name = "Bookings", description = "Booking endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
