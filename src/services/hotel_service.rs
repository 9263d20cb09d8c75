use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        pricing::{Stay, price_stay, select_room},
        search::{HotelSearchParams, SearchCriteria, filter_hotels},
    },
    dto::hotels::{
        CreateHotelRequest, HotelList, HotelSearchResult, Quote, QuoteQuery, RoomInput,
        UpdateHotelRequest,
    },
    entity::{
        hotels::{ActiveModel as HotelActive, Column as HotelCol, Entity as Hotels, Model as HotelModel},
        rooms::{ActiveModel as RoomActive, Column as RoomCol, Entity as Rooms, Model as RoomModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Hotel, Room},
    response::{ApiResponse, Meta},
    state::AppState,
};

const FEATURED_LIMIT: u64 = 3;

pub async fn search_hotels(
    state: &AppState,
    params: HotelSearchParams,
) -> AppResult<ApiResponse<HotelSearchResult>> {
    let hotels = load_all_hotels(&state.orm).await?;
    let available = hotels.len();

    let criteria = SearchCriteria::from_params(&params);
    let items = filter_hotels(hotels, &criteria);
    tracing::debug!(available, matched = items.len(), ?criteria, "hotel search");

    let meta = Meta::total(items.len());
    let data = HotelSearchResult {
        criteria,
        start_date: params.start_date,
        end_date: params.end_date,
        items,
    };
    Ok(ApiResponse::success("Hotels", data, Some(meta)))
}

pub async fn featured_hotels(state: &AppState) -> AppResult<ApiResponse<HotelList>> {
    let models = Hotels::find()
        .filter(HotelCol::Featured.eq(true))
        .order_by_desc(HotelCol::Rating)
        .limit(FEATURED_LIMIT)
        .all(&state.orm)
        .await?;
    let items = with_rooms(&state.orm, models).await?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Featured hotels", HotelList { items }, Some(meta)))
}

pub async fn get_hotel(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Hotel>> {
    let hotel = load_hotel(&state.orm, id).await?;
    Ok(ApiResponse::success("Hotel", hotel, None))
}

pub async fn quote(
    state: &AppState,
    hotel_id: Uuid,
    query: QuoteQuery,
) -> AppResult<ApiResponse<Quote>> {
    let stay = Stay::new(query.check_in, query.check_out)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    let hotel = load_hotel(&state.orm, hotel_id).await?;
    let selection = select_room(&hotel, query.room_id)
        .ok_or_else(|| AppError::BadRequest("Room not found for this hotel".into()))?;

    let data = Quote {
        hotel_id: hotel.id,
        room_id: selection.room.map(|r| r.id),
        room_name: selection.room.map(|r| r.name.clone()).unwrap_or_default(),
        check_in: stay.check_in(),
        check_out: stay.check_out(),
        price: price_stay(selection.unit_price, &stay),
    };
    Ok(ApiResponse::success("Quote", data, None))
}

pub async fn create_hotel(
    state: &AppState,
    user: &AuthUser,
    payload: CreateHotelRequest,
) -> AppResult<ApiResponse<Hotel>> {
    ensure_admin(user)?;
    if payload.name.trim().is_empty() || payload.location.trim().is_empty() {
        return Err(AppError::BadRequest("name and location are required".into()));
    }

    let txn = state.orm.begin().await?;

    let hotel = HotelActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        location: Set(payload.location),
        description: Set(payload.description),
        price: Set(payload.price),
        original_price: Set(payload.original_price),
        discount: Set(payload.discount),
        rating: Set(payload.rating),
        review_count: Set(payload.review_count),
        images: Set(serde_json::Value::from(payload.images)),
        amenities: Set(serde_json::Value::from(payload.amenities)),
        property_type: Set(payload.property_type),
        featured: Set(payload.featured),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let rooms = insert_rooms(&txn, hotel.id, payload.rooms).await?;
    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "hotel_create",
        "hotels",
        serde_json::json!({ "hotel_id": hotel.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Hotel created",
        hotel_from_entity(hotel, rooms),
        Some(Meta::empty()),
    ))
}

pub async fn update_hotel(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateHotelRequest,
) -> AppResult<ApiResponse<Hotel>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;

    let existing = Hotels::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(h) => h,
        None => return Err(AppError::NotFound),
    };

    let mut active: HotelActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(original_price) = payload.original_price {
        active.original_price = Set(original_price);
    }
    if let Some(discount) = payload.discount {
        active.discount = Set(discount);
    }
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(review_count) = payload.review_count {
        active.review_count = Set(review_count);
    }
    if let Some(images) = payload.images {
        active.images = Set(serde_json::Value::from(images));
    }
    if let Some(amenities) = payload.amenities {
        active.amenities = Set(serde_json::Value::from(amenities));
    }
    if let Some(property_type) = payload.property_type {
        active.property_type = Set(property_type);
    }
    if let Some(featured) = payload.featured {
        active.featured = Set(featured);
    }
    active.updated_at = Set(Utc::now().into());
    let hotel = active.update(&txn).await?;

    let rooms = match payload.rooms {
        Some(rooms) => {
            Rooms::delete_many()
                .filter(RoomCol::HotelId.eq(hotel.id))
                .exec(&txn)
                .await?;
            insert_rooms(&txn, hotel.id, rooms).await?
        }
        None => hotel.find_related(Rooms).all(&txn).await?,
    };

    txn.commit().await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "hotel_update",
        "hotels",
        serde_json::json!({ "hotel_id": hotel.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        hotel_from_entity(hotel, rooms),
        Some(Meta::empty()),
    ))
}

pub async fn delete_hotel(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let result = Hotels::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.pool,
        Some(user.user_id),
        "hotel_delete",
        "hotels",
        serde_json::json!({ "hotel_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Every hotel with its rooms, ordered by name.
pub async fn load_all_hotels<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<Hotel>> {
    let models = Hotels::find()
        .order_by_asc(HotelCol::Name)
        .order_by_asc(HotelCol::Id)
        .all(conn)
        .await?;
    with_rooms(conn, models).await
}

pub async fn load_hotel<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Hotel> {
    let model = Hotels::find_by_id(id).one(conn).await?;
    let model = match model {
        Some(h) => h,
        None => return Err(AppError::NotFound),
    };
    let rooms = model.find_related(Rooms).all(conn).await?;
    Ok(hotel_from_entity(model, rooms))
}

async fn with_rooms<C: ConnectionTrait>(conn: &C, models: Vec<HotelModel>) -> AppResult<Vec<Hotel>> {
    let rooms = models.load_many(Rooms, conn).await?;
    Ok(models
        .into_iter()
        .zip(rooms)
        .map(|(hotel, rooms)| hotel_from_entity(hotel, rooms))
        .collect())
}

async fn insert_rooms<C: ConnectionTrait>(
    conn: &C,
    hotel_id: Uuid,
    rooms: Vec<RoomInput>,
) -> AppResult<Vec<RoomModel>> {
    let mut inserted = Vec::with_capacity(rooms.len());
    for (position, room) in rooms.into_iter().enumerate() {
        let model = RoomActive {
            id: Set(Uuid::new_v4()),
            hotel_id: Set(hotel_id),
            position: Set(position as i32),
            name: Set(room.name),
            description: Set(room.description),
            price: Set(room.price),
            original_price: Set(room.original_price),
            discount: Set(room.discount),
            capacity: Set(room.capacity),
            bed_type: Set(room.bed_type),
            size: Set(room.size),
            view: Set(room.view),
            image: Set(room.image),
        }
        .insert(conn)
        .await?;
        inserted.push(model);
    }
    Ok(inserted)
}

fn hotel_from_entity(model: HotelModel, mut rooms: Vec<RoomModel>) -> Hotel {
    rooms.sort_by_key(|room| room.position);
    Hotel {
        images: string_list(model.id, "images", model.images),
        amenities: string_list(model.id, "amenities", model.amenities),
        id: model.id,
        name: model.name,
        location: model.location,
        description: model.description,
        price: model.price,
        original_price: model.original_price,
        discount: model.discount,
        rating: model.rating,
        review_count: model.review_count,
        property_type: model.property_type,
        rooms: rooms.into_iter().map(room_from_entity).collect(),
        featured: model.featured,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn room_from_entity(model: RoomModel) -> Room {
    Room {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        original_price: model.original_price,
        discount: model.discount,
        capacity: model.capacity,
        bed_type: model.bed_type,
        size: model.size,
        view: model.view,
        image: model.image,
    }
}

fn string_list(hotel_id: Uuid, column: &str, value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::warn!(%hotel_id, column, error = %err, "malformed string list");
        Vec::new()
    })
}
