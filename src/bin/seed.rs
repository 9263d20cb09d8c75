use hotel_booking_api::{
    config::AppConfig,
    db::create_pool,
    middleware::auth::{ROLE_ADMIN, ROLE_USER},
    services::auth_service::hash_password,
};
use serde_json::json;
use uuid::Uuid;

struct SeedHotel {
    name: &'static str,
    location: &'static str,
    description: &'static str,
    price: f64,
    original_price: Option<f64>,
    discount: Option<i32>,
    rating: f64,
    property_type: &'static str,
    amenities: &'static [&'static str],
    featured: bool,
}

const HOTELS: &[SeedHotel] = &[
    SeedHotel {
        name: "Grand Plaza Hotel",
        location: "New York, NY",
        description: "Luxury in the heart of Manhattan with views of Central Park.",
        price: 299.0,
        original_price: None,
        discount: None,
        rating: 4.8,
        property_type: "hotel",
        amenities: &["wifi", "breakfast", "gym", "restaurant"],
        featured: true,
    },
    SeedHotel {
        name: "Seaside Resort & Spa",
        location: "Miami, FL",
        description: "Beachfront resort with a full spa, several pools and direct beach access.",
        price: 349.0,
        original_price: Some(429.0),
        discount: Some(20),
        rating: 4.7,
        property_type: "resort",
        amenities: &["wifi", "breakfast", "gym", "restaurant"],
        featured: true,
    },
    SeedHotel {
        name: "Mountain View Lodge",
        location: "Denver, CO",
        description: "Rustic modern lodge close to hiking and ski trails.",
        price: 199.0,
        original_price: None,
        discount: None,
        rating: 4.5,
        property_type: "lodge",
        amenities: &["wifi", "breakfast", "restaurant"],
        featured: true,
    },
    SeedHotel {
        name: "Urban Boutique Hotel",
        location: "San Francisco, CA",
        description: "Boutique rooms, artisanal dining and a rooftop bar.",
        price: 279.0,
        original_price: None,
        discount: None,
        rating: 4.6,
        property_type: "boutique",
        amenities: &["wifi", "breakfast", "restaurant"],
        featured: false,
    },
    SeedHotel {
        name: "Historic Downtown Inn",
        location: "Boston, MA",
        description: "Restored 19th-century building in the historic district.",
        price: 229.0,
        original_price: Some(289.0),
        discount: Some(15),
        rating: 4.4,
        property_type: "inn",
        amenities: &["wifi", "breakfast"],
        featured: false,
    },
    SeedHotel {
        name: "Lakeside Retreat",
        location: "Chicago, IL",
        description: "Lake views a few minutes from downtown.",
        price: 249.0,
        original_price: None,
        discount: None,
        rating: 4.5,
        property_type: "hotel",
        amenities: &["wifi", "gym", "restaurant"],
        featured: false,
    },
    SeedHotel {
        name: "Desert Oasis Resort",
        location: "Phoenix, AZ",
        description: "Desert retreat with pools, a golf course and mountain views.",
        price: 319.0,
        original_price: Some(399.0),
        discount: Some(20),
        rating: 4.7,
        property_type: "resort",
        amenities: &["wifi", "breakfast", "gym", "restaurant"],
        featured: false,
    },
    SeedHotel {
        name: "Riverside Suites",
        location: "New Orleans, LA",
        description: "Suites with balconies over the river, near the French Quarter.",
        price: 189.0,
        original_price: None,
        discount: None,
        rating: 4.3,
        property_type: "apartment",
        amenities: &["wifi", "breakfast"],
        featured: false,
    },
];

// (name, bed type, capacity, size m2, view, price multiplier)
const ROOM_TEMPLATES: &[(&str, &str, i32, i32, &str, f64)] = &[
    ("Standard Room", "Queen", 2, 28, "City", 1.0),
    ("Deluxe Room", "King", 3, 36, "Partial", 1.3),
    ("Family Suite", "2 Queens", 4, 52, "Panoramic", 1.8),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", ROLE_ADMIN).await?;
    let user_id = ensure_user(&pool, "user@example.com", "user123", ROLE_USER).await?;
    seed_hotels(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(id)
}

async fn seed_hotels(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let mut inserted = 0;
    for hotel in HOTELS {
        let mut tx = pool.begin().await?;
        // Already seeded.
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM hotels WHERE name = $1 AND location = $2")
                .bind(hotel.name)
                .bind(hotel.location)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            continue;
        }

        let (hotel_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO hotels (id, name, location, description, price, original_price, discount,
                                rating, images, amenities, property_type, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(hotel.name)
        .bind(hotel.location)
        .bind(hotel.description)
        .bind(hotel.price)
        .bind(hotel.original_price)
        .bind(hotel.discount)
        .bind(hotel.rating)
        .bind(json!(["/placeholder.svg?height=200&width=300"]))
        .bind(json!(hotel.amenities))
        .bind(hotel.property_type)
        .bind(hotel.featured)
        .fetch_one(&mut *tx)
        .await?;

        for (position, (name, bed_type, capacity, size, view, factor)) in
            ROOM_TEMPLATES.iter().enumerate()
        {
            sqlx::query(
                r#"
                INSERT INTO rooms (id, hotel_id, position, name, price, capacity, bed_type, size, view)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(hotel_id)
            .bind(position as i32)
            .bind(*name)
            .bind((hotel.price * factor).round())
            .bind(*capacity)
            .bind(*bed_type)
            .bind(*size)
            .bind(*view)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        inserted += 1;
    }

    println!("Seeded {inserted} hotels");
    Ok(())
}
