pub mod bookings;
pub mod hotels;
pub mod reviews;
pub mod rooms;
pub mod users;

pub use bookings::Entity as Bookings;
pub use hotels::Entity as Hotels;
pub use reviews::Entity as Reviews;
pub use rooms::Entity as Rooms;
pub use users::Entity as Users;
