use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Booking row joined with the vehicle columns the API projects.
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i32,
    pub user_id: Uuid,
    pub vehicle_id: i32,
    pub booking_time: OffsetDateTime,
    pub vehicle_name: String,
    pub vehicle_image_url: String,
}
