use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::Booking;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vehicle_id: i32,
}

/// What the client sees of a booking. Owner and vehicle keys stay internal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: i32,
    pub vehicle_name: String,
    pub vehicle_image_url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub booking_time: OffsetDateTime,
}

impl From<Booking> for BookingRecord {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            vehicle_name: b.vehicle_name,
            vehicle_image_url: b.vehicle_image_url,
            booking_time: b.booking_time,
        }
    }
}
