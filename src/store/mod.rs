use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    bookings::repo_types::Booking,
    vehicles::repo_types::{NewVehicle, Vehicle},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Persistence for users, vehicles and bookings.
///
/// Uniqueness of user emails and of (user, vehicle) booking pairs is the
/// store's job: the `insert_*` methods return `Ok(None)` when the row would
/// violate one of them, and that check must be atomic with the write.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// Returns `None` if the email is already registered.
    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>>;

    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehicle>>;
    async fn find_vehicle(&self, id: i32) -> anyhow::Result<Option<Vehicle>>;
    async fn count_vehicles(&self) -> anyhow::Result<i64>;
    async fn insert_vehicle(&self, vehicle: &NewVehicle) -> anyhow::Result<Vehicle>;

    async fn find_booking(&self, id: i32) -> anyhow::Result<Option<Booking>>;

    /// Bookings owned by `user_id`, oldest first.
    async fn list_bookings_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Booking>>;

    /// Returns `None` if `user_id` already holds a booking for `vehicle_id`.
    async fn insert_booking(
        &self,
        user_id: Uuid,
        vehicle_id: i32,
        booking_time: OffsetDateTime,
    ) -> anyhow::Result<Option<Booking>>;

    /// Deletes booking `id` only if `user_id` owns it. Returns whether a row went away.
    async fn delete_booking(&self, id: i32, user_id: Uuid) -> anyhow::Result<bool>;
}
