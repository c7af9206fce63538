use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::Store;
use crate::{
    auth::repo_types::User,
    bookings::repo_types::Booking,
    vehicles::repo_types::{NewVehicle, Vehicle},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    vehicles: Vec<Vehicle>,
    bookings: Vec<Booking>,
    next_vehicle_id: i32,
    next_booking_id: i32,
}

/// In-process store for tests. Every write checks and mutates under one lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let mut t = self.tables.lock().await;
        if t.users.iter().any(|u| u.email == email) {
            return Ok(None);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(Some(user))
    }

    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehicle>> {
        Ok(self.tables.lock().await.vehicles.clone())
    }

    async fn find_vehicle(&self, id: i32) -> anyhow::Result<Option<Vehicle>> {
        let t = self.tables.lock().await;
        Ok(t.vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn count_vehicles(&self) -> anyhow::Result<i64> {
        Ok(self.tables.lock().await.vehicles.len() as i64)
    }

    async fn insert_vehicle(&self, v: &NewVehicle) -> anyhow::Result<Vehicle> {
        let mut t = self.tables.lock().await;
        t.next_vehicle_id += 1;
        let vehicle = Vehicle {
            id: t.next_vehicle_id,
            name: v.name.into(),
            kind: v.kind.into(),
            image_url: v.image_url.into(),
            price: v.price.into(),
            range: v.range.into(),
            top_speed: v.top_speed.into(),
            offer: v.offer.into(),
        };
        t.vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_booking(&self, id: i32) -> anyhow::Result<Option<Booking>> {
        let t = self.tables.lock().await;
        Ok(t.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Booking>> {
        let t = self.tables.lock().await;
        Ok(t.bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_booking(
        &self,
        user_id: Uuid,
        vehicle_id: i32,
        booking_time: OffsetDateTime,
    ) -> anyhow::Result<Option<Booking>> {
        let mut t = self.tables.lock().await;
        if t
            .bookings
            .iter()
            .any(|b| b.user_id == user_id && b.vehicle_id == vehicle_id)
        {
            return Ok(None);
        }
        let vehicle = t
            .vehicles
            .iter()
            .find(|v| v.id == vehicle_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("vehicle {vehicle_id} violates foreign key"))?;

        t.next_booking_id += 1;
        let booking = Booking {
            id: t.next_booking_id,
            user_id,
            vehicle_id,
            booking_time,
            vehicle_name: vehicle.name,
            vehicle_image_url: vehicle.image_url,
        };
        t.bookings.push(booking.clone());
        Ok(Some(booking))
    }

    async fn delete_booking(&self, id: i32, user_id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.tables.lock().await;
        let before = t.bookings.len();
        t.bookings.retain(|b| !(b.id == id && b.user_id == user_id));
        Ok(t.bookings.len() < before)
    }
}
