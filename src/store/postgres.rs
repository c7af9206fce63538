use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::Store;
use crate::{
    auth::repo_types::User,
    bookings::repo_types::Booking,
    config::AppConfig,
    vehicles::repo_types::{NewVehicle, Vehicle},
};

const VEHICLE_COLUMNS: &str = r#"
    id, name, vehicle_type AS kind, image_url, price,
    vehicle_range AS "range", top_speed, offer
"#;

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Connects the pool and applies pending migrations.
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .context("run migrations")?;

        Ok(Self::new(db))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    async fn list_vehicles(&self) -> anyhow::Result<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY id ASC"
        ))
        .fetch_all(&self.db)
        .await
        .context("list vehicles")?;
        Ok(rows)
    }

    async fn find_vehicle(&self, id: i32) -> anyhow::Result<Option<Vehicle>> {
        let row = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find vehicle")?;
        Ok(row)
    }

    async fn count_vehicles(&self) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.db)
            .await
            .context("count vehicles")?;
        Ok(count)
    }

    async fn insert_vehicle(&self, v: &NewVehicle) -> anyhow::Result<Vehicle> {
        let row = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (name, vehicle_type, image_url, price, vehicle_range, top_speed, offer)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(v.name)
        .bind(v.kind)
        .bind(v.image_url)
        .bind(v.price)
        .bind(v.range)
        .bind(v.top_speed)
        .bind(v.offer)
        .fetch_one(&self.db)
        .await
        .context("insert vehicle")?;
        Ok(row)
    }

    async fn find_booking(&self, id: i32) -> anyhow::Result<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            SELECT b.id, b.user_id, b.vehicle_id, b.booking_time,
                   v.name AS vehicle_name, v.image_url AS vehicle_image_url
              FROM bookings b
              JOIN vehicles v ON v.id = b.vehicle_id
             WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find booking")?;
        Ok(row)
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT b.id, b.user_id, b.vehicle_id, b.booking_time,
                   v.name AS vehicle_name, v.image_url AS vehicle_image_url
              FROM bookings b
              JOIN vehicles v ON v.id = b.vehicle_id
             WHERE b.user_id = $1
             ORDER BY b.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list bookings by user")?;
        Ok(rows)
    }

    async fn insert_booking(
        &self,
        user_id: Uuid,
        vehicle_id: i32,
        booking_time: OffsetDateTime,
    ) -> anyhow::Result<Option<Booking>> {
        // The unique (user_id, vehicle_id) constraint decides concurrent inserts.
        let row = sqlx::query_as::<_, Booking>(
            r#"
            WITH inserted AS (
                INSERT INTO bookings (user_id, vehicle_id, booking_time)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id, vehicle_id) DO NOTHING
                RETURNING id, user_id, vehicle_id, booking_time
            )
            SELECT i.id, i.user_id, i.vehicle_id, i.booking_time,
                   v.name AS vehicle_name, v.image_url AS vehicle_image_url
              FROM inserted i
              JOIN vehicles v ON v.id = i.vehicle_id
            "#,
        )
        .bind(user_id)
        .bind(vehicle_id)
        .bind(booking_time)
        .fetch_optional(&self.db)
        .await
        .context("insert booking")?;
        Ok(row)
    }

    async fn delete_booking(&self, id: i32, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete booking")?;
        Ok(result.rows_affected() > 0)
    }
}
