use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,                     // unique user ID
    pub name: String,                 // display name
    pub email: String,                // login identifier, lower-cased
    pub password_hash: String,        // Argon2 PHC string
    pub created_at: OffsetDateTime,   // creation timestamp
}
