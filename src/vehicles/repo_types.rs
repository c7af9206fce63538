use serde::Serialize;
use sqlx::FromRow;

/// Catalog entry. Prices, ranges and speeds are display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image_url: String,
    pub price: String,
    pub range: String,
    pub top_speed: String,
    pub offer: String,
}

/// Vehicle row before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: &'static str,
    pub kind: &'static str,
    pub image_url: &'static str,
    pub price: &'static str,
    pub range: &'static str,
    pub top_speed: &'static str,
    pub offer: &'static str,
}
