use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::repo_types::Vehicle;
use crate::{error::AppResult, state::AppState};

pub fn vehicle_routes() -> Router<AppState> {
    Router::new().route("/vehicles", get(list_vehicles))
}

#[instrument(skip(state))]
pub async fn list_vehicles(State(state): State<AppState>) -> AppResult<Json<Vec<Vehicle>>> {
    Ok(Json(state.store.list_vehicles().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_json_uses_client_field_names() {
        let v = Vehicle {
            id: 1,
            name: "Ola S1 Pro".into(),
            kind: "scooter".into(),
            image_url: "https://img".into(),
            price: "₹ 1,49,000".into(),
            range: "180 km".into(),
            top_speed: "115 km/h".into(),
            offer: "none".into(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "scooter");
        assert_eq!(json["imageUrl"], "https://img");
        assert_eq!(json["topSpeed"], "115 km/h");
        assert!(json.get("kind").is_none());
    }
}
