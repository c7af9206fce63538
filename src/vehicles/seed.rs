use tracing::{info, instrument};

use super::repo_types::NewVehicle;
use crate::state::AppState;

const CATALOG: &[NewVehicle] = &[
    NewVehicle {
        name: "Ola S1 Pro",
        kind: "scooter",
        image_url: "https://upload.wikimedia.org/wikipedia/commons/7/7a/OLA_S1_Pro_Gen_1_Electric_Scooter.jpg",
        price: "₹ 1,49,000",
        range: "180 km",
        top_speed: "115 km/h",
        offer: "Campus discount: ₹5,000 off",
    },
    NewVehicle {
        name: "Ather 450X",
        kind: "scooter",
        image_url: "https://upload.wikimedia.org/wikipedia/commons/thumb/4/4e/Frank-e%2C_Frankfurt_am_Main_%28LRM_20210417_155159%29.jpg/640px-Frank-e%2C_Frankfurt_am_Main_%28LRM_20210417_155159%29.jpg",
        price: "₹ 1,47,000",
        range: "146 km",
        top_speed: "90 km/h",
        offer: "2 years warranty extension",
    },
    NewVehicle {
        name: "Revolt RV400",
        kind: "bike",
        image_url: "https://upload.wikimedia.org/wikipedia/commons/thumb/5/52/ZEV_Electric_T-5100_Electric_Motorcycle.jpg/640px-ZEV_Electric_T-5100_Electric_Motorcycle.jpg",
        price: "₹ 1,42,900",
        range: "150 km",
        top_speed: "85 km/h",
        offer: "Book campus test ride",
    },
];

/// Loads the default catalog into an empty vehicles table. Returns rows inserted.
#[instrument(skip(state))]
pub async fn seed_vehicles(state: &AppState) -> anyhow::Result<usize> {
    if state.store.count_vehicles().await? > 0 {
        return Ok(0);
    }
    for v in CATALOG {
        state.store.insert_vehicle(v).await?;
    }
    info!(count = CATALOG.len(), "vehicle catalog seeded");
    Ok(CATALOG.len())
}
