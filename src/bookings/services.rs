use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::BookingRecord;
use crate::{
    auth::repo_types::User,
    error::{AppError, AppResult},
    state::AppState,
};

/// Maps the caller's token identity to a stored user.
async fn resolve_caller(state: &AppState, email: &str) -> AppResult<User> {
    state.store.find_user_by_email(email).await?.ok_or_else(|| {
        warn!(email = %email, "token identity has no user");
        AppError::Unauthenticated
    })
}

#[instrument(skip(state))]
pub async fn create_booking(
    state: &AppState,
    caller: &str,
    vehicle_id: i32,
) -> AppResult<BookingRecord> {
    let user = resolve_caller(state, caller).await?;

    let vehicle = state
        .store
        .find_vehicle(vehicle_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".into()))?;

    let booking = state
        .store
        .insert_booking(user.id, vehicle.id, OffsetDateTime::now_utc())
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user.id, vehicle_id, "vehicle already booked by user");
            AppError::Conflict("You have already booked this vehicle.".into())
        })?;

    info!(booking_id = booking.id, user_id = %user.id, vehicle_id, "booking created");
    Ok(booking.into())
}

#[instrument(skip(state))]
pub async fn list_my_bookings(state: &AppState, caller: &str) -> AppResult<Vec<BookingRecord>> {
    let user = resolve_caller(state, caller).await?;
    let rows = state.store.list_bookings_for_user(user.id).await?;
    Ok(rows.into_iter().map(BookingRecord::from).collect())
}

#[instrument(skip(state))]
pub async fn delete_booking(state: &AppState, caller: &str, booking_id: i32) -> AppResult<()> {
    let user = resolve_caller(state, caller).await?;

    let booking = state
        .store
        .find_booking(booking_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.id {
        warn!(booking_id, user_id = %user.id, "delete of foreign booking refused");
        return Err(AppError::Forbidden);
    }

    // Scoped to the owner, so a row removed in between reads as not found.
    if !state.store.delete_booking(booking_id, user.id).await? {
        return Err(AppError::NotFound("Booking not found".into()));
    }

    info!(booking_id, user_id = %user.id, "booking deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::services::register, vehicles::seed::seed_vehicles};

    async fn setup() -> AppState {
        let state = AppState::fake();
        seed_vehicles(&state).await.unwrap();
        register(&state, "Asha", "a@x.com", "password123").await.unwrap();
        register(&state, "Bala", "b@x.com", "password123").await.unwrap();
        state
    }

    #[tokio::test]
    async fn create_and_list() {
        let state = setup().await;
        let first = create_booking(&state, "a@x.com", 1).await.unwrap();
        let second = create_booking(&state, "a@x.com", 3).await.unwrap();
        assert_eq!(first.vehicle_name, "Ola S1 Pro");
        assert_eq!(second.vehicle_name, "Revolt RV400");

        let mine = list_my_bookings(&state, "a@x.com").await.unwrap();
        let ids: Vec<_> = mine.iter().map(|b| b.id).collect();
        assert_eq!(ids, [first.id, second.id]);

        assert!(list_my_bookings(&state, "b@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_booking_of_same_vehicle_conflicts() {
        let state = setup().await;
        create_booking(&state, "a@x.com", 1).await.unwrap();
        let err = create_booking(&state, "a@x.com", 1).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // other users are unaffected
        create_booking(&state, "b@x.com", 1).await.unwrap();
        assert_eq!(list_my_bookings(&state, "a@x.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_attempts_yield_one_booking() {
        let state = setup().await;
        let attempts: Vec<_> = (0..16)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move { create_booking(&state, "a@x.com", 2).await })
            })
            .collect();

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in attempts {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e:?}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(list_my_bookings(&state, "a@x.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_vehicle_is_not_found() {
        let state = setup().await;
        let err = create_booking(&state, "a@x.com", 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_caller_is_unauthenticated() {
        let state = setup().await;
        let err = create_booking(&state, "ghost@x.com", 1).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
        let err = list_my_bookings(&state, "ghost@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn only_owner_can_delete() {
        let state = setup().await;
        let booking = create_booking(&state, "a@x.com", 1).await.unwrap();

        let err = delete_booking(&state, "b@x.com", booking.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
        assert_eq!(list_my_bookings(&state, "a@x.com").await.unwrap().len(), 1);

        delete_booking(&state, "a@x.com", booking.id).await.unwrap();
        assert!(list_my_bookings(&state, "a@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_booking_is_not_found() {
        let state = setup().await;
        let err = delete_booking(&state, "a@x.com", 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let booking = create_booking(&state, "a@x.com", 1).await.unwrap();
        delete_booking(&state, "a@x.com", booking.id).await.unwrap();
        let err = delete_booking(&state, "a@x.com", booking.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn vehicle_can_be_rebooked_after_delete() {
        let state = setup().await;
        let booking = create_booking(&state, "a@x.com", 1).await.unwrap();
        delete_booking(&state, "a@x.com", booking.id).await.unwrap();
        let again = create_booking(&state, "a@x.com", 1).await.unwrap();
        assert_ne!(again.id, booking.id);
    }
}
