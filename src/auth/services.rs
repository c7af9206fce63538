use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use super::{
    jwt::JwtKeys,
    password::{hash_password, verify_password},
};
use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

const MIN_PASSWORD_LEN: usize = 8;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    // Verified against when the email is unknown, so both login failures cost one hash check.
    static ref DUMMY_HASH: String = hash_password("not-a-real-password").unwrap_or_default();
}

/// Computes the dummy hash up front so the first unknown-email login is not slower.
pub fn warm_up() {
    lazy_static::initialize(&DUMMY_HASH);
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registers a user and returns a token for the new identity.
#[instrument(skip(state, password))]
pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> AppResult<String> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    if state.store.find_user_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }

    let hash = hash_password(password)?;

    // A concurrent registration can still win the race; the store's unique index decides.
    let user = state
        .store
        .insert_user(name, &email, &hash)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "email already registered");
            AppError::Conflict("Email already registered".into())
        })?;

    let token = JwtKeys::from_ref(state).issue(&user.email)?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(token)
}

/// Checks credentials and returns a fresh token.
///
/// Unknown email and wrong password both surface as `InvalidCredentials`.
#[instrument(skip(state, password))]
pub async fn authenticate(state: &AppState, email: &str, password: &str) -> AppResult<String> {
    let email = normalize_email(email);

    let user = state.store.find_user_by_email(&email).await?;
    let stored_hash = user
        .as_ref()
        .map(|u| u.password_hash.as_str())
        .unwrap_or(DUMMY_HASH.as_str());
    let ok = match verify_password(password, stored_hash) {
        Ok(ok) => ok,
        Err(e) if user.is_some() => return Err(e.context("stored password hash unusable").into()),
        Err(_) => false,
    };

    let user = match user {
        Some(u) if ok => u,
        Some(u) => {
            warn!(email = %email, user_id = %u.id, "login invalid password");
            return Err(AppError::InvalidCredentials);
        }
        None => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = JwtKeys::from_ref(state).issue(&user.email)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(token)
}
