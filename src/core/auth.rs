//! Login and token authentication.
//!
//! A successful [`login`] hands out the profile's opaque token, creating it on first use.
//! Each profile owns at most one token; repeated logins return the same key until the
//! token is revoked.

use crate::{
    core::profile::{check_password, get_profile_by_email, hash_password, verify_password},
    entities::{AuthToken, UserProfile, auth_token, user_profile},
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{Set, SqlErr, prelude::*};
use std::sync::LazyLock;
use tracing::{debug, info, instrument, warn};

/// Hash verified on logins for unknown emails, so they cost as much as real ones.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("motoshop-unknown-account").ok());

/// Length of generated token keys.
pub const TOKEN_KEY_LEN: usize = 40;

/// Generates a random alphanumeric token key.
fn generate_token_key() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..TOKEN_KEY_LEN)
        .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
        .collect()
}

async fn token_for_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Option<auth_token::Model>> {
    AuthToken::find()
        .filter(auth_token::Column::UserProfileId.eq(profile_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the profile's token, creating one if it has none yet.
pub async fn get_or_create_token(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<auth_token::Model> {
    if let Some(token) = token_for_profile(db, profile_id).await? {
        return Ok(token);
    }

    let token = auth_token::ActiveModel {
        key: Set(generate_token_key()),
        user_profile_id: Set(profile_id),
        created_at: Set(chrono::Utc::now()),
    };
    match token.insert(db).await {
        Ok(token) => {
            info!("Issued auth token for profile {}", profile_id);
            Ok(token)
        }
        // A concurrent login created the token first
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            token_for_profile(db, profile_id)
                .await?
                .ok_or_else(|| Error::not_found("AuthToken", profile_id))
        }
        Err(err) => Err(err.into()),
    }
}

/// Logs a profile in by email and password and returns its token key.
///
/// # Errors
/// Returns `InvalidCredentials` when no profile has this email, the password does not
/// match or the profile is inactive.
#[instrument(skip(db, password))]
pub async fn login(db: &DatabaseConnection, email: &str, password: &str) -> Result<String> {
    let Some(profile) = get_profile_by_email(db, email).await? else {
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = verify_password(dummy, password);
        }
        warn!("Login rejected: unknown email");
        return Err(Error::InvalidCredentials);
    };
    if !profile.is_active || !check_password(&profile, password) {
        warn!("Login rejected for profile {}", profile.id);
        return Err(Error::InvalidCredentials);
    }

    let profile_id = profile.id;
    let mut profile: user_profile::ActiveModel = profile.into();
    profile.last_login = Set(Some(chrono::Utc::now()));
    profile.update(db).await?;

    let token = get_or_create_token(db, profile_id).await?;
    info!("Profile {} logged in", profile_id);
    Ok(token.key)
}

/// Resolves a token key to its active profile.
pub async fn authenticate_token(db: &DatabaseConnection, key: &str) -> Result<user_profile::Model> {
    let found = AuthToken::find_by_id(key.to_string())
        .find_also_related(UserProfile)
        .one(db)
        .await?;

    match found {
        Some((_, Some(profile))) if profile.is_active => {
            debug!("Token resolved to profile {}", profile.id);
            Ok(profile)
        }
        _ => Err(Error::InvalidCredentials),
    }
}

/// Deletes the profile's token. Returns whether a token existed.
#[instrument(skip(db))]
pub async fn revoke_token(db: &DatabaseConnection, profile_id: i64) -> Result<bool> {
    let result = AuthToken::delete_many()
        .filter(auth_token::Column::UserProfileId.eq(profile_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
