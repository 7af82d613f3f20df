//! Profile business logic - The identity factory and profile management.
//!
//! Every profile is created through [`create_user`] or [`create_superuser`], which
//! normalize the email address (lower-casing the domain part), validate the required
//! fields and hash the password with Argon2 before anything is persisted. Email
//! uniqueness is enforced by the database and surfaced as
//! [`Error::UniquenessViolation`].

use crate::{
    core::validation::{MAX_TEXT_LEN, limit_text, require_text},
    entities::{Role, UserProfile, user_profile},
    errors::{Error, Result},
    models::NewProfile,
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// Partial update of a profile. Fields left as `None` are not touched.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub password: Option<String>,
}

/// Normalizes an email address by trimming it and lower-casing its domain part.
///
/// The local part is left untouched, so `John@Example.COM` becomes `John@example.com`.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

fn validate_email(email: &str) -> Result<String> {
    let email = require_text("email", &normalize_email(email), MAX_TEXT_LEN)?;
    let well_formed = email.rsplit_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
    });
    if !well_formed {
        return Err(Error::InvalidField {
            field: "email",
            message: format!("'{email}' is not a valid email address"),
        });
    }
    Ok(email)
}

/// Hashes a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| Error::PasswordHash)
}

/// Checks a plaintext password against a profile's stored hash.
///
/// Profiles without a usable password never match.
#[must_use]
pub fn check_password(profile: &user_profile::Model, password: &str) -> bool {
    profile
        .password
        .as_deref()
        .is_some_and(|stored| verify_password(stored, password))
}

/// Verifies a plaintext password against an Argon2 PHC string.
#[must_use]
pub fn verify_password(stored: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn map_email_conflict(err: DbErr, email: &str) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::UniquenessViolation {
            field: "email",
            value: email.to_string(),
        },
        _ => Error::Database(err),
    }
}

async fn create_profile(
    db: &DatabaseConnection,
    email: &str,
    name: &str,
    password: Option<&str>,
    role: Role,
) -> Result<user_profile::Model> {
    let email = validate_email(email)?;
    let name = require_text("name", name, MAX_TEXT_LEN)?;
    let password = password.map(hash_password).transpose()?;

    let profile = user_profile::ActiveModel {
        email: Set(email.clone()),
        name: Set(name),
        lastname: Set(String::new()),
        password: Set(password),
        role: Set(role),
        is_active: Set(true),
        last_login: Set(None),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let profile = profile
        .insert(db)
        .await
        .map_err(|e| map_email_conflict(e, &email))?;
    info!("Created {:?} profile {} ({})", role, profile.id, profile.email);
    Ok(profile)
}

/// Creates a regular profile.
///
/// Without a password the profile is created without a usable password and cannot log
/// in until one is set.
///
/// # Errors
/// Returns an error if:
/// - The email or name is empty (`MissingRequiredField`)
/// - The email is malformed or a field is too long (`InvalidField`)
/// - Another profile already uses the email (`UniquenessViolation`)
/// - The database insert operation fails
#[instrument(skip(db, password))]
pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    name: &str,
    password: Option<&str>,
) -> Result<user_profile::Model> {
    create_profile(db, email, name, password, Role::Member).await
}

/// Creates a regular profile from a sign-up payload.
pub async fn register(db: &DatabaseConnection, payload: &NewProfile) -> Result<user_profile::Model> {
    create_user(db, &payload.email, &payload.name, Some(&payload.password)).await
}

/// Creates a superuser. Superusers are staff as well.
#[instrument(skip(db, password))]
pub async fn create_superuser(
    db: &DatabaseConnection,
    email: &str,
    name: &str,
    password: &str,
) -> Result<user_profile::Model> {
    create_profile(db, email, name, Some(password), Role::Superuser).await
}

/// Retrieves a profile by its ID.
pub async fn get_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<Option<user_profile::Model>> {
    UserProfile::find_by_id(profile_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a profile by email, normalizing the lookup the same way creation does.
pub async fn get_profile_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user_profile::Model>> {
    let email = normalize_email(email);
    debug!("Looking up profile by email {}", email);
    UserProfile::find()
        .filter(user_profile::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every profile ordered by email.
pub async fn list_profiles(db: &DatabaseConnection) -> Result<Vec<user_profile::Model>> {
    UserProfile::find()
        .order_by_asc(user_profile::Column::Email)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_existing(db: &DatabaseConnection, profile_id: i64) -> Result<user_profile::Model> {
    get_profile(db, profile_id)
        .await?
        .ok_or_else(|| Error::not_found("Profile", profile_id))
}

/// Applies a partial update to a profile.
///
/// A new email is normalized and validated like at creation time and a new password is
/// hashed before storage.
///
/// # Errors
/// Returns `NotFound` for an unknown profile, plus every validation error of
/// [`create_user`].
#[instrument(skip(db, changes))]
pub async fn update_profile(
    db: &DatabaseConnection,
    profile_id: i64,
    changes: ProfileChanges,
) -> Result<user_profile::Model> {
    let mut profile: user_profile::ActiveModel = find_existing(db, profile_id).await?.into();

    let mut new_email = None;
    if let Some(email) = changes.email {
        let email = validate_email(&email)?;
        profile.email = Set(email.clone());
        new_email = Some(email);
    }
    if let Some(name) = changes.name {
        profile.name = Set(require_text("name", &name, MAX_TEXT_LEN)?);
    }
    if let Some(lastname) = changes.lastname {
        let lastname = lastname.trim().to_string();
        limit_text("lastname", &lastname, MAX_TEXT_LEN)?;
        profile.lastname = Set(lastname);
    }
    if let Some(password) = changes.password {
        profile.password = Set(Some(hash_password(&password)?));
    }

    let profile = profile
        .update(db)
        .await
        .map_err(|e| map_email_conflict(e, new_email.as_deref().unwrap_or_default()))?;
    info!("Updated profile {}", profile.id);
    Ok(profile)
}

/// Replaces a profile's password. `None` leaves the profile without a usable password.
#[instrument(skip(db, password))]
pub async fn set_password(
    db: &DatabaseConnection,
    profile_id: i64,
    password: Option<&str>,
) -> Result<user_profile::Model> {
    let mut profile: user_profile::ActiveModel = find_existing(db, profile_id).await?.into();
    profile.password = Set(password.map(hash_password).transpose()?);
    profile.update(db).await.map_err(Into::into)
}

/// Changes the administrative role of a profile.
#[instrument(skip(db))]
pub async fn set_role(
    db: &DatabaseConnection,
    profile_id: i64,
    role: Role,
) -> Result<user_profile::Model> {
    let mut profile: user_profile::ActiveModel = find_existing(db, profile_id).await?.into();
    profile.role = Set(role);
    let profile = profile.update(db).await?;
    info!("Profile {} is now {:?}", profile.id, role);
    Ok(profile)
}

/// Marks a profile inactive. Inactive profiles keep their data but cannot log in.
#[instrument(skip(db))]
pub async fn deactivate_profile(
    db: &DatabaseConnection,
    profile_id: i64,
) -> Result<user_profile::Model> {
    let mut profile: user_profile::ActiveModel = find_existing(db, profile_id).await?.into();
    profile.is_active = Set(false);
    let profile = profile.update(db).await?;
    info!("Deactivated profile {}", profile.id);
    Ok(profile)
}

/// Deletes a profile. Its feed items, token and invoices (with their items) go with it.
#[instrument(skip(db))]
pub async fn delete_profile(db: &DatabaseConnection, profile_id: i64) -> Result<()> {
    let result = UserProfile::delete_by_id(profile_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("Profile", profile_id));
    }
    info!("Deleted profile {}", profile_id);
    Ok(())
}
