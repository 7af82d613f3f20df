//! Feed business logic - Status updates posted by profiles.

use crate::{
    core::validation::{MAX_TEXT_LEN, require_text},
    entities::{ProfileFeedItem, UserProfile, profile_feed_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Posts a new status for a profile. `created_on` is stamped here and never changes.
///
/// # Errors
/// Returns an error if:
/// - The status text is empty or longer than 255 characters
/// - The owner profile does not exist
/// - The database insert operation fails
#[instrument(skip(db, status_text))]
pub async fn create_feed_item(
    db: &DatabaseConnection,
    owner_id: i64,
    status_text: &str,
) -> Result<profile_feed_item::Model> {
    let status_text = require_text("status_text", status_text, MAX_TEXT_LEN)?;

    UserProfile::find_by_id(owner_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Profile", owner_id))?;

    let item = profile_feed_item::ActiveModel {
        user_profile_id: Set(owner_id),
        status_text: Set(status_text),
        created_on: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let item = item.insert(db).await?;
    info!("Profile {} posted feed item {}", owner_id, item.id);
    Ok(item)
}

pub async fn get_feed_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<profile_feed_item::Model>> {
    ProfileFeedItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists feed items newest first, optionally restricted to one profile.
pub async fn list_feed_items(
    db: &DatabaseConnection,
    owner_id: Option<i64>,
) -> Result<Vec<profile_feed_item::Model>> {
    let mut query = ProfileFeedItem::find();
    if let Some(owner_id) = owner_id {
        query = query.filter(profile_feed_item::Column::UserProfileId.eq(owner_id));
    }
    query
        .order_by_desc(profile_feed_item::Column::CreatedOn)
        .order_by_desc(profile_feed_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Replaces the text of a status. Owner and creation time stay as they were.
#[instrument(skip(db, status_text))]
pub async fn update_feed_item_status(
    db: &DatabaseConnection,
    item_id: i64,
    status_text: &str,
) -> Result<profile_feed_item::Model> {
    let status_text = require_text("status_text", status_text, MAX_TEXT_LEN)?;

    let mut item: profile_feed_item::ActiveModel = get_feed_item(db, item_id)
        .await?
        .ok_or_else(|| Error::not_found("ProfileFeedItem", item_id))?
        .into();
    item.status_text = Set(status_text);
    item.update(db).await.map_err(Into::into)
}

#[instrument(skip(db))]
pub async fn delete_feed_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = ProfileFeedItem::delete_by_id(item_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("ProfileFeedItem", item_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::profile::delete_profile;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_feed_item_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_feed_item(&db, 1, "   ").await;
        assert!(matches!(
            result,
            Err(Error::MissingRequiredField {
                field: "status_text"
            })
        ));

        let result = create_feed_item(&db, 1, &"a".repeat(256)).await;
        assert!(matches!(result, Err(Error::InvalidField { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_feed_item_for_missing_owner() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_feed_item(&db, 99, "hello").await;

        assert!(matches!(result, Err(Error::NotFound { entity: "Profile", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_created_on() -> Result<()> {
        let db = setup_test_db().await?;
        let profile = create_test_profile(&db, "poster@example.com").await?;
        let item = create_feed_item(&db, profile.id, "first ride of the season").await?;

        let updated = update_feed_item_status(&db, item.id, "second ride").await?;

        assert_eq!(updated.status_text, "second ride");
        assert_eq!(updated.created_on, item.created_on);
        assert_eq!(updated.user_profile_id, profile.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_feed_items_by_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_profile(&db, "ana@example.com").await?;
        let bob = create_test_profile(&db, "bob@example.com").await?;
        let first = create_feed_item(&db, ana.id, "one").await?;
        let second = create_feed_item(&db, ana.id, "two").await?;
        create_feed_item(&db, bob.id, "three").await?;

        let ana_items = list_feed_items(&db, Some(ana.id)).await?;
        let ids: Vec<i64> = ana_items.iter().map(|i| i.id).collect();

        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(list_feed_items(&db, None).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_feed_items_deleted_with_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let profile = create_test_profile(&db, "leaving@example.com").await?;
        let item = create_feed_item(&db, profile.id, "bye").await?;

        delete_profile(&db, profile.id).await?;

        assert!(get_feed_item(&db, item.id).await?.is_none());
        assert!(matches!(
            delete_feed_item(&db, item.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }
}
