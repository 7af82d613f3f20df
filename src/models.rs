//! Client-facing representations of the entities.
//!
//! These are the shapes handed to and accepted from an API layer: the profile view never
//! carries the password hash, the password is accepted on input only, and invoice and line
//! totals are computed values that are never read back from a client.

use crate::entities::{invoice_item, profile_feed_item, user_profile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public view of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<&user_profile::Model> for ProfileView {
    fn from(profile: &user_profile::Model) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            name: profile.name.clone(),
        }
    }
}

/// Sign-up payload. The password is write-only and never appears in any view.
#[derive(Clone, Deserialize)]
pub struct NewProfile {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for NewProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewProfile")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Public view of a status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItemView {
    /// Feed item ID
    pub id: i64,
    /// Owner, set from the authenticated profile rather than from client input
    pub user_profile: i64,
    /// Status text
    pub status_text: String,
    /// When the status was posted
    pub created_on: DateTime<Utc>,
}

impl From<&profile_feed_item::Model> for FeedItemView {
    fn from(item: &profile_feed_item::Model) -> Self {
        Self {
            id: item.id,
            user_profile: item.user_profile_id,
            status_text: item.status_text.clone(),
            created_on: item.created_on,
        }
    }
}

/// Public view of an invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItemView {
    /// Line ID
    pub id: i64,
    /// Motorcycle ID
    pub product: i64,
    /// Invoice ID
    pub invoice: i64,
    /// Units sold
    pub quantity: i32,
    /// Unit price snapshot
    pub price: f64,
    /// Computed `price * quantity`, read-only
    pub total: f64,
}

impl From<&invoice_item::Model> for InvoiceItemView {
    fn from(item: &invoice_item::Model) -> Self {
        Self {
            id: item.id,
            product: item.product_id,
            invoice: item.invoice_id,
            quantity: item.quantity,
            price: item.price,
            total: item.total(),
        }
    }
}

/// An invoice with its lines and aggregated total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceView {
    pub id: i64,
    pub client: i64,
    pub date: DateTime<Utc>,
    pub total: f64,
    pub items: Vec<InvoiceItemView>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{feed::create_feed_item, profile::create_user};
    use crate::errors::Result;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_profile_serialization_hides_password() -> Result<()> {
        let db = setup_test_db().await?;
        let profile = create_user(&db, "view@example.com", "Viewer", Some("hidden-pw")).await?;

        let view = serde_json::to_value(ProfileView::from(&profile)).unwrap();
        let model = serde_json::to_value(&profile).unwrap();

        assert_eq!(view["email"], "view@example.com");
        assert!(view.get("password").is_none());
        assert!(model.get("password").is_none());
        Ok(())
    }

    #[test]
    fn test_new_profile_accepts_password_but_debug_hides_it() {
        let payload: NewProfile = serde_json::from_str(
            r#"{"email": "a@example.com", "name": "A", "password": "pw-123456"}"#,
        )
        .unwrap();

        assert_eq!(payload.password, "pw-123456");
        assert!(!format!("{payload:?}").contains("pw-123456"));
    }

    #[tokio::test]
    async fn test_feed_item_view_shape() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_profile(&db, "poster@example.com").await?;
        let item = create_feed_item(&db, owner.id, "new tyres fitted").await?;

        let view = FeedItemView::from(&item);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(view.user_profile, owner.id);
        assert_eq!(view.created_on, item.created_on);
        assert_eq!(json["user_profile"], owner.id);
        assert_eq!(json["status_text"], "new tyres fitted");
        assert!(json["created_on"].is_string());
        assert!(json.get("user_profile_id").is_none());
        Ok(())
    }

    #[test]
    fn test_invoice_item_view_computes_total() {
        let item = invoice_item::Model {
            id: 1,
            product_id: 2,
            invoice_id: 3,
            quantity: 4,
            price: 12.5,
        };

        let view = InvoiceItemView::from(&item);

        assert!((view.total - 50.0).abs() < f64::EPSILON);
        assert_eq!(view.product, 2);
        assert_eq!(view.invoice, 3);
    }
}
