//! Invoice business logic - Invoices and the invoice total aggregate.
//!
//! An invoice's total is never stored. Every read computes
//! `SUM(quantity * price)` over the invoice's items inside the database, so the value is
//! always consistent with the committed items and no application-side loop is involved.

use crate::{
    entities::{Invoice, InvoiceItem, UserProfile, invoice, invoice_item},
    errors::{Error, Result},
    models::{InvoiceItemView, InvoiceView},
};
use sea_orm::{
    QueryOrder, QuerySelect, Set,
    prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};
use tracing::{debug, info, instrument};

/// `SUM(invoice_items.quantity * invoice_items.price)`
fn line_total_sum() -> SimpleExpr {
    Func::sum(
        Expr::col((InvoiceItem, invoice_item::Column::Quantity))
            .mul(Expr::col((InvoiceItem, invoice_item::Column::Price))),
    )
    .into()
}

/// Opens an invoice for a client profile, dated now.
///
/// # Errors
/// Returns `NotFound` if the client profile does not exist.
#[instrument(skip(db))]
pub async fn create_invoice(db: &DatabaseConnection, client_id: i64) -> Result<invoice::Model> {
    UserProfile::find_by_id(client_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Profile", client_id))?;

    let invoice = invoice::ActiveModel {
        client_id: Set(client_id),
        date: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let invoice = invoice.insert(db).await?;
    info!("Opened invoice {} for client {}", invoice.id, client_id);
    Ok(invoice)
}

pub async fn get_invoice(
    db: &DatabaseConnection,
    invoice_id: i64,
) -> Result<Option<invoice::Model>> {
    Invoice::find_by_id(invoice_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists invoices newest first, optionally only those of one client.
pub async fn list_invoices(
    db: &DatabaseConnection,
    client_id: Option<i64>,
) -> Result<Vec<invoice::Model>> {
    let mut query = Invoice::find();
    if let Some(client_id) = client_id {
        query = query.filter(invoice::Column::ClientId.eq(client_id));
    }
    query
        .order_by_desc(invoice::Column::Date)
        .order_by_desc(invoice::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an invoice together with its items.
#[instrument(skip(db))]
pub async fn delete_invoice(db: &DatabaseConnection, invoice_id: i64) -> Result<()> {
    let result = Invoice::delete_by_id(invoice_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::not_found("Invoice", invoice_id));
    }
    info!("Deleted invoice {}", invoice_id);
    Ok(())
}

/// Computes the total of an invoice as one aggregate query.
///
/// Returns `0.0` for an invoice without items.
///
/// # Errors
/// Returns `NotFound` if the invoice does not exist.
pub async fn invoice_total<C>(db: &C, invoice_id: i64) -> Result<f64>
where
    C: ConnectionTrait,
{
    Invoice::find_by_id(invoice_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("Invoice", invoice_id))?;

    let total: Option<Option<f64>> = InvoiceItem::find()
        .select_only()
        .column_as(line_total_sum(), "total")
        .filter(invoice_item::Column::InvoiceId.eq(invoice_id))
        .into_tuple()
        .one(db)
        .await?;

    let total = total.flatten().unwrap_or(0.0);
    debug!("Invoice {} total is {:.2}", invoice_id, total);
    Ok(total)
}

/// Totals of every invoice of a client, `(invoice_id, total)` in invoice order.
///
/// Computed with a single grouped `LEFT JOIN`, so invoices without items report `0.0`.
pub async fn invoice_totals_for_client(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Vec<(i64, f64)>> {
    let rows: Vec<(i64, Option<f64>)> = Invoice::find()
        .select_only()
        .column(invoice::Column::Id)
        .column_as(line_total_sum(), "total")
        .left_join(InvoiceItem)
        .filter(invoice::Column::ClientId.eq(client_id))
        .group_by(invoice::Column::Id)
        .order_by_asc(invoice::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, total)| (id, total.unwrap_or(0.0)))
        .collect())
}

/// Loads an invoice with its items and aggregated total.
pub async fn get_invoice_details(db: &DatabaseConnection, invoice_id: i64) -> Result<InvoiceView> {
    let invoice = get_invoice(db, invoice_id)
        .await?
        .ok_or_else(|| Error::not_found("Invoice", invoice_id))?;
    let items = invoice
        .find_related(InvoiceItem)
        .order_by_asc(invoice_item::Column::Id)
        .all(db)
        .await?;
    let total = invoice_total(db, invoice_id).await?;

    Ok(InvoiceView {
        id: invoice.id,
        client: invoice.client_id,
        date: invoice.date,
        total,
        items: items.iter().map(InvoiceItemView::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{
        catalog::update_motorcycle, invoice_item::get_invoice_item, profile::delete_profile,
    };
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_total_of_example_invoice() -> Result<()> {
        let (db, _, product, invoice) = setup_with_invoice().await?;
        add_test_item(&db, invoice.id, product.id, 2, 100.0).await?;
        add_test_item(&db, invoice.id, product.id, 1, 50.0).await?;

        assert_eq!(invoice_total(&db, invoice.id).await?, 250.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_total_of_empty_invoice_is_zero() -> Result<()> {
        let (db, _, _, invoice) = setup_with_invoice().await?;

        assert_eq!(invoice_total(&db, invoice.id).await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_total_of_missing_invoice() -> Result<()> {
        let db = setup_test_db().await?;

        let result = invoice_total(&db, 42).await;

        assert!(matches!(result, Err(Error::NotFound { entity: "Invoice", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_total_matches_sum_of_line_totals() -> Result<()> {
        let (db, _, product, invoice) = setup_with_invoice().await?;
        let lines = [(3, 19.5), (1, 1_200.0), (0, 999.0), (7, 0.25)];
        for (quantity, price) in lines {
            add_test_item(&db, invoice.id, product.id, quantity, price).await?;
        }

        let details = get_invoice_details(&db, invoice.id).await?;
        let line_sum: f64 = details.items.iter().map(|item| item.total).sum();

        assert_eq!(details.items.len(), lines.len());
        assert_eq!(details.total, line_sum);
        assert_eq!(details.total, 3.0 * 19.5 + 1_200.0 + 7.0 * 0.25);
        Ok(())
    }

    #[tokio::test]
    async fn test_total_ignores_other_invoices() -> Result<()> {
        let (db, client, product, invoice) = setup_with_invoice().await?;
        let other = create_invoice(&db, client.id).await?;
        add_test_item(&db, invoice.id, product.id, 1, 10.0).await?;
        add_test_item(&db, other.id, product.id, 5, 10.0).await?;

        assert_eq!(invoice_total(&db, invoice.id).await?, 10.0);
        assert_eq!(invoice_total(&db, other.id).await?, 50.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_repricing_catalog_keeps_historic_total() -> Result<()> {
        let (db, _, product, invoice) = setup_with_invoice().await?;
        create_invoice_item_at_catalog_price(&db, invoice.id, product.id, 2).await?;
        let before = invoice_total(&db, invoice.id).await?;

        let mut changes = sample_motorcycle(&product.brand, &product.model);
        changes.price = product.price * 3.0;
        update_motorcycle(&db, product.id, &changes).await?;

        assert_eq!(invoice_total(&db, invoice.id).await?, before);
        assert_eq!(before, product.price * 2.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_totals_for_client() -> Result<()> {
        let (db, client, product, invoice) = setup_with_invoice().await?;
        let empty = create_invoice(&db, client.id).await?;
        add_test_item(&db, invoice.id, product.id, 2, 100.0).await?;
        add_test_item(&db, invoice.id, product.id, 1, 50.0).await?;

        let stranger = create_test_profile(&db, "stranger@example.com").await?;
        let foreign = create_invoice(&db, stranger.id).await?;
        add_test_item(&db, foreign.id, product.id, 9, 9.0).await?;

        let totals = invoice_totals_for_client(&db, client.id).await?;

        assert_eq!(totals, vec![(invoice.id, 250.0), (empty.id, 0.0)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_invoice_for_missing_client() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_invoice(&db, 7).await;

        assert!(matches!(result, Err(Error::NotFound { entity: "Profile", .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_invoices_by_client() -> Result<()> {
        let (db, client, _, invoice) = setup_with_invoice().await?;
        let newer = create_invoice(&db, client.id).await?;
        let stranger = create_test_profile(&db, "stranger@example.com").await?;
        create_invoice(&db, stranger.id).await?;

        let ids: Vec<i64> = list_invoices(&db, Some(client.id))
            .await?
            .iter()
            .map(|i| i.id)
            .collect();

        assert_eq!(ids, vec![newer.id, invoice.id]);
        assert_eq!(list_invoices(&db, None).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_invoice_removes_items() -> Result<()> {
        let (db, _, product, invoice) = setup_with_invoice().await?;
        let item = add_test_item(&db, invoice.id, product.id, 1, 10.0).await?;

        delete_invoice(&db, invoice.id).await?;

        assert!(get_invoice_item(&db, item.id).await?.is_none());
        assert!(matches!(
            delete_invoice(&db, invoice.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_deleting_client_cascades_to_invoice_items() -> Result<()> {
        let (db, client, product, invoice) = setup_with_invoice().await?;
        let item = add_test_item(&db, invoice.id, product.id, 1, 10.0).await?;

        delete_profile(&db, client.id).await?;

        assert!(get_invoice(&db, invoice.id).await?.is_none());
        assert!(get_invoice_item(&db, item.id).await?.is_none());
        Ok(())
    }
}
