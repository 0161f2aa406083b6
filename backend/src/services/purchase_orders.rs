//! Purchase order service
//!
//! Covers the two workflows the alerts screen triggers: opening an
//! existing draft order and creating a quick replenishment order for a
//! product in shortage. Order mutations publish on the refresh bus so
//! the alerts screen re-fetches immediately.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::models::{PurchaseOrder, PurchaseOrderItem, PurchaseOrderStatus};
use shared::validation::{validate_order_quantity, validate_siret, validate_unit_price};

use crate::error::{AppError, AppResult};
use crate::services::refresh::{RefreshBus, RefreshReason};

/// Purchase order service for draft and quick-order workflows
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
    refresh: RefreshBus,
}

/// Input for creating a quick replenishment order
#[derive(Debug, Deserialize)]
pub struct CreateQuickOrderInput {
    pub product_id: Uuid,
    /// Suggested quantity, typically the shortfall surfaced by the alert
    pub quantity: i64,
    pub supplier_name: Option<String>,
    pub supplier_siret: Option<String>,
    pub unit_price: Option<Decimal>,
    pub currency: Option<String>,
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    business_id: Uuid,
    order_number: String,
    supplier_name: Option<String>,
    status: String,
    total_amount: Option<Decimal>,
    currency: String,
    validated_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    id: Uuid,
    product_id: Uuid,
    product_name: String,
    sku: String,
    quantity: i64,
    unit_price: Option<Decimal>,
}

fn parse_status(status: &str) -> PurchaseOrderStatus {
    match status {
        "validated" => PurchaseOrderStatus::Validated,
        "received" => PurchaseOrderStatus::Received,
        "cancelled" => PurchaseOrderStatus::Cancelled,
        _ => PurchaseOrderStatus::Draft,
    }
}

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool, refresh: RefreshBus) -> Self {
        Self { db, refresh }
    }

    /// Get a purchase order with its lines
    pub async fn get_order(&self, business_id: Uuid, order_id: Uuid) -> AppResult<PurchaseOrder> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, business_id, order_number, supplier_name, status,
                   total_amount, currency, validated_at, created_at, updated_at
            FROM purchase_orders
            WHERE id = $1 AND business_id = $2
            "#,
        )
        .bind(order_id)
        .bind(business_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT i.id, i.product_id, p.name AS product_name, p.sku, i.quantity, i.unit_price
            FROM purchase_order_items i
            JOIN products p ON p.id = i.product_id
            WHERE i.order_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(PurchaseOrder {
            id: row.id,
            business_id: row.business_id,
            order_number: row.order_number,
            supplier_name: row.supplier_name,
            status: parse_status(&row.status),
            total_amount: row.total_amount,
            currency: row.currency,
            items: items
                .into_iter()
                .map(|i| PurchaseOrderItem {
                    id: i.id,
                    product_id: i.product_id,
                    product_name: i.product_name,
                    sku: i.sku,
                    quantity: i.quantity,
                    unit_price: i.unit_price,
                })
                .collect(),
            validated_at: row.validated_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    /// Create a draft purchase order for a single product
    pub async fn create_quick_order(
        &self,
        business_id: Uuid,
        user_id: Uuid,
        input: CreateQuickOrderInput,
    ) -> AppResult<PurchaseOrder> {
        validate_order_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_fr: "La quantité commandée doit être positive".to_string(),
        })?;

        if let Some(price) = input.unit_price {
            validate_unit_price(price).map_err(|msg| AppError::Validation {
                field: "unit_price".to_string(),
                message: msg.to_string(),
                message_fr: "Le prix unitaire ne peut pas être négatif".to_string(),
            })?;
        }

        if let Some(siret) = input.supplier_siret.as_deref() {
            validate_siret(siret).map_err(|msg| AppError::Validation {
                field: "supplier_siret".to_string(),
                message: msg.to_string(),
                message_fr: "SIRET fournisseur invalide".to_string(),
            })?;
        }

        // Validate product belongs to business
        let product_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND business_id = $2)",
        )
        .bind(input.product_id)
        .bind(business_id)
        .fetch_one(&self.db)
        .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let order_number = self.next_order_number(business_id).await?;
        let currency = input.currency.unwrap_or_else(|| "EUR".to_string());
        let total_amount = input.unit_price.map(|p| p * Decimal::from(input.quantity));

        let mut tx = self.db.begin().await?;

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO purchase_orders (
                business_id, order_number, supplier_name, supplier_siret,
                status, total_amount, currency, created_by
            )
            VALUES ($1, $2, $3, $4, 'draft', $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(business_id)
        .bind(&order_number)
        .bind(&input.supplier_name)
        .bind(&input.supplier_siret)
        .bind(total_amount)
        .bind(&currency)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO purchase_order_items (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.unit_price)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            business_id = %business_id,
            order_number = %order_number,
            product_id = %input.product_id,
            quantity = input.quantity,
            "quick purchase order created"
        );

        self.refresh.publish(RefreshReason::OrderActivity);

        self.get_order(business_id, order_id).await
    }

    /// Confirm a draft order (draft -> validated)
    pub async fn validate_order(
        &self,
        business_id: Uuid,
        order_id: Uuid,
    ) -> AppResult<PurchaseOrder> {
        let order = self.get_order(business_id, order_id).await?;

        if order.status != PurchaseOrderStatus::Draft {
            return Err(AppError::InvalidStateTransition(format!(
                "Order {} is {} and cannot be validated",
                order.order_number,
                order.status.as_str()
            )));
        }

        sqlx::query(
            r#"
            UPDATE purchase_orders
            SET status = 'validated', validated_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND business_id = $2
            "#,
        )
        .bind(order_id)
        .bind(business_id)
        .execute(&self.db)
        .await?;

        tracing::info!(order_number = %order.order_number, "purchase order validated");

        self.refresh.publish(RefreshReason::OrderActivity);

        self.get_order(business_id, order_id).await
    }

    /// Next sequential order number for the current year (PO-YYYY-NNNN)
    async fn next_order_number(&self, business_id: Uuid) -> AppResult<String> {
        let year = Utc::now().year();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM purchase_orders
            WHERE business_id = $1
              AND EXTRACT(YEAR FROM created_at)::int = $2
            "#,
        )
        .bind(business_id)
        .bind(year)
        .fetch_one(&self.db)
        .await?;

        Ok(format!("PO-{}-{:04}", year, count + 1))
    }
}
