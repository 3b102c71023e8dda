//! Repository for the `payments` table.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use studio_core::types::{DbId, Money};

use crate::models::payment::{CreatePayment, Payment, UpdatePayment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, order_id, payment_type_id, amount, payment_date, notes, created_at, updated_at";

/// Provides CRUD operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a new payment. `payment_date` defaults to the current UTC date.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (order_id, payment_type_id, amount, payment_date, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.order_id)
            .bind(input.payment_type.id())
            .bind(input.amount)
            .bind(input.payment_date.unwrap_or_else(|| Utc::now().date_naive()))
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List payments, newest first, optionally for a single order.
    pub async fn list(pool: &PgPool, order_id: Option<DbId>) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments
             WHERE $1::BIGINT IS NULL OR order_id = $1
             ORDER BY payment_date DESC, id DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Date and amount of every payment, for revenue figures.
    pub async fn list_dated_amounts(pool: &PgPool) -> Result<Vec<(NaiveDate, Money)>, sqlx::Error> {
        sqlx::query_as::<_, (NaiveDate, Money)>("SELECT payment_date, amount FROM payments")
            .fetch_all(pool)
            .await
    }

    /// Update a payment. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePayment,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET
                payment_type_id = COALESCE($2, payment_type_id),
                amount = COALESCE($3, amount),
                payment_date = COALESCE($4, payment_date),
                notes = COALESCE($5, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(input.payment_type.map(|t| t.id()))
            .bind(input.amount)
            .bind(input.payment_date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a payment by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
