//! Repository for the `quotations` table.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use studio_core::numbering::MAX_NUMBERING_ATTEMPTS;
use studio_core::quotation_status::{OrderEffect, TransitionPlan};
use studio_core::types::DbId;
use uuid::Uuid;

use crate::is_unique_violation;
use crate::models::order::Order;
use crate::models::quotation::{CreateQuotation, Quotation, QuotationFilter, UpdateQuotation};
use crate::numbering::{self, NumberedTable};
use crate::repositories::order_repo::{OrderRepo, RemovedOrder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, quotation_number, public_token, customer_id, event_type, \
                       event_date_start, event_date_end, location, package_type, session_type, \
                       services, deliverables, manual_total, status_id, remarks, confirmed_at, \
                       created_at, updated_at";

/// Order side of an applied status change.
#[derive(Debug, Clone)]
pub enum AppliedOrderEffect {
    Unchanged,
    Created(Order),
    Updated(Order),
    Removed(RemovedOrder),
    /// Decline on a quotation that had no order.
    NothingToRemove,
}

/// Provides CRUD and status-transition operations for quotations.
pub struct QuotationRepo;

impl QuotationRepo {
    /// Insert a new quotation with the next free number for the current year.
    ///
    /// A number taken by a concurrent insert is recomputed up to
    /// [`MAX_NUMBERING_ATTEMPTS`] times before falling back to a randomised one.
    pub async fn create(pool: &PgPool, input: &CreateQuotation) -> Result<Quotation, sqlx::Error> {
        let target = NumberedTable::Quotations;
        let today = Utc::now().date_naive();
        let mut number = String::new();

        for attempt in 1..=MAX_NUMBERING_ATTEMPTS {
            number = numbering::next_number(pool, target, today).await?;
            match Self::insert(pool, &number, input).await {
                Err(e) if is_unique_violation(&e, target.unique_constraint()) => {
                    tracing::warn!(attempt, number = %number, "Quotation number taken, retrying");
                }
                result => return result,
            }
        }

        let fallback = numbering::fallback_number(&number);
        tracing::warn!(number = %fallback, "Using randomised quotation number");
        Self::insert(pool, &fallback, input).await
    }

    async fn insert(
        pool: &PgPool,
        number: &str,
        input: &CreateQuotation,
    ) -> Result<Quotation, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotations
                (quotation_number, customer_id, event_type, event_date_start, event_date_end,
                 location, package_type, session_type, services, deliverables, manual_total)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quotation>(&query)
            .bind(number)
            .bind(input.customer_id)
            .bind(&input.event_type)
            .bind(input.event_date_start)
            .bind(input.event_date_end)
            .bind(input.location.trim())
            .bind(&input.package_type)
            .bind(&input.session_type)
            .bind(Json(&input.services))
            .bind(&input.deliverables)
            .bind(input.manual_total)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotations WHERE id = $1");
        sqlx::query_as::<_, Quotation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a quotation by the token in its customer-facing link.
    pub async fn find_by_token(
        pool: &PgPool,
        token: Uuid,
    ) -> Result<Option<Quotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotations WHERE public_token = $1");
        sqlx::query_as::<_, Quotation>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Load and row-lock a quotation for a status change.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Quotation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quotations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Quotation>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List quotations, most recent first.
    pub async fn list(
        pool: &PgPool,
        filter: &QuotationFilter,
    ) -> Result<Vec<Quotation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quotations
             WHERE ($1::SMALLINT IS NULL OR status_id = $1)
               AND ($2::BIGINT IS NULL OR customer_id = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Quotation>(&query)
            .bind(filter.status_id)
            .bind(filter.customer_id)
            .fetch_all(pool)
            .await
    }

    /// Update a quotation. Only non-`None` fields in `input` are applied;
    /// `manual_total: Some(None)` removes the override.
    ///
    /// When `manual_total` is given, the resulting effective total is copied
    /// onto both budgets of the quotation's order, when it has one. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuotation,
    ) -> Result<Option<Quotation>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE quotations SET
                customer_id = COALESCE($2, customer_id),
                event_type = COALESCE($3, event_type),
                event_date_start = COALESCE($4, event_date_start),
                event_date_end = COALESCE($5, event_date_end),
                location = COALESCE($6, location),
                package_type = COALESCE($7, package_type),
                session_type = COALESCE($8, session_type),
                services = COALESCE($9, services),
                deliverables = COALESCE($10, deliverables),
                manual_total = CASE WHEN $11 THEN $12 ELSE manual_total END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Quotation>(&query)
            .bind(id)
            .bind(input.customer_id)
            .bind(&input.event_type)
            .bind(input.event_date_start)
            .bind(input.event_date_end)
            .bind(input.location.as_deref().map(str::trim))
            .bind(&input.package_type)
            .bind(&input.session_type)
            .bind(input.services.as_ref().map(Json))
            .bind(&input.deliverables)
            .bind(input.manual_total.is_some())
            .bind(input.manual_total.flatten())
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(quotation) = updated.as_ref().filter(|_| input.manual_total.is_some()) {
            let total = quotation.effective_total();
            let synced = OrderRepo::sync_budget_for_quotation(&mut *tx, quotation.id, total).await?;
            if synced {
                tracing::info!(quotation_id = quotation.id, %total, "Order budget synced to manual total");
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Execute a planned status change on a row locked by
    /// [`find_for_update`](Self::find_for_update) in the same transaction.
    pub async fn apply_transition(
        conn: &mut PgConnection,
        quotation: &Quotation,
        plan: &TransitionPlan,
    ) -> Result<(Quotation, AppliedOrderEffect), sqlx::Error> {
        let query = format!(
            "UPDATE quotations SET
                status_id = $2,
                remarks = COALESCE($3, remarks),
                confirmed_at = CASE WHEN $4 THEN NOW() ELSE confirmed_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Quotation>(&query)
            .bind(quotation.id)
            .bind(plan.to.id())
            .bind(&plan.remarks)
            .bind(plan.stamp_confirmed_at)
            .fetch_one(&mut *conn)
            .await?;

        let effect = match plan.order_effect {
            OrderEffect::Keep => AppliedOrderEffect::Unchanged,
            OrderEffect::Upsert { budget } => {
                match OrderRepo::upsert_for_quotation(&mut *conn, &updated, budget).await? {
                    (order, true) => AppliedOrderEffect::Created(order),
                    (order, false) => AppliedOrderEffect::Updated(order),
                }
            }
            OrderEffect::Remove => match OrderRepo::delete_for_quotation(&mut *conn, updated.id).await? {
                Some(removed) => AppliedOrderEffect::Removed(removed),
                None => AppliedOrderEffect::NothingToRemove,
            },
        };

        Ok((updated, effect))
    }

    /// Delete a quotation by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while an order references it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quotations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
