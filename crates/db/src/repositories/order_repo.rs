//! Repository for the `orders` table.
//!
//! Orders are never inserted directly: confirming a quotation upserts its
//! order and declining removes it, both inside the status-change transaction.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgConnection, PgExecutor, PgPool};
use studio_core::types::{DbId, Money};
use studio_core::workflow::WorkflowStatus;

use crate::models::order::{Order, OrderSummary, UpdateOrder};
use crate::models::quotation::Quotation;
use crate::numbering::{self, NumberedTable};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_number, quotation_id, customer_id, estimated_budget, \
                       final_budget, workflow_status, created_at, updated_at";

/// Order columns plus joined labels and ledger sums, for [`OrderSummary`].
const SUMMARY_SELECT: &str = "SELECT
        o.id, o.order_number, o.quotation_id, o.customer_id, o.estimated_budget,
        o.final_budget, o.workflow_status, o.created_at, o.updated_at,
        c.name AS customer_name,
        q.event_type,
        q.event_date_start,
        COALESCE((SELECT SUM(e.amount) FROM expenses e WHERE e.order_id = o.id), 0)
            AS total_expenses,
        COALESCE((SELECT SUM(p.amount) FROM payments p WHERE p.order_id = o.id), 0)
            AS total_payments
     FROM orders o
     LEFT JOIN customers c ON c.id = o.customer_id
     LEFT JOIN quotations q ON q.id = o.quotation_id";

/// What a decline removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedOrder {
    pub order_id: DbId,
    pub payments_removed: u64,
    /// Expenses kept but no longer attached to an order.
    pub expenses_detached: u64,
}

/// Provides read, update, and lifecycle operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_quotation<'e, E>(
        executor: E,
        quotation_id: DbId,
    ) -> Result<Option<Order>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE quotation_id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(quotation_id)
            .fetch_optional(executor)
            .await
    }

    /// One order with its customer name, event, and ledger sums.
    pub async fn find_summary(pool: &PgPool, id: DbId) -> Result<Option<OrderSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE o.id = $1");
        sqlx::query_as::<_, OrderSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every order with its ledger sums, most recent first.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<OrderSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} ORDER BY o.created_at DESC, o.id DESC");
        sqlx::query_as::<_, OrderSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update budgets and workflow steps. Only non-`None` fields are applied;
    /// `final_budget: Some(None)` clears it. The workflow patch is merged into
    /// the stored checklist.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<Json<WorkflowStatus>> =
            sqlx::query_scalar("SELECT workflow_status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(Json(current)) = current else {
            return Ok(None);
        };
        let workflow = input
            .workflow_status
            .map(|patch| patch.apply(current))
            .unwrap_or(current);

        // An outer `Some` writes the inner value, which may be NULL.
        let query = format!(
            "UPDATE orders SET
                estimated_budget = COALESCE($2, estimated_budget),
                final_budget = CASE WHEN $3 THEN $4 ELSE final_budget END,
                workflow_status = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(input.estimated_budget)
            .bind(input.final_budget.is_some())
            .bind(input.final_budget.flatten())
            .bind(Json(workflow))
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Create the order for a confirmed quotation, or reset the budgets of the
    /// existing one. Returns the order and whether it was newly created.
    ///
    /// Must run inside the transaction that holds the quotation row lock.
    pub async fn upsert_for_quotation(
        conn: &mut PgConnection,
        quotation: &Quotation,
        budget: Money,
    ) -> Result<(Order, bool), sqlx::Error> {
        if let Some(existing) = Self::find_by_quotation(&mut *conn, quotation.id).await? {
            let query = format!(
                "UPDATE orders SET estimated_budget = $2, final_budget = $2
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            let order = sqlx::query_as::<_, Order>(&query)
                .bind(existing.id)
                .bind(budget)
                .fetch_one(&mut *conn)
                .await?;
            return Ok((order, false));
        }

        numbering::lock(&mut *conn, NumberedTable::Orders).await?;
        let number =
            numbering::next_number(&mut *conn, NumberedTable::Orders, Utc::now().date_naive())
                .await?;

        let query = format!(
            "INSERT INTO orders
                (order_number, quotation_id, customer_id, estimated_budget, final_budget,
                 workflow_status)
             VALUES ($1, $2, $3, $4, $4, $5)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(&number)
            .bind(quotation.id)
            .bind(quotation.customer_id)
            .bind(budget)
            .bind(Json(WorkflowStatus::initial()))
            .fetch_one(&mut *conn)
            .await?;
        Ok((order, true))
    }

    /// Delete the quotation's order and every payment against it. Expense
    /// rows are kept with their `order_id` cleared.
    pub async fn delete_for_quotation(
        conn: &mut PgConnection,
        quotation_id: DbId,
    ) -> Result<Option<RemovedOrder>, sqlx::Error> {
        let Some(order) = Self::find_by_quotation(&mut *conn, quotation_id).await? else {
            return Ok(None);
        };

        let payments = sqlx::query("DELETE FROM payments WHERE order_id = $1")
            .bind(order.id)
            .execute(&mut *conn)
            .await?;

        let expenses = sqlx::query("UPDATE expenses SET order_id = NULL WHERE order_id = $1")
            .bind(order.id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order.id)
            .execute(&mut *conn)
            .await?;

        Ok(Some(RemovedOrder {
            order_id: order.id,
            payments_removed: payments.rows_affected(),
            expenses_detached: expenses.rows_affected(),
        }))
    }

    /// Set both budgets of the quotation's order, if it has one.
    /// Returns `true` if an order was updated.
    pub async fn sync_budget_for_quotation<'e, E>(
        executor: E,
        quotation_id: DbId,
        budget: Money,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE orders SET estimated_budget = $2, final_budget = $2 WHERE quotation_id = $1",
        )
        .bind(quotation_id)
        .bind(budget)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
