//! Repository for the `expenses` table.

use chrono::Utc;
use sqlx::PgPool;
use studio_core::types::DbId;

use crate::models::expense::{CreateExpense, Expense, UpdateExpense};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, order_id, cost_head, amount, vendor_name, description, expense_date, \
                       created_at, updated_at";

/// Provides CRUD operations for expenses.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert a new expense. `expense_date` defaults to the current UTC date.
    pub async fn create(pool: &PgPool, input: &CreateExpense) -> Result<Expense, sqlx::Error> {
        let query = format!(
            "INSERT INTO expenses (order_id, cost_head, amount, vendor_name, description, expense_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(input.order_id)
            .bind(input.cost_head.trim())
            .bind(input.amount)
            .bind(&input.vendor_name)
            .bind(&input.description)
            .bind(input.expense_date.unwrap_or_else(|| Utc::now().date_naive()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE id = $1");
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List expenses, newest first, optionally for a single order.
    pub async fn list(pool: &PgPool, order_id: Option<DbId>) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expenses
             WHERE $1::BIGINT IS NULL OR order_id = $1
             ORDER BY expense_date DESC, id DESC"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Update an expense. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                cost_head = COALESCE($2, cost_head),
                amount = COALESCE($3, amount),
                vendor_name = COALESCE($4, vendor_name),
                description = COALESCE($5, description),
                expense_date = COALESCE($6, expense_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(id)
            .bind(input.cost_head.as_deref().map(str::trim))
            .bind(input.amount)
            .bind(&input.vendor_name)
            .bind(&input.description)
            .bind(input.expense_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete an expense by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
