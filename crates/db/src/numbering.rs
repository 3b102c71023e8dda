//! Allocation of quotation and order numbers.
//!
//! The next number is derived by scanning the current year's numbers, so two
//! concurrent writers can compute the same value. The `uq_*` constraints
//! reject the loser; quotations retry, and order creation takes a
//! transaction-scoped advisory lock instead.

use chrono::NaiveDate;
use sqlx::PgExecutor;
use studio_core::numbering::{self, ORDER_PREFIX, QUOTATION_PREFIX};

/// A table whose rows carry a human-readable number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberedTable {
    Quotations,
    Orders,
}

impl NumberedTable {
    fn table(self) -> &'static str {
        match self {
            Self::Quotations => "quotations",
            Self::Orders => "orders",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Quotations => "quotation_number",
            Self::Orders => "order_number",
        }
    }

    pub fn base_prefix(self) -> &'static str {
        match self {
            Self::Quotations => QUOTATION_PREFIX,
            Self::Orders => ORDER_PREFIX,
        }
    }

    /// Name of the unique constraint on the number column.
    pub fn unique_constraint(self) -> &'static str {
        match self {
            Self::Quotations => "uq_quotations_quotation_number",
            Self::Orders => "uq_orders_order_number",
        }
    }
}

/// Next free number for `today`'s year, e.g. `Q-AKP-26-0004`.
pub async fn next_number<'e, E>(
    executor: E,
    target: NumberedTable,
    today: NaiveDate,
) -> Result<String, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let prefix = numbering::year_prefix(target.base_prefix(), today);
    let query = format!(
        "SELECT {column} FROM {table} WHERE {column} LIKE $1",
        column = target.column(),
        table = target.table(),
    );
    let existing: Vec<String> = sqlx::query_scalar(&query)
        .bind(format!("{prefix}%"))
        .fetch_all(executor)
        .await?;
    Ok(numbering::next_number(
        &prefix,
        existing.iter().map(String::as_str),
    ))
}

/// Randomised variant of `number` for when retries are exhausted.
pub fn fallback_number(number: &str) -> String {
    numbering::with_collision_suffix(number, rand::random::<u16>())
}

/// Serialise number allocation for `target` until the transaction ends.
pub async fn lock<'e, E>(executor: E, target: NumberedTable) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(target.table())
        .execute(executor)
        .await?;
    Ok(())
}
