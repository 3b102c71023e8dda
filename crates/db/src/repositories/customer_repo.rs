//! Repository for the `customers` table.

use sqlx::PgPool;
use studio_core::types::DbId;

use crate::models::customer::{CreateCustomer, Customer, UpdateCustomer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, phone, email, address, created_at, updated_at";

/// Optional text is stored as `NULL` rather than an empty string.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Provides CRUD operations for customers.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Insert a new customer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCustomer) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (name, phone, email, address)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(input.name.trim())
            .bind(input.phone.trim())
            .bind(non_blank(input.email.as_deref()))
            .bind(non_blank(input.address.as_deref()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List customers alphabetically, optionally filtered by a case-insensitive
    /// match on name, phone, or email.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Customer>, sqlx::Error> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));
        let query = format!(
            "SELECT {COLUMNS} FROM customers
             WHERE $1::TEXT IS NULL
                OR name ILIKE $1 OR phone ILIKE $1 OR email ILIKE $1
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Fetch several customers at once, in no particular order.
    pub async fn list_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = ANY($1)");
        sqlx::query_as::<_, Customer>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a customer. Only non-`None` fields in `input` are applied; a
    /// blank `email` or `address` clears it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = CASE WHEN $4 THEN $5 ELSE email END,
                address = CASE WHEN $6 THEN $7 ELSE address END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.phone.as_deref().map(str::trim))
            .bind(input.email.is_some())
            .bind(non_blank(input.email.as_deref()))
            .bind(input.address.is_some())
            .bind(non_blank(input.address.as_deref()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a customer by ID. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation while quotations reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
