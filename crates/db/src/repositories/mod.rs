//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or a connection inside a transaction) as the
//! first argument.

pub mod customer_repo;
pub mod expense_repo;
pub mod order_repo;
pub mod payment_repo;
pub mod quotation_repo;

pub use customer_repo::CustomerRepo;
pub use expense_repo::ExpenseRepo;
pub use order_repo::{OrderRepo, RemovedOrder};
pub use payment_repo::PaymentRepo;
pub use quotation_repo::{AppliedOrderEffect, QuotationRepo};
