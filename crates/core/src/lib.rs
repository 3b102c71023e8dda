//! Domain logic for the studio manager.
//!
//! Everything in this crate is pure: no database access, no HTTP. Repositories
//! in `studio-db` load rows, and handlers in `studio-api` feed them through the
//! functions here to derive totals, rollups, and statuses.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod finance;
pub mod money;
pub mod numbering;
pub mod pricing;
pub mod quotation_status;
pub mod report;
pub mod types;
pub mod validation;
pub mod workflow;
