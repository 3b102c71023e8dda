pub mod auth;
pub mod customer;
pub mod dashboard;
pub mod expense;
pub mod order;
pub mod payment;
pub mod public_quotation;
pub mod quotation;
pub mod report;
