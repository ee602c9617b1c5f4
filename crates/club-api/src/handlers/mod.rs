//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod activities;
pub mod comandas;
pub mod dashboard;
pub mod health;
pub mod invoices;
pub mod members;
pub mod stock;
