//! Persistence layer for Client Book.
//!
//! This crate contains:
//! - The connection gateway (one short-lived connection per statement)
//! - Schema creation and removal
//! - Entity definitions (database row mappings)
//! - The client repository and the `ClientStore` facade

pub mod db;
pub mod entities;
pub mod error;
pub mod export;
pub mod metrics;
pub mod repositories;
pub mod schema;
pub mod store;

pub use db::{Credentials, Gateway};
pub use error::StoreError;
pub use export::ExportReport;
pub use store::ClientStore;
