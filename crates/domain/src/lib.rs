//! Domain layer for Client Book.
//!
//! This crate contains:
//! - Domain models (Client, joined phone rows, search and update requests)
//! - Search merging, export rendering and record event services

pub mod models;
pub mod services;
