//! Database entity definitions (row mappings).

pub mod client;

pub use client::{ClientEntity, ClientPhoneEntity, ExportRowEntity};
