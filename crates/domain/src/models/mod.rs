//! Domain models for Client Book.

pub mod client;
pub mod search;

pub use client::{
    Client, ClientField, ClientPhoneRow, ClientUpdate, ExportRow, NewClient, PhoneChange,
};
pub use search::{ClientSearch, SearchPredicate};
