//! Shared utilities for the Client Book workspace.
//!
//! This crate provides validation helpers used by the domain and
//! persistence layers.

pub mod validation;
