//! Creation and removal of the client relations.

use crate::db::Gateway;
use crate::error::StoreError;

/// Creates `client` and `client_phone` when absent.
///
/// Phone numbers are unique across the whole relation; the composite
/// primary key keeps `(id, phone_number)` pairs unique as well.
pub const CREATE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS client (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS client_phone (
        id INTEGER NOT NULL REFERENCES client(id),
        phone_number BIGINT UNIQUE,
        CONSTRAINT client_phone_pkey PRIMARY KEY (id, phone_number)
    );
"#;

/// Drops both relations, phones first.
pub const DROP_SCHEMA: &str = r#"
    DROP TABLE client_phone;
    DROP TABLE client;
"#;

/// Create both relations if they do not exist yet.
pub async fn ensure_schema(gateway: &Gateway) -> Result<(), StoreError> {
    gateway.execute_script("ensure_schema", CREATE_SCHEMA).await?;
    tracing::debug!(database = %gateway.database(), "Schema ensured");
    Ok(())
}

/// Drop both relations. Fails if either is missing.
pub async fn drop_schema(gateway: &Gateway) -> Result<(), StoreError> {
    gateway.execute_script("drop_schema", DROP_SCHEMA).await
}
