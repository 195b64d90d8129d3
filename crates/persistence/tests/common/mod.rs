//! Common test utilities for integration tests.
//!
//! These helpers run the store against a real PostgreSQL database described
//! by `TEST_DATABASE_*` environment variables.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use domain::services::MemoryEventSink;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use persistence::{ClientStore, Credentials};

/// Credentials of the test database.
///
/// Falls back to a local `client_book_test` database owned by `postgres`.
pub fn test_credentials() -> Credentials {
    let var = |name: &str, default: &str| std::env::var(name).unwrap_or_else(|_| default.to_string());

    Credentials::new(
        var("TEST_DATABASE_NAME", "client_book_test"),
        var("TEST_DATABASE_USER", "postgres"),
        var("TEST_DATABASE_PASSWORD", "postgres"),
    )
    .with_host(var("TEST_DATABASE_HOST", "localhost"))
    .with_port(
        var("TEST_DATABASE_PORT", "5432")
            .parse()
            .expect("TEST_DATABASE_PORT must be a port number"),
    )
}

// Concurrent first-time CREATE TABLE IF NOT EXISTS can collide in the catalog.
static CONNECT_LOCK: OnceLock<tokio::sync::Mutex<()>> = OnceLock::new();

/// Connect a store that records its events in memory.
pub async fn create_test_store() -> (ClientStore, Arc<MemoryEventSink>) {
    let _guard = CONNECT_LOCK
        .get_or_init(|| tokio::sync::Mutex::new(()))
        .lock()
        .await;

    let events = Arc::new(MemoryEventSink::new());
    let store = ClientStore::with_event_sink(test_credentials(), events.clone())
        .await
        .expect("Failed to connect to test database");
    (store, events)
}

/// Randomized client fields.
pub struct TestClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl TestClient {
    pub fn new() -> Self {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let email: String = SafeEmail().fake();
        let suffix: u32 = (100_000..999_999).fake();

        Self {
            first_name,
            last_name: format!("{}{}", last_name, suffix),
            email: format!("{}.{}", suffix, email),
        }
    }

    pub async fn insert(&self, store: &ClientStore) -> i32 {
        store
            .add_client(&self.first_name, &self.last_name, &self.email)
            .await
            .expect("Failed to add test client")
    }
}

/// A random phone number unlikely to collide with other tests.
pub fn random_phone() -> i64 {
    (10_000_000_000_i64..99_999_999_999_i64).fake()
}
