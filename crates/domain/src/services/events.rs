//! Record events emitted after successful store operations.
//!
//! The store reports every completed mutation to a [`RecordEventSink`].
//! Sinks only observe; they cannot fail or alter the operation.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::models::ClientField;

/// A completed store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEvent {
    Connected {
        database: String,
    },
    SchemaDropped {
        database: String,
    },
    ClientAdded {
        client_id: i32,
        first_name: String,
        last_name: String,
    },
    PhoneAdded {
        client_id: i32,
        phone: i64,
    },
    ClientUpdated {
        client_id: i32,
        fields: Vec<ClientField>,
        phone_changed: bool,
    },
    PhoneDeleted {
        client_id: i32,
        phone: i64,
    },
    ClientDeleted {
        client_id: i32,
        phones_removed: usize,
    },
    Exported {
        path: PathBuf,
        rows: usize,
    },
}

impl RecordEvent {
    /// Short machine-readable name of the event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::SchemaDropped { .. } => "schema_dropped",
            Self::ClientAdded { .. } => "client_added",
            Self::PhoneAdded { .. } => "phone_added",
            Self::ClientUpdated { .. } => "client_updated",
            Self::PhoneDeleted { .. } => "phone_deleted",
            Self::ClientDeleted { .. } => "client_deleted",
            Self::Exported { .. } => "exported",
        }
    }
}

impl std::fmt::Display for RecordEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected { database } => {
                write!(f, "Connected to database {}", database)
            }
            Self::SchemaDropped { database } => {
                write!(f, "Database {} fully cleared", database)
            }
            Self::ClientAdded {
                client_id,
                first_name,
                last_name,
            } => write!(
                f,
                "Client {} {} added with id = {}",
                first_name, last_name, client_id
            ),
            Self::PhoneAdded { client_id, phone } => {
                write!(f, "Phone number {} added to client id = {}", phone, client_id)
            }
            Self::ClientUpdated { client_id, .. } => {
                write!(f, "Client id = {} updated", client_id)
            }
            Self::PhoneDeleted { client_id, phone } => write!(
                f,
                "Phone number {} removed from client id = {}",
                phone, client_id
            ),
            Self::ClientDeleted {
                client_id,
                phones_removed,
            } => write!(
                f,
                "Client id = {} deleted along with {} phone number(s)",
                client_id, phones_removed
            ),
            Self::Exported { path, rows } => {
                write!(f, "Exported {} row(s) to {}", rows, path.display())
            }
        }
    }
}

/// Observer of completed store operations.
pub trait RecordEventSink: Send + Sync {
    fn record(&self, event: &RecordEvent);
}

/// Sink writing every event to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl RecordEventSink for TracingEventSink {
    fn record(&self, event: &RecordEvent) {
        tracing::info!(event = event.kind(), "{}", event);
    }
}

/// In-memory sink for development and testing.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<RecordEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<RecordEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Kinds of the events recorded so far, oldest first.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events().iter().map(RecordEvent::kind).collect()
    }
}

impl RecordEventSink for MemoryEventSink {
    fn record(&self, event: &RecordEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
