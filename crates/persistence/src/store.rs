//! Client store: the entry point for every record operation.
//!
//! A store holds nothing but the credentials of one database, the record
//! event sink and the export directory. Each operation opens its own
//! connection(s) through the [`Gateway`] and runs its statements one after
//! another; nothing spans more than one statement transactionally.

use std::path::PathBuf;
use std::sync::Arc;

use domain::models::{Client, ClientPhoneRow, ClientSearch, ClientUpdate, NewClient};
use domain::services::{merge_search_results, RecordEvent, RecordEventSink, TracingEventSink};
use shared::validation::validate_phone_number;
use validator::Validate;

use crate::db::{Credentials, Gateway};
use crate::error::StoreError;
use crate::export::{write_export, ExportReport};
use crate::repositories::ClientRepository;
use crate::schema;

#[derive(Clone)]
pub struct ClientStore {
    gateway: Gateway,
    clients: ClientRepository,
    events: Arc<dyn RecordEventSink>,
    export_dir: PathBuf,
}

impl std::fmt::Debug for ClientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientStore")
            .field("database", &self.gateway.database())
            .field("export_dir", &self.export_dir)
            .finish_non_exhaustive()
    }
}

impl ClientStore {
    /// Connect to a database, logging record events through `tracing`.
    ///
    /// Fails with [`StoreError::Connection`] when a trial connection cannot
    /// be established. On success the schema is ensured.
    pub async fn connect(credentials: Credentials) -> Result<Self, StoreError> {
        Self::with_event_sink(credentials, Arc::new(TracingEventSink)).await
    }

    /// Connect to a database, reporting record events to `events`.
    pub async fn with_event_sink(
        credentials: Credentials,
        events: Arc<dyn RecordEventSink>,
    ) -> Result<Self, StoreError> {
        let gateway = Gateway::new(credentials);
        gateway.ping().await?;
        schema::ensure_schema(&gateway).await?;

        let store = Self {
            clients: ClientRepository::new(gateway.clone()),
            gateway,
            events,
            export_dir: PathBuf::from("."),
        };
        store.notify(RecordEvent::Connected {
            database: store.database().to_string(),
        });
        Ok(store)
    }

    /// Directory export files are written to. Defaults to the current
    /// directory.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn database(&self) -> &str {
        self.gateway.database()
    }

    pub fn export_dir(&self) -> &std::path::Path {
        &self.export_dir
    }

    /// Create both relations if absent.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        schema::ensure_schema(&self.gateway).await
    }

    /// Drop both relations.
    pub async fn drop_schema(&self) -> Result<(), StoreError> {
        schema::drop_schema(&self.gateway).await?;
        self.notify(RecordEvent::SchemaDropped {
            database: self.database().to_string(),
        });
        Ok(())
    }

    /// Add a client and return its id.
    pub async fn add_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<i32, StoreError> {
        let client = NewClient::new(first_name, last_name, email);
        client.validate()?;

        let client_id = self.clients.create(&client).await?;
        self.notify(RecordEvent::ClientAdded {
            client_id,
            first_name: client.first_name,
            last_name: client.last_name,
        });
        Ok(client_id)
    }

    /// Attach a phone number to an existing client.
    ///
    /// A missing client or an already used number is rejected by the
    /// database and surfaced as [`StoreError::Database`].
    pub async fn add_phone(&self, phone: i64, client_id: i32) -> Result<(), StoreError> {
        validate_phone_number(phone)?;

        self.clients.add_phone(client_id, phone).await?;
        self.notify(RecordEvent::PhoneAdded { client_id, phone });
        Ok(())
    }

    /// Apply a partial update, one statement per provided field.
    ///
    /// Statements run in the order first name, last name, email, phone. A
    /// failure stops the sequence; earlier statements stay applied.
    pub async fn update_client(
        &self,
        client_id: i32,
        update: &ClientUpdate,
    ) -> Result<(), StoreError> {
        update.validate()?;
        if let Some(change) = update.phone {
            validate_phone_number(change.new)?;
        }
        if update.is_empty() {
            tracing::debug!(client_id, "Empty client update, nothing to do");
            return Ok(());
        }

        let changes = update.field_changes();
        for (field, value) in &changes {
            self.clients.update_field(client_id, *field, value).await?;
        }
        if let Some(change) = update.phone {
            self.clients.update_phone(client_id, change).await?;
        }

        self.notify(RecordEvent::ClientUpdated {
            client_id,
            fields: changes.into_iter().map(|(field, _)| field).collect(),
            phone_changed: update.phone.is_some(),
        });
        Ok(())
    }

    /// Remove one phone number of a client.
    pub async fn delete_phone(&self, client_id: i32, phone: i64) -> Result<(), StoreError> {
        self.clients.delete_phone(client_id, phone).await?;
        self.notify(RecordEvent::PhoneDeleted { client_id, phone });
        Ok(())
    }

    /// Remove a client together with its phone numbers.
    ///
    /// Phones are deleted one statement at a time before the client row.
    /// The sequence is not atomic: if a statement fails, phones deleted so
    /// far stay deleted and the client row remains.
    pub async fn delete_client(&self, client_id: i32) -> Result<(), StoreError> {
        let phones = self.clients.list_phones(client_id).await?;
        for phone in &phones {
            self.clients.delete_phone(client_id, *phone).await?;
        }
        self.clients.delete(client_id).await?;

        self.notify(RecordEvent::ClientDeleted {
            client_id,
            phones_removed: phones.len(),
        });
        Ok(())
    }

    /// Look up a client by id.
    pub async fn get_client(&self, client_id: i32) -> Result<Option<Client>, StoreError> {
        self.clients.find_by_id(client_id).await
    }

    /// Phone numbers of a client, ascending.
    pub async fn list_phones(&self, client_id: i32) -> Result<Vec<i64>, StoreError> {
        self.clients.list_phones(client_id).await
    }

    /// Search clients joined with their phones.
    ///
    /// One query runs per supplied predicate; the pooled rows are
    /// de-duplicated and only rows matching every predicate are returned.
    pub async fn find_client(
        &self,
        search: &ClientSearch,
    ) -> Result<Vec<ClientPhoneRow>, StoreError> {
        let predicates = search.predicates();
        if predicates.is_empty() {
            return Err(StoreError::InvalidQuery(
                "no search predicates supplied".to_string(),
            ));
        }

        let mut batches = Vec::with_capacity(predicates.len());
        for predicate in &predicates {
            batches.push(self.clients.search(predicate).await?);
        }

        let rows = merge_search_results(&predicates, batches);
        tracing::debug!(
            predicates = predicates.len(),
            rows = rows.len(),
            "Client search completed"
        );
        Ok(rows)
    }

    /// Export every client and phone to `<database>.csv` and/or
    /// `<database>.json` in the export directory.
    pub async fn export_all(
        &self,
        to_csv: bool,
        to_json: bool,
    ) -> Result<ExportReport, StoreError> {
        if !to_csv && !to_json {
            return Ok(ExportReport::default());
        }

        let rows = self.clients.export_rows().await?;
        let report = write_export(&self.export_dir, self.database(), &rows, to_csv, to_json).await?;

        for path in report.written() {
            self.notify(RecordEvent::Exported {
                path: path.to_path_buf(),
                rows: report.rows,
            });
        }
        Ok(report)
    }

    fn notify(&self, event: RecordEvent) {
        self.events.record(&event);
    }
}
