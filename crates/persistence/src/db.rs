//! Connection gateway.
//!
//! Every statement runs on its own connection: the gateway opens a
//! connection with the stored credentials, runs one statement in the
//! server's implicit transaction and closes the connection again, on success
//! and on failure alike. There is no pool and no connection reuse.

use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, Executor, PgConnection};

use crate::error::StoreError;
use crate::metrics::QueryTimer;

/// Connection credentials for one database.
#[derive(Clone)]
pub struct Credentials {
    pub database: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub connect_timeout_secs: u64,
}

impl Credentials {
    /// Credentials for a database on `localhost:5432`.
    pub fn new(
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            user: user.into(),
            password: password.into(),
            host: default_host(),
            port: default_port(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

pub fn default_host() -> String {
    "localhost".to_string()
}

pub fn default_port() -> u16 {
    5432
}

pub fn default_connect_timeout() -> u64 {
    10
}

/// Short-lived connection/execution primitive used by every operation.
#[derive(Debug, Clone)]
pub struct Gateway {
    credentials: Credentials,
}

impl Gateway {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn database(&self) -> &str {
        &self.credentials.database
    }

    /// Open and immediately close a connection.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let conn = self.open().await?;
        release(conn).await;
        Ok(())
    }

    /// Open a fresh connection for one named statement.
    ///
    /// The statement runs against [`Session::conn`] and its result is handed
    /// back through [`Session::finish`], which closes the connection.
    pub async fn session(&self, name: &'static str) -> Result<Session, StoreError> {
        let conn = self.open().await?;
        Ok(Session {
            conn,
            name,
            timer: QueryTimer::new(name),
        })
    }

    /// Run a fixed multi-statement script on a fresh connection.
    ///
    /// Scripts are sent unparameterized and must not contain caller values.
    pub async fn execute_script(
        &self,
        name: &'static str,
        sql: &'static str,
    ) -> Result<(), StoreError> {
        let mut session = self.session(name).await?;
        let result = session.conn().execute(sql).await;
        session.finish(result).await?;
        Ok(())
    }

    async fn open(&self) -> Result<PgConnection, StoreError> {
        let options = self.credentials.connect_options();
        let timeout = Duration::from_secs(self.credentials.connect_timeout_secs);

        match tokio::time::timeout(timeout, PgConnection::connect_with(&options)).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(source)) => Err(self.connection_error(source)),
            Err(_) => Err(self.connection_error(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("connect timed out after {}s", timeout.as_secs()),
            )))),
        }
    }

    fn connection_error(&self, source: sqlx::Error) -> StoreError {
        tracing::warn!(
            database = %self.credentials.database,
            host = %self.credentials.host,
            port = self.credentials.port,
            error = %source,
            "Database connection failed"
        );
        StoreError::Connection {
            database: self.credentials.database.clone(),
            source,
        }
    }
}

/// One open connection serving a single statement.
#[derive(Debug)]
pub struct Session {
    conn: PgConnection,
    name: &'static str,
    timer: QueryTimer,
}

impl Session {
    /// Connection to run the statement on.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    /// Record the statement's duration, close the connection and surface the
    /// statement result.
    pub async fn finish<T>(self, result: Result<T, sqlx::Error>) -> Result<T, StoreError> {
        let Self { conn, name, timer } = self;
        timer.record();
        release(conn).await;

        match &result {
            Ok(_) => tracing::debug!(statement = name, "Statement executed"),
            Err(e) => {
                crate::metrics::record_query_error(name);
                tracing::debug!(statement = name, error = %e, "Statement failed");
            }
        }

        Ok(result?)
    }
}

async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close database connection cleanly");
    }
}
