//! Client repository for database operations.

use domain::models::{
    Client, ClientField, ClientPhoneRow, ExportRow, NewClient, PhoneChange, SearchPredicate,
};
use crate::db::Gateway;
use crate::entities::{ClientEntity, ClientPhoneEntity, ExportRowEntity};
use crate::error::StoreError;

const SEARCH_BY_FIRST_NAME: &str = r#"
    SELECT c.id AS client_id, c.first_name, c.last_name, c.email, p.phone_number
    FROM client c
    LEFT JOIN client_phone p ON p.id = c.id
    WHERE c.first_name = $1
"#;

const SEARCH_BY_LAST_NAME: &str = r#"
    SELECT c.id AS client_id, c.first_name, c.last_name, c.email, p.phone_number
    FROM client c
    LEFT JOIN client_phone p ON p.id = c.id
    WHERE c.last_name = $1
"#;

const SEARCH_BY_EMAIL: &str = r#"
    SELECT c.id AS client_id, c.first_name, c.last_name, c.email, p.phone_number
    FROM client c
    LEFT JOIN client_phone p ON p.id = c.id
    WHERE c.email = $1
"#;

const SEARCH_BY_PHONE: &str = r#"
    SELECT c.id AS client_id, c.first_name, c.last_name, c.email, p.phone_number
    FROM client c
    LEFT JOIN client_phone p ON p.id = c.id
    WHERE p.phone_number = $1
"#;

/// Repository for client and phone database operations.
///
/// Each method issues exactly one statement on its own gateway session.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    gateway: Gateway,
}

impl ClientRepository {
    /// Create a new repository instance.
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Insert a client and return its generated id.
    pub async fn create(&self, client: &NewClient) -> Result<i32, StoreError> {
        let mut session = self.gateway.session("add_client").await?;
        let result = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO client (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(client.first_name.as_str())
        .bind(client.last_name.as_str())
        .bind(client.email.as_str())
        .fetch_one(session.conn())
        .await;

        session.finish(result).await
    }

    /// Attach a phone number to a client.
    pub async fn add_phone(&self, client_id: i32, phone: i64) -> Result<(), StoreError> {
        let mut session = self.gateway.session("add_phone").await?;
        let result = sqlx::query(
            r#"
            INSERT INTO client_phone (id, phone_number)
            VALUES ($1, $2)
            "#,
        )
        .bind(client_id)
        .bind(phone)
        .execute(session.conn())
        .await;

        session.finish(result).await?;
        Ok(())
    }

    /// Overwrite one text column of a client.
    pub async fn update_field(
        &self,
        client_id: i32,
        field: ClientField,
        value: &str,
    ) -> Result<(), StoreError> {
        let (name, sql) = match field {
            ClientField::FirstName => (
                "update_client_first_name",
                "UPDATE client SET first_name = $1 WHERE id = $2",
            ),
            ClientField::LastName => (
                "update_client_last_name",
                "UPDATE client SET last_name = $1 WHERE id = $2",
            ),
            ClientField::Email => (
                "update_client_email",
                "UPDATE client SET email = $1 WHERE id = $2",
            ),
        };

        let mut session = self.gateway.session(name).await?;
        let result = sqlx::query(sql)
            .bind(value)
            .bind(client_id)
            .execute(session.conn())
            .await;

        session.finish(result).await?;
        Ok(())
    }

    /// Replace `change.old` with `change.new` for the given client.
    pub async fn update_phone(
        &self,
        client_id: i32,
        change: PhoneChange,
    ) -> Result<(), StoreError> {
        let mut session = self.gateway.session("update_client_phone").await?;
        let result = sqlx::query(
            r#"
            UPDATE client_phone
            SET phone_number = $1
            WHERE id = $2 AND phone_number = $3
            "#,
        )
        .bind(change.new)
        .bind(client_id)
        .bind(change.old)
        .execute(session.conn())
        .await;

        session.finish(result).await?;
        Ok(())
    }

    /// Delete the phone row matching both client and number.
    pub async fn delete_phone(&self, client_id: i32, phone: i64) -> Result<(), StoreError> {
        let mut session = self.gateway.session("delete_phone").await?;
        let result = sqlx::query(
            r#"
            DELETE FROM client_phone
            WHERE id = $1 AND phone_number = $2
            "#,
        )
        .bind(client_id)
        .bind(phone)
        .execute(session.conn())
        .await;

        session.finish(result).await?;
        Ok(())
    }

    /// Delete the client row only. Phones must be removed beforehand.
    pub async fn delete(&self, client_id: i32) -> Result<(), StoreError> {
        let mut session = self.gateway.session("delete_client").await?;
        let result = sqlx::query("DELETE FROM client WHERE id = $1")
            .bind(client_id)
            .execute(session.conn())
            .await;

        session.finish(result).await?;
        Ok(())
    }

    /// Find client by ID.
    pub async fn find_by_id(&self, client_id: i32) -> Result<Option<Client>, StoreError> {
        let mut session = self.gateway.session("find_client_by_id").await?;
        let result = sqlx::query_as::<_, ClientEntity>(
            r#"
            SELECT id, first_name, last_name, email
            FROM client
            WHERE id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(session.conn())
        .await;

        let entity = session.finish(result).await?;
        Ok(entity.map(Into::into))
    }

    /// List the phone numbers of a client, ascending.
    pub async fn list_phones(&self, client_id: i32) -> Result<Vec<i64>, StoreError> {
        let mut session = self.gateway.session("list_client_phones").await?;
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT phone_number
            FROM client_phone
            WHERE id = $1
            ORDER BY phone_number
            "#,
        )
        .bind(client_id)
        .fetch_all(session.conn())
        .await;

        session.finish(result).await
    }

    /// Run the single-column search query for one predicate.
    pub async fn search(
        &self,
        predicate: &SearchPredicate,
    ) -> Result<Vec<ClientPhoneRow>, StoreError> {
        let (name, sql) = match predicate {
            SearchPredicate::Text(ClientField::FirstName, _) => {
                ("search_by_first_name", SEARCH_BY_FIRST_NAME)
            }
            SearchPredicate::Text(ClientField::LastName, _) => {
                ("search_by_last_name", SEARCH_BY_LAST_NAME)
            }
            SearchPredicate::Text(ClientField::Email, _) => ("search_by_email", SEARCH_BY_EMAIL),
            SearchPredicate::Phone(_) => ("search_by_phone", SEARCH_BY_PHONE),
        };

        let query = sqlx::query_as::<_, ClientPhoneEntity>(sql);
        let query = match predicate {
            SearchPredicate::Text(_, value) => query.bind(value.as_str()),
            SearchPredicate::Phone(phone) => query.bind(*phone),
        };

        let mut session = self.gateway.session(name).await?;
        let result = query.fetch_all(session.conn()).await;

        let entities = session.finish(result).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }

    /// All clients joined with all phones, ordered by client id.
    pub async fn export_rows(&self) -> Result<Vec<ExportRow>, StoreError> {
        let mut session = self.gateway.session("export_all").await?;
        let result = sqlx::query_as::<_, ExportRowEntity>(
            r#"
            SELECT
                COALESCE(c.id, p.id) AS client_id,
                c.first_name,
                c.last_name,
                c.email,
                p.phone_number
            FROM client c
            FULL OUTER JOIN client_phone p ON p.id = c.id
            ORDER BY client_id, p.phone_number
            "#,
        )
        .fetch_all(session.conn())
        .await;

        let entities = session.finish(result).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}
