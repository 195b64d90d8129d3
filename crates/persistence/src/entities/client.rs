//! Client entities (database row mappings).

use sqlx::FromRow;

/// Database row mapping for the client table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientEntity {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<ClientEntity> for domain::models::Client {
    fn from(entity: ClientEntity) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
        }
    }
}

/// Row of client LEFT JOIN client_phone.
#[derive(Debug, Clone, FromRow)]
pub struct ClientPhoneEntity {
    pub client_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<i64>,
}

impl From<ClientPhoneEntity> for domain::models::ClientPhoneRow {
    fn from(entity: ClientPhoneEntity) -> Self {
        Self {
            client_id: entity.client_id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone_number: entity.phone_number,
        }
    }
}

/// Row of client FULL OUTER JOIN client_phone.
#[derive(Debug, Clone, FromRow)]
pub struct ExportRowEntity {
    pub client_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<i64>,
}

impl From<ExportRowEntity> for domain::models::ExportRow {
    fn from(entity: ExportRowEntity) -> Self {
        Self {
            client_id: entity.client_id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone_number: entity.phone_number,
        }
    }
}
