//! Client domain model.

use serde::Serialize;
use shared::validation::validate_name;
use validator::Validate;

/// A person record, the root entity of the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Request payload for adding a client.
///
/// The email is free text; only names are checked.
#[derive(Debug, Clone, Validate)]
pub struct NewClient {
    #[validate(custom(function = "validate_name"))]
    pub first_name: String,

    #[validate(custom(function = "validate_name"))]
    pub last_name: String,

    pub email: String,
}

impl NewClient {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// Updatable text columns of the client relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientField {
    FirstName,
    LastName,
    Email,
}

impl ClientField {
    /// Column name in the client relation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for ClientField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Replacement of one phone number by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneChange {
    pub old: i64,
    pub new: i64,
}

/// Partial update of a client. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Validate)]
pub struct ClientUpdate {
    #[validate(custom(function = "validate_name"))]
    pub first_name: Option<String>,

    #[validate(custom(function = "validate_name"))]
    pub last_name: Option<String>,

    pub email: Option<String>,

    pub phone: Option<PhoneChange>,
}

impl ClientUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn phone(mut self, old: i64, new: i64) -> Self {
        self.phone = Some(PhoneChange { old, new });
        self
    }

    /// Text column changes in statement order: first name, last name, email.
    pub fn field_changes(&self) -> Vec<(ClientField, &str)> {
        [
            (ClientField::FirstName, self.first_name.as_deref()),
            (ClientField::LastName, self.last_name.as_deref()),
            (ClientField::Email, self.email.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    /// Returns true when the update carries no change at all.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

/// One row of the client LEFT JOIN client_phone search projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientPhoneRow {
    pub client_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<i64>,
}

/// One row of the full outer join used for exports.
///
/// Either side may be missing, so every column is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRow {
    pub client_id: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<i64>,
}

impl ExportRow {
    /// Fields rendered as text, missing values as empty strings.
    pub fn text_fields(&self) -> [String; 5] {
        [
            self.client_id.map(|v| v.to_string()).unwrap_or_default(),
            self.first_name.clone().unwrap_or_default(),
            self.last_name.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.phone_number.map(|v| v.to_string()).unwrap_or_default(),
        ]
    }
}

/// Serialized as a five element array.
impl Serialize for ExportRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        (
            self.client_id,
            &self.first_name,
            &self.last_name,
            &self.email,
            self.phone_number,
        )
            .serialize(serializer)
    }
}
