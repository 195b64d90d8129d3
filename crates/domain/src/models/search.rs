//! Client search request and predicates.

use super::client::{ClientField, ClientPhoneRow};

/// Optional filters for a client search.
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSearch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<i64>,
}

impl ClientSearch {
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

    pub fn phone(mut self, value: i64) -> Self {
        self.phone = Some(value);
        self
    }

    /// Supplied predicates in evaluation order: first name, last name,
    /// email, phone.
    pub fn predicates(&self) -> Vec<SearchPredicate> {
        let text = |field: ClientField, value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| SearchPredicate::Text(field, v.to_string()))
        };

        [
            text(ClientField::FirstName, &self.first_name),
            text(ClientField::LastName, &self.last_name),
            text(ClientField::Email, &self.email),
            self.phone.map(SearchPredicate::Phone),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A single field/value pair of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPredicate {
    Text(ClientField, String),
    Phone(i64),
}

impl SearchPredicate {
    /// Exact comparison against the predicate's own column.
    pub fn matches(&self, row: &ClientPhoneRow) -> bool {
        match self {
            Self::Text(ClientField::FirstName, value) => row.first_name == *value,
            Self::Text(ClientField::LastName, value) => row.last_name == *value,
            Self::Text(ClientField::Email, value) => row.email == *value,
            Self::Phone(phone) => row.phone_number == Some(*phone),
        }
    }
}
