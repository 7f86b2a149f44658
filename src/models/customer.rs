use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};

use crate::validation::{is_valid_email, present, ValidationError};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub service_choice: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub service_choice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub service_choice: Option<String>,
    pub registered_at: String,
}

impl NewCustomer {
    pub fn validate(self) -> Result<ValidCustomer, ValidationError> {
        let (Some(name), Some(email)) = (present(self.name), present(self.email)) else {
            return Err(ValidationError::MissingFields("name and email are required"));
        };
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ValidCustomer {
            name,
            email,
            phone: present(self.phone),
            address: present(self.address),
            service_choice: present(self.service_choice),
        })
    }
}

impl Customer {
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            service_choice: row.try_get("service_choice")?,
            registered_at: row.try_get("registered_at")?,
        })
    }
}
