use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};

use crate::validation::{is_valid_email, present, ValidationError};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidContactMessage {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub message: String,
    pub sent_at: String,
}

impl NewContactMessage {
    pub fn validate(self) -> Result<ValidContactMessage, ValidationError> {
        let fields = (
            present(self.name),
            present(self.phone),
            present(self.email),
            present(self.service),
            present(self.message),
        );
        let (Some(name), Some(phone), Some(email), Some(service), Some(message)) = fields else {
            return Err(ValidationError::MissingFields("all fields are required"));
        };
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ValidContactMessage {
            name,
            phone,
            email,
            service,
            message,
        })
    }
}

impl ContactMessage {
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            service: row.try_get("service")?,
            message: row.try_get("message")?,
            sent_at: row.try_get("sent_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> NewContactMessage {
        NewContactMessage {
            name: Some("Luis".into()),
            phone: Some("555-0101".into()),
            email: Some("luis@correo.mx".into()),
            service: Some("repair".into()),
            message: Some("Mi laptop no enciende".into()),
        }
    }

    #[test]
    fn accepts_complete_message() {
        let message = complete().validate().unwrap();
        assert_eq!(message.service, "repair");
    }

    #[test]
    fn every_field_is_mandatory() {
        let strip: [fn(&mut NewContactMessage); 5] = [
            |m| m.name = None,
            |m| m.phone = Some(" ".into()),
            |m| m.email = None,
            |m| m.service = Some(String::new()),
            |m| m.message = None,
        ];
        for strip_field in strip {
            let mut payload = complete();
            strip_field(&mut payload);
            assert_eq!(
                payload.validate(),
                Err(ValidationError::MissingFields("all fields are required"))
            );
        }
    }

    #[test]
    fn checks_email_format() {
        let payload = NewContactMessage {
            email: Some("luis @correo.mx".into()),
            ..complete()
        };
        assert_eq!(payload.validate(), Err(ValidationError::InvalidEmail));
    }
}
