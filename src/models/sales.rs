use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::{sqlite::SqliteRow, Row};

use crate::validation::{present, ValidationError};

pub const DEFAULT_STATUS: &str = "pending";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewSalesRequest {
    pub customer: Option<SalesCustomer>,
    /// Kept untyped so a non-list answers with a validation message rather
    /// than a decoding error.
    pub items: Option<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SalesCustomer {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One requested product. Price-like fields are stored as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, PartialEq)]
pub struct ValidSalesRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Vec<SalesItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SalesRequest {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub items: Value,
    pub status: String,
    pub created_at: String,
}

impl NewSalesRequest {
    pub fn validate(self) -> Result<ValidSalesRequest, ValidationError> {
        let customer = self.customer.unwrap_or_default();
        let (Some(customer_name), Some(customer_phone)) = (present(customer.name), present(customer.phone)) else {
            return Err(ValidationError::MissingCustomer);
        };

        let items = match self.items {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(ValidationError::EmptyItems),
        };
        let items = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidSalesRequest {
            customer_name,
            customer_phone,
            customer_email: present(customer.email),
            items,
        })
    }
}

fn parse_item(index: usize, item: Value) -> Result<SalesItem, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidItem { index, reason };

    let mut item: SalesItem = serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;
    item.name = item.name.trim().to_string();
    if item.name.is_empty() {
        return Err(invalid("name is required".into()));
    }
    if item.quantity == Some(0) {
        return Err(invalid("quantity must be at least 1".into()));
    }
    Ok(item)
}

impl SalesRequest {
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let raw_items: String = row.try_get("items")?;
        let items = serde_json::from_str(&raw_items).unwrap_or(Value::String(raw_items));

        Ok(Self {
            id: row.try_get("id")?,
            customer_name: row.try_get("customer_name")?,
            customer_phone: row.try_get("customer_phone")?,
            customer_email: row.try_get("customer_email")?,
            items,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn request(body: Value) -> Result<ValidSalesRequest, ValidationError> {
        serde_json::from_value::<NewSalesRequest>(body).unwrap().validate()
    }

    #[rstest]
    #[case(json!({ "items": [{ "name": "Tóner compatible" }] }))]
    #[case(json!({ "customer": { "name": "Ana" }, "items": [{ "name": "Tóner compatible" }] }))]
    #[case(json!({ "customer": { "phone": "555" }, "items": [] }))]
    fn customer_is_checked_first(#[case] body: Value) {
        assert_eq!(request(body), Err(ValidationError::MissingCustomer));
    }

    #[rstest]
    #[case(json!({ "customer": { "name": "Ana", "phone": "555" } }))]
    #[case(json!({ "customer": { "name": "Ana", "phone": "555" }, "items": [] }))]
    #[case(json!({ "customer": { "name": "Ana", "phone": "555" }, "items": "toner" }))]
    #[case(json!({ "customer": { "name": "Ana", "phone": "555" }, "items": { "name": "toner" } }))]
    fn items_must_be_a_non_empty_list(#[case] body: Value) {
        assert_eq!(request(body), Err(ValidationError::EmptyItems));
    }

    #[rstest]
    #[case(json!("toner"))]
    #[case(json!({ "quantity": 1 }))]
    #[case(json!({ "name": "  " }))]
    #[case(json!({ "name": "Tóner", "quantity": 0 }))]
    #[case(json!({ "name": "Tóner", "quantity": -1 }))]
    fn rejects_malformed_items(#[case] item: Value) {
        let body = json!({
            "customer": { "name": "Ana", "phone": "555" },
            "items": [{ "name": "Recarga" }, item]
        });
        assert!(matches!(
            request(body),
            Err(ValidationError::InvalidItem { index: 1, .. })
        ));
    }

    #[test]
    fn keeps_price_fields_verbatim() {
        let valid = request(json!({
            "customer": { "name": "Ana", "phone": "555", "email": "" },
            "items": [{ "name": "Laptop reacondicionada", "quantity": 1, "price": "Desde $5,000" }]
        }))
        .unwrap();

        assert_eq!(valid.customer_email, None);
        assert_eq!(
            serde_json::to_value(&valid.items).unwrap(),
            json!([{ "name": "Laptop reacondicionada", "quantity": 1, "price": "Desde $5,000" }])
        );
    }
}
