use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{sqlite::SqliteRow, Row};

use crate::shop::pricing::{round_cents, Extra, OrderDraft};
use crate::validation::{amount, amount_or_zero, present, quantity_or_default, ValidationError};

pub const DEFAULT_DELIVERY_TYPE: &str = "pickup";

/// Order form body. Numeric fields arrive as numbers or strings depending on
/// how the page serialized them.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dish: Option<String>,
    pub quantity: Option<Value>,
    pub notes: Option<String>,
    pub delivery_type: Option<String>,
    pub unit_price: Option<Value>,
    pub total_price: Option<Value>,
}

#[derive(Debug, PartialEq)]
pub struct ValidOrder {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dish: String,
    pub quantity: i64,
    pub notes: Option<String>,
    pub delivery_type: String,
    pub unit_price: f64,
    pub total_price: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FoodOrder {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub dish: String,
    pub quantity: i64,
    pub notes: Option<String>,
    pub delivery_type: String,
    pub unit_price: f64,
    pub total_price: f64,
    pub created_at: String,
}

/// Body of a price estimate request from the order form.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteRequest {
    pub dish: Option<String>,
    pub quantity: Option<Value>,
    pub unit_price: Option<Value>,
    pub extra: Option<String>,
}

impl NewOrder {
    pub fn validate(self) -> Result<ValidOrder, ValidationError> {
        let (Some(name), Some(dish)) = (present(self.name), present(self.dish)) else {
            return Err(ValidationError::MissingFields("name and dish are required"));
        };

        let quantity = quantity_or_default(self.quantity.as_ref());
        let unit_price = round_cents(amount_or_zero(self.unit_price.as_ref()));
        let total_price = match amount(self.total_price.as_ref()) {
            Some(total) => round_cents(total),
            None => round_cents(unit_price * quantity as f64),
        };

        Ok(ValidOrder {
            name,
            phone: present(self.phone),
            address: present(self.address),
            dish,
            quantity,
            notes: present(self.notes),
            delivery_type: present(self.delivery_type)
                .unwrap_or_else(|| DEFAULT_DELIVERY_TYPE.to_string()),
            unit_price,
            total_price,
        })
    }
}

impl QuoteRequest {
    pub fn into_draft(self) -> OrderDraft {
        let extra = self.extra.as_deref().and_then(Extra::parse);
        OrderDraft::prefill(
            self.dish.as_deref().unwrap_or_default(),
            self.quantity.as_ref(),
            self.unit_price.as_ref(),
        )
        .with_extra(extra)
    }
}

impl FoodOrder {
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            dish: row.try_get("dish")?,
            quantity: row.try_get("quantity")?,
            notes: row.try_get("notes")?,
            delivery_type: row.try_get("delivery_type")?,
            unit_price: row.try_get("unit_price")?,
            total_price: row.try_get("total_price")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
