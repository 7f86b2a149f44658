//! Price estimate shown next to the food order form.
//!
//! The surcharge for side dishes is display-only: the order endpoint stores the
//! total the page submitted and falls back to `unit_price * quantity` without
//! it.

use serde::Serialize;
use serde_json::Value;

use crate::validation::{amount_or_zero, quantity_or_default};

/// Flat surcharge for one side dish, per order.
pub const EXTRA_SURCHARGE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Extra {
    Rice,
    Corn,
}

impl Extra {
    /// Accepts the English names and the labels used on the menu.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "rice" | "arroz" => Some(Self::Rice),
            "corn" | "elote" => Some(Self::Corn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    pub dish: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub extra: Option<Extra>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    #[serde(flatten)]
    pub draft: OrderDraft,
    pub extra_price: f64,
    pub total: f64,
    pub display: String,
}

impl OrderDraft {
    /// Fills the order form from a catalog entry. Quantity defaults to 1 and
    /// the unit price to 0 when missing or unparsable.
    pub fn prefill(dish: &str, quantity: Option<&Value>, unit_price: Option<&Value>) -> Self {
        Self {
            dish: dish.trim().to_string(),
            quantity: quantity_or_default(quantity),
            unit_price: amount_or_zero(unit_price),
            extra: None,
        }
    }

    pub fn with_extra(mut self, extra: Option<Extra>) -> Self {
        self.extra = extra;
        self
    }

    pub fn extra_price(&self) -> f64 {
        if self.extra.is_some() {
            EXTRA_SURCHARGE
        } else {
            0.0
        }
    }

    pub fn subtotal(&self) -> f64 {
        round_cents(self.unit_price * self.quantity as f64)
    }

    pub fn total(&self) -> f64 {
        round_cents(self.subtotal() + self.extra_price())
    }

    /// Empty until a unit price is known.
    pub fn display(&self) -> String {
        if self.unit_price <= 0.0 {
            return String::new();
        }
        format!(
            "Unit price: ${:.2} · Estimated total: ${:.2}",
            self.unit_price,
            self.total()
        )
    }

    pub fn quote(self) -> Quote {
        Quote {
            extra_price: self.extra_price(),
            total: self.total(),
            display: self.display(),
            draft: self,
        }
    }
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
