use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

use crate::error::{CatalogError, CatalogResult};

/// A stored inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Plant {
    /// Assigned by storage on creation; never changes.
    pub id: i64,
    pub name: String,
    /// Image URL or path.
    pub image: String,
    pub price: f64,
    pub is_in_stock: bool,
}

/// A validated plant that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlant {
    pub name: String,
    pub image: String,
    pub price: f64,
    pub is_in_stock: bool,
}

impl NewPlant {
    /// Builds a plant that starts out in stock.
    pub fn new(name: impl Into<String>, image: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            price,
            is_in_stock: true,
        }
    }

    pub fn with_stock(mut self, is_in_stock: bool) -> Self {
        self.is_in_stock = is_in_stock;
        self
    }
}

/// Reads a price from a JSON number or a numeric string.
///
/// Surrounding whitespace in strings is ignored. Non-finite values are rejected since they
/// cannot be written back out as JSON.
pub fn parse_price(value: &JsonValue) -> CatalogResult<f64> {
    let parsed = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(price) if price.is_finite() => Ok(price),
        _ => Err(CatalogError::InvalidValue(format!(
            "expected a number, got {}",
            value
        ))),
    }
}
