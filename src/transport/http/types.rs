use crate::app::catalog_service::CatalogService;
use crate::domain::plant::{parse_price, NewPlant};
use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Create payload.
///
/// Fields are kept as raw JSON so that type problems are reported by `validate` in a fixed
/// order instead of failing extraction. `None` means the key is absent; an explicit `null`
/// is present and rejected like any other wrong-typed value.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct CreatePlantRequest {
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String)]
    pub name: Option<JsonValue>,
    /// Image URL or path.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = String)]
    pub image: Option<JsonValue>,
    /// A number, or a string holding a number.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = f64)]
    pub price: Option<JsonValue>,
    /// Defaults to `true`.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<bool>)]
    pub is_in_stock: Option<JsonValue>,
}

impl CreatePlantRequest {
    /// Checks presence of the required fields, then the price, then the remaining types.
    pub fn validate(self) -> CatalogResult<NewPlant> {
        let (Some(name), Some(image), Some(price)) = (self.name, self.image, self.price) else {
            return Err(CatalogError::MissingFields);
        };
        let price = parse_price(&price)?;
        let name = string_field("name", name)?;
        let image = string_field("image", image)?;
        let is_in_stock = match self.is_in_stock {
            None => true,
            Some(JsonValue::Bool(b)) => b,
            Some(other) => return Err(wrong_type("is_in_stock", "a boolean", &other)),
        };
        Ok(NewPlant::new(name, image, price).with_stock(is_in_stock))
    }
}

fn string_field(field: &str, value: JsonValue) -> CatalogResult<String> {
    match value {
        JsonValue::String(s) => Ok(s),
        other => Err(wrong_type(field, "a string", &other)),
    }
}

fn wrong_type(field: &str, expected: &str, got: &JsonValue) -> CatalogError {
    CatalogError::InvalidRequest(format!(
        "Invalid value for {}: expected {}, got {}",
        field, expected, got
    ))
}

#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct UpdatePlantRequest {
    /// Required. `false` is a valid value; only absence (or `null`) is rejected.
    #[serde(default)]
    pub is_in_stock: Option<bool>,
}

impl UpdatePlantRequest {
    pub fn validate(self) -> CatalogResult<bool> {
        self.is_in_stock.ok_or_else(CatalogError::no_valid_data)
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}
