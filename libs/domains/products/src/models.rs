use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Product record as stored and served over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque 20-character identifier
    pub id: String,
    /// Category this product belongs to, if any
    pub category_id: Option<String>,
    /// Display label, may be empty
    pub label: String,
}

/// Payload for creating a product.
///
/// `category_id` is stored as given and intentionally not checked against
/// existing categories.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(max = 256))]
    #[serde(default)]
    pub label: String,
    pub category_id: Option<String>,
}

/// Payload for updating a product. Both fields are replaced.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(max = 256))]
    #[serde(default)]
    pub label: String,
    pub category_id: Option<String>,
}

impl Product {
    pub fn new(id: String, input: CreateProduct) -> Self {
        Self {
            id,
            category_id: input.category_id,
            label: input.label,
        }
    }

    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.category_id = input.category_id;
        self.label = input.label;
    }
}
