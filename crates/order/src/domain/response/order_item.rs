use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Transfer representation of an order item, accepted as request body on
/// create/update and returned by every read endpoint.
///
/// `id` must be absent when requesting creation. Timestamps are assigned by
/// the repository and ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemDto {
    #[validate(range(min = 1))]
    #[serde(default)]
    pub id: Option<i64>,

    #[validate(range(min = 1))]
    #[serde(rename = "order_id")]
    pub order_id: i64,

    #[validate(range(min = 1))]
    #[serde(rename = "product_id")]
    pub product_id: i64,

    #[validate(length(min = 1, max = 255))]
    #[serde(rename = "product_name")]
    pub product_name: String,

    #[validate(range(min = 1))]
    pub quantity: i32,

    #[validate(range(min = 0))]
    pub price: i64,

    #[serde(rename = "created_at", default)]
    pub created_at: Option<String>,

    #[serde(rename = "updated_at", default)]
    pub updated_at: Option<String>,
}
