use crate::domain::requests::page::Pageable;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters of `GET /api/_search/order-items`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchOrderItems {
    /// Query-string expression, e.g. `product_name:espresso AND quantity:2`
    pub query: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl SearchOrderItems {
    pub fn pageable(&self) -> Pageable {
        Pageable {
            page: self.page,
            size: self.size,
            sort: self.sort.clone(),
        }
    }
}
