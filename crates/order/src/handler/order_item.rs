use crate::{
    abstract_trait::order_item::DynOrderItemService,
    domain::{
        requests::{order_item::SearchOrderItems, page::Pageable},
        response::order_item::OrderItemDto,
    },
    middleware::SimpleValidatedJson,
    state::AppState,
    utils::{HeaderUtil, generate_pagination_headers, generate_search_pagination_headers},
};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use tracing::{debug, info};
use utoipa_axum::router::OpenApiRouter;

const ENTITY_NAME: &str = "orderItem";
const RESOURCE_URL: &str = "/api/order-items";
const SEARCH_URL: &str = "/api/_search/order-items";

#[utoipa::path(
    post,
    path = "/api/order-items",
    tag = "Order Item",
    request_body = OrderItemDto,
    responses(
        (status = 201, description = "Order item created", body = OrderItemDto),
        (status = 400, description = "Order item already has an id or is invalid", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_order_item(
    Extension(service): Extension<DynOrderItemService>,
    Extension(header_util): Extension<HeaderUtil>,
    SimpleValidatedJson(body): SimpleValidatedJson<OrderItemDto>,
) -> Result<Response, HttpError> {
    debug!("REST request to save OrderItem : {body:?}");
    create(&service, &header_util, &body).await
}

async fn create(
    service: &DynOrderItemService,
    header_util: &HeaderUtil,
    body: &OrderItemDto,
) -> Result<Response, HttpError> {
    if body.id.is_some() {
        let message = "A new orderItem cannot already have an ID";
        let headers = header_util.create_failure_alert(ENTITY_NAME, "idexists", message);
        let error = ErrorResponse {
            status: "error".into(),
            message: message.into(),
        };
        return Ok((StatusCode::BAD_REQUEST, headers, Json(error)).into_response());
    }

    let result = service.create(body).await?;
    let id = result
        .id
        .ok_or_else(|| HttpError::Internal("Created order item has no id".into()))?;

    let mut headers = header_util.create_entity_creation_alert(ENTITY_NAME, &id.to_string());
    let location = HeaderValue::from_str(&format!("{RESOURCE_URL}/{id}"))
        .map_err(|e| HttpError::Internal(format!("Invalid Location header: {e}")))?;
    headers.insert(LOCATION, location);

    info!("✅ Created order item {id}");
    Ok((StatusCode::CREATED, headers, Json(result)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/order-items",
    tag = "Order Item",
    request_body = OrderItemDto,
    responses(
        (status = 200, description = "Order item updated, or inserted under its id", body = OrderItemDto),
        (status = 201, description = "Order item had no id and was created", body = OrderItemDto),
        (status = 400, description = "Invalid order item", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_order_item(
    Extension(service): Extension<DynOrderItemService>,
    Extension(header_util): Extension<HeaderUtil>,
    SimpleValidatedJson(body): SimpleValidatedJson<OrderItemDto>,
) -> Result<Response, HttpError> {
    debug!("REST request to update OrderItem : {body:?}");

    let Some(id) = body.id else {
        return create(&service, &header_util, &body).await;
    };

    let result = service.update(&body).await?;
    let headers = header_util.create_entity_update_alert(ENTITY_NAME, &id.to_string());

    Ok((StatusCode::OK, headers, Json(result)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/order-items",
    tag = "Order Item",
    params(Pageable),
    responses(
        (status = 200, description = "One page of order items", body = Vec<OrderItemDto>),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_all_order_items(
    Extension(service): Extension<DynOrderItemService>,
    Query(params): Query<Pageable>,
) -> Result<impl IntoResponse, HttpError> {
    debug!("REST request to get a page of OrderItems");

    let request = params.resolve()?;
    let page = service.find_all(&request).await?;
    let headers = generate_pagination_headers(&page, RESOURCE_URL);

    Ok((StatusCode::OK, headers, Json(page.content)))
}

#[utoipa::path(
    get,
    path = "/api/order-items/{id}",
    tag = "Order Item",
    params(
        ("id" = i64, Path, description = "ID of the order item")
    ),
    responses(
        (status = 200, description = "The order item", body = OrderItemDto),
        (status = 404, description = "Order item not found", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_order_item(
    Extension(service): Extension<DynOrderItemService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    debug!("REST request to get OrderItem : {id}");

    let item = service
        .find_one(id)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Order item {id} not found")))?;

    Ok((StatusCode::OK, Json(item)))
}

#[utoipa::path(
    delete,
    path = "/api/order-items/{id}",
    tag = "Order Item",
    params(
        ("id" = i64, Path, description = "ID of the order item")
    ),
    responses(
        (status = 200, description = "Order item deleted"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_order_item(
    Extension(service): Extension<DynOrderItemService>,
    Extension(header_util): Extension<HeaderUtil>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    debug!("REST request to delete OrderItem : {id}");

    service.delete(id).await?;
    let headers = header_util.create_entity_deletion_alert(ENTITY_NAME, &id.to_string());

    Ok((StatusCode::OK, headers))
}

#[utoipa::path(
    get,
    path = "/api/_search/order-items",
    tag = "Order Item",
    params(SearchOrderItems),
    responses(
        (status = 200, description = "One page of matching order items", body = Vec<OrderItemDto>),
        (status = 400, description = "Malformed query or paging parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_order_items(
    Extension(service): Extension<DynOrderItemService>,
    Query(params): Query<SearchOrderItems>,
) -> Result<impl IntoResponse, HttpError> {
    debug!(
        "REST request to search for a page of OrderItems for query {}",
        params.query
    );

    let request = params.pageable().resolve()?;
    let page = service.search(&params.query, &request).await?;
    let headers = generate_search_pagination_headers(&params.query, &page, SEARCH_URL);

    Ok((StatusCode::OK, headers, Json(page.content)))
}

pub fn order_item_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            RESOURCE_URL,
            get(get_all_order_items)
                .post(create_order_item)
                .put(update_order_item),
        )
        .route(
            "/api/order-items/{id}",
            get(get_order_item).delete(delete_order_item),
        )
        .route(SEARCH_URL, get(search_order_items))
        .layer(Extension(app_state.di_container.order_item_service.clone()))
        .layer(Extension(app_state.header_util.clone()))
}
