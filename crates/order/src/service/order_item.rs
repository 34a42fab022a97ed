use crate::{
    abstract_trait::order_item::{
        DynOrderItemCache, DynOrderItemRepository, DynOrderItemSearchRepository,
        OrderItemServiceTrait,
    },
    domain::{
        requests::page::PageRequest,
        response::{order_item::OrderItemDto, page::Page},
    },
    mapper::OrderItemMapper,
    model::order_item::OrderItem,
    search::check_query,
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

/// Keeps the relational store and the search index in step for every
/// write and serves reads from the appropriate side.
#[derive(Clone)]
pub struct OrderItemService {
    repository: DynOrderItemRepository,
    search: DynOrderItemSearchRepository,
    cache: DynOrderItemCache,
    metrics: Metrics,
}

impl OrderItemService {
    pub fn new(
        repository: DynOrderItemRepository,
        search: DynOrderItemSearchRepository,
        cache: DynOrderItemCache,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "order_item_service", "OrderItemService");

        Self {
            repository,
            search,
            cache,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("order-item-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        operation: &str,
        outcome: &Result<T, ServiceError>,
    ) {
        let (status, status_str, message) = match outcome {
            Ok(_) => (StatusUtils::Success, "SUCCESS", format!("{operation} succeeded")),
            Err(e) => (StatusUtils::Error, "ERROR", format!("{operation} failed: {e}")),
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.clone()),
            ],
        );

        match status {
            StatusUtils::Success => info!("✅ {message}"),
            StatusUtils::Error => error!("❌ {message}"),
        }

        self.metrics.record(method, operation, status, elapsed);

        tracing_ctx.cx.span().end();
    }

    /// Writes to the relational store first, then mirrors the stored row
    /// into the search index and the cache.
    async fn persist(&self, dto: &OrderItemDto) -> Result<OrderItemDto, ServiceError> {
        if let Some(id) = dto.id {
            self.cache.evict(id).await;
        }

        let entity = OrderItemMapper::to_entity(dto);
        let saved = self.repository.save(&entity).await?;
        self.search.save(&saved).await?;

        let result = OrderItemMapper::to_dto(&saved);
        self.cache.put(&result).await;
        Ok(result)
    }
}

#[async_trait]
impl OrderItemServiceTrait for OrderItemService {
    async fn create(&self, dto: &OrderItemDto) -> Result<OrderItemDto, ServiceError> {
        info!("🆕 Creating order item for order {}", dto.order_id);

        let tracing_ctx = self.start_tracing(
            "create_order_item",
            vec![
                KeyValue::new("order_id", dto.order_id),
                KeyValue::new("product_id", dto.product_id),
            ],
        );

        let outcome = if dto.id.is_some() {
            Err(ServiceError::IdExists)
        } else {
            self.persist(dto).await
        };

        self.complete_tracing(&tracing_ctx, Method::Post, "create", &outcome);
        outcome
    }

    async fn update(&self, dto: &OrderItemDto) -> Result<OrderItemDto, ServiceError> {
        let Some(id) = dto.id else {
            return self.create(dto).await;
        };

        info!("🔄 Updating order item {id}");

        let tracing_ctx =
            self.start_tracing("update_order_item", vec![KeyValue::new("order_item_id", id)]);

        let outcome = self.persist(dto).await;

        self.complete_tracing(&tracing_ctx, Method::Put, "update", &outcome);
        outcome
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<OrderItemDto>, ServiceError> {
        info!(
            "📦 Finding order items | page: {}, size: {}",
            page.page, page.size
        );

        let tracing_ctx = self.start_tracing(
            "find_all_order_items",
            vec![
                KeyValue::new("page", i64::from(page.page)),
                KeyValue::new("size", i64::from(page.size)),
            ],
        );

        let outcome = self
            .repository
            .find_all(page)
            .await
            .map(to_dto_page)
            .map_err(ServiceError::from);

        self.complete_tracing(&tracing_ctx, Method::Get, "find_all", &outcome);
        outcome
    }

    async fn find_one(&self, id: i64) -> Result<Option<OrderItemDto>, ServiceError> {
        info!("🔍 Finding order item {id}");

        let tracing_ctx =
            self.start_tracing("find_order_item", vec![KeyValue::new("order_item_id", id)]);

        if let Some(cached) = self.cache.get(id).await {
            info!("✅ Found order item {id} in cache");
            let outcome = Ok(Some(cached));
            self.complete_tracing(&tracing_ctx, Method::Get, "find_one", &outcome);
            return outcome;
        }

        let outcome = self
            .repository
            .find_one(id)
            .await
            .map(|found| found.as_ref().map(OrderItemMapper::to_dto))
            .map_err(ServiceError::from);

        if let Ok(Some(found)) = &outcome {
            self.cache.put(found).await;
        }

        self.complete_tracing(&tracing_ctx, Method::Get, "find_one", &outcome);
        outcome
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        info!("🗑️ Deleting order item {id}");

        let tracing_ctx =
            self.start_tracing("delete_order_item", vec![KeyValue::new("order_item_id", id)]);

        let outcome = async {
            self.repository.delete(id).await?;
            self.cache.evict(id).await;
            self.search.delete(id).await?;
            Ok::<_, ServiceError>(())
        }
        .await;

        self.complete_tracing(&tracing_ctx, Method::Delete, "delete", &outcome);
        outcome
    }

    async fn search(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Page<OrderItemDto>, ServiceError> {
        info!("🔎 Searching order items for query '{query}'");

        let tracing_ctx = self.start_tracing(
            "search_order_items",
            vec![
                KeyValue::new("query", query.to_string()),
                KeyValue::new("page", i64::from(page.page)),
            ],
        );

        let outcome = match check_query(query) {
            Ok(()) => self
                .search
                .search(query, page)
                .await
                .map(to_dto_page)
                .map_err(ServiceError::from),
            Err(e) => Err(ServiceError::InvalidQuery(e.to_string())),
        };

        self.complete_tracing(&tracing_ctx, Method::Get, "search", &outcome);
        outcome
    }
}

fn to_dto_page(page: Page<OrderItem>) -> Page<OrderItemDto> {
    Page::new(
        OrderItemMapper::to_dtos(&page.content),
        page.number,
        page.size,
        page.total_elements,
    )
}
