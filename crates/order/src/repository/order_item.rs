use crate::{
    abstract_trait::order_item::OrderItemRepositoryTrait,
    domain::{requests::page::PageRequest, response::page::Page},
    model::order_item::OrderItem as OrderItemModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderItemRepository {
    db: ConnectionPool,
}

impl OrderItemRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn insert(&self, item: &OrderItemModel) -> Result<OrderItemModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderItemModel>(
            r#"
            INSERT INTO order_items (order_id, product_id, product_name, quantity, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING id, order_id, product_id, product_name, quantity, price, created_at, updated_at
            "#,
        )
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(item.price)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order item for order {}: {:?}",
                item.order_id, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order item {:?} for order {}",
            result.id, result.order_id
        );
        Ok(result)
    }

    /// Updates the row with `id`, or inserts it under that id. The id
    /// sequence is moved past the largest id so generated ids never collide
    /// with client-chosen ones.
    async fn upsert(&self, id: i64, item: &OrderItemModel) -> Result<OrderItemModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let result = sqlx::query_as::<_, OrderItemModel>(
            r#"
            INSERT INTO order_items (id, order_id, product_id, product_name, quantity, price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp, current_timestamp)
            ON CONFLICT (id) DO UPDATE
            SET order_id     = EXCLUDED.order_id,
                product_id   = EXCLUDED.product_id,
                product_name = EXCLUDED.product_name,
                quantity     = EXCLUDED.quantity,
                price        = EXCLUDED.price,
                updated_at   = current_timestamp
            RETURNING id, order_id, product_id, product_name, quantity, price, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(&item.product_name)
        .bind(item.quantity)
        .bind(item.price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to upsert order item {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        sqlx::query(
            r#"
            SELECT setval(
                pg_get_serial_sequence('order_items', 'id'),
                GREATEST((SELECT MAX(id) FROM order_items), (SELECT last_value FROM order_items_id_seq))
            )
            "#,
        )
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to advance order item id sequence: {:?}", err);
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🔄 Upserted order item {}", id);
        Ok(result)
    }
}

#[async_trait]
impl OrderItemRepositoryTrait for OrderItemRepository {
    async fn save(&self, item: &OrderItemModel) -> Result<OrderItemModel, RepositoryError> {
        match item.id {
            None => self.insert(item).await,
            Some(id) => self.upsert(id, item).await,
        }
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Page<OrderItemModel>, RepositoryError> {
        info!(
            "📦 Fetching order items | page: {}, size: {}",
            page.page, page.size
        );

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count order items: {:?}", e);
                RepositoryError::from(e)
            })?;

        // column and direction come from a closed whitelist
        let sort = page.sort_or_default();
        let sql = format!(
            r#"
            SELECT id, order_id, product_id, product_name, quantity, price, created_at, updated_at
            FROM order_items
            ORDER BY {} {}, id ASC
            LIMIT $1 OFFSET $2
            "#,
            sort.field.column(),
            sort.direction.keyword()
        );

        let rows = sqlx::query_as::<_, OrderItemModel>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order items: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok(Page::new(rows, page.page, page.size, total))
    }

    async fn find_one(&self, id: i64) -> Result<Option<OrderItemModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        sqlx::query_as::<_, OrderItemModel>(
            r#"
            SELECT id, order_id, product_id, product_name, quantity, price, created_at, updated_at
            FROM order_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order item {}: {:?}", id, e);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete order item {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("🔥 Deleted order item {}", id);
        } else {
            info!("Order item {} was already absent", id);
        }

        Ok(deleted)
    }
}
