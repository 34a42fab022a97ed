use crate::{
    abstract_trait::order_item::OrderItemSearchRepositoryTrait,
    domain::{
        requests::page::{Direction, PageRequest, SortField},
        response::page::Page,
    },
    model::order_item::OrderItem as OrderItemModel,
    search::paginate,
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::{
    fmt::Display,
    path::Path,
    sync::{Arc, Mutex},
};
use tantivy::{
    DocAddress, Index, IndexReader, IndexWriter, Order, ReloadPolicy, Searcher, TantivyDocument,
    Term,
    collector::{Count, DocSetCollector, TopDocs},
    directory::MmapDirectory,
    doc,
    query::{AllQuery, Query, QueryParser},
    schema::{FAST, Field, INDEXED, STORED, Schema, TEXT, Value},
};
use tracing::{error, info, warn};

const WRITER_MEMORY_BYTES: usize = 50_000_000;

#[derive(Debug, Clone, Copy)]
struct Fields {
    id: Field,
    order_id: Field,
    product_id: Field,
    product_name: Field,
    quantity: Field,
    price: Field,
    document: Field,
}

impl Fields {
    fn schema() -> (Schema, Self) {
        let mut builder = Schema::builder();

        let fields = Self {
            id: builder.add_i64_field("id", INDEXED | FAST),
            order_id: builder.add_i64_field("order_id", INDEXED | FAST),
            product_id: builder.add_i64_field("product_id", INDEXED | FAST),
            product_name: builder.add_text_field("product_name", TEXT),
            quantity: builder.add_i64_field("quantity", INDEXED | FAST),
            price: builder.add_i64_field("price", INDEXED | FAST),
            document: builder.add_text_field("document", STORED),
        };

        (builder.build(), fields)
    }
}

struct SearchIndex {
    reader: IndexReader,
    writer: Mutex<IndexWriter>,
    parser: QueryParser,
    fields: Fields,
}

/// Full-text index of order items. Every document keeps the JSON of the
/// stored row so hits are returned without a database round trip.
#[derive(Clone)]
pub struct TantivyOrderItemSearchRepository {
    inner: Arc<SearchIndex>,
}

impl TantivyOrderItemSearchRepository {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| search_error("create index directory", e))?;

        let directory =
            MmapDirectory::open(dir).map_err(|e| search_error("open index directory", e))?;
        let (schema, fields) = Fields::schema();
        let index =
            Index::open_or_create(directory, schema).map_err(|e| search_error("open index", e))?;

        info!("🔎 Search index ready at {}", dir.display());
        Self::from_index(index, fields)
    }

    pub fn in_memory() -> Result<Self, RepositoryError> {
        let (schema, fields) = Fields::schema();
        Self::from_index(Index::create_in_ram(schema), fields)
    }

    fn from_index(index: Index, fields: Fields) -> Result<Self, RepositoryError> {
        let writer = index
            .writer_with_num_threads(1, WRITER_MEMORY_BYTES)
            .map_err(|e| search_error("create index writer", e))?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| search_error("create index reader", e))?;
        let parser = QueryParser::for_index(&index, vec![fields.product_name]);

        Ok(Self {
            inner: Arc::new(SearchIndex {
                reader,
                writer: Mutex::new(writer),
                parser,
                fields,
            }),
        })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&SearchIndex) -> Result<T, RepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&inner))
            .await
            .map_err(|e| search_error("run index task", e))?
    }
}

impl SearchIndex {
    fn document(&self, id: i64, item: &OrderItemModel) -> Result<TantivyDocument, RepositoryError> {
        let json = serde_json::to_string(item)?;

        Ok(doc!(
            self.fields.id => id,
            self.fields.order_id => item.order_id,
            self.fields.product_id => item.product_id,
            self.fields.product_name => item.product_name.as_str(),
            self.fields.quantity => i64::from(item.quantity),
            self.fields.price => item.price,
            self.fields.document => json,
        ))
    }

    /// Applies `op` and commits; the reader is reloaded so the change is
    /// visible to the next search.
    fn write<F>(&self, op: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut IndexWriter, &Fields) -> tantivy::Result<()>,
    {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| RepositoryError::Search("index writer lock poisoned".into()))?;

        if let Err(e) = op(&mut *writer, &self.fields) {
            if let Err(rollback) = writer.rollback() {
                error!("❌ Failed to roll back index writer: {rollback}");
            }
            return Err(search_error("write index", e));
        }

        writer.commit().map_err(|e| search_error("commit index", e))?;
        self.reader
            .reload()
            .map_err(|e| search_error("reload index reader", e))
    }

    fn parse(&self, query: &str) -> Result<Box<dyn Query>, RepositoryError> {
        if query.is_empty() || query == "*" {
            return Ok(Box::new(AllQuery));
        }

        self.parser
            .parse_query(query)
            .map_err(|e| RepositoryError::InvalidQuery(e.to_string()))
    }

    fn search(&self, query: &str, page: &PageRequest) -> Result<Page<OrderItemModel>, RepositoryError> {
        let query = self.parse(query)?;
        let searcher = self.reader.searcher();
        let sort = page.sort_or_default();

        let Some(fast_field) = fast_field(sort.field) else {
            // text and timestamp columns are ordered after loading the hits
            let addresses = searcher
                .search(query.as_ref(), &DocSetCollector)
                .map_err(|e| search_error("search index", e))?;
            let items = addresses
                .into_iter()
                .filter_map(|address| self.load(&searcher, address))
                .collect();
            return Ok(paginate(items, page));
        };

        let order = match sort.direction {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        };
        let top_docs = TopDocs::with_limit(page.size as usize)
            .and_offset(page.offset() as usize)
            .order_by_fast_field::<i64>(fast_field, order);

        let (total, hits) = searcher
            .search(query.as_ref(), &(Count, top_docs))
            .map_err(|e| search_error("search index", e))?;

        let content = hits
            .into_iter()
            .filter_map(|(_, address)| self.load(&searcher, address))
            .collect();

        Ok(Page::new(content, page.page, page.size, total as i64))
    }

    fn load(&self, searcher: &Searcher, address: DocAddress) -> Option<OrderItemModel> {
        let document: TantivyDocument = searcher
            .doc(address)
            .inspect_err(|e| warn!("Skipping unreadable search hit {address:?}: {e}"))
            .ok()?;

        let raw = document
            .get_first(self.fields.document)
            .and_then(|value| value.as_str())?;

        serde_json::from_str(raw)
            .inspect_err(|e| warn!("Skipping malformed indexed order item: {e}"))
            .ok()
    }
}

fn fast_field(field: SortField) -> Option<&'static str> {
    match field {
        SortField::Id => Some("id"),
        SortField::OrderId => Some("order_id"),
        SortField::ProductId => Some("product_id"),
        SortField::Quantity => Some("quantity"),
        SortField::Price => Some("price"),
        SortField::ProductName | SortField::CreatedAt | SortField::UpdatedAt => None,
    }
}

fn search_error(action: &str, err: impl Display) -> RepositoryError {
    error!("❌ Failed to {action}: {err}");
    RepositoryError::Search(format!("failed to {action}: {err}"))
}

#[async_trait]
impl OrderItemSearchRepositoryTrait for TantivyOrderItemSearchRepository {
    async fn save(&self, item: &OrderItemModel) -> Result<(), RepositoryError> {
        let id = item
            .id
            .ok_or_else(|| RepositoryError::Custom("cannot index an order item without id".into()))?;
        let item = item.clone();

        self.blocking(move |index| {
            let document = index.document(id, &item)?;
            index.write(|writer, fields| {
                writer.delete_term(Term::from_field_i64(fields.id, id));
                writer.add_document(document)?;
                Ok(())
            })
        })
        .await?;

        info!("🔎 Indexed order item {id}");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        self.blocking(move |index| {
            index.write(|writer, fields| {
                writer.delete_term(Term::from_field_i64(fields.id, id));
                Ok(())
            })
        })
        .await?;

        info!("🧹 Removed order item {id} from search index");
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<Page<OrderItemModel>, RepositoryError> {
        let query = query.trim().to_string();
        let page = page.clone();

        self.blocking(move |index| index.search(&query, &page)).await
    }
}
