//! Runs against a real PostgreSQL: `DATABASE_URL=... cargo test -- --ignored`.
//! Each test gets a fresh database with the crate migrations applied.

use order::{
    abstract_trait::order_item::OrderItemRepositoryTrait,
    domain::requests::page::{Direction, PageRequest, Sort, SortField},
    model::order_item::OrderItem,
    repository::OrderItemRepository,
};
use sqlx::PgPool;

fn line(name: &str, price: i64) -> OrderItem {
    OrderItem {
        id: None,
        order_id: 7,
        product_id: 42,
        product_name: name.into(),
        quantity: 2,
        price,
        created_at: None,
        updated_at: None,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn insert_assigns_ids_and_timestamps(pool: PgPool) {
    let repo = OrderItemRepository::new(pool);

    let first = repo.save(&line("Green Tea", 900)).await.unwrap();
    let second = repo.save(&line("Black Tea", 700)).await.unwrap();

    assert!(first.id.unwrap() > 0);
    assert!(second.id.unwrap() > first.id.unwrap());
    assert!(first.created_at.is_some());
    assert_eq!(repo.find_one(first.id.unwrap()).await.unwrap(), Some(first));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn save_with_id_updates_in_place(pool: PgPool) {
    let repo = OrderItemRepository::new(pool);
    let created = repo.save(&line("Green Tea", 900)).await.unwrap();

    let changed = OrderItem {
        quantity: 5,
        ..created.clone()
    };
    let updated = repo.save(&changed).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.created_at, created.created_at);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn save_with_unknown_id_inserts_and_keeps_sequence_ahead(pool: PgPool) {
    let repo = OrderItemRepository::new(pool);

    let upserted = repo
        .save(&OrderItem {
            id: Some(50),
            ..line("Tea Pot", 2500)
        })
        .await
        .unwrap();
    assert_eq!(upserted.id, Some(50));

    let generated = repo.save(&line("Black Tea", 700)).await.unwrap();
    assert!(generated.id.unwrap() > 50);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn find_all_pages_and_sorts(pool: PgPool) {
    let repo = OrderItemRepository::new(pool);
    for (name, price) in [("A", 300), ("B", 100), ("C", 200)] {
        repo.save(&line(name, price)).await.unwrap();
    }

    let page = repo
        .find_all(&PageRequest {
            page: 0,
            size: 2,
            sort: Some(Sort {
                field: SortField::Price,
                direction: Direction::Desc,
            }),
        })
        .await
        .unwrap();

    assert_eq!(page.total_elements, 3);
    let prices: Vec<i64> = page.content.iter().map(|i| i.price).collect();
    assert_eq!(prices, vec![300, 200]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn delete_reports_whether_a_row_went_away(pool: PgPool) {
    let repo = OrderItemRepository::new(pool);
    let id = repo.save(&line("Green Tea", 900)).await.unwrap().id.unwrap();

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert_eq!(repo.find_one(id).await.unwrap(), None);
}
