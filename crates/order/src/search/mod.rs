mod index;

pub use self::index::TantivyOrderItemSearchRepository;

use crate::{
    domain::{
        requests::page::{Direction, PageRequest, SortField},
        response::page::Page,
    },
    model::order_item::OrderItem,
};
use std::cmp::Ordering;
use thiserror::Error;

pub const MAX_QUERY_LENGTH: usize = 1024;
pub const MAX_QUERY_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("query is longer than {max} bytes", max = MAX_QUERY_LENGTH)]
    TooLong,

    #[error("query nests parentheses deeper than {max} levels", max = MAX_QUERY_DEPTH)]
    TooDeeplyNested,
}

/// Rejects query strings the recursive query-string grammar should never
/// see: oversized input and deep parenthesis nesting. Parentheses inside
/// quoted phrases do not count.
pub fn check_query(query: &str) -> Result<(), QueryError> {
    if query.len() > MAX_QUERY_LENGTH {
        return Err(QueryError::TooLong);
    }

    let mut depth = 0usize;
    let mut in_phrase = false;
    let mut escaped = false;

    for c in query.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_phrase = !in_phrase,
            '(' if !in_phrase => {
                depth += 1;
                if depth > MAX_QUERY_DEPTH {
                    return Err(QueryError::TooDeeplyNested);
                }
            }
            ')' if !in_phrase => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    Ok(())
}

/// Sorts `items` by the requested field (ties broken by id) and cuts out
/// the requested page.
pub fn paginate(mut items: Vec<OrderItem>, page: &PageRequest) -> Page<OrderItem> {
    let sort = page.sort_or_default();
    items.sort_by(|a, b| {
        let ordering = compare(sort.field, a, b);
        let ordering = match sort.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    });

    let total = items.len() as i64;
    let content = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();

    Page::new(content, page.page, page.size, total)
}

fn compare(field: SortField, a: &OrderItem, b: &OrderItem) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::OrderId => a.order_id.cmp(&b.order_id),
        SortField::ProductId => a.product_id.cmp(&b.product_id),
        SortField::ProductName => a.product_name.cmp(&b.product_name),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::Price => a.price.cmp(&b.price),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::page::Sort;

    fn item(id: i64, name: &str, price: i64) -> OrderItem {
        OrderItem {
            id: Some(id),
            order_id: 1,
            product_id: id,
            product_name: name.into(),
            quantity: 1,
            price,
            created_at: None,
            updated_at: None,
        }
    }

    fn catalogue() -> Vec<OrderItem> {
        vec![
            item(3, "Green tea", 900),
            item(1, "Black tea", 700),
            item(2, "Coffee", 1200),
            item(4, "Herbal tea", 700),
        ]
    }

    #[test]
    fn ordinary_queries_pass_the_guard() {
        assert_eq!(check_query("tea AND (green OR \"black tea\")"), Ok(()));
        assert_eq!(check_query(""), Ok(()));
    }

    #[test]
    fn runaway_nesting_is_rejected_before_parsing() {
        let nested = format!("{}tea{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(check_query(&nested).is_err());

        let just_too_deep = format!(
            "{}tea{}",
            "(".repeat(MAX_QUERY_DEPTH + 1),
            ")".repeat(MAX_QUERY_DEPTH + 1)
        );
        assert_eq!(check_query(&just_too_deep), Err(QueryError::TooDeeplyNested));

        let at_limit = format!(
            "{}tea{}",
            "(".repeat(MAX_QUERY_DEPTH),
            ")".repeat(MAX_QUERY_DEPTH)
        );
        assert_eq!(check_query(&at_limit), Ok(()));
    }

    #[test]
    fn parentheses_inside_phrases_do_not_nest() {
        let phrase = format!("\"{}\"", "(".repeat(MAX_QUERY_DEPTH + 5));
        assert_eq!(check_query(&phrase), Ok(()));
    }

    #[test]
    fn oversized_queries_are_rejected() {
        let long = "tea ".repeat(MAX_QUERY_LENGTH);
        assert_eq!(check_query(&long), Err(QueryError::TooLong));
    }

    #[test]
    fn results_default_to_id_order() {
        let page = paginate(catalogue(), &PageRequest::default());

        let ids: Vec<_> = page.content.iter().filter_map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn sort_direction_is_honoured_with_id_tie_break() {
        let request = PageRequest {
            sort: Some(Sort {
                field: SortField::Price,
                direction: Direction::Desc,
            }),
            ..PageRequest::default()
        };

        let ids: Vec<_> = paginate(catalogue(), &request)
            .content
            .iter()
            .filter_map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn pages_are_cut_after_sorting() {
        let request = PageRequest {
            page: 1,
            size: 3,
            sort: None,
        };

        let page = paginate(catalogue(), &request);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, Some(4));
    }
}
