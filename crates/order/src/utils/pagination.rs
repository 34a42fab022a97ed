use crate::domain::response::page::Page;
use axum::http::{HeaderMap, HeaderValue, header::LINK};
use url::form_urlencoded::byte_serialize;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// `X-Total-Count` and RFC 5988 `Link` headers for a page of results.
pub fn generate_pagination_headers<T>(page: &Page<T>, base_url: &str) -> HeaderMap {
    build_headers(page, |number| {
        format!("{base_url}?page={number}&size={}", page.size)
    })
}

/// Same as [`generate_pagination_headers`] but keeps the search query in
/// every link.
pub fn generate_search_pagination_headers<T>(
    query: &str,
    page: &Page<T>,
    base_url: &str,
) -> HeaderMap {
    let escaped: String = byte_serialize(query.as_bytes()).collect();
    build_headers(page, |number| {
        format!(
            "{base_url}?page={number}&size={}&query={escaped}",
            page.size
        )
    })
}

fn build_headers<T, F>(page: &Page<T>, link_for: F) -> HeaderMap
where
    F: Fn(i64) -> String,
{
    let mut headers = HeaderMap::new();
    headers.insert(
        TOTAL_COUNT_HEADER,
        HeaderValue::from(page.total_elements),
    );

    let number = i64::from(page.number);
    let total_pages = page.total_pages();
    let mut links = Vec::with_capacity(4);

    if number + 1 < total_pages {
        links.push(format!("<{}>; rel=\"next\"", link_for(number + 1)));
    }
    if number > 0 {
        links.push(format!("<{}>; rel=\"prev\"", link_for(number - 1)));
    }

    let last_page = (total_pages - 1).max(0);
    links.push(format!("<{}>; rel=\"last\"", link_for(last_page)));
    links.push(format!("<{}>; rel=\"first\"", link_for(0)));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(LINK, value);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, size: u32, total: i64) -> Page<()> {
        Page::new(Vec::new(), number, size, total)
    }

    fn link(headers: &HeaderMap) -> &str {
        headers.get(LINK).unwrap().to_str().unwrap()
    }

    #[test]
    fn middle_page_links_everywhere() {
        let headers = generate_pagination_headers(&page(1, 10, 35), "/api/order-items");

        assert_eq!(headers.get(TOTAL_COUNT_HEADER).unwrap(), "35");
        assert_eq!(
            link(&headers),
            "</api/order-items?page=2&size=10>; rel=\"next\",\
             </api/order-items?page=0&size=10>; rel=\"prev\",\
             </api/order-items?page=3&size=10>; rel=\"last\",\
             </api/order-items?page=0&size=10>; rel=\"first\""
        );
    }

    #[test]
    fn first_and_last_page_omit_prev_and_next() {
        let first = generate_pagination_headers(&page(0, 10, 35), "/x");
        assert!(link(&first).contains("rel=\"next\""));
        assert!(!link(&first).contains("rel=\"prev\""));

        let last = generate_pagination_headers(&page(3, 10, 35), "/x");
        assert!(!link(&last).contains("rel=\"next\""));
        assert!(link(&last).contains("rel=\"prev\""));
    }

    #[test]
    fn empty_result_points_last_at_page_zero() {
        let headers = generate_pagination_headers(&page(0, 20, 0), "/x");

        assert_eq!(headers.get(TOTAL_COUNT_HEADER).unwrap(), "0");
        assert_eq!(
            link(&headers),
            "</x?page=0&size=20>; rel=\"last\",</x?page=0&size=20>; rel=\"first\""
        );
    }

    #[test]
    fn search_links_keep_the_encoded_query() {
        let headers = generate_search_pagination_headers(
            "product_name:\"pour over\" AND quantity:1",
            &page(0, 5, 6),
            "/api/_search/order-items",
        );

        assert!(link(&headers).contains(
            "</api/_search/order-items?page=1&size=5&query=product_name%3A%22pour+over%22+AND+quantity%3A1>; rel=\"next\""
        ));
    }
}
