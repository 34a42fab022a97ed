mod header;
mod pagination;

pub use self::header::HeaderUtil;
pub use self::pagination::{generate_pagination_headers, generate_search_pagination_headers};
