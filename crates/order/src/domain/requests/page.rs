use serde::Deserialize;
use shared::errors::ServiceError;
use std::fmt;
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Raw paging query parameters (`?page=0&size=20&sort=price,desc`).
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pageable {
    /// Zero-based page index
    pub page: Option<i64>,
    /// Page size, defaults to 20
    pub size: Option<i64>,
    /// `field` or `field,asc|desc`
    pub sort: Option<String>,
}

impl Pageable {
    pub fn resolve(&self) -> Result<PageRequest, ServiceError> {
        let page = self
            .page
            .filter(|p| *p > 0)
            .map(|p| p.min(i64::from(u32::MAX)) as u32)
            .unwrap_or(0);

        let size = match self.size {
            Some(s) if s >= 1 => s.min(i64::from(MAX_PAGE_SIZE)) as u32,
            _ => DEFAULT_PAGE_SIZE,
        };

        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<Sort>()?),
        };

        Ok(PageRequest { page, size, sort })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }

    pub fn sort_or_default(&self) -> Sort {
        self.sort.clone().unwrap_or(Sort {
            field: SortField::Id,
            direction: Direction::Asc,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    OrderId,
    ProductId,
    ProductName,
    Quantity,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::OrderId => "order_id",
            SortField::ProductId => "product_id",
            SortField::ProductName => "product_name",
            SortField::Quantity => "quantity",
            SortField::Price => "price",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(SortField::Id),
            "order_id" | "orderId" => Some(SortField::OrderId),
            "product_id" | "productId" => Some(SortField::ProductId),
            "product_name" | "productName" => Some(SortField::ProductName),
            "quantity" => Some(SortField::Quantity),
            "price" => Some(SortField::Price),
            "created_at" | "createdAt" => Some(SortField::CreatedAt),
            "updated_at" | "updatedAt" => Some(SortField::UpdatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl std::str::FromStr for Sort {
    type Err = ServiceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split(',').map(str::trim);

        let name = parts.next().unwrap_or_default();
        let field = SortField::from_name(name)
            .ok_or_else(|| ServiceError::Validation(vec![format!("sort: unknown field '{name}'")]))?;

        let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
            None => Direction::Asc,
            Some(d) if d == "asc" => Direction::Asc,
            Some(d) if d == "desc" => Direction::Desc,
            Some(other) => {
                return Err(ServiceError::Validation(vec![format!(
                    "sort: unknown direction '{other}'"
                )]));
            }
        };

        if parts.next().is_some() {
            return Err(ServiceError::Validation(vec![format!(
                "sort: expected 'field[,asc|desc]', got '{raw}'"
            )]));
        }

        Ok(Sort { field, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        write!(f, "{},{}", self.field.column(), dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_are_missing() {
        let request = Pageable::default().resolve().unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn size_is_clamped_and_non_positive_values_fall_back() {
        let big = Pageable {
            size: Some(10_000),
            ..Default::default()
        };
        assert_eq!(big.resolve().unwrap().size, MAX_PAGE_SIZE);

        let zero = Pageable {
            page: Some(-3),
            size: Some(0),
            ..Default::default()
        };
        let request = zero.resolve().unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn offset_uses_zero_based_page() {
        let request = Pageable {
            page: Some(3),
            size: Some(25),
            sort: None,
        }
        .resolve()
        .unwrap();
        assert_eq!(request.offset(), 75);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn sort_parses_field_and_direction() {
        let sort: Sort = "productName,DESC".parse().unwrap();
        assert_eq!(sort.field, SortField::ProductName);
        assert_eq!(sort.direction, Direction::Desc);
        assert_eq!(sort.to_string(), "product_name,desc");

        let sort: Sort = "price".parse().unwrap();
        assert_eq!(sort.direction, Direction::Asc);
    }

    #[test]
    fn unknown_sort_field_is_a_validation_error() {
        let err = "password,asc".parse::<Sort>().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = "price,sideways".parse::<Sort>().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
