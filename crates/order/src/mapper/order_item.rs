use crate::{domain::response::order_item::OrderItemDto, model::order_item::OrderItem};
use chrono::NaiveDateTime;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Converts between [`OrderItemDto`] and the persisted [`OrderItem`].
pub struct OrderItemMapper;

impl OrderItemMapper {
    pub fn to_entity(dto: &OrderItemDto) -> OrderItem {
        OrderItem {
            id: dto.id,
            order_id: dto.order_id,
            product_id: dto.product_id,
            product_name: dto.product_name.clone(),
            quantity: dto.quantity,
            price: dto.price,
            created_at: dto.created_at.as_deref().and_then(parse_datetime),
            updated_at: dto.updated_at.as_deref().and_then(parse_datetime),
        }
    }

    pub fn to_dto(entity: &OrderItem) -> OrderItemDto {
        OrderItemDto {
            id: entity.id,
            order_id: entity.order_id,
            product_id: entity.product_id,
            product_name: entity.product_name.clone(),
            quantity: entity.quantity,
            price: entity.price,
            created_at: entity.created_at.map(format_datetime),
            updated_at: entity.updated_at.map(format_datetime),
        }
    }

    pub fn to_dtos(entities: &[OrderItem]) -> Vec<OrderItemDto> {
        entities.iter().map(Self::to_dto).collect()
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entity() -> OrderItem {
        let created = NaiveDate::from_ymd_opt(2024, 5, 17)
            .and_then(|d| d.and_hms_micro_opt(9, 30, 15, 250_000))
            .unwrap();

        OrderItem {
            id: Some(42),
            order_id: 3,
            product_id: 11,
            product_name: "Pour-over kettle".into(),
            quantity: 1,
            price: 4500,
            created_at: Some(created),
            updated_at: Some(created),
        }
    }

    #[test]
    fn entity_dto_entity_is_identity() {
        let original = entity();
        let round_trip = OrderItemMapper::to_entity(&OrderItemMapper::to_dto(&original));
        assert_eq!(round_trip, original);
    }

    #[test]
    fn new_dto_maps_to_entity_without_id() {
        let dto = OrderItemDto {
            id: None,
            order_id: 1,
            product_id: 2,
            product_name: "Filter papers".into(),
            quantity: 3,
            price: 250,
            created_at: None,
            updated_at: None,
        };

        let entity = OrderItemMapper::to_entity(&dto);
        assert_eq!(entity.id, None);
        assert_eq!(OrderItemMapper::to_dto(&entity), dto);
    }

    #[test]
    fn unparseable_timestamps_are_dropped() {
        let mut dto = OrderItemMapper::to_dto(&entity());
        dto.created_at = Some("yesterday".into());

        assert_eq!(OrderItemMapper::to_entity(&dto).created_at, None);
    }

    #[test]
    fn to_dtos_preserves_order() {
        let mut second = entity();
        second.id = Some(43);
        let dtos = OrderItemMapper::to_dtos(&[entity(), second]);
        let ids: Vec<_> = dtos.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![Some(42), Some(43)]);
    }
}
