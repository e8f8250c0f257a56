use freight_orders::app::dto::{CreateOrderRequest, ErrorResponse, OrderResponse, UpdateOrderRequest};
use freight_orders::{InMemoryOrderRepository, Modality, OrderError, OrderService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn service() -> OrderService<InMemoryOrderRepository> {
    OrderService::new(InMemoryOrderRepository::new())
}

#[test]
fn test_create_normal_order_cost() {
    let service = service();
    let order = service
        .create(Uuid::new_v4(), Modality::Normal, dec!(5), dec!(10), dec!(2))
        .unwrap();
    assert_eq!(order.shipping_cost(), dec!(5.5));
}

#[test]
fn test_create_express_order_cost() {
    let service = service();
    let order = service
        .create(Uuid::new_v4(), Modality::Express, dec!(5), dec!(10), dec!(5))
        .unwrap();
    assert_eq!(order.shipping_cost(), dec!(17.5));
}

#[test]
fn test_create_scheduled_order_cost() {
    let service = service();
    let order = service
        .create(Uuid::new_v4(), Modality::Scheduled, dec!(5), dec!(10), dec!(10))
        .unwrap();
    assert_eq!(order.shipping_cost(), dec!(17.5));
}

#[test]
fn test_create_then_get_round_trip() {
    let service = service();
    let created = service
        .create(Uuid::new_v4(), Modality::Express, dec!(3.25), dec!(120), dec!(7.5))
        .unwrap();

    let fetched = service.get_by_id(created.id()).unwrap();

    assert_eq!(fetched, Some(created));
}

#[test]
fn test_reads_have_no_side_effects() {
    let service = service();
    let created = service
        .create(Uuid::new_v4(), Modality::Normal, dec!(1), dec!(1), dec!(0))
        .unwrap();

    let first_get = service.get_by_id(created.id()).unwrap();
    let second_get = service.get_by_id(created.id()).unwrap();
    assert_eq!(first_get, second_get);

    let first_list = service.get_all();
    let second_list = service.get_all();
    assert_eq!(first_list, second_list);
    assert_eq!(first_list.len(), 1);
}

#[test]
fn test_update_missing_order_leaves_store_unchanged() {
    let service = service();
    service
        .create(Uuid::new_v4(), Modality::Normal, dec!(5), dec!(10), dec!(2))
        .unwrap();
    let before = service.get_all().len();

    let missing = Uuid::new_v4();
    let err = service
        .update(missing, Modality::Express, dec!(5), dec!(10), dec!(2))
        .unwrap_err();

    assert!(matches!(err, OrderError::NotFound { id } if id == missing));
    assert_eq!(service.get_all().len(), before);
}

#[test]
fn test_invalid_parameters_fail_before_any_mutation() {
    let service = service();

    let err = service
        .create(Uuid::new_v4(), Modality::Normal, Decimal::ZERO, dec!(10), dec!(2))
        .unwrap_err();

    assert!(matches!(err, OrderError::InvalidFreightParameters { field, .. } if field == "weight"));
    assert!(service.get_all().is_empty());

    for (distance, fee) in [(dec!(-1), dec!(0)), (dec!(10), dec!(-5))] {
        assert!(matches!(
            service.create(Uuid::new_v4(), Modality::Express, dec!(1), distance, fee),
            Err(OrderError::InvalidFreightParameters { .. })
        ));
    }
    assert!(service.get_all().is_empty());
}

#[test]
fn test_oversized_parameters_are_rejected_instead_of_overflowing() {
    let service = service();

    let err = service
        .create(Uuid::new_v4(), Modality::Express, Decimal::MAX, Decimal::MAX, Decimal::ZERO)
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidFreightParameters { ref field, .. } if field == "weight"));
    assert_eq!(ErrorResponse::from(&err).status, 400);

    assert!(matches!(
        service.quote(Modality::Normal, dec!(1), Decimal::MAX, dec!(0)),
        Err(OrderError::InvalidFreightParameters { field, .. }) if field == "distance"
    ));
    assert!(service.get_all().is_empty());

    let created = service
        .create(Uuid::new_v4(), Modality::Normal, dec!(1), dec!(1), dec!(1))
        .unwrap();
    assert!(service
        .update(created.id(), Modality::Express, dec!(1), dec!(1), Decimal::MAX)
        .is_err());
    assert_eq!(service.get_by_id(created.id()).unwrap(), Some(created));
}

#[test]
fn test_update_with_invalid_parameters_keeps_stored_order() {
    let service = service();
    let created = service
        .create(Uuid::new_v4(), Modality::Normal, dec!(5), dec!(10), dec!(2))
        .unwrap();

    assert!(service
        .update(created.id(), Modality::Express, dec!(5), dec!(0), dec!(2))
        .is_err());

    assert_eq!(service.get_by_id(created.id()).unwrap(), Some(created));
}

#[test]
fn test_delete_lifecycle() {
    let service = service();
    let created = service
        .create(Uuid::new_v4(), Modality::Scheduled, dec!(2), dec!(4), dec!(1))
        .unwrap();

    service.delete(created.id()).unwrap();

    assert_eq!(service.get_by_id(created.id()).unwrap(), None);
    assert!(matches!(
        service.delete(created.id()),
        Err(OrderError::NotFound { .. })
    ));
    assert!(matches!(
        service.update(created.id(), Modality::Normal, dec!(1), dec!(1), dec!(1)),
        Err(OrderError::NotFound { .. })
    ));
}

#[test]
fn test_full_crud_workflow_through_dtos() {
    let service = service();
    let client_id = Uuid::new_v4();

    let create: CreateOrderRequest = serde_json::from_value(serde_json::json!({
        "clientId": client_id,
        "modality": "normal",
        "weight": "5",
        "distance": "10",
        "fixedFee": "2"
    }))
    .unwrap();
    let created = service
        .create(
            create.client_id,
            create.modality().unwrap(),
            create.weight,
            create.distance,
            create.fixed_fee,
        )
        .unwrap();
    let created_response = OrderResponse::from(&created);
    assert_eq!(created_response.client_id, client_id);
    assert_eq!(created_response.shipping_cost, dec!(5.5));

    let update: UpdateOrderRequest = serde_json::from_value(serde_json::json!({
        "modality": "agendada",
        "weight": 5,
        "distance": 10,
        "fixedFee": 10
    }))
    .unwrap();
    let updated = service
        .update(
            created.id(),
            update.modality().unwrap(),
            update.weight,
            update.distance,
            update.fixed_fee,
        )
        .unwrap();
    let updated_response = OrderResponse::from(&updated);
    assert_eq!(updated_response.id, created_response.id);
    assert_eq!(updated_response.client_id, client_id);
    assert_eq!(updated_response.modality, Modality::Scheduled);
    assert_eq!(updated_response.shipping_cost, dec!(17.5));

    let listed: Vec<OrderResponse> = service.get_all().iter().map(OrderResponse::from).collect();
    assert_eq!(listed, vec![updated_response]);

    service.delete(created.id()).unwrap();
    let missing = service.delete(created.id()).unwrap_err();
    assert_eq!(ErrorResponse::from(&missing).status, 404);
    assert!(service.get_all().is_empty());
}

#[test]
fn test_cloned_services_share_one_store() {
    let service = service();
    let other = service.clone();

    let created = service
        .create(Uuid::new_v4(), Modality::Normal, dec!(1), dec!(1), dec!(1))
        .unwrap();

    assert_eq!(other.get_by_id(created.id()).unwrap(), Some(created));
}
