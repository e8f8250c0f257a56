use crate::core::strategy::StrategyResolver;
use crate::domain::model::{FreightParameters, Modality, Order};
use crate::domain::ports::OrderRepository;
use crate::utils::error::{OrderError, Result};
use crate::utils::validation::validate_non_empty_id;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// 訂單服務：驗證輸入、計價並透過儲存庫保存
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
    resolver: StrategyResolver,
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            resolver: self.resolver,
        }
    }
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_shared_repository(Arc::new(repository))
    }

    pub fn with_shared_repository(repository: Arc<R>) -> Self {
        Self {
            repository,
            resolver: StrategyResolver::new(),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// 只計算運費，不寫入儲存庫
    pub fn quote(
        &self,
        modality: Modality,
        weight: Decimal,
        distance: Decimal,
        fixed_fee: Decimal,
    ) -> Result<Decimal> {
        let params = FreightParameters::new(weight, distance, fixed_fee)?;
        Ok(self.calculate_freight(modality, &params))
    }

    pub fn create(
        &self,
        client_id: Uuid,
        modality: Modality,
        weight: Decimal,
        distance: Decimal,
        fixed_fee: Decimal,
    ) -> Result<Order> {
        validate_non_empty_id("client_id", &client_id)?;

        let params = FreightParameters::new(weight, distance, fixed_fee)?;
        let shipping_cost = self.calculate_freight(modality, &params);
        let order = Order::new(Uuid::new_v4(), client_id, shipping_cost, modality)?;

        self.repository.add(order.clone())?;

        tracing::info!(
            "Created order {} for client {} ({}, cost {})",
            order.id(),
            client_id,
            modality,
            shipping_cost
        );
        Ok(order)
    }

    pub fn update(
        &self,
        id: Uuid,
        modality: Modality,
        weight: Decimal,
        distance: Decimal,
        fixed_fee: Decimal,
    ) -> Result<Order> {
        validate_non_empty_id("id", &id)?;

        let existing = self
            .repository
            .get_by_id(id)
            .ok_or(OrderError::NotFound { id })?;

        let params = FreightParameters::new(weight, distance, fixed_fee)?;
        let shipping_cost = self.calculate_freight(modality, &params);
        let updated = existing
            .with_shipping_cost(shipping_cost)?
            .with_modality(modality);

        self.repository.update(updated.clone())?;

        tracing::info!(
            "Updated order {} ({}, cost {})",
            id,
            modality,
            shipping_cost
        );
        Ok(updated)
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        validate_non_empty_id("id", &id)?;
        Ok(self.repository.get_by_id(id))
    }

    pub fn get_all(&self) -> Vec<Order> {
        let orders = self.repository.get_all();
        tracing::debug!("Listed {} order(s)", orders.len());
        orders
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        validate_non_empty_id("id", &id)?;
        self.repository.delete(id)?;
        tracing::info!("Deleted order {}", id);
        Ok(())
    }

    fn calculate_freight(&self, modality: Modality, params: &FreightParameters) -> Decimal {
        let cost = self.resolver.resolve(modality).calculate(params);
        tracing::debug!(
            "Priced {} freight: weight={}, distance={}, fixed_fee={} -> {}",
            modality,
            params.weight(),
            params.distance(),
            params.fixed_fee(),
            cost
        );
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// 記錄呼叫次數的儲存庫替身
    #[derive(Default)]
    struct RecordingRepository {
        orders: Mutex<Vec<Order>>,
        adds: Mutex<usize>,
        updates: Mutex<usize>,
        deletes: Mutex<Vec<Uuid>>,
    }

    impl OrderRepository for RecordingRepository {
        fn add(&self, order: Order) -> Result<()> {
            *self.adds.lock().unwrap() += 1;
            self.orders.lock().unwrap().push(order);
            Ok(())
        }

        fn update(&self, order: Order) -> Result<()> {
            *self.updates.lock().unwrap() += 1;
            let mut orders = self.orders.lock().unwrap();
            match orders.iter_mut().find(|o| o.id() == order.id()) {
                Some(slot) => {
                    *slot = order;
                    Ok(())
                }
                None => Err(OrderError::NotFound { id: order.id() }),
            }
        }

        fn delete(&self, id: Uuid) -> Result<()> {
            self.deletes.lock().unwrap().push(id);
            Ok(())
        }

        fn get_by_id(&self, id: Uuid) -> Option<Order> {
            self.orders
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.id() == id)
                .cloned()
        }

        fn get_all(&self) -> Vec<Order> {
            self.orders.lock().unwrap().clone()
        }
    }

    #[test]
    fn test_create_calculates_freight_and_stores_once() {
        let service = OrderService::new(RecordingRepository::default());
        let client_id = Uuid::new_v4();

        let order = service
            .create(client_id, Modality::Normal, dec!(5), dec!(10), dec!(2))
            .unwrap();

        assert!(!order.id().is_nil());
        assert_eq!(order.client_id(), client_id);
        assert_eq!(order.modality(), Modality::Normal);
        assert_eq!(order.shipping_cost(), dec!(5.5));
        assert_eq!(*service.repository().adds.lock().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_empty_client_id() {
        let service = OrderService::new(RecordingRepository::default());

        let err = service
            .create(Uuid::nil(), Modality::Normal, dec!(5), dec!(10), dec!(2))
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidArgument { field, .. } if field == "client_id"));
        assert_eq!(*service.repository().adds.lock().unwrap(), 0);
    }

    #[test]
    fn test_update_preserves_identity() {
        let service = OrderService::new(RecordingRepository::default());
        let client_id = Uuid::new_v4();
        let existing = Order::new(Uuid::new_v4(), client_id, dec!(100), Modality::Normal).unwrap();
        service.repository().add(existing.clone()).unwrap();

        let updated = service
            .update(existing.id(), Modality::Express, dec!(5), dec!(10), dec!(5))
            .unwrap();

        assert_eq!(updated.id(), existing.id());
        assert_eq!(updated.client_id(), client_id);
        assert_eq!(updated.modality(), Modality::Express);
        assert_eq!(updated.shipping_cost(), dec!(17.5));
        assert_eq!(*service.repository().updates.lock().unwrap(), 1);
        assert_eq!(existing.shipping_cost(), dec!(100));
    }

    #[test]
    fn test_update_missing_order_is_not_found() {
        let service = OrderService::new(RecordingRepository::default());
        let id = Uuid::new_v4();

        let err = service
            .update(id, Modality::Normal, dec!(5), dec!(10), dec!(2))
            .unwrap_err();

        assert!(matches!(err, OrderError::NotFound { id: missing } if missing == id));
        assert_eq!(*service.repository().updates.lock().unwrap(), 0);
    }

    #[test]
    fn test_empty_ids_are_rejected() {
        let service = OrderService::new(RecordingRepository::default());

        assert!(matches!(
            service.update(Uuid::nil(), Modality::Normal, dec!(1), dec!(1), dec!(1)),
            Err(OrderError::InvalidArgument { .. })
        ));
        assert!(matches!(
            service.get_by_id(Uuid::nil()),
            Err(OrderError::InvalidArgument { .. })
        ));
        assert!(matches!(
            service.delete(Uuid::nil()),
            Err(OrderError::InvalidArgument { .. })
        ));
        assert!(service.repository().deletes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_get_by_id_absent_is_not_an_error() {
        let service = OrderService::new(RecordingRepository::default());
        assert_eq!(service.get_by_id(Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_delete_forwards_to_repository() {
        let service = OrderService::new(RecordingRepository::default());
        let id = Uuid::new_v4();

        service.delete(id).unwrap();

        assert_eq!(*service.repository().deletes.lock().unwrap(), vec![id]);
    }

    #[test]
    fn test_quote_does_not_touch_repository() {
        let service = OrderService::new(RecordingRepository::default());

        let cost = service
            .quote(Modality::Scheduled, dec!(5), dec!(10), dec!(10))
            .unwrap();

        assert_eq!(cost, dec!(17.5));
        assert!(service.get_all().is_empty());
    }
}
