use crate::domain::model::Order;
use crate::domain::ports::OrderRepository;
use crate::utils::error::{OrderError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// 程序生命週期內的訂單儲存。每個 id 的寫入都在該分片的鎖內完成
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: DashMap<Uuid, Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn add(&self, order: Order) -> Result<()> {
        match self.orders.entry(order.id()) {
            Entry::Occupied(_) => {
                tracing::warn!("Rejected insert of existing order {}", order.id());
                Err(OrderError::AlreadyExists { id: order.id() })
            }
            Entry::Vacant(slot) => {
                tracing::debug!("Stored order {}", order.id());
                slot.insert(order);
                Ok(())
            }
        }
    }

    fn update(&self, order: Order) -> Result<()> {
        match self.orders.entry(order.id()) {
            Entry::Occupied(mut slot) => {
                tracing::debug!("Replaced order {}", order.id());
                slot.insert(order);
                Ok(())
            }
            Entry::Vacant(_) => {
                tracing::warn!("Rejected update of missing order {}", order.id());
                Err(OrderError::NotFound { id: order.id() })
            }
        }
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        match self.orders.remove(&id) {
            Some(_) => {
                tracing::debug!("Removed order {}", id);
                Ok(())
            }
            None => {
                tracing::warn!("Rejected delete of missing order {}", id);
                Err(OrderError::NotFound { id })
            }
        }
    }

    fn get_by_id(&self, id: Uuid) -> Option<Order> {
        self.orders.get(&id).map(|entry| entry.value().clone())
    }

    fn get_all(&self) -> Vec<Order> {
        self.orders
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
