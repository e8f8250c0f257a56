use crate::domain::model::{FreightParameters, Order};
use crate::utils::error::Result;
use rust_decimal::Decimal;
use uuid::Uuid;

/// 單一運送模式的計價公式，對合法參數必定成功
pub trait FreightStrategy: Send + Sync {
    fn calculate(&self, params: &FreightParameters) -> Decimal;
}

/// 訂單儲存庫。實作必須保證同一 id 上的操作是原子的
pub trait OrderRepository: Send + Sync {
    /// 已存在時回傳 `AlreadyExists`
    fn add(&self, order: Order) -> Result<()>;
    /// 不存在時回傳 `NotFound`
    fn update(&self, order: Order) -> Result<()>;
    /// 不存在時回傳 `NotFound`
    fn delete(&self, id: Uuid) -> Result<()>;
    fn get_by_id(&self, id: Uuid) -> Option<Order>;
    /// 當下的快照，之後的寫入不會反映在回傳值中
    fn get_all(&self) -> Vec<Order>;
}
