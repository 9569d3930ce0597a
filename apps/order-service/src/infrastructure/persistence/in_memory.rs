//! In-memory order repository.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::order::{Order, OrderDraft, OrderError, OrderId, OrderRepository};

#[derive(Debug)]
struct State {
    orders: BTreeMap<OrderId, Order>,
    next_id: i64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            orders: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of `OrderRepository`.
///
/// Ids are assigned from a monotonically increasing counter starting at 1 and
/// are never reused after a delete, matching auto-increment semantics.
/// Suitable for testing and development. Data is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    state: RwLock<State>,
}

impl InMemoryOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = OrderId::new(state.next_id);
        state.next_id += 1;

        let order = Order::from_draft(id, draft);
        state.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Order, OrderError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| OrderError::not_found(id))
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.orders.values().cloned().collect())
    }

    async fn update(&self, order: Order) -> Result<Order, OrderError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let stored = state
            .orders
            .get_mut(&order.id)
            .ok_or_else(|| OrderError::not_found(order.id))?;
        stored.apply(order.to_draft());
        Ok(stored.clone())
    }

    async fn delete(&self, id: OrderId) -> Result<(), OrderError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state
            .orders
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| OrderError::not_found(id))
    }

    async fn ping(&self) -> Result<(), OrderError> {
        Ok(())
    }
}
