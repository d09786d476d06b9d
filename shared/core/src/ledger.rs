use common::structs::Order;

/// Orders submitted during this session, oldest first. Entries are never
/// removed; the active order is always the last one appended.
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    orders: Vec<Order>,
    active: usize,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push(order);
        self.active += 1;
    }

    pub fn get_active_order(&self) -> Option<&Order> {
        self.active.checked_sub(1).and_then(|index| self.orders.get(index))
    }

    pub fn get_orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
