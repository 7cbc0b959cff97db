//! The dashboard's view of the order set and new-order detection.

use crate::model::{Order, OrderDetails, OrderId};
use std::collections::HashSet;

/// Ids present in `fetched` but not in `previous`, in `fetched` order.
pub fn detect_new_orders(previous: &HashSet<OrderId>, fetched: &[OrderDetails]) -> Vec<OrderId> {
    fetched
        .iter()
        .map(|o| o.order.id)
        .filter(|id| !previous.contains(id))
        .collect()
}

/// Last fetched order set plus its identity set.
///
/// Starts empty, so the first fetch after login reports every order as new.
#[derive(Debug, Default, Clone)]
pub struct OrderSnapshot {
    orders: Vec<OrderDetails>,
    ids: HashSet<OrderId>,
}

impl OrderSnapshot {
    /// Replaces the held set and returns the ids that were not held before.
    pub fn replace(&mut self, fetched: Vec<OrderDetails>) -> Vec<OrderId> {
        let new_ids = detect_new_orders(&self.ids, &fetched);
        self.ids = fetched.iter().map(|o| o.order.id).collect();
        self.orders = fetched;
        new_ids
    }

    pub fn orders(&self) -> &[OrderDetails] {
        &self.orders
    }

    pub fn get(&self, id: OrderId) -> Option<&OrderDetails> {
        self.orders.iter().find(|o| o.order.id == id)
    }

    /// Optimistic local update after a successful write. Reconciled by the
    /// next fetch.
    pub fn apply(&mut self, updated: &Order) {
        if let Some(held) = self.orders.iter_mut().find(|o| o.order.id == updated.id) {
            held.order.status = updated.status;
            held.order.updated_at = updated.updated_at;
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn details(id: u64) -> OrderDetails {
        let now = Utc::now();
        OrderDetails {
            order: Order {
                id: OrderId(id),
                user_id: None,
                total_amount: Decimal::new(1000, 2),
                status: OrderStatus::Pending,
                delivery_address: "Chilonzor 5".into(),
                latitude: None,
                longitude: None,
                phone: "+998901112233".into(),
                notes: None,
                payment_method: "cash".into(),
                created_at: now,
                updated_at: now,
            },
            user_name: None,
            user_email: None,
            items: Vec::new(),
        }
    }

    fn batch(ids: &[u64]) -> Vec<OrderDetails> {
        ids.iter().map(|&id| details(id)).collect()
    }

    #[test]
    fn growing_batch_reports_only_the_additions() {
        let mut snapshot = OrderSnapshot::default();
        snapshot.replace(batch(&[1, 2, 3]));

        let new_ids = snapshot.replace(batch(&[5, 4, 3, 2, 1]));
        assert_eq!(new_ids, vec![OrderId(5), OrderId(4)]);
        assert_eq!(snapshot.len(), 5);
    }

    #[test]
    fn unchanged_batch_reports_nothing() {
        let mut snapshot = OrderSnapshot::default();
        snapshot.replace(batch(&[1, 2]));
        assert!(snapshot.replace(batch(&[1, 2])).is_empty());
    }

    #[test]
    fn first_fetch_counts_everything_as_new() {
        let mut snapshot = OrderSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.replace(batch(&[7])), vec![OrderId(7)]);
    }

    #[test]
    fn apply_updates_the_held_status() {
        let mut snapshot = OrderSnapshot::default();
        snapshot.replace(batch(&[1]));

        let mut updated = details(1).order;
        updated.status = OrderStatus::Confirmed;
        snapshot.apply(&updated);

        assert_eq!(
            snapshot.get(OrderId(1)).map(|o| o.order.status),
            Some(OrderStatus::Confirmed)
        );
    }
}
