use crate::model::{OrderDetails, OrderStatus};
use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline numbers shown above the order list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub delivered: usize,
    /// Orders created on `now`'s local calendar day.
    pub today_orders: usize,
    pub today_revenue: Decimal,
    /// Mean total over all held orders, rounded to cents; zero when empty.
    pub average_order_value: Decimal,
}

impl DashboardStats {
    pub fn compute<Tz: TimeZone>(orders: &[OrderDetails], now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let tz = now.timezone();
        let count = |status: OrderStatus| orders.iter().filter(|o| o.order.status == status).count();

        let todays: Vec<&OrderDetails> = orders
            .iter()
            .filter(|o| o.order.created_at.with_timezone(&tz).date_naive() == today)
            .collect();
        let revenue: Decimal = orders.iter().map(|o| o.order.total_amount).sum();

        Self {
            total_orders: orders.len(),
            pending: count(OrderStatus::Pending),
            confirmed: count(OrderStatus::Confirmed),
            delivered: count(OrderStatus::Delivered),
            today_orders: todays.len(),
            today_revenue: todays.iter().map(|o| o.order.total_amount).sum(),
            average_order_value: if orders.is_empty() {
                Decimal::ZERO
            } else {
                (revenue / Decimal::from(orders.len())).round_dp(2)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, OrderId};
    use chrono::{FixedOffset, TimeDelta, Utc};

    fn order(id: u64, status: OrderStatus, total: i64, created_at: DateTime<Utc>) -> OrderDetails {
        OrderDetails {
            order: Order {
                id: OrderId(id),
                user_id: None,
                total_amount: Decimal::new(total, 2),
                status,
                delivery_address: "Sergeli 3".into(),
                latitude: None,
                longitude: None,
                phone: "+998935554433".into(),
                notes: None,
                payment_method: "cash".into(),
                created_at,
                updated_at: created_at,
            },
            user_name: None,
            user_email: None,
            items: Vec::new(),
        }
    }

    #[test]
    fn today_is_the_local_calendar_day() {
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 15, 1, 0, 0).unwrap();
        // 19:30 UTC on the 14th is 00:30 on the 15th in UTC+5.
        let just_after_midnight = Utc.with_ymd_and_hms(2024, 3, 14, 19, 30, 0).unwrap();
        let yesterday = just_after_midnight - TimeDelta::hours(1);

        let orders = vec![
            order(1, OrderStatus::Pending, 2000, just_after_midnight),
            order(2, OrderStatus::Delivered, 1000, yesterday),
            order(3, OrderStatus::Confirmed, 4000, just_after_midnight),
        ];
        let stats = DashboardStats::compute(&orders, &now);

        assert_eq!(stats.total_orders, 3);
        assert_eq!((stats.pending, stats.confirmed, stats.delivered), (1, 1, 1));
        assert_eq!(stats.today_orders, 2);
        assert_eq!(stats.today_revenue, Decimal::new(6000, 2));
        assert_eq!(stats.average_order_value, Decimal::new(2333, 2));
    }

    #[test]
    fn empty_snapshot_has_zero_average() {
        let stats = DashboardStats::compute(&[], &Utc::now());
        assert_eq!(stats.average_order_value, Decimal::ZERO);
        assert_eq!(stats.today_revenue, Decimal::ZERO);
    }
}
