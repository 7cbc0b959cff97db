//! Views and compound filters over the held order set.
//!
//! All filters compose with logical AND. Dates are measured from the start of
//! the current local day, so callers pass `now` in the operator's timezone.

use crate::model::{OrderDetails, OrderStatus};
use chrono::{DateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use serde::Deserialize;
use std::str::FromStr;

/// Dashboard tabs. `confirmed` orders only show under `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderView {
    Pending,
    Completed,
    #[default]
    All,
}

impl OrderView {
    pub fn includes(self, status: OrderStatus) -> bool {
        match self {
            OrderView::Pending => status == OrderStatus::Pending,
            OrderView::Completed => status == OrderStatus::Delivered,
            OrderView::All => true,
        }
    }
}

impl FromStr for OrderView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderView::Pending),
            "completed" => Ok(OrderView::Completed),
            "all" => Ok(OrderView::All),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    /// Earliest creation time admitted, or `None` when unconstrained.
    pub fn cutoff<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        let today = start_of_day(now);
        match self {
            DateRange::All => None,
            DateRange::Today => Some(today),
            DateRange::Week => Some(today - TimeDelta::days(7)),
            DateRange::Month => Some(today - TimeDelta::days(30)),
        }
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            other => Err(format!("unknown date range: {other}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OrderQuery {
    pub view: OrderView,
    /// Empty matches everything.
    pub search: String,
    pub range: DateRange,
}

/// Local midnight of `now`'s day, as a UTC instant.
///
/// When midnight falls in a DST gap, `now`'s offset is used instead.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => {
            let offset = now.offset().fix().local_minus_utc();
            Utc.from_utc_datetime(&(midnight - TimeDelta::seconds(offset.into())))
        }
    }
}

/// Customer name (case-insensitive), raw phone, or the id as text.
fn matches_search(order: &OrderDetails, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let lowered = search.to_lowercase();
    order
        .user_name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(&lowered))
        || order.order.phone.contains(search)
        || order.order.id.to_string().contains(search)
}

pub fn filter_orders<Tz: TimeZone>(
    orders: &[OrderDetails],
    query: &OrderQuery,
    now: &DateTime<Tz>,
) -> Vec<OrderDetails> {
    let cutoff = query.range.cutoff(now);
    orders
        .iter()
        .filter(|o| query.view.includes(o.order.status))
        .filter(|o| matches_search(o, &query.search))
        .filter(|o| cutoff.map_or(true, |c| o.order.created_at >= c))
        .cloned()
        .collect()
}
