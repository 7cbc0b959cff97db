//! # Admin Dashboard
//!
//! Back-office view of the order stream. After a password login the dashboard
//! polls the full order list on a fixed interval, keeps the latest snapshot,
//! flags orders it has not seen before with a bounded audible alert and lets
//! the operator push an order one lifecycle step forward.
//!
//! The session lives inside [`AdminDashboard`], driven through a
//! [`DashboardHandle`]. Views, search and stats are pure functions over the
//! snapshot (see [`filter`] and [`stats`]).

pub mod actor;
pub mod alert;
pub mod error;
pub mod filter;
pub mod notify;
pub mod stats;
pub mod sync;

pub use actor::{AdminDashboard, DashboardHandle, DashboardSettings, RefreshReport};
pub use alert::{AlertSound, BoundedAlert, TerminalBell};
pub use error::{AuthError, DashboardError};
pub use filter::{filter_orders, DateRange, OrderQuery, OrderView};
pub use notify::{LogNotifier, Notice, NoticeLevel, Notifier};
pub use stats::DashboardStats;
pub use sync::{detect_new_orders, OrderSnapshot};
