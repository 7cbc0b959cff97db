//! Store-agnostic operations shared by the HTTP surface and the dashboard.

pub mod orders;
pub mod users;

pub use orders::OrderService;
pub use users::{Registration, UserService};
