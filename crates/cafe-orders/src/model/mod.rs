//! Pure data structures shared by the stores, the services, the dashboard and
//! the HTTP surface.

pub mod error;
pub mod order;
pub mod status;
pub mod user;

pub use error::ModelError;
pub use order::*;
pub use status::*;
pub use user::*;
