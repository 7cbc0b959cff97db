//! Typed wrappers around the generic [`ResourceClient`](actor_framework::ResourceClient)
//! for each in-memory actor.

pub mod order_client;
pub mod user_client;

pub use order_client::OrderClient;
pub use user_client::UserClient;
