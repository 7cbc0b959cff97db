//! # Observability & Tracing
//!
//! Structured logging for the whole server, filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cafe-orders                     # lifecycle, writes, new-order alerts
//! RUST_LOG=debug cafe-orders                    # actor requests, snapshot refreshes
//! RUST_LOG=info,tower_http=debug cafe-orders    # plus one span per HTTP request
//! ```
//!
//! Log lines carry structured fields rather than prose, e.g.
//!
//! ```text
//! INFO create_order{items=2}: Order created order_id=14 total=18.50
//! INFO Order status updated order_id=14 status=confirmed
//! INFO New orders arrived new_orders=2
//! ```

/// Installs the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
