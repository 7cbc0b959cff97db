use crate::api::{self, AppState};
use crate::config::{Config, StoreBackend};
use crate::dashboard::{AdminDashboard, AlertSound, DashboardHandle, DashboardSettings, Notifier};
use crate::order_actor::{self, OrderContext};
use crate::service::{OrderService, UserService};
use crate::store::{MemoryStore, SqliteStore, StoreError};
use crate::user_actor;
use axum::Router;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Failed to open store: {0}")]
    Store(#[from] StoreError),

    #[error("Task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// The running order system: services over the configured store, plus the
/// admin dashboard once spawned.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::start(&config)?;
/// let dashboard = system.spawn_dashboard(settings, notifier, sound);
/// axum::serve(listener, system.router()).await?;
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub orders: OrderService,
    pub users: UserService,
    dashboard: Option<DashboardHandle>,
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Builds the store named by `config.store` and starts any actors it
    /// needs. Must be called from within a Tokio runtime.
    pub fn start(config: &Config) -> Result<Self, LifecycleError> {
        let system = match &config.store {
            StoreBackend::Memory => {
                // 1. Create actors (no dependencies)
                let (user_actor, user_client) = user_actor::new();
                let (order_actor, order_client) = order_actor::new();

                // 2. Start actors with injected context
                let user_handle = tokio::spawn(user_actor.run(()));
                let order_handle =
                    tokio::spawn(order_actor.run(OrderContext::new(user_client.clone())));

                let store = MemoryStore::new(order_client, user_client);
                info!(backend = "memory", "Order system started");
                Self {
                    orders: OrderService::new(Arc::new(store.clone())),
                    users: UserService::new(Arc::new(store), config.bcrypt_cost),
                    dashboard: None,
                    handles: vec![order_handle, user_handle],
                }
            }
            StoreBackend::Sqlite(path) => {
                let store = SqliteStore::open(path)?;
                info!(backend = "sqlite", path = %path.display(), "Order system started");
                Self {
                    orders: OrderService::new(Arc::new(store.clone())),
                    users: UserService::new(Arc::new(store), config.bcrypt_cost),
                    dashboard: None,
                    handles: Vec::new(),
                }
            }
        };
        Ok(system)
    }

    /// Spawns the admin dashboard over this system's services. The dashboard
    /// starts logged out.
    pub fn spawn_dashboard(
        &mut self,
        settings: DashboardSettings,
        notifier: Arc<dyn Notifier>,
        sound: Arc<dyn AlertSound>,
    ) -> DashboardHandle {
        let (dashboard, handle) = AdminDashboard::new(
            self.orders.clone(),
            self.users.clone(),
            settings,
            notifier,
            sound,
        );
        self.handles.push(tokio::spawn(dashboard.run()));
        self.dashboard = Some(handle.clone());
        handle
    }

    pub fn dashboard(&self) -> Option<&DashboardHandle> {
        self.dashboard.as_ref()
    }

    /// The HTTP API over this system's services.
    pub fn router(&self) -> Router {
        api::router(AppState::new(self.orders.clone(), self.users.clone()))
    }

    /// Drops every handle this system owns and waits for all tasks to end.
    ///
    /// Outstanding [`DashboardHandle`] clones and routers keep their tasks
    /// alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down system...");

        drop(self.dashboard);
        drop(self.orders);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
