//! # Admin Dashboard Actor
//!
//! A single task owns the admin session. Poll ticks and operator commands are
//! handled one at a time, so two sync cycles never overlap and a view never
//! observes a half-applied refresh.
//!
//! ```text
//!   DashboardHandle ──command──► AdminDashboard ──► OrderService / UserService
//!                                    ▲      │
//!                    poll interval ──┘      └──► Notifier, BoundedAlert
//! ```

use super::alert::{AlertSound, BoundedAlert};
use super::filter::{filter_orders, OrderQuery};
use super::notify::{Notice, Notifier};
use super::stats::DashboardStats;
use super::sync::OrderSnapshot;
use super::{AuthError, DashboardError};
use crate::config::Config;
use crate::model::{Order, OrderDetails, OrderId, User};
use crate::order_actor::OrderError;
use crate::service::{OrderService, UserService};
use crate::user_actor::UserError;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

type Reply<T> = oneshot::Sender<Result<T, DashboardError>>;

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub admin_password: String,
    pub poll_interval: Duration,
    pub alert_ceiling: Duration,
}

impl From<&Config> for DashboardSettings {
    fn from(config: &Config) -> Self {
        Self {
            admin_password: config.admin_password.clone(),
            poll_interval: config.poll_interval,
            alert_ceiling: config.alert_ceiling,
        }
    }
}

/// Outcome of one sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub total_orders: usize,
    pub new_orders: Vec<OrderId>,
}

enum Command {
    Login {
        password: String,
        respond_to: Reply<RefreshReport>,
    },
    Logout {
        respond_to: Reply<()>,
    },
    Refresh {
        respond_to: Reply<RefreshReport>,
    },
    Advance {
        id: OrderId,
        respond_to: Reply<Order>,
    },
    View {
        query: OrderQuery,
        respond_to: Reply<Vec<OrderDetails>>,
    },
    Users {
        respond_to: Reply<Vec<User>>,
    },
    Stats {
        respond_to: Reply<DashboardStats>,
    },
}

/// State that only exists while logged in. Dropping it stops the polling.
struct Session {
    snapshot: OrderSnapshot,
    users: Vec<User>,
    ticker: Interval,
}

pub struct AdminDashboard {
    receiver: mpsc::Receiver<Command>,
    orders: OrderService,
    users: UserService,
    settings: DashboardSettings,
    notifier: Arc<dyn Notifier>,
    alert: BoundedAlert,
    session: Option<Session>,
}

/// Cloneable handle to a running [`AdminDashboard`].
#[derive(Clone)]
pub struct DashboardHandle {
    sender: mpsc::Sender<Command>,
}

impl AdminDashboard {
    pub fn new(
        orders: OrderService,
        users: UserService,
        settings: DashboardSettings,
        notifier: Arc<dyn Notifier>,
        sound: Arc<dyn AlertSound>,
    ) -> (Self, DashboardHandle) {
        let (sender, receiver) = mpsc::channel(32);
        let alert = BoundedAlert::new(sound, settings.alert_ceiling);
        let dashboard = Self {
            receiver,
            orders,
            users,
            settings,
            notifier,
            alert,
            session: None,
        };
        (dashboard, DashboardHandle { sender })
    }

    /// Runs until every handle is dropped.
    pub async fn run(mut self) {
        info!("Dashboard started");
        loop {
            tokio::select! {
                biased;
                _ = next_tick(&mut self.session) => {
                    if let Err(e) = self.sync_cycle().await {
                        warn!(error = %e, "Scheduled refresh failed");
                    }
                }
                command = self.receiver.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
            }
        }
        info!("Dashboard stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Login {
                password,
                respond_to,
            } => {
                let _ = respond_to.send(self.login(&password).await);
            }
            Command::Logout { respond_to } => {
                if self.session.take().is_some() {
                    info!("Admin logged out");
                }
                let _ = respond_to.send(Ok(()));
            }
            Command::Refresh { respond_to } => {
                let _ = respond_to.send(self.refresh().await);
            }
            Command::Advance { id, respond_to } => {
                let _ = respond_to.send(self.advance(id).await);
            }
            Command::View { query, respond_to } => {
                let result = self
                    .session()
                    .map(|s| filter_orders(s.snapshot.orders(), &query, &Local::now()));
                let _ = respond_to.send(result);
            }
            Command::Users { respond_to } => {
                let _ = respond_to.send(self.session().map(|s| s.users.clone()));
            }
            Command::Stats { respond_to } => {
                let result = self
                    .session()
                    .map(|s| DashboardStats::compute(s.snapshot.orders(), &Local::now()));
                let _ = respond_to.send(result);
            }
        }
    }

    fn session(&self) -> Result<&Session, DashboardError> {
        self.session.as_ref().ok_or(DashboardError::NotAuthenticated)
    }

    async fn login(&mut self, password: &str) -> Result<RefreshReport, DashboardError> {
        if password != self.settings.admin_password {
            warn!("Admin login rejected");
            self.notifier
                .notify(Notice::destructive("Login failed", "Invalid password"));
            return Err(AuthError::InvalidPassword.into());
        }

        if self.session.is_none() {
            let period = self.settings.poll_interval;
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.session = Some(Session {
                snapshot: OrderSnapshot::default(),
                users: Vec::new(),
                ticker,
            });
            info!(poll_secs = period.as_secs(), "Admin logged in");
            self.notifier
                .notify(Notice::info("Welcome", "Logged in to the admin dashboard"));
        }

        match self.sync_cycle().await {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!(error = %e, "Initial refresh failed");
                Ok(RefreshReport {
                    total_orders: self.session.as_ref().map_or(0, |s| s.snapshot.len()),
                    new_orders: Vec::new(),
                })
            }
        }
    }

    /// Operator-initiated refresh; always ends with a notice.
    async fn refresh(&mut self) -> Result<RefreshReport, DashboardError> {
        self.session()?;
        match self.sync_cycle().await {
            Ok(report) => {
                self.notifier.notify(Notice::info(
                    "Refreshed",
                    format!("{} orders loaded", report.total_orders),
                ));
                Ok(report)
            }
            Err(e) => {
                let message = notice_text(&e, "Failed to fetch orders");
                self.notifier
                    .notify(Notice::destructive("Refresh failed", message));
                Err(e)
            }
        }
    }

    /// Writes `next(status)` for a held order, then reconciles.
    async fn advance(&mut self, id: OrderId) -> Result<Order, DashboardError> {
        let session = self.session()?;
        let current = session
            .snapshot
            .get(id)
            .map(|o| o.order.status)
            .ok_or(OrderError::NotFound(id))?;
        let Some(next) = current.next() else {
            return Err(DashboardError::NoFurtherTransition(id));
        };

        match self.orders.transition(id, next).await {
            Ok(updated) => {
                self.notifier.notify(Notice::info(
                    "Order updated",
                    format!("Order #{id} is now {next}"),
                ));
                if let Some(session) = self.session.as_mut() {
                    session.snapshot.apply(&updated);
                }
                if let Err(e) = self.sync_cycle().await {
                    warn!(error = %e, "Refresh after status update failed");
                }
                Ok(updated)
            }
            Err(e) => {
                let e = DashboardError::from(e);
                let message = notice_text(&e, "Failed to update order");
                self.notifier
                    .notify(Notice::destructive("Update failed", message));
                Err(e)
            }
        }
    }

    /// Pulls orders and users, swaps the snapshot and alerts on new ids.
    ///
    /// An order fetch failure leaves the previous snapshot in place; a user
    /// fetch failure only keeps the previous user list.
    async fn sync_cycle(&mut self) -> Result<RefreshReport, DashboardError> {
        let fetched = self.orders.list_orders(None).await?;
        let users = self.users.list_users().await;

        let session = self
            .session
            .as_mut()
            .ok_or(DashboardError::NotAuthenticated)?;
        let new_orders = session.snapshot.replace(fetched);
        match users {
            Ok(users) => session.users = users,
            Err(e) => warn!(error = %e, "User refresh failed"),
        }

        if !new_orders.is_empty() {
            info!(new_orders = new_orders.len(), "New orders arrived");
            self.alert.trigger();
        }
        debug!(total = session.snapshot.len(), "Snapshot refreshed");

        Ok(RefreshReport {
            total_orders: session.snapshot.len(),
            new_orders,
        })
    }
}

/// Message for an operator notice. Store failures are logged in full and
/// shown as `fallback` only.
fn notice_text(err: &DashboardError, fallback: &str) -> String {
    match err {
        DashboardError::Order(OrderError::Store(e)) => {
            error!(error = %e, "Order store error");
            fallback.to_string()
        }
        DashboardError::User(UserError::Store(e)) => {
            error!(error = %e, "User store error");
            fallback.to_string()
        }
        DashboardError::User(UserError::Hashing(e)) => {
            error!(error = %e, "Password hashing failed");
            fallback.to_string()
        }
        other => other.to_string(),
    }
}

/// Resolves on the next poll tick, or never while logged out.
async fn next_tick(session: &mut Option<Session>) {
    match session {
        Some(session) => {
            session.ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

impl DashboardHandle {
    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, DashboardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(command(respond_to))
            .await
            .map_err(|_| DashboardError::Closed)?;
        response.await.map_err(|_| DashboardError::Closed)?
    }

    /// Checks the shared admin password, starts polling and runs the first
    /// sync cycle.
    pub async fn login(
        &self,
        password: impl Into<String>,
    ) -> Result<RefreshReport, DashboardError> {
        let password = password.into();
        self.request(|respond_to| Command::Login {
            password,
            respond_to,
        })
        .await
    }

    /// Ends the session and stops polling. Idempotent.
    pub async fn logout(&self) -> Result<(), DashboardError> {
        self.request(|respond_to| Command::Logout { respond_to }).await
    }

    pub async fn refresh(&self) -> Result<RefreshReport, DashboardError> {
        self.request(|respond_to| Command::Refresh { respond_to })
            .await
    }

    pub async fn advance(&self, id: OrderId) -> Result<Order, DashboardError> {
        self.request(|respond_to| Command::Advance { id, respond_to })
            .await
    }

    pub async fn view(&self, query: OrderQuery) -> Result<Vec<OrderDetails>, DashboardError> {
        self.request(|respond_to| Command::View { query, respond_to })
            .await
    }

    pub async fn users(&self) -> Result<Vec<User>, DashboardError> {
        self.request(|respond_to| Command::Users { respond_to })
            .await
    }

    pub async fn stats(&self) -> Result<DashboardStats, DashboardError> {
        self.request(|respond_to| Command::Stats { respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn store_details_stay_out_of_notices() {
        let err = DashboardError::Order(OrderError::Store(StoreError::Corrupt(
            "status \"shipped\" in row 7".into(),
        )));
        assert_eq!(notice_text(&err, "Failed to fetch orders"), "Failed to fetch orders");

        let err = DashboardError::User(UserError::Store(StoreError::Poisoned));
        assert_eq!(notice_text(&err, "Failed to fetch orders"), "Failed to fetch orders");
    }

    #[test]
    fn rejections_are_shown_as_is() {
        let err = DashboardError::Order(OrderError::NotFound(OrderId(12)));
        assert_eq!(notice_text(&err, "Failed to update order"), "Order not found: 12");

        let err = DashboardError::Order(OrderError::InvalidTransition {
            from: crate::model::OrderStatus::Pending,
            to: crate::model::OrderStatus::Delivered,
        });
        assert_eq!(
            notice_text(&err, "Failed to update order"),
            "Cannot move order from pending to delivered"
        );
    }
}
