//! # Mock Utilities
//!
//! Test doubles for clients that wrap a [`ResourceClient`]. Instead of running
//! a real `ResourceActor`, the client talks to a channel owned by the test,
//! which then decides what each request answers.
//!
//! Two styles are offered:
//!
//! * [`MockClient`]: queue expectations up front, answered in order.
//! * [`create_mock_client`] plus the `expect_*` helpers: receive each request
//!   by hand, inspect its payload, and reply through its `respond_to` channel.
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Customer>::new();
//! mock.expect_get(CustomerId(1)).return_ok(Some(customer));
//!
//! let orders = OrderContext::new(CustomerClient::new(mock.client()));
//! // ... exercise the code under test ...
//! mock.verify();
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking.
///
/// Requests are matched against the queued expectations in FIFO order. A
/// request with no matching expectation panics the background task, which the
/// caller then observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside
    /// a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert!(id == expected, "get for {id}, expected {expected}");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert!(id == expected, "action on {id}, expected {expected}");
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, id: T::Id) {
        lock(&self.expectations).push_back(Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    pub fn return_ok(self, value: Option<T>) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, items: Vec<T>) {
        lock(&self.expectations).push_back(Expectation::List { response: Ok(items) });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::List {
            response: Err(error),
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        lock(&self.expectations).push_back(Expectation::Action {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client together with the receiving end of its channel.
///
/// The test plays the actor: it pulls requests off `receiver` with the
/// `expect_*` helpers below, asserts on their payloads and answers through
/// the returned `respond_to` sender. Useful when the payload itself is what
/// the test is about.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Ticket {
        id: u64,
        table: u32,
    }

    #[derive(Debug)]
    struct TicketCreate {
        table: u32,
    }

    #[derive(Debug)]
    enum TicketAction {
        Move(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("ticket error")]
    struct TicketError;

    #[async_trait]
    impl ActorEntity for Ticket {
        type Id = u64;
        type Create = TicketCreate;
        type Action = TicketAction;
        type ActionResult = u32;
        type Context = ();
        type Error = TicketError;

        fn from_create_params(id: u64, params: TicketCreate, _: &()) -> Result<Self, TicketError> {
            Ok(Self {
                id,
                table: params.table,
            })
        }

        async fn handle_action(&mut self, action: TicketAction, _: &()) -> Result<u32, TicketError> {
            let TicketAction::Move(table) = action;
            self.table = table;
            Ok(table)
        }
    }

    #[tokio::test]
    async fn manual_helpers_expose_request_payloads() {
        let (client, mut receiver) = create_mock_client::<Ticket>(10);

        let handle = tokio::spawn(async move { client.create(TicketCreate { table: 4 }).await });

        let (params, respond_to) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(params.table, 4);
        respond_to.send(Ok(9)).unwrap();

        assert_eq!(handle.await.unwrap().unwrap(), 9);
    }

    #[tokio::test]
    async fn queued_expectations_answer_in_order() {
        let mut mock = MockClient::<Ticket>::new();
        let ticket = Ticket { id: 1, table: 2 };
        mock.expect_get(1).return_ok(Some(ticket.clone()));
        mock.expect_list().return_ok(vec![ticket.clone()]);
        mock.expect_action(1).return_ok(5);
        mock.expect_create().return_err(FrameworkError::Conflict("t".into()));

        let client = mock.client();
        assert_eq!(client.get(1).await.unwrap(), Some(ticket.clone()));
        assert_eq!(client.list().await.unwrap(), vec![ticket]);
        assert_eq!(client.perform_action(1, TicketAction::Move(5)).await.unwrap(), 5);
        assert!(matches!(
            client.create(TicketCreate { table: 1 }).await,
            Err(FrameworkError::Conflict(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn unexpected_request_surfaces_as_dropped() {
        let mock = MockClient::<Ticket>::new();
        let result = mock.client().list().await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
