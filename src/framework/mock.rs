//! # Mock Clients
//!
//! Test doubles for [`ResourceClient`]. Two styles are supported:
//!
//! - [`MockClient`]: queue canned responses up front, then hand out a real
//!   `ResourceClient` whose requests are answered from the queue in order.
//! - [`create_mock_client`] plus the `expect_*` helpers: receive the raw
//!   [`ResourceRequest`] yourself and reply through its response channel.
//!
//! Both make it easy to inject faults such as [`FrameworkError::ActorClosed`]
//! that are awkward to produce with a real actor.
//!
//! ```rust
//! use product_catalog::framework::mock::MockClient;
//! use product_catalog::framework::FrameworkError;
//! use product_catalog::model::{Product, ProductId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Product>::new();
//!     mock.expect_get(ProductId(1)).return_err(FrameworkError::ActorDropped);
//!
//!     let result = mock.client().get(ProductId(1)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorDropped)));
//!     mock.verify();
//! }
//! ```

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get(T::Id, Result<Option<T>, FrameworkError>),
    Create(Result<T, FrameworkError>),
    Update(T::Id, Result<T, FrameworkError>),
    Delete(T::Id, Result<T, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    Count(Result<usize, FrameworkError>),
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;
type Failures = Arc<Mutex<Vec<String>>>;

/// A `ResourceClient` backed by a queue of canned responses.
///
/// Requests must arrive in the order the expectations were queued, and requests for
/// a specific id must name the queued id. On a mismatch the responder is dropped, so
/// the caller sees `ActorDropped`, and [`MockClient::verify`] panics with the details.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    failures: Failures,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let failures: Failures = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let failures_clone = failures.clone();

        // Spawn background task to answer requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get(expected, response)),
                    ) => answer(&failures_clone, respond_to, response, "Get", id, expected),
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create(response)),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(expected, response)),
                    ) => answer(&failures_clone, respond_to, response, "Update", id, expected),
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete(expected, response)),
                    ) => answer(&failures_clone, respond_to, response, "Delete", id, expected),
                    (ResourceRequest::List { respond_to }, Some(Expectation::List(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Count { respond_to }, Some(Expectation::Count(response))) => {
                        let _ = respond_to.send(response);
                    }
                    // The request (and its responder) is dropped only after the failure is recorded.
                    (request, None) => record(
                        &failures_clone,
                        format!("Unexpected {} request", request.kind()),
                    ),
                    (request, Some(_)) => record(
                        &failures_clone,
                        format!("Expectation mismatch at {} request", request.kind()),
                    ),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            failures,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |r| Expectation::Get(id, r))
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Create)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |r| Expectation::Update(id, r))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |r| Expectation::Delete(id, r))
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::List)
    }

    pub fn expect_count(&mut self) -> ExpectationBuilder<T, usize> {
        ExpectationBuilder::new(self.expectations.clone(), Expectation::Count)
    }

    /// Panics if a request did not match its expectation, or if any queued
    /// expectation was not consumed.
    pub fn verify(&self) {
        let failures = self.failures.lock().expect("mock failures poisoned");
        if !failures.is_empty() {
            panic!("Mock requests did not match: {}", failures.join("; "));
        }
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn record(failures: &Failures, failure: String) {
    failures
        .lock()
        .expect("mock failures poisoned")
        .push(failure);
}

/// Replies when the requested id is the expected one; otherwise records the mismatch
/// and drops the responder.
fn answer<T, I>(
    failures: &Failures,
    respond_to: oneshot::Sender<Result<T, FrameworkError>>,
    response: Result<T, FrameworkError>,
    kind: &str,
    id: I,
    expected: I,
) where
    I: PartialEq + std::fmt::Display,
{
    if id != expected {
        record(failures, format!("{} for {}, expected {}", kind, id, expected));
        return;
    }
    let _ = respond_to.send(response);
}

/// Queues the response for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Expectations<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new<F>(expectations: Expectations<T>, wrap: F) -> Self
    where
        F: FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    {
        Self {
            expectations,
            wrap: Box::new(wrap),
        }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}
