//! Generic fetched-resource state machine.
//!
//! `Idle -> Loading -> Ready(T) | Failed(Failure)`. A trigger is accepted only
//! from `Idle` or `Failed`; there is no automatic retry and no transition out
//! of `Ready` (a remount builds a fresh resource). The machine knows nothing
//! about what it fetches: callers supply a future that already resolved its
//! errors into a user-facing [`Failure`].

use std::future::Future;

use serde::Serialize;
use tokio::sync::watch;

use crate::error::FailureKind;
use crate::scope::ViewScope;

/// A user-facing failure stored in a view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    kind: FailureKind,
    message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transport, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound, message)
    }

    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Current state of an [`AsyncResource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(Failure),
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> ResourceState<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Result of [`AsyncResource::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The fetch ran and its result was installed.
    Settled,
    /// The resource was already loading or ready; nothing was fetched.
    Refused,
    /// The owning scope closed before the fetch finished; state untouched.
    Cancelled,
}

/// Observable state machine for one fetched payload.
#[derive(Debug)]
pub struct AsyncResource<T> {
    state: watch::Sender<ResourceState<T>>,
}

impl<T> Default for AsyncResource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AsyncResource<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ResourceState::Idle);
        Self { state }
    }

    /// Subscribe to state changes. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    /// Inspect the current state without cloning it.
    pub fn with_state<R>(&self, read: impl FnOnce(&ResourceState<T>) -> R) -> R {
        read(&self.state.borrow())
    }

    /// Moves `Idle`/`Failed` to `Loading`. Returns `false` otherwise.
    pub fn begin(&self) -> bool {
        self.state.send_if_modified(|state| match state {
            ResourceState::Idle | ResourceState::Failed(_) => {
                *state = ResourceState::Loading;
                true
            }
            ResourceState::Loading | ResourceState::Ready(_) => false,
        })
    }

    /// Installs the outcome of a fetch started by [`Self::begin`].
    ///
    /// Ignored unless the resource is `Loading`; returns whether it was installed.
    pub fn settle(&self, result: Result<T, Failure>) -> bool {
        let settled = self.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = match result {
                Ok(payload) => ResourceState::Ready(payload),
                Err(failure) => ResourceState::Failed(failure),
            };
            true
        });
        if settled {
            self.with_state(|state| tracing::debug!(state = state.label(), "resource settled"));
        } else {
            tracing::debug!("settle ignored; resource not loading");
        }
        settled
    }

    /// Begins loading and runs `fetch` inside `scope`.
    pub async fn trigger<F>(&self, scope: &ViewScope, fetch: F) -> TriggerOutcome
    where
        F: Future<Output = Result<T, Failure>>,
    {
        if !self.begin() {
            tracing::debug!("trigger refused; resource busy or ready");
            return TriggerOutcome::Refused;
        }

        match scope.run(fetch).await {
            Some(result) => {
                self.settle(result);
                TriggerOutcome::Settled
            }
            None => TriggerOutcome::Cancelled,
        }
    }
}

impl<T: Clone> AsyncResource<T> {
    /// Snapshot of the current state.
    pub fn state(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }
}
