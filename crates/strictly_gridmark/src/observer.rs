//! State-change observers.
//!
//! Observers receive the new status and pull anything else they need from
//! the [`GameState`] passed alongside it. Delivery is synchronous, in
//! registration order, once per registration.

use crate::error::ObserverError;
use crate::game::GameState;
use crate::types::GameStatus;
use derive_getters::Getters;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Receives a call after every successful move and every reset.
pub trait GameObserver: Send + Sync {
    /// Called with the game after the change and its resulting status.
    fn on_state_changed(&self, game: &GameState, status: GameStatus) -> Result<(), ObserverError>;
}

impl<F> GameObserver for F
where
    F: Fn(&GameState, GameStatus) -> Result<(), ObserverError> + Send + Sync,
{
    fn on_state_changed(&self, game: &GameState, status: GameStatus) -> Result<(), ObserverError> {
        self(game, status)
    }
}

/// Shared handle to a registered observer.
pub type ObserverHandle = Arc<dyn GameObserver>;

/// An observer that returned an error during a notification round.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ObserverFailure {
    /// Registration index of the failing observer.
    index: usize,
    /// What it reported.
    error: ObserverError,
}

/// Outcome of one notification round.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Notification {
    /// Status that was delivered.
    status: GameStatus,
    /// Number of observers called.
    delivered: usize,
    /// Observers that reported an error.
    failures: Vec<ObserverFailure>,
}

impl Notification {
    /// True when every observer accepted the notification.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered list of observer handles.
#[derive(Clone, Default)]
pub(crate) struct ObserverRegistry {
    observers: Vec<ObserverHandle>,
}

fn same_observer(a: &ObserverHandle, b: &ObserverHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: ObserverHandle) {
        self.observers.push(observer);
        debug!(count = self.observers.len(), "Observer subscribed");
    }

    /// Removes the first registration of `observer`; unknown handles are ignored.
    pub(crate) fn unsubscribe(&mut self, observer: &ObserverHandle) {
        if let Some(index) = self.observers.iter().position(|o| same_observer(o, observer)) {
            self.observers.remove(index);
            debug!(index, count = self.observers.len(), "Observer unsubscribed");
        } else {
            debug!("Unsubscribe ignored, observer not registered");
        }
    }

    pub(crate) fn as_slice(&self) -> &[ObserverHandle] {
        &self.observers
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    /// Calls every observer in order. A failing observer does not stop the round.
    #[instrument(skip(self, game), fields(observers = self.observers.len()))]
    pub(crate) fn notify(&self, game: &GameState, status: GameStatus) -> Notification {
        let mut failures = Vec::new();
        for (index, observer) in self.observers.iter().enumerate() {
            if let Err(error) = observer.on_state_changed(game, status) {
                warn!(index, %error, "Observer failed to handle state change");
                failures.push(ObserverFailure { index, error });
            }
        }
        Notification {
            status,
            delivered: self.observers.len(),
            failures,
        }
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("count", &self.observers.len())
            .finish()
    }
}
