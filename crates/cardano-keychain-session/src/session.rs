//! Per-session keychain cache.
//!
//! A [`Session`] holds at most one [`Keychain`]. The first request provisions
//! it, every later request reuses it, and only [`Session::clear`] (lock,
//! reset, session end) forgets it.
//!
//! ## States
//!
//! ```text
//! Uncached --get_or_provision--> Provisioning --ok--> Cached
//!     ^                              |                   |
//!     +-------------err--------------+                   |
//!     +---------------------clear------------------------+
//! ```
//!
//! Requests that arrive while provisioning is in flight wait for it instead
//! of starting their own, and receive its outcome whether it succeeds or
//! fails. Failures cache nothing.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cardano_keychain_core::Keychain;
use tokio::sync::watch;

use crate::error::Result;

/// Observable cache state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningState {
    /// Nothing cached, nothing in flight.
    Uncached,
    /// A provisioning attempt is running.
    Provisioning,
    /// A keychain is cached.
    Cached,
}

type Outcome = Result<Arc<Keychain>>;

enum SlotState {
    Empty,
    /// Waiters subscribe here; the value turns `Some` once the attempt ends.
    Provisioning(watch::Receiver<Option<Outcome>>),
    Cached(Arc<Keychain>),
}

struct KeychainSlot {
    state: Mutex<SlotState>,
}

impl KeychainSlot {
    fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Empty),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The caller running a provisioning attempt.
///
/// Dropped without [`Attempt::finish`] (the caller was cancelled), it
/// resets the slot so a waiter can take over.
struct Attempt {
    slot: Arc<KeychainSlot>,
    tx: Option<watch::Sender<Option<Outcome>>>,
}

impl Attempt {
    fn finish(mut self, outcome: &Outcome) {
        *self.slot.lock() = match outcome {
            Ok(keychain) => SlotState::Cached(Arc::clone(keychain)),
            Err(_) => SlotState::Empty,
        };
        if let Some(tx) = self.tx.take() {
            tx.send_replace(Some(outcome.clone()));
        }
    }
}

impl Drop for Attempt {
    fn drop(&mut self) {
        if self.tx.take().is_some() {
            *self.slot.lock() = SlotState::Empty;
        }
    }
}

enum Step {
    Lead(Attempt),
    Wait(watch::Receiver<Option<Outcome>>),
}

/// Session-scoped keychain cache.
pub struct Session {
    slot: Mutex<Arc<KeychainSlot>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Arc::new(KeychainSlot::new())),
        }
    }
}

impl Session {
    /// A fresh, uncached session.
    pub fn new() -> Self {
        Self::default()
    }

    fn current(&self) -> Arc<KeychainSlot> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*slot)
    }

    fn is_current(&self, slot: &Arc<KeychainSlot>) -> bool {
        let current = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::ptr_eq(&*current, slot)
    }

    /// Return the cached keychain, running `factory` if there is none.
    ///
    /// At most one `factory` runs at a time. Concurrent callers await it and
    /// receive its outcome, failures included. If the session is cleared
    /// before `factory` finishes, its callers still receive the keychain but
    /// the session does not keep it.
    pub async fn get_or_provision<F, Fut>(&self, factory: F) -> Result<Arc<Keychain>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Keychain>>,
    {
        let attempt = loop {
            let slot = self.current();
            let step = {
                let mut state = slot.lock();
                let in_flight = match &*state {
                    SlotState::Cached(keychain) => {
                        tracing::trace!("Keychain cache hit");
                        return Ok(Arc::clone(keychain));
                    }
                    SlotState::Provisioning(rx) => Some(rx.clone()),
                    SlotState::Empty => None,
                };
                match in_flight {
                    Some(rx) => Step::Wait(rx),
                    None => {
                        let (tx, rx) = watch::channel(None);
                        *state = SlotState::Provisioning(rx);
                        Step::Lead(Attempt {
                            slot: Arc::clone(&slot),
                            tx: Some(tx),
                        })
                    }
                }
            };

            match step {
                Step::Lead(attempt) => break attempt,
                Step::Wait(mut rx) => {
                    tracing::trace!("Awaiting in-flight provisioning");
                    // A closed channel means the attempt was abandoned.
                    if let Ok(outcome) = rx.wait_for(Option::is_some).await {
                        if let Some(outcome) = outcome.clone() {
                            return outcome;
                        }
                    }
                }
            }
        };

        let slot = Arc::clone(&attempt.slot);
        let outcome = factory().await.map(Arc::new);
        attempt.finish(&outcome);

        if let Ok(keychain) = &outcome {
            if self.is_current(&slot) {
                tracing::info!(fingerprint = %keychain.fingerprint(), "Keychain cached for session");
            } else {
                tracing::debug!("Session cleared during provisioning, result not cached");
            }
        }
        outcome
    }

    /// The cached keychain, if any.
    pub fn cached(&self) -> Option<Arc<Keychain>> {
        let slot = self.current();
        let state = slot.lock();
        match &*state {
            SlotState::Cached(keychain) => Some(Arc::clone(keychain)),
            _ => None,
        }
    }

    /// Current cache state.
    pub fn state(&self) -> ProvisioningState {
        let slot = self.current();
        let state = slot.lock();
        match &*state {
            SlotState::Empty => ProvisioningState::Uncached,
            SlotState::Provisioning(_) => ProvisioningState::Provisioning,
            SlotState::Cached(_) => ProvisioningState::Cached,
        }
    }

    /// Forget the cached keychain and detach any in-flight provisioning.
    pub fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(KeychainSlot::new());
        tracing::debug!("Session keychain cleared");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .finish()
    }
}
