//! The activity cart: the set of activities a visitor has added to one
//! listing's prospective booking.
//!
//! [`ActivityCart`] is an explicit store with subscribe/snapshot/notify
//! operations; dependent views re-derive themselves from the latest
//! snapshot after every mutation instead of being re-rendered by a common
//! ancestor. In-memory state is authoritative; the persisted record is a
//! best-effort mirror.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;

use crate::domain::activity::Activity;
use crate::domain::types::{ActivityId, HouseId};

pub mod modal;
pub mod storage;

pub use storage::{CartStorage, FileCartStorage, storage_key};

/// Callback invoked with the latest snapshot after each mutation.
/// Notification runs synchronously; a subscriber must not register or
/// remove subscribers from inside its callback.
pub type CartListener = Box<dyn Fn(&[Activity]) + Send + Sync>;

/// Handle returned by [`ActivityCart::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

struct CartInner {
    activities: Vec<Activity>,
    /// Set once the persisted record has been read. Until then reads
    /// observe an empty collection and mutations are not persisted, so
    /// the first server-rendered paint and the first hydrated paint agree.
    loaded: bool,
}

pub struct ActivityCart {
    key: String,
    storage: Arc<dyn CartStorage>,
    inner: Mutex<CartInner>,
    listeners: Mutex<Vec<(SubscriptionId, CartListener)>>,
    next_subscription: Mutex<u64>,
}

impl ActivityCart {
    /// A cart scoped to one listing (or the global fallback key), starting
    /// empty until [`ActivityCart::ensure_loaded`] runs.
    pub fn new(house_id: Option<HouseId>, storage: Arc<dyn CartStorage>) -> Self {
        Self {
            key: storage_key(house_id),
            storage,
            inner: Mutex::new(CartInner {
                activities: Vec::new(),
                loaded: false,
            }),
            listeners: Mutex::new(Vec::new()),
            next_subscription: Mutex::new(0),
        }
    }

    /// Reads the persisted record exactly once, then notifies subscribers.
    /// An absent or corrupt record yields the empty cart; a failed read is
    /// swallowed and the cart still counts as loaded.
    pub fn ensure_loaded(&self) {
        {
            let mut inner = self.inner.lock().expect("cart lock poisoned");
            if inner.loaded {
                return;
            }
            inner.loaded = true;
            match self.storage.load(&self.key) {
                Ok(Some(payload)) => {
                    inner.activities =
                        serde_json::from_str(&payload).unwrap_or_default();
                }
                Ok(None) => {}
                Err(err) => {
                    debug!("cart {key}: load failed: {err}", key = self.key);
                }
            }
        }
        self.notify();
    }

    /// Inserts `activity` unless an entry with its id is already present.
    /// Idempotent: adding the same activity twice keeps a single entry.
    pub fn add(&self, activity: Activity) {
        let mutated = {
            let mut inner = self.inner.lock().expect("cart lock poisoned");
            if inner.activities.iter().any(|a| a.id == activity.id) {
                false
            } else {
                inner.activities.push(activity);
                self.persist(&inner);
                true
            }
        };
        if mutated {
            self.notify();
        }
    }

    /// Deletes the entry with the given id; no-op when absent.
    pub fn remove(&self, activity_id: ActivityId) {
        let mutated = {
            let mut inner = self.inner.lock().expect("cart lock poisoned");
            let before = inner.activities.len();
            inner.activities.retain(|a| a.id != activity_id);
            let mutated = inner.activities.len() != before;
            if mutated {
                self.persist(&inner);
            }
            mutated
        };
        if mutated {
            self.notify();
        }
    }

    /// Empties the collection.
    pub fn clear(&self) {
        {
            let mut inner = self.inner.lock().expect("cart lock poisoned");
            inner.activities.clear();
            self.persist(&inner);
        }
        self.notify();
    }

    /// Pure membership predicate over the in-memory state.
    pub fn is_in_cart(&self, activity_id: ActivityId) -> bool {
        self.inner
            .lock()
            .expect("cart lock poisoned")
            .activities
            .iter()
            .any(|a| a.id == activity_id)
    }

    /// Snapshot of the collection in insertion order.
    pub fn list(&self) -> Vec<Activity> {
        self.inner
            .lock()
            .expect("cart lock poisoned")
            .activities
            .clone()
    }

    pub fn subscribe(&self, listener: CartListener) -> SubscriptionId {
        let mut next = self.next_subscription.lock().expect("cart lock poisoned");
        *next += 1;
        let id = SubscriptionId(*next);
        self.listeners
            .lock()
            .expect("cart lock poisoned")
            .push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .expect("cart lock poisoned")
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Writes the full serialized collection, best-effort. Skipped until
    /// the initial load completed so a not-yet-loaded cart cannot
    /// overwrite a record it has never seen.
    fn persist(&self, inner: &CartInner) {
        if !inner.loaded {
            return;
        }
        let payload = match serde_json::to_string(&inner.activities) {
            Ok(payload) => payload,
            Err(err) => {
                debug!("cart {key}: serialize failed: {err}", key = self.key);
                return;
            }
        };
        if let Err(err) = self.storage.store(&self.key, &payload) {
            debug!("cart {key}: write failed: {err}", key = self.key);
        }
    }

    fn notify(&self) {
        let snapshot = self.list();
        for (_, listener) in self.listeners.lock().expect("cart lock poisoned").iter() {
            listener(&snapshot);
        }
    }
}

/// One cart per listing id. Switching listings neither leaks nor merges
/// carts; each store loads its own record on first use.
pub struct CartRegistry {
    storage: Arc<dyn CartStorage>,
    carts: Mutex<HashMap<String, Arc<ActivityCart>>>,
}

impl CartRegistry {
    pub fn new(storage: Arc<dyn CartStorage>) -> Self {
        Self {
            storage,
            carts: Mutex::new(HashMap::new()),
        }
    }

    /// The cart for the given listing, created and loaded on first access.
    pub fn cart(&self, house_id: Option<HouseId>) -> Arc<ActivityCart> {
        let cart = {
            let mut carts = self.carts.lock().expect("cart registry lock poisoned");
            carts
                .entry(storage_key(house_id))
                .or_insert_with(|| {
                    Arc::new(ActivityCart::new(house_id, Arc::clone(&self.storage)))
                })
                .clone()
        };
        cart.ensure_loaded();
        cart
    }
}
