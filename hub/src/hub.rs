//! The shared application hub.
//!
//! A [`Hub`] is the one mutable namespace a client-side application is built
//! around: framework modules extend it with named values at bootstrap, any
//! holder of a reference subscribes to and emits named events on it, and
//! [`reset()`](Hub::reset) wipes it back to its pristine state so independent
//! test cases and bootstrap cycles never see each other's leftovers.
//!
//! # Architecture
//!
//! The hub composes two parts:
//! - **Extensions**: the dynamic mapping field holding extended data, behind
//!   an `RwLock` so a multi-key merge is atomic with respect to readers
//! - **Emitter**: the event registry, internally sharded so subscribe and
//!   emit need no outer lock
//!
//! The operation surface itself is the type's methods. Unlike the dynamic
//! mapping, it cannot be extended over or swept away by a reset.
//!
//! # Example
//!
//! ```ignore
//! use app_hub::{props, shared};
//!
//! let hub = shared();
//!
//! // Bootstrap: modules extend the hub
//! hub.extend(props! { "name" => "docs", "debug" => true })
//!     .extend(props! { "debug" => false });
//!
//! // Anyone with the hub can subscribe and emit
//! let subscription = hub.on("page:change", |page: &String| {
//!     println!("navigated to {page}");
//! });
//! hub.emit("page:change", &String::from("home"));
//!
//! // Test isolation: back to the pristine state
//! hub.reset();
//! ```

use std::{
    any::Any,
    sync::{LazyLock, RwLock},
};

use log::debug;

use crate::event::{Emitter, Subscription};
use crate::extension::{Extension, Value};
use crate::storage::Extensions;

/// The process-wide hub instance.
static SHARED: LazyLock<Hub> = LazyLock::new(Hub::new);

/// Returns the process-wide shared hub.
///
/// The instance is constructed on first access and lives until process exit;
/// it is never destroyed, only [`reset`](Hub::reset) in place. Code that
/// prefers explicit ownership can construct its own [`Hub::new`] at the
/// composition root instead and pass references down.
#[inline]
pub fn shared() -> &'static Hub {
    &SHARED
}

/// A shared, mutable namespace with named-event publish/subscribe.
///
/// A `Hub` holds an open-ended mapping from string keys to values (populated
/// by [`extend`](Hub::extend) and the typed single-key operations) plus an
/// owned event registry. It is `Send + Sync`; all operations take `&self` and
/// synchronize internally, so a `'static` or `Arc`-held hub can be used from
/// any thread.
pub struct Hub {
    /// Extended data. The lock scope is one operation; handlers never run
    /// under it.
    extensions: RwLock<Extensions>,

    /// The event registry. Reset leaves it indistinguishable from fresh.
    events: Emitter,
}

impl Hub {
    /// Creates a new, empty hub.
    pub fn new() -> Self {
        Self {
            extensions: RwLock::new(Extensions::new()),
            events: Emitter::new(),
        }
    }

    // ==================== Namespace ====================

    /// Merges a source of `(key, value)` pairs into the hub.
    ///
    /// Pairs are merged in iteration order and later pairs win on key
    /// collision, as do later sources across chained calls:
    ///
    /// ```ignore
    /// hub.extend(props! { "a" => 1, "b" => 2 })
    ///     .extend(props! { "a" => 3 });
    /// // a == 3, b == 2
    /// ```
    ///
    /// The whole merge happens under one write lock, so readers observe
    /// either none or all of a source. An empty source is a no-op. Returns
    /// the hub itself for chaining; non-mapping sources are unrepresentable
    /// in the signature, which is this implementation's rendering of the
    /// original's undefined behavior for them.
    pub fn extend<S>(&self, source: S) -> &Self
    where
        S: IntoIterator<Item = (String, Value)>,
    {
        self.extensions.write().unwrap().merge(source);
        self
    }

    /// Inserts a single typed value under `key`, replacing any previous value.
    #[inline]
    pub fn set<V: Extension>(&self, key: impl Into<String>, value: V) {
        self.extensions.write().unwrap().insert(key, value);
    }

    /// Returns a clone of the value under `key`, if it exists with type `V`.
    ///
    /// For values that are not `Clone`, use [`read`](Hub::read).
    #[inline]
    pub fn get<V: Extension + Clone>(&self, key: &str) -> Option<V> {
        self.extensions.read().unwrap().get::<V>(key).cloned()
    }

    /// Calls `f` with a shared borrow of the value under `key`, if it exists
    /// with type `V`, and returns the result.
    ///
    /// The read lock is held for the duration of `f`; do not call hub
    /// namespace operations from inside it.
    pub fn read<V: Extension, R>(&self, key: &str, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.extensions.read().unwrap().get::<V>(key).map(f)
    }

    /// Calls `f` with an exclusive borrow of the value under `key`, if it
    /// exists with type `V`, and returns the result.
    pub fn write<V: Extension, R>(&self, key: &str, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.extensions.write().unwrap().get_mut::<V>(key).map(f)
    }

    /// Removes the value under `key`, returning it if it existed with type `V`.
    #[inline]
    pub fn remove<V: Extension>(&self, key: &str) -> Option<V> {
        self.extensions.write().unwrap().remove::<V>(key)
    }

    /// Returns `true` if a value is stored under `key`.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.extensions.read().unwrap().contains(key)
    }

    /// Returns a snapshot of the stored keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.extensions
            .read()
            .unwrap()
            .keys()
            .map(str::to_owned)
            .collect()
    }

    /// Returns the number of stored values.
    #[inline]
    pub fn len(&self) -> usize {
        self.extensions.read().unwrap().len()
    }

    /// Returns `true` if no values are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.extensions.read().unwrap().is_empty()
    }

    // ==================== Events ====================

    /// Registers a typed handler for `event`. See [`Emitter::on`].
    pub fn on<P, F>(&self, event: impl Into<String>, handler: F) -> Subscription
    where
        P: Any,
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.events.on(event, handler)
    }

    /// Registers a raw `&dyn Any` handler for `event`. See [`Emitter::on_any`].
    pub fn on_any<F>(&self, event: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(&dyn Any) + Send + Sync + 'static,
    {
        self.events.on_any(event, handler)
    }

    /// Registers a typed handler removed when `event` first fires. See
    /// [`Emitter::once`].
    pub fn once<P, F>(&self, event: impl Into<String>, handler: F) -> Subscription
    where
        P: Any,
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.events.once(event, handler)
    }

    /// Removes one registration. See [`Emitter::off`].
    #[inline]
    pub fn off(&self, subscription: Subscription) {
        self.events.off(subscription);
    }

    /// Removes every registration for `event`. See [`Emitter::off_event`].
    #[inline]
    pub fn off_event(&self, event: &str) {
        self.events.off_event(event);
    }

    /// Synchronously dispatches `event` with `payload` to every current
    /// handler, in registration order. See [`Emitter::emit`].
    #[inline]
    pub fn emit(&self, event: &str, payload: &dyn Any) {
        self.events.emit(event, payload);
    }

    /// Returns the number of live registrations for `event`.
    #[inline]
    pub fn handler_count(&self, event: &str) -> usize {
        self.events.handler_count(event)
    }

    // ==================== Reset ====================

    /// Wipes the hub back to its pristine state.
    ///
    /// In order: every event registration is removed, then every stored value
    /// is dropped. Afterwards the hub is indistinguishable from a freshly
    /// constructed one; a handler subscribed before the reset is never
    /// invoked by an emit after it. Destructive and unconditional, with no
    /// partial form; calling it twice is the same as calling it once.
    pub fn reset(&self) {
        self.events.clear();
        let dropped = {
            let mut extensions = self.extensions.write().unwrap();
            let dropped = extensions.len();
            extensions.clear();
            dropped
        };
        debug!("reset: dropped {} extension(s), all handlers", dropped);
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}
