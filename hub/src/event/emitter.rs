//! Central registry for event subscriptions.
//!
//! This module provides [`Emitter`], which owns every subscription on a hub
//! and dispatches emitted events to them. It handles registration, removal,
//! and synchronous in-order delivery.
//!
//! # Overview
//!
//! The `Emitter` serves as the hub's subscription registry:
//! - **Registration**: [`on()`](Emitter::on) / [`once()`](Emitter::once)
//!   append a handler to the list for an event name and hand back a
//!   [`Subscription`] token
//! - **Removal**: [`off()`](Emitter::off) removes one registration,
//!   [`off_event()`](Emitter::off_event) an event's worth,
//!   [`clear()`](Emitter::clear) everything
//! - **Dispatch**: [`emit()`](Emitter::emit) invokes the current handlers for
//!   an event, in registration order, before returning
//!
//! # Type Erasure
//!
//! Payloads cross the registry as `&dyn Any`. Handlers registered through
//! `on::<P>` downcast back to their payload type and skip emits whose payload
//! is some other concrete type; [`on_any()`](Emitter::on_any) registers a raw
//! handler that sees every payload.
//!
//! # Reentrancy
//!
//! Handlers run after the registry's internal guard is released, so a handler
//! may subscribe, unsubscribe, or emit on the same emitter. Registry changes
//! made mid-dispatch affect subsequent emits, not the in-flight batch.
//!
//! # Example
//!
//! ```rust,ignore
//! let emitter = Emitter::new();
//!
//! let subscription = emitter.on("page:change", |page: &String| {
//!     println!("navigated to {page}");
//! });
//!
//! emitter.emit("page:change", &String::from("home"));
//! emitter.off(subscription);
//! ```

use std::{
    any::Any,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use dashmap::DashMap;
use log::trace;

/// A registered handler in its type-erased form.
pub(crate) type Handler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// One registration: its token id, whether it expires on first fire, and the
/// handler itself.
struct Entry {
    id: u64,
    once: bool,
    handler: Handler,
}

/// Token returned by a subscribe call, consumed by [`Emitter::off`].
///
/// Dropping a `Subscription` does not unsubscribe; the registration stays
/// live until removed or the registry is cleared.
#[derive(Debug)]
pub struct Subscription {
    event: String,
    id: u64,
}

impl Subscription {
    /// The event name this subscription is registered under.
    #[inline]
    pub fn event(&self) -> &str {
        &self.event
    }
}

/// Central registry for event subscriptions.
///
/// `Emitter` maps event names to registration lists and provides:
/// - Handler registration with stable per-registration tokens
/// - Synchronous dispatch in registration order
/// - Wholesale removal, which is what a hub reset relies on
///
/// # Thread Safety
///
/// The registry is sharded (`DashMap`) with an atomic id counter, so
/// subscribe/unsubscribe/emit may be called from any thread without an outer
/// lock. Dispatch clones the handler list out of the shard before invoking,
/// so no registry lock is held while user code runs.
pub struct Emitter {
    /// Registration lists keyed by event name.
    registrations: DashMap<String, Vec<Entry>>,

    /// Source of subscription token ids.
    next_id: AtomicU64,
}

impl Emitter {
    /// Creates a new, empty emitter.
    pub fn new() -> Self {
        Self {
            registrations: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Registers a typed handler for `event`.
    ///
    /// The handler runs on every [`emit()`](Self::emit) of `event` whose
    /// payload has concrete type `P`; an emit carrying a different payload
    /// type skips this handler. Handlers for one event run in registration
    /// order.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// emitter.on("message", |text: &String| println!("{text}"));
    /// ```
    pub fn on<P, F>(&self, event: impl Into<String>, handler: F) -> Subscription
    where
        P: Any,
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.register(event.into(), false, Self::typed(handler))
    }

    /// Registers a raw handler for `event` that receives every payload as
    /// `&dyn Any`, regardless of its concrete type.
    pub fn on_any<F>(&self, event: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(&dyn Any) + Send + Sync + 'static,
    {
        self.register(event.into(), false, Arc::new(handler))
    }

    /// Registers a typed handler that is removed when `event` first fires.
    ///
    /// The registration is dropped before the dispatch batch runs, so a
    /// handler that re-emits the same event cannot fire itself a second time.
    pub fn once<P, F>(&self, event: impl Into<String>, handler: F) -> Subscription
    where
        P: Any,
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.register(event.into(), true, Self::typed(handler))
    }

    /// Removes the registration identified by `subscription`.
    ///
    /// A token whose registration is already gone (removed, expired `once`,
    /// or cleared) is a no-op.
    pub fn off(&self, subscription: Subscription) {
        if let Some(mut entries) = self.registrations.get_mut(&subscription.event) {
            entries.retain(|entry| entry.id != subscription.id);
        }
    }

    /// Removes every registration for `event`.
    pub fn off_event(&self, event: &str) {
        self.registrations.remove(event);
    }

    /// Removes every registration for every event.
    ///
    /// After this call the registry is indistinguishable from a freshly
    /// constructed one.
    pub fn clear(&self) {
        self.registrations.clear();
    }

    /// Synchronously invokes the current handlers for `event`, in
    /// registration order, with `payload`.
    ///
    /// Returns once every handler has run. An event with no registrations is
    /// a no-op. A panicking handler propagates to the caller; handlers
    /// registered after it in the batch do not run.
    pub fn emit(&self, event: &str, payload: &dyn Any) {
        let batch: Vec<Handler> = match self.registrations.get_mut(event) {
            Some(mut entries) => {
                let batch = entries
                    .iter()
                    .map(|entry| Arc::clone(&entry.handler))
                    .collect();
                // Expire `once` registrations before dispatch; see once().
                entries.retain(|entry| !entry.once);
                batch
            }
            None => return,
        };
        // The shard guard is released here, so handlers may re-enter.
        trace!("emit '{}' to {} handler(s)", event, batch.len());
        for handler in &batch {
            handler(payload);
        }
    }

    /// Returns the number of live registrations for `event`.
    #[inline]
    pub fn handler_count(&self, event: &str) -> usize {
        self.registrations
            .get(event)
            .map_or(0, |entries| entries.len())
    }

    /// Returns `true` if no event has a live registration.
    pub fn is_empty(&self) -> bool {
        self.registrations
            .iter()
            .all(|entries| entries.is_empty())
    }

    fn register(&self, event: String, once: bool, handler: Handler) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.registrations
            .entry(event.clone())
            .or_default()
            .push(Entry { id, once, handler });
        Subscription { event, id }
    }

    /// Wraps a typed handler into the erased form, downcasting each payload
    /// and skipping emits of other payload types.
    fn typed<P, F>(handler: F) -> Handler
    where
        P: Any,
        F: Fn(&P) + Send + Sync + 'static,
    {
        Arc::new(move |payload: &dyn Any| {
            if let Some(payload) = payload.downcast_ref::<P>() {
                handler(payload);
            }
        })
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    // ==================== Registration & Dispatch ====================

    #[test]
    fn new_emitter_has_no_registrations() {
        let emitter = Emitter::new();

        assert!(emitter.is_empty());
        assert_eq!(emitter.handler_count("message"), 0);
    }

    #[test]
    fn emit_invokes_handler_with_payload() {
        let emitter = Emitter::new();
        let received = Arc::new(Mutex::new(None));
        let seen = Arc::clone(&received);
        emitter.on("message", move |text: &String| {
            *seen.lock().unwrap() = Some(text.clone());
        });

        emitter.emit("message", &String::from("hello"));

        assert_eq!(received.lock().unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn emit_is_synchronous_and_counts_once_per_emit() {
        let emitter = Emitter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        emitter.on("tick", move |_: &u32| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.emit("tick", &1u32);
        // Handler has already run by the time emit returned.
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        emitter.emit("tick", &2u32);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let emitter = Emitter::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            emitter.on("step", move |_: &()| {
                order.lock().unwrap().push(label);
            });
        }

        emitter.emit("step", &());

        assert_eq!(*order.lock().unwrap(), ["first", "second", "third"]);
    }

    #[test]
    fn emit_without_registrations_is_noop() {
        let emitter = Emitter::new();

        emitter.emit("message", &String::from("nobody listening"));
    }

    #[test]
    fn distinct_events_do_not_cross_talk() {
        let emitter = Emitter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        emitter.on("login", move |_: &()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.emit("logout", &());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn typed_handler_skips_other_payload_types() {
        let emitter = Emitter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        emitter.on("message", move |_: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.emit("message", &42u32);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        emitter.emit("message", &String::from("typed"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn on_any_receives_every_payload_type() {
        let emitter = Emitter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        emitter.on_any("message", move |_: &dyn Any| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.emit("message", &42u32);
        emitter.emit("message", &String::from("any"));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    // ==================== Once ====================

    #[test]
    fn once_fires_a_single_time() {
        let emitter = Emitter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        emitter.once("boot", move |_: &()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.emit("boot", &());
        emitter.emit("boot", &());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.handler_count("boot"), 0);
    }

    #[test]
    fn once_cannot_refire_itself_reentrantly() {
        let emitter = Arc::new(Emitter::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let inner = Arc::clone(&emitter);
        emitter.once("boot", move |_: &()| {
            counter.fetch_add(1, Ordering::SeqCst);
            // Registration is already expired by dispatch time.
            inner.emit("boot", &());
        });

        emitter.emit("boot", &());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    // ==================== Removal ====================

    #[test]
    fn off_removes_a_single_registration() {
        let emitter = Emitter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = emitter.on("tick", move |_: &()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let survivor_calls = Arc::new(AtomicUsize::new(0));
        let survivor_counter = Arc::clone(&survivor_calls);
        emitter.on("tick", move |_: &()| {
            survivor_counter.fetch_add(1, Ordering::SeqCst);
        });

        emitter.off(subscription);
        emitter.emit("tick", &());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(survivor_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn off_event_removes_that_event_only() {
        let emitter = Emitter::new();
        emitter.on("login", |_: &()| {});
        emitter.on("login", |_: &()| {});
        emitter.on("logout", |_: &()| {});

        emitter.off_event("login");

        assert_eq!(emitter.handler_count("login"), 0);
        assert_eq!(emitter.handler_count("logout"), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let emitter = Emitter::new();
        emitter.on("login", |_: &()| {});
        emitter.on("logout", |_: &()| {});

        emitter.clear();

        assert!(emitter.is_empty());
    }

    #[test]
    fn off_with_stale_token_is_noop() {
        let emitter = Emitter::new();
        let subscription = emitter.on("tick", |_: &()| {});
        emitter.off_event("tick");

        emitter.off(subscription);

        assert_eq!(emitter.handler_count("tick"), 0);
    }

    // ==================== Reentrancy ====================

    #[test]
    fn handler_may_subscribe_during_dispatch() {
        let emitter = Arc::new(Emitter::new());
        let late_calls = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&emitter);
        let late_counter = Arc::clone(&late_calls);
        emitter.on("tick", move |_: &()| {
            let counter = Arc::clone(&late_counter);
            inner.on("tick", move |_: &()| {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        });

        emitter.emit("tick", &());

        // The mid-dispatch registration joins the next batch, not this one.
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);
        assert_eq!(emitter.handler_count("tick"), 2);
    }

    #[test]
    fn subscription_reports_its_event_name() {
        let emitter = Emitter::new();

        let subscription = emitter.on("page:change", |_: &String| {});

        assert_eq!(subscription.event(), "page:change");
    }
}
