//! Named-event publish/subscribe for the hub.
//!
//! The hub's event capability is an owned registry, not a mixin: the hub has
//! an [`Emitter`] and delegates its event operations to it, which makes a
//! reset a matter of discarding the registry's contents rather than sweeping
//! injected methods off an object.
//!
//! Dispatch is synchronous: [`Emitter::emit`] invokes every current handler
//! for the event, in registration order, on the caller's thread, before it
//! returns.

pub mod channel;
pub mod emitter;

pub use channel::ChannelForwarder;
pub use emitter::{Emitter, Subscription};
