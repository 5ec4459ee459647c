//! One shared, mutable namespace for a client-side application.
//!
//! `app_hub` provides a [`Hub`]: a long-lived value that framework modules
//! extend with named data, that supports synchronous publish/subscribe
//! notifications, and that [`reset`](Hub::reset)s back to its pristine state
//! for test isolation. A process-wide instance is available through
//! [`shared()`]; code that prefers explicit ownership constructs its own with
//! [`Hub::new`].
//!
//! ```ignore
//! use app_hub::{props, shared};
//!
//! shared()
//!     .extend(props! { "name" => "docs" })
//!     .on("page:change", |page: &String| println!("-> {page}"));
//! shared().emit("page:change", &String::from("home"));
//! ```

// Lets the Extension derive macro's `::app_hub::` paths resolve inside this
// crate's own tests.
extern crate self as app_hub;

pub mod event;
pub mod extension;
pub mod hub;
pub(crate) mod storage;
pub(crate) mod util;

pub use event::{ChannelForwarder, Emitter, Subscription};
pub use extension::{Extension, Value, value};
pub use hub::{Hub, shared};
