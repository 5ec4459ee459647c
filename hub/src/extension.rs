//! Extension values stored in the hub.
//!
//! This module provides the [`Extension`] trait for values that modules install
//! into the shared hub, and [`Value`], their type-erased boxed form.
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_macros::Extension;
//!
//! #[derive(Extension)]
//! struct Router {
//!     routes: Vec<String>,
//! }
//!
//! hub.set("router", Router { routes: vec![] });
//! ```

use std::any::Any;

/// A trait for values that can be stored in the hub's namespace.
///
/// # Derive Macro
///
/// Use `#[derive(Extension)]` to implement this trait for application types:
///
/// ```rust,ignore
/// #[derive(Extension)]
/// struct Session {
///     user: String,
/// }
/// ```
///
/// Common std types (`bool`, the integer and float primitives, `char`,
/// `String`, `&'static str`) implement it directly so literal-valued sources
/// work without newtypes, as do `Option<T>` and `Vec<T>` for any `T` that is
/// itself an extension.
///
/// # Trait Bounds
///
/// - `'static`: No borrowed data
/// - `Send + Sync`: Safe to share across threads
pub trait Extension: 'static + Send + Sync {}

/// The type-erased form of a stored extension value.
pub type Value = Box<dyn Any + Send + Sync>;

/// Box an extension into its type-erased [`Value`] form.
///
/// This is the building block the [`props!`](crate::props) macro uses for each
/// entry of a source literal.
#[inline]
pub fn value<V: Extension>(value: V) -> Value {
    Box::new(value)
}

macro_rules! std_extensions {
    ($($ty:ty),* $(,)?) => {
        $(impl Extension for $ty {})*
    };
}

std_extensions!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &'static str,
);

impl<T: Extension> Extension for Option<T> {}
impl<T: Extension> Extension for Vec<T> {}
