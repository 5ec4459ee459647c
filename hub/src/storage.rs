//! Type-erased storage for named extension values.
//!
//! This module provides [`Extensions`], the dynamic mapping field of the hub.
//! Extended data lives here, separate from the hub's fixed operation surface,
//! so a reset is "clear the mapping" rather than a reflective sweep over the
//! object itself.
//!
//! # Overview
//!
//! Extensions are useful for:
//! - Framework services installed at bootstrap (router, session, i18n)
//! - Application configuration shared across modules
//! - Any named value that would otherwise become an ambient global
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_macros::Extension;
//!
//! #[derive(Extension, Debug, PartialEq)]
//! struct Session {
//!     user: String,
//! }
//!
//! // Insert values
//! let mut extensions = Extensions::new();
//! extensions.insert("debug", true);
//! extensions.insert("session", Session { user: "ada".into() });
//!
//! // Access values
//! if let Some(session) = extensions.get::<Session>("session") {
//!     println!("signed in as {}", session.user);
//! }
//!
//! // Mutate values
//! if let Some(session) = extensions.get_mut::<Session>("session") {
//!     session.user = "grace".into();
//! }
//!
//! // Remove values
//! let old = extensions.remove::<Session>("session");
//! ```
//!
//! # Thread Safety
//!
//! The `Extensions` container itself is not thread-safe. External
//! synchronization is required for concurrent access; [`Hub`](crate::Hub)
//! provides it by holding the container behind an `RwLock`, which also keeps a
//! multi-key [`merge`](Extensions::merge) atomic with respect to readers.

use std::{any::Any, collections::HashMap};

use crate::extension::{Extension, Value};

/// Type-erased storage for named extension values.
///
/// `Extensions` stores values by their string key, allowing heterogeneous
/// storage of any type implementing the [`Extension`] trait. Each key holds at
/// most one value.
///
/// # Type Safety
///
/// Despite using type erasure internally (`Box<dyn Any + Send + Sync>`), the
/// typed accessors are fully type-safe through generic parameters: asking for
/// the wrong type at a key yields `None`, never a mangled value.
pub struct Extensions {
    data: HashMap<String, Value>,
}

impl Extensions {
    /// Creates a new, empty extension storage.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let extensions = Extensions::new();
    /// assert!(extensions.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Inserts a value under the given key.
    ///
    /// If the key already holds a value, it is replaced and the old value is
    /// dropped, regardless of the old value's type.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut extensions = Extensions::new();
    /// extensions.insert("retries", 3u32);
    ///
    /// // Replacing overwrites the previous value
    /// extensions.insert("retries", 5u32);
    /// assert_eq!(extensions.get::<u32>("retries"), Some(&5));
    /// ```
    #[inline]
    pub fn insert<V: Extension>(&mut self, key: impl Into<String>, value: V) {
        self.data.insert(key.into(), Box::new(value));
    }

    /// Inserts an already-boxed value under the given key.
    #[inline]
    pub fn insert_value(&mut self, key: String, value: Value) {
        self.data.insert(key, value);
    }

    /// Merges every pair of a source into storage, in iteration order.
    ///
    /// Pairs later in the source win on key collision, and a merged key
    /// replaces whatever the storage previously held for it. The boxed values
    /// are moved in, not cloned; anything they reference stays shared.
    ///
    /// Returns the number of pairs merged.
    pub fn merge<S>(&mut self, source: S) -> usize
    where
        S: IntoIterator<Item = (String, Value)>,
    {
        let mut merged = 0;
        for (key, value) in source {
            self.data.insert(key, value);
            merged += 1;
        }
        merged
    }

    /// Returns a reference to the value under `key`, if it exists and has type `V`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut extensions = Extensions::new();
    /// extensions.insert("retries", 3u32);
    ///
    /// if let Some(retries) = extensions.get::<u32>("retries") {
    ///     println!("retries: {retries}");
    /// }
    /// ```
    #[inline]
    pub fn get<V: Extension>(&self, key: &str) -> Option<&V> {
        self.data
            .get(key)
            .and_then(|stored| stored.downcast_ref::<V>())
    }

    /// Returns a mutable reference to the value under `key`, if it exists and
    /// has type `V`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// if let Some(retries) = extensions.get_mut::<u32>("retries") {
    ///     *retries += 1;
    /// }
    /// ```
    #[inline]
    pub fn get_mut<V: Extension>(&mut self, key: &str) -> Option<&mut V> {
        self.data
            .get_mut(key)
            .and_then(|stored| stored.downcast_mut::<V>())
    }

    /// Removes the value under `key`, returning it if it existed with type `V`.
    ///
    /// A type mismatch leaves the stored value in place and returns `None`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let mut extensions = Extensions::new();
    /// extensions.insert("retries", 3u32);
    ///
    /// let removed = extensions.remove::<u32>("retries");
    /// assert_eq!(removed, Some(3));
    /// assert!(!extensions.contains("retries"));
    /// ```
    pub fn remove<V: Extension>(&mut self, key: &str) -> Option<V> {
        if !self.data.get(key).is_some_and(|stored| stored.is::<V>()) {
            return None;
        }
        self.data
            .remove(key)
            .and_then(|stored| (stored as Box<dyn Any>).downcast::<V>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns `true` if a value is stored under `key`.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns an iterator over the stored keys, in no particular order.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Returns the number of values currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no values are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Removes all values from storage.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new()
    }
}
