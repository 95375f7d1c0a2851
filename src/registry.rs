//! Custom-event handler registry.
//!
//! Legacy ad responses select a handler by name. Instead of resolving that
//! name reflectively against the host, handlers are registered up front and
//! resolved at dispatch time; an unknown name fails with
//! [`AdapterError::NotFound`].

use crate::error::AdapterError;
use dashmap::DashMap;
use tracing::debug;

type Handler<C> = Box<dyn Fn(&C) + Send + Sync>;

/// Mapping from custom-event name to a registered handler capability.
///
/// `C` is the context handed to handlers at dispatch time, typically the
/// surface or its owning controller.
///
/// # Example
///
/// ```
/// use adstream::registry::CustomEventRegistry;
///
/// let registry: CustomEventRegistry<u32> = CustomEventRegistry::new();
/// registry.register("onAdLoaded", |count| assert_eq!(*count, 7));
/// registry.dispatch("onAdLoaded", &7).unwrap();
/// assert!(registry.dispatch("onAdClosed", &7).is_err());
/// ```
pub struct CustomEventRegistry<C> {
    handlers: DashMap<String, Handler<C>>,
}

impl<C> CustomEventRegistry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Registers a handler under the given event name, replacing any
    /// previous registration for that name.
    pub fn register<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&C) + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(%name, "registering custom event handler");
        self.handlers.insert(name, Box::new(handler));
    }

    /// Removes the handler registered under `name`. Returns true if one
    /// was present.
    pub fn unregister(&self, name: &str) -> bool {
        self.handlers.remove(name).is_some()
    }

    /// Resolves `name` and invokes its handler with the given context.
    pub fn dispatch(&self, name: &str, context: &C) -> Result<(), AdapterError> {
        match self.handlers.get(name) {
            Some(handler) => {
                handler.value()(context);
                Ok(())
            }
            None => Err(AdapterError::NotFound(name.to_string())),
        }
    }

    /// Returns true if a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C> Default for CustomEventRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}
