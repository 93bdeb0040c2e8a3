//! Environment views and the credential availability gate
//!
//! Provider activation reads credentials through the [`Environment`] trait so
//! hosts and tests can supply any key/value view, not only the process
//! environment.

use std::collections::{BTreeMap, HashMap};
use std::env;

/// Read-only key/value view of the environment
pub trait Environment {
    /// Value for `key`, or `None` when the key is absent
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment (`std::env`)
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Credential-presence gate for one provider
///
/// A provider is available iff its credential key is set and non-blank after
/// trimming. An unavailable provider is not an error: its resources are simply
/// never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderAvailability {
    credential_key: &'static str,
}

impl ProviderAvailability {
    pub const fn new(credential_key: &'static str) -> Self {
        Self { credential_key }
    }

    pub fn credential_key(&self) -> &'static str {
        self.credential_key
    }

    pub fn is_available(&self, environment: &dyn Environment) -> bool {
        environment
            .var(self.credential_key)
            .is_some_and(|value| !value.trim().is_empty())
    }
}
