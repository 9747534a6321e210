//! Catalog of named pluggable handlers (doctype engines, middleware).
//!
//! Entries keep their registration order; re-registering a name replaces the
//! handler in place. An explicit enabled subset decides which entries take
//! part in dispatch. State sits behind a lock so the enabled set can be
//! swapped while requests are being served.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::middleware::Phase;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unknown entries: {}", .0.join(", "))]
    UnknownEntries(Vec<String>),
}

struct Entry<T: ?Sized> {
    name: String,
    actions: Vec<Phase>,
    handler: Arc<T>,
}

struct Inner<T: ?Sized> {
    entries: Vec<Entry<T>>,
    enabled: HashSet<String>,
}

pub struct Registry<T: ?Sized> {
    inner: RwLock<Inner<T>>,
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: Vec::new(),
                enabled: HashSet::new(),
            }),
        }
    }

    /// Insert or replace the entry for `name`.
    ///
    /// `actions` lists the phases the handler takes part in; engines pass an
    /// empty slice.
    pub fn register(&self, name: impl Into<String>, handler: Arc<T>, actions: &[Phase]) {
        let name = name.into();
        let mut inner = self.inner.write();

        match inner.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => {
                tracing::debug!(name = %name, "replacing registry entry");
                entry.actions = actions.to_vec();
                entry.handler = handler;
            }
            None => inner.entries.push(Entry {
                name,
                actions: actions.to_vec(),
                handler,
            }),
        }
    }

    /// Replace the enabled set. Nothing changes unless every name is known.
    pub fn enable<I, S>(&self, names: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inner = self.inner.write();

        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        let unknown: Vec<String> = names
            .iter()
            .filter(|name| !inner.entries.iter().any(|entry| &entry.name == *name))
            .cloned()
            .collect();

        if !unknown.is_empty() {
            return Err(RegistryError::UnknownEntries(unknown));
        }

        inner.enabled = names.into_iter().collect();
        Ok(())
    }

    /// Enabled entries declaring `phase`, in registration order.
    pub fn get_all(&self, phase: Phase) -> Vec<(String, Arc<T>)> {
        let inner = self.inner.read();
        inner
            .entries
            .iter()
            .filter(|entry| inner.enabled.contains(&entry.name))
            .filter(|entry| entry.actions.contains(&phase))
            .map(|entry| (entry.name.clone(), Arc::clone(&entry.handler)))
            .collect()
    }

    /// Exact-match lookup, independent of the enabled set.
    pub fn resolve(&self, name: &str) -> Result<Arc<T>, RegistryError> {
        self.inner
            .read()
            .entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| Arc::clone(&entry.handler))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().entries.iter().any(|entry| entry.name == name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<String> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|entry| entry.name.clone())
            .collect()
    }

    /// Enabled names in registration order
    pub fn enabled(&self) -> Vec<String> {
        let inner = self.inner.read();
        inner
            .entries
            .iter()
            .filter(|entry| inner.enabled.contains(&entry.name))
            .map(|entry| entry.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
