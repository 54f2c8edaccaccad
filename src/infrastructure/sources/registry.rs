//! # Source Registry
//!
//! The set of active marketplace sources, keyed by [`Source`].
//!
//! Built once at startup and then shared read-only (behind an `Arc`) by every
//! request. Registering two adapters for the same source is a configuration
//! error surfaced at startup.

use crate::domain::value_objects::Source;
use crate::infrastructure::sources::error::SourceError;
use crate::infrastructure::sources::traits::SourceAdapter;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Error raised while assembling the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A source was registered twice.
    #[error("source {0} is already registered")]
    DuplicateSource(Source),

    /// No source was registered.
    #[error("no sources registered")]
    NoSources,

    /// A source client could not be built.
    #[error(transparent)]
    Client(#[from] SourceError),
}

/// Registry of source adapters.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    adapters: BTreeMap<Source, Arc<dyn SourceAdapter>>,
}

impl SourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateSource` if an adapter for the same
    /// source is already registered.
    pub fn register<A>(&mut self, adapter: A) -> Result<(), RegistryError>
    where
        A: SourceAdapter + 'static,
    {
        self.register_shared(Arc::new(adapter))
    }

    /// Registers an already shared adapter.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateSource` if an adapter for the same
    /// source is already registered.
    pub fn register_shared(&mut self, adapter: Arc<dyn SourceAdapter>) -> Result<(), RegistryError> {
        let source = adapter.source();
        if self.adapters.contains_key(&source) {
            return Err(RegistryError::DuplicateSource(source));
        }
        tracing::debug!(%source, "registered source");
        self.adapters.insert(source, adapter);
        Ok(())
    }

    /// Returns every registered adapter in canonical source order.
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn SourceAdapter>> {
        self.adapters.values()
    }

    /// Returns the adapter for a source.
    #[must_use]
    pub fn get(&self, source: Source) -> Option<Arc<dyn SourceAdapter>> {
        self.adapters.get(&source).cloned()
    }

    /// Returns the registered sources in canonical order.
    #[must_use]
    pub fn sources(&self) -> Vec<Source> {
        self.adapters.keys().copied().collect()
    }

    /// Returns the number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Fails if the registry is empty.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NoSources` if nothing is registered.
    pub fn ensure_not_empty(&self) -> Result<(), RegistryError> {
        if self.is_empty() {
            return Err(RegistryError::NoSources);
        }
        Ok(())
    }
}
