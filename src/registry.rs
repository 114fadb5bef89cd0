//! Lint registry
//!
//! Lints are registered explicitly at startup. Each lint is initialized once
//! as it is registered; a lint whose initialization fails stays in the
//! registry (so it can be reported) but is never run.

use crate::certificate::Certificate;
use crate::models::Source;
use crate::rules::base::{panic_message, InitError, LintRule};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Metadata plus implementation of one lint
pub struct Lint {
    /// Globally unique identifier, also the report key
    pub name: String,
    pub description: String,
    pub citation: String,
    pub source: Source,
    /// Certificates issued before this date are not held to the lint.
    /// `None` means the lint has always been in force.
    pub effective_date: Option<DateTime<Utc>>,
    pub implementation: Box<dyn LintRule>,
}

impl Lint {
    pub fn is_effective_for(&self, cert: &Certificate) -> bool {
        !matches!(self.effective_date, Some(effective) if cert.not_before < effective)
    }
}

impl fmt::Debug for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lint")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("citation", &self.citation)
            .field("effective_date", &self.effective_date)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("lint '{name}' is already registered")]
    Duplicate { name: String },
}

struct Entry {
    lint: Lint,
    setup: Result<(), InitError>,
}

#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lint and run its `initialize` hook.
    ///
    /// Duplicate names are rejected before the new lint is initialized and
    /// the existing entry is left untouched. An initialization failure is not
    /// an error here: it is recorded and surfaced by [`Registry::setup_errors`].
    /// A panicking `initialize` is recorded the same way.
    pub fn register(&mut self, mut lint: Lint) -> Result<(), RegistryError> {
        if self.entries.contains_key(&lint.name) {
            return Err(RegistryError::Duplicate { name: lint.name });
        }

        let implementation = &mut lint.implementation;
        let setup = panic::catch_unwind(AssertUnwindSafe(|| implementation.initialize()))
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                Err(InitError::new(format!("initialization panicked: {message}")))
            });
        match &setup {
            Ok(()) => debug!(lint = %lint.name, source = %lint.source, "registered lint"),
            Err(err) => warn!(lint = %lint.name, error = %err, "lint excluded after failed initialization"),
        }

        self.entries.insert(lint.name.clone(), Entry { lint, setup });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Lint> {
        self.entries.get(name).map(|entry| &entry.lint)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Every registered lint, sorted by name
    pub fn all(&self) -> impl Iterator<Item = &Lint> {
        self.entries.values().map(|entry| &entry.lint)
    }

    /// Lints that initialized successfully, sorted by name
    pub fn runnable(&self) -> impl Iterator<Item = &Lint> {
        self.entries
            .values()
            .filter(|entry| entry.setup.is_ok())
            .map(|entry| &entry.lint)
    }

    /// Lints excluded because `initialize` failed
    pub fn setup_errors(&self) -> Vec<(&str, &InitError)> {
        self.entries
            .iter()
            .filter_map(|(name, entry)| entry.setup.as_ref().err().map(|err| (name.as_str(), err)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.all()).finish()
    }
}
