//! Lint runner
//!
//! Executes every selected lint in a registry against a certificate and
//! collects one result per lint. A lint that panics yields a `Fatal` result
//! for itself and the rest of the run carries on.
//!
//! Contained panics still go through the process panic hook, so the default
//! hook prints them to stderr. Applications that want quiet isolation should
//! install their own hook with `std::panic::set_hook`.

use crate::certificate::Certificate;
use crate::config::LintConfig;
use crate::models::{LintResult, LintStatus, Source};
use crate::registry::{Lint, Registry};
use crate::rules::base::panic_message;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

/// Options for the runner
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Run only these lints. `None` runs every registered lint.
    pub enabled: Option<BTreeSet<String>>,
    pub disabled: BTreeSet<String>,
    pub excluded_sources: BTreeSet<Source>,
    /// Record `NotApplicable`/`NotEffective` entries instead of omitting them
    pub record_not_applicable: bool,
    /// Run the lints for one certificate on the rayon pool
    pub parallel: bool,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            enabled: None,
            disabled: BTreeSet::new(),
            excluded_sources: BTreeSet::new(),
            record_not_applicable: true,
            parallel: false,
        }
    }
}

impl RunnerOptions {
    pub fn from_config(config: &LintConfig) -> Self {
        let enabled = if config.enable.is_empty() || config.enable.iter().any(|name| name == "ALL") {
            None
        } else {
            Some(config.enable.iter().cloned().collect())
        };

        Self {
            enabled,
            disabled: config.disable.iter().cloned().collect(),
            excluded_sources: config.exclude_sources.iter().copied().collect(),
            record_not_applicable: config.record_not_applicable,
            parallel: config.parallel,
        }
    }

    fn selects(&self, lint: &Lint) -> bool {
        if self.disabled.contains(&lint.name) || self.excluded_sources.contains(&lint.source) {
            return false;
        }
        match &self.enabled {
            Some(enabled) => enabled.contains(&lint.name),
            None => true,
        }
    }
}

/// Results of one certificate's run, keyed by lint name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    results: BTreeMap<String, LintResult>,
}

impl Report {
    pub fn get(&self, name: &str) -> Option<&LintResult> {
        self.results.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LintResult)> {
        self.results.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Most severe status in the report
    pub fn worst_status(&self) -> Option<LintStatus> {
        self.results.values().map(|result| result.status).max()
    }

    pub fn count(&self, status: LintStatus) -> usize {
        self.results
            .values()
            .filter(|result| result.status == status)
            .count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(String, LintResult)> for Report {
    fn from_iter<I: IntoIterator<Item = (String, LintResult)>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Runner {
    options: RunnerOptions,
}

impl Runner {
    pub fn new(options: RunnerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Lint one certificate with every selected, initialized lint
    pub fn run(&self, cert: &Certificate, registry: &Registry) -> Report {
        let lints: Vec<&Lint> = registry
            .runnable()
            .filter(|lint| self.options.selects(lint))
            .collect();

        let report: Report = if self.options.parallel {
            lints
                .par_iter()
                .filter_map(|lint| self.evaluate(lint, cert).map(|r| (lint.name.clone(), r)))
                .collect::<BTreeMap<_, _>>()
                .into_iter()
                .collect()
        } else {
            lints
                .iter()
                .filter_map(|lint| self.evaluate(lint, cert).map(|r| (lint.name.clone(), r)))
                .collect()
        };

        debug!(
            certificate = cert.label(),
            lints = lints.len(),
            recorded = report.len(),
            "certificate linted"
        );
        report
    }

    /// Lint many certificates in parallel. Reports keep the input order.
    pub fn run_batch(&self, certs: &[Certificate], registry: &Registry) -> Vec<Report> {
        certs.par_iter().map(|cert| self.run(cert, registry)).collect()
    }

    fn evaluate(&self, lint: &Lint, cert: &Certificate) -> Option<LintResult> {
        let applies = match guarded(lint, || lint.implementation.check_applies(cert)) {
            Ok(applies) => applies,
            Err(fatal) => return Some(fatal),
        };

        let skipped = if !applies {
            LintResult::not_applicable()
        } else if !lint.is_effective_for(cert) {
            LintResult::not_effective()
        } else {
            return Some(
                guarded(lint, || lint.implementation.execute(cert)).unwrap_or_else(|fatal| fatal),
            );
        };

        self.options.record_not_applicable.then_some(skipped)
    }
}

/// Call into a lint, converting a panic into a `Fatal` result for that lint
fn guarded<T>(lint: &Lint, call: impl FnOnce() -> T) -> Result<T, LintResult> {
    panic::catch_unwind(AssertUnwindSafe(call)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        error!(lint = %lint.name, panic = %message, "lint panicked");
        LintResult::fatal(format!("lint panicked: {message}"))
    })
}
