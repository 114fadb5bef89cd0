#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some common patterns that are fine in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! Plugin framework for X.509 certificate policy lints.
//!
//! Lints implement [`LintRule`], are collected in a [`Registry`] at startup
//! and executed by a [`Runner`], which produces one [`Report`] per
//! certificate.

pub mod certificate;
pub mod config;
pub mod models;
pub mod registry;
pub mod rules;
pub mod runner;

pub use certificate::{Certificate, PublicKey, PublicKeyAlgorithm};
pub use config::LintConfig;
pub use models::{LintResult, LintStatus, Source};
pub use registry::{Lint, Registry, RegistryError};
pub use rules::base::{InitError, LintRule};
pub use rules::default_registry;
pub use runner::{Report, Runner, RunnerOptions};

/// Lint one certificate with every built-in lint and default options
pub fn lint_certificate(cert: &Certificate) -> Result<Report, RegistryError> {
    let registry = default_registry()?;
    Ok(Runner::default().run(cert, &registry))
}
