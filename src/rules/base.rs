use crate::certificate::Certificate;
use crate::models::LintResult;
use std::any::Any;

/// Setup failure reported by [`LintRule::initialize`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("lint initialization failed: {message}")]
pub struct InitError {
    pub message: String,
}

impl InitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Base trait for all certificate lints
pub trait LintRule: Send + Sync {
    /// One-time setup, run when the lint is registered.
    ///
    /// A failing lint is excluded from every subsequent run.
    fn initialize(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Whether this lint is relevant to the certificate. Must not mutate state.
    fn check_applies(&self, cert: &Certificate) -> bool;

    /// Perform the check. Only called when `check_applies` returned true.
    fn execute(&self, cert: &Certificate) -> LintResult;
}

/// Text of a panic payload caught while calling into a lint
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
