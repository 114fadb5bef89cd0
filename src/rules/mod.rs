//! Certificate lint rules

pub mod base;

// Individual rule implementations
pub mod e_ec_improper_curves;

use crate::registry::{Lint, Registry, RegistryError};

/// Get all built-in lints
pub fn get_all_lints() -> Vec<Lint> {
    vec![e_ec_improper_curves::EcImproperCurvesRule::lint()]
}

/// Get all built-in lint names
pub fn get_all_lint_names() -> Vec<String> {
    get_all_lints().into_iter().map(|lint| lint.name).collect()
}

/// Registry holding every built-in lint
pub fn default_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    for lint in get_all_lints() {
        registry.register(lint)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lints_loaded() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), get_all_lints().len());
        assert!(registry.contains("e_ec_improper_curves"));
        assert!(registry.setup_errors().is_empty());
    }

    #[test]
    fn test_lint_names_are_prefixed_by_severity() {
        for name in get_all_lint_names() {
            assert!(
                ["e_", "w_", "n_"].iter().any(|prefix| name.starts_with(prefix)),
                "{name} lacks a severity prefix"
            );
        }
    }
}
