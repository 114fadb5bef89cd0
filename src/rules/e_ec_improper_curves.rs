//! e_ec_improper_curves: EC keys must use an approved NIST curve
//!
//! BRs 6.1.5: certificates MUST meet the following requirements for
//! algorithm type and key size. ECC Curve: NIST P-256, P-384, or P-521.

use crate::certificate::{Certificate, PublicKeyAlgorithm};
use crate::models::{LintResult, Source};
use crate::registry::Lint;
use crate::rules::base::LintRule;

pub const NAME: &str = "e_ec_improper_curves";

const APPROVED_CURVES: [&str; 3] = ["P-256", "P-384", "P-521"];

pub struct EcImproperCurvesRule;

impl EcImproperCurvesRule {
    pub fn new() -> Self {
        Self
    }

    /// Registry entry for this rule. The BRs date the requirement "before
    /// 31 Dec 2010", so it carries no effective date.
    pub fn lint() -> Lint {
        Lint {
            name: NAME.to_string(),
            description: "Only one of NIST P-256, P-384, or P-521 can be used".to_string(),
            citation: "BRs: 6.1.5".to_string(),
            source: Source::CabfBaselineRequirements,
            effective_date: None,
            implementation: Box::new(Self::new()),
        }
    }
}

impl Default for EcImproperCurvesRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for EcImproperCurvesRule {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.public_key_algorithm == PublicKeyAlgorithm::Ecdsa
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        let Some(key) = cert.public_key.ec_key() else {
            return LintResult::error("public key absent or unrecognized despite ECDSA algorithm");
        };

        let curve = key.curve.name.as_str();
        if APPROVED_CURVES.contains(&curve) {
            LintResult::pass()
        } else if curve.is_empty() {
            LintResult::error("EC key has no named curve")
        } else {
            LintResult::error(format!("EC key uses unapproved curve {curve}"))
        }
    }
}
