use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of one lint against one certificate.
///
/// Variants are ordered from least to most severe so a report's worst
/// status is simply the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LintStatus {
    NotApplicable,
    NotEffective,
    Unknown,
    Pass,
    Warn,
    Error,
    Fatal,
}

impl LintStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LintStatus::NotApplicable => "not_applicable",
            LintStatus::NotEffective => "not_effective",
            LintStatus::Unknown => "unknown",
            LintStatus::Pass => "pass",
            LintStatus::Warn => "warn",
            LintStatus::Error => "error",
            LintStatus::Fatal => "fatal",
        }
    }
}

impl fmt::Display for LintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    pub status: LintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LintResult {
    pub fn new(status: LintStatus) -> Self {
        Self {
            status,
            details: None,
        }
    }

    pub fn pass() -> Self {
        Self::new(LintStatus::Pass)
    }

    pub fn warn(details: impl Into<String>) -> Self {
        Self::new(LintStatus::Warn).with_details(details)
    }

    pub fn error(details: impl Into<String>) -> Self {
        Self::new(LintStatus::Error).with_details(details)
    }

    pub fn fatal(details: impl Into<String>) -> Self {
        Self::new(LintStatus::Fatal).with_details(details)
    }

    pub fn not_applicable() -> Self {
        Self::new(LintStatus::NotApplicable)
    }

    pub fn not_effective() -> Self {
        Self::new(LintStatus::NotEffective)
    }

    /// Attach a diagnostic. Ignored for `Pass`, which never carries details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        if self.status != LintStatus::Pass {
            self.details = Some(details.into());
        }
        self
    }
}

/// Policy body that defines a lint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "cabf-br")]
    CabfBaselineRequirements,
    #[serde(rename = "cabf-ev")]
    CabfEvGuidelines,
    #[serde(rename = "rfc5280")]
    Rfc5280,
    #[serde(rename = "rfc5480")]
    Rfc5480,
    #[serde(rename = "rfc5891")]
    Rfc5891,
    #[serde(rename = "mozilla")]
    MozillaRootStorePolicy,
    #[serde(rename = "apple")]
    AppleRootStorePolicy,
    #[serde(rename = "community")]
    Community,
}

impl Source {
    pub const ALL: [Source; 8] = [
        Source::CabfBaselineRequirements,
        Source::CabfEvGuidelines,
        Source::Rfc5280,
        Source::Rfc5480,
        Source::Rfc5891,
        Source::MozillaRootStorePolicy,
        Source::AppleRootStorePolicy,
        Source::Community,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Source::CabfBaselineRequirements => "cabf-br",
            Source::CabfEvGuidelines => "cabf-ev",
            Source::Rfc5280 => "rfc5280",
            Source::Rfc5480 => "rfc5480",
            Source::Rfc5891 => "rfc5891",
            Source::MozillaRootStorePolicy => "mozilla",
            Source::AppleRootStorePolicy => "apple",
            Source::Community => "community",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lint source '{0}'")]
pub struct UnknownSource(pub String);

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| UnknownSource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_never_carries_details() {
        let result = LintResult::pass().with_details("ignored");
        assert_eq!(result.details, None);
    }

    #[test]
    fn test_severity_order() {
        assert!(LintStatus::Fatal > LintStatus::Error);
        assert!(LintStatus::Error > LintStatus::Warn);
        assert!(LintStatus::Warn > LintStatus::Pass);
        assert!(LintStatus::Pass > LintStatus::NotApplicable);
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_string(&LintResult::pass()).unwrap();
        assert_eq!(json, r#"{"status":"pass"}"#);

        let json = serde_json::to_string(&LintResult::error("curve secp256k1")).unwrap();
        assert_eq!(json, r#"{"status":"error","details":"curve secp256k1"}"#);
    }

    #[test]
    fn test_source_round_trips_through_str() {
        for source in Source::ALL {
            assert_eq!(source.as_str().parse::<Source>(), Ok(source));
        }
        assert_eq!(
            "ietf".parse::<Source>(),
            Err(UnknownSource("ietf".to_string()))
        );
    }
}
