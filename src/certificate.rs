//! Decoded certificate model consumed by lints
//!
//! Parsing DER/PEM is left to the caller; this module only describes the
//! typed fields a lint may inspect. Certificates can be loaded from JSON so
//! that decoders written in other tools (and test fixtures) can feed the
//! runner directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    #[error("invalid certificate JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Algorithm declared in the SubjectPublicKeyInfo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicKeyAlgorithm {
    Rsa,
    Dsa,
    Ecdsa,
    Ed25519,
    Unknown,
}

/// Named-curve parameters of an elliptic-curve key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    /// Canonical curve name, e.g. `P-256`. Empty when the curve is unnamed.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bit_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcPublicKey {
    pub curve: CurveParams,
    #[serde(default)]
    pub x: Vec<u8>,
    #[serde(default)]
    pub y: Vec<u8>,
}

/// An EC key bundled with the raw algorithm parameters it was decoded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentedEcdsaPublicKey {
    pub public_key: EcPublicKey,
    #[serde(default)]
    pub raw: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublicKey {
    pub modulus_bits: u32,
    pub exponent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaPublicKey {
    pub p_bits: u32,
    pub q_bits: u32,
}

/// Concrete public key value carried by a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Dsa(DsaPublicKey),
    Ecdsa(EcPublicKey),
    AugmentedEcdsa(AugmentedEcdsaPublicKey),
    Ed25519 { bytes: Vec<u8> },
    /// The decoder could not produce a key value
    Absent,
}

impl PublicKey {
    /// Underlying elliptic-curve key, whichever representation carries it
    pub fn ec_key(&self) -> Option<&EcPublicKey> {
        match self {
            PublicKey::Ecdsa(key) => Some(key),
            PublicKey::AugmentedEcdsa(augmented) => Some(&augmented.public_key),
            PublicKey::Rsa(_) | PublicKey::Dsa(_) | PublicKey::Ed25519 { .. } | PublicKey::Absent => {
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub issuer: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub public_key_algorithm: PublicKeyAlgorithm,
    pub public_key: PublicKey,
    #[serde(default)]
    pub signature_algorithm: String,
}

impl Certificate {
    /// Build a certificate around a public key, with placeholder metadata
    pub fn new(
        public_key_algorithm: PublicKeyAlgorithm,
        public_key: PublicKey,
        not_before: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> Self {
        Self {
            serial_number: String::new(),
            subject: String::new(),
            issuer: String::new(),
            not_before,
            not_after,
            public_key_algorithm,
            public_key,
            signature_algorithm: String::new(),
        }
    }

    pub fn from_json(input: &str) -> Result<Self, CertificateError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Display label used in logs
    pub fn label(&self) -> &str {
        if self.subject.is_empty() {
            &self.serial_number
        } else {
            &self.subject
        }
    }
}

impl EcPublicKey {
    pub fn on_curve(name: impl Into<String>, bit_size: u32) -> Self {
        Self {
            curve: CurveParams {
                name: name.into(),
                bit_size,
            },
            x: Vec::new(),
            y: Vec::new(),
        }
    }
}
