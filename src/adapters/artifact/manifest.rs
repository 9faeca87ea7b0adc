//! Artifact manifest: SHA-256 binding and optional Ed25519 signature.
//!
//! `manifest.json` maps artifact file names to their SHA-256 digests.
//! `model.sig` holds a detached Ed25519 signature over the exact manifest
//! bytes. Every artifact read through the store is hashed and compared
//! against the manifest before it is parsed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::ModelError;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const SIGNATURE_FILE: &str = "model.sig";
pub const MANIFEST_VERSION: u32 = 1;

/// File name → hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<i64>,
    pub files: BTreeMap<String, String>,
}

impl Manifest {
    /// Build a manifest binding the given files inside `dir`.
    ///
    /// # Errors
    /// Returns `ModelError::Io` if any file cannot be read.
    pub fn for_files<'a>(
        dir: &Path,
        names: impl IntoIterator<Item = &'a str>,
        created_at: Option<i64>,
    ) -> Result<Self, ModelError> {
        let mut files = BTreeMap::new();
        for name in names {
            let path = dir.join(name);
            let bytes = fs::read(&path).map_err(|source| ModelError::Io { path, source })?;
            files.insert(name.to_string(), sha256_hex(&bytes));
        }
        Ok(Self {
            version: MANIFEST_VERSION,
            created_at,
            files,
        })
    }

    /// Check that `bytes` are the content bound for `name`.
    ///
    /// # Errors
    /// Returns `ModelError::Integrity` if the file is not listed or its hash differs.
    pub fn verify_file(&self, name: &str, bytes: &[u8]) -> Result<(), ModelError> {
        let expected = self
            .files
            .get(name)
            .ok_or_else(|| ModelError::Integrity(format!("{name} is not listed in {MANIFEST_FILE}")))?;

        if !constant_time_eq_str(&sha256_hex(bytes), expected) {
            return Err(ModelError::Integrity(format!("File hash mismatch for {name}")));
        }
        Ok(())
    }

    /// Serialize for writing to disk (the signed form).
    ///
    /// # Errors
    /// Returns `ModelError::Parse` if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModelError> {
        serde_json::to_vec_pretty(self).map_err(|e| ModelError::Parse(e.to_string()))
    }
}

/// How strictly the model directory is checked before anything is loaded.
#[derive(Debug, Clone, Default)]
pub struct IntegrityPolicy {
    /// Refuse to start without a manifest and a valid signature.
    pub require_signed: bool,
    /// Key used to verify `model.sig`.
    pub verifying_key: Option<VerifyingKey>,
}

impl IntegrityPolicy {
    /// Verify hashes when a manifest is present; signature optional.
    #[must_use]
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Require a manifest signed by `key`.
    #[must_use]
    pub fn signed(key: VerifyingKey) -> Self {
        Self {
            require_signed: true,
            verifying_key: Some(key),
        }
    }
}

/// Read and verify the manifest in `dir` according to `policy`.
///
/// Returns `None` when no manifest exists and the policy allows it.
///
/// # Errors
/// Returns `ModelError::Integrity` on a missing manifest/signature (when
/// required), a bad signature, or a malformed manifest.
pub fn load_manifest(dir: &Path, policy: &IntegrityPolicy) -> Result<Option<Manifest>, ModelError> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let sig_path = dir.join(SIGNATURE_FILE);

    if !manifest_path.exists() {
        if policy.require_signed {
            tracing::error!("No {MANIFEST_FILE} in {:?}; signed models are required", dir);
            return Err(ModelError::Integrity(format!(
                "{MANIFEST_FILE} required but not found"
            )));
        }
        tracing::warn!("No {MANIFEST_FILE} in {:?}; loading UNVERIFIED artifacts", dir);
        return Ok(None);
    }

    let manifest_bytes = fs::read(&manifest_path).map_err(|source| ModelError::Io {
        path: manifest_path.clone(),
        source,
    })?;

    if sig_path.exists() {
        match &policy.verifying_key {
            Some(key) => verify_signature(&sig_path, &manifest_bytes, key)?,
            None if policy.require_signed => {
                return Err(ModelError::Integrity(
                    "Signed models required but no verifying key configured".into(),
                ));
            }
            None => {
                tracing::warn!("{SIGNATURE_FILE} present but no verifying key configured; signature not checked");
            }
        }
    } else if policy.require_signed {
        return Err(ModelError::Integrity(format!(
            "{SIGNATURE_FILE} required but not found"
        )));
    }

    let manifest: Manifest = serde_json::from_slice(&manifest_bytes)
        .map_err(|e| ModelError::Integrity(format!("Invalid {MANIFEST_FILE} format: {e}")))?;

    if manifest.version != MANIFEST_VERSION {
        return Err(ModelError::Integrity(format!(
            "Unsupported manifest version: {}",
            manifest.version
        )));
    }
    if manifest.files.is_empty() {
        return Err(ModelError::Integrity(format!("{MANIFEST_FILE} contains no files")));
    }

    tracing::info!(files = manifest.files.len(), "Model manifest verified");
    Ok(Some(manifest))
}

fn verify_signature(sig_path: &Path, message: &[u8], key: &VerifyingKey) -> Result<(), ModelError> {
    let sig_bytes = fs::read(sig_path).map_err(|source| ModelError::Io {
        path: sig_path.to_path_buf(),
        source,
    })?;

    let sig_array: [u8; 64] = sig_bytes
        .as_slice()
        .try_into()
        .map_err(|_| ModelError::Integrity("Invalid signature length (expected 64 bytes)".into()))?;
    let signature = Signature::from_bytes(&sig_array);

    key.verify(message, &signature)
        .map_err(|_| ModelError::Integrity("Invalid model signature".into()))?;

    tracing::info!("Model manifest signature verified");
    Ok(())
}

/// Decode a base64 Ed25519 public key.
///
/// # Errors
/// Returns `ModelError::Integrity` if the key is not 32 valid bytes.
pub fn verifying_key_from_b64(b64: &str) -> Result<VerifyingKey, ModelError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|_| ModelError::Integrity("Invalid public key base64".into()))?;
    let key: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| ModelError::Integrity("Invalid public key length (expected 32 bytes)".into()))?;
    VerifyingKey::from_bytes(&key).map_err(|_| ModelError::Integrity("Invalid verifying key".into()))
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes).iter().map(|b| format!("{b:02x}")).collect()
}

// Constant-time compare for hex digests.
fn constant_time_eq_str(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes().zip(b.bytes()).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use rand::RngCore;
    use tempfile::tempdir;

    fn signing_key() -> SigningKey {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        SigningKey::from_bytes(&seed)
    }

    fn write_signed(dir: &Path, key: &SigningKey) -> Manifest {
        std::fs::write(dir.join("a.json"), b"{\"a\":1}").expect("write a");
        let manifest = Manifest::for_files(dir, ["a.json"], Some(1)).expect("manifest");
        let bytes = manifest.to_bytes().expect("bytes");
        std::fs::write(dir.join(MANIFEST_FILE), &bytes).expect("write manifest");
        let sig = key.sign(&bytes);
        std::fs::write(dir.join(SIGNATURE_FILE), sig.to_bytes()).expect("write sig");
        manifest
    }

    #[test]
    fn test_missing_manifest_is_allowed_when_permissive() {
        let temp = tempdir().expect("tempdir");
        let loaded = load_manifest(temp.path(), &IntegrityPolicy::permissive()).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_missing_manifest_fails_when_signed_required() {
        let temp = tempdir().expect("tempdir");
        let policy = IntegrityPolicy::signed(signing_key().verifying_key());
        let err = load_manifest(temp.path(), &policy).expect_err("must fail");
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn test_signed_manifest_verifies() {
        let temp = tempdir().expect("tempdir");
        let key = signing_key();
        let written = write_signed(temp.path(), &key);

        let policy = IntegrityPolicy::signed(key.verifying_key());
        let loaded = load_manifest(temp.path(), &policy)
            .expect("load")
            .expect("present");
        assert_eq!(loaded, written);
        loaded.verify_file("a.json", b"{\"a\":1}").expect("hash matches");
    }

    #[test]
    fn test_signature_from_other_key_rejected() {
        let temp = tempdir().expect("tempdir");
        write_signed(temp.path(), &signing_key());

        let policy = IntegrityPolicy::signed(signing_key().verifying_key());
        let err = load_manifest(temp.path(), &policy).expect_err("must fail");
        assert!(err.to_string().contains("Invalid model signature"));
    }

    #[test]
    fn test_tampered_manifest_rejected() {
        let temp = tempdir().expect("tempdir");
        let key = signing_key();
        write_signed(temp.path(), &key);

        let mut bytes = std::fs::read(temp.path().join(MANIFEST_FILE)).expect("read");
        bytes.push(b' ');
        std::fs::write(temp.path().join(MANIFEST_FILE), bytes).expect("rewrite");

        let policy = IntegrityPolicy::signed(key.verifying_key());
        assert!(load_manifest(temp.path(), &policy).is_err());
    }

    #[test]
    fn test_hash_mismatch_and_unlisted_file() {
        let temp = tempdir().expect("tempdir");
        let manifest = write_signed(temp.path(), &signing_key());

        let err = manifest.verify_file("a.json", b"{\"a\":2}").expect_err("mismatch");
        assert!(err.to_string().contains("hash mismatch"));

        let err = manifest.verify_file("b.json", b"{}").expect_err("unlisted");
        assert!(err.to_string().contains("not listed"));
    }

    #[test]
    fn test_verifying_key_roundtrip_from_b64() {
        let key = signing_key().verifying_key();
        let b64 = base64::engine::general_purpose::STANDARD.encode(key.to_bytes());
        assert_eq!(verifying_key_from_b64(&b64).expect("decode"), key);
        assert!(verifying_key_from_b64("AAAA").is_err());
    }
}
