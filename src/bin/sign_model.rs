//! Model signing utility for HealthScope artifacts.
//!
//! Validates all five category artifacts, then writes a `manifest.json`
//! binding their SHA-256 hashes and a detached Ed25519 signature
//! (`model.sig`) over the manifest bytes.
//!
//! # Usage
//!
//! ```bash
//! HEALTHSCOPE_MODEL_SIGNING_KEY_B64_FILE=seed.b64 cargo run --bin sign_model -- <model_dir>
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose;
use base64::Engine;
use ed25519_dalek::{Signer, SigningKey};
use zeroize::{Zeroize, Zeroizing};

use healthscope::adapters::artifact::manifest::{MANIFEST_FILE, SIGNATURE_FILE};
use healthscope::adapters::artifact::{ArtifactClassifier, Manifest};
use healthscope::DiseaseCategory;

const KEY_FILE_ENV: &str = "HEALTHSCOPE_MODEL_SIGNING_KEY_B64_FILE";
const KEY_ENV: &str = "HEALTHSCOPE_MODEL_SIGNING_KEY_B64";

fn read_signing_seed_b64() -> Result<Zeroizing<String>> {
    let secret = if let Ok(path) = env::var(KEY_FILE_ENV) {
        Zeroizing::new(
            fs::read_to_string(path.trim()).context("Failed reading signing key file")?,
        )
    } else if let Ok(v) = env::var(KEY_ENV) {
        Zeroizing::new(v)
    } else {
        bail!("Missing signing key. Set {KEY_FILE_ENV} (preferred) or {KEY_ENV}.");
    };

    let trimmed = Zeroizing::new(secret.trim().to_string());
    if trimmed.is_empty() {
        bail!("Empty signing key");
    }
    Ok(trimmed)
}

fn read_signing_key() -> Result<SigningKey> {
    let b64 = read_signing_seed_b64()?;
    let mut raw = general_purpose::STANDARD
        .decode(b64.as_str())
        .context("Invalid base64 in signing key")?;

    let seed: Result<[u8; 32], _> = raw.as_slice().try_into();
    raw.zeroize();
    let Ok(mut seed) = seed else {
        bail!("Signing key seed must be 32 bytes after base64 decode");
    };

    let key = SigningKey::from_bytes(&seed);
    seed.zeroize();
    Ok(key)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let model_dir = match args.next().as_deref() {
        None | Some("-h") | Some("--help") => {
            println!("Usage: sign_model <model_dir>");
            return Ok(());
        }
        Some(dir) => PathBuf::from(dir),
    };
    if args.next().is_some() {
        bail!("Usage: sign_model <model_dir>");
    }

    // Refuse to sign anything the application would reject at startup.
    for category in DiseaseCategory::ALL {
        let path = model_dir.join(category.artifact_file());
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {path:?}"))?;
        ArtifactClassifier::from_slice(category, &bytes)
            .with_context(|| format!("{path:?} is not a valid {category} artifact"))?;
    }

    let signing_key = read_signing_key()?;

    let manifest = Manifest::for_files(
        &model_dir,
        DiseaseCategory::ALL.iter().map(|c| c.artifact_file()),
        Some(unix_now()),
    )?;
    let manifest_bytes = manifest.to_bytes()?;

    let manifest_path = model_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, &manifest_bytes)
        .with_context(|| format!("Failed to write {manifest_path:?}"))?;

    let sig_path = model_dir.join(SIGNATURE_FILE);
    fs::write(&sig_path, signing_key.sign(&manifest_bytes).to_bytes())
        .with_context(|| format!("Failed to write {sig_path:?}"))?;

    println!("Signed manifest: {manifest_path:?} ({} files)", manifest.files.len());
    println!("Wrote signature: {sig_path:?}");
    println!(
        "HEALTHSCOPE_MODEL_PUBKEY_B64={}",
        general_purpose::STANDARD.encode(signing_key.verifying_key().as_bytes())
    );
    Ok(())
}
