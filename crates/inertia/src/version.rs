// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Asset version detection.
//!
//! The version is the SHA-256 of the first manifest found under the public
//! directory, falling back to the SHA-256 of the configured asset URL.
//! With neither, there is no version.

use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::InertiaConfig;

/// Detects the current asset version.
pub fn detect_version(config: &InertiaConfig) -> Option<String> {
    let public_dir = Path::new(&config.public_dir);

    for manifest in &config.manifests {
        let path = public_dir.join(manifest);
        if !path.is_file() {
            continue;
        }
        match hash_file(&path) {
            Ok(hash) => return Some(hash),
            Err(e) => tracing::warn!("Could not read manifest {}: {}", path.display(), e),
        }
    }

    config.asset_url.as_deref().map(hash_str)
}

/// Hex SHA-256 of a file's contents.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(hash_bytes(&bytes))
}

/// Hex SHA-256 of a string.
pub fn hash_str(value: &str) -> String {
    hash_bytes(value.as_bytes())
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
