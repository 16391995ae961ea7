// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! SSR bundle discovery, for starting the render service.

use std::path::{Path, PathBuf};

use crate::config::InertiaConfig;

/// Finds the SSR bundle the render service should load.
///
/// Candidates, first existing wins: `ssr.bundle`, then
/// `<base>/bootstrap/ssr/ssr.mjs`, `<base>/bootstrap/ssr/ssr.js` and
/// `<public_dir>/js/ssr.js`. Relative paths are taken from `base_dir`.
pub fn detect_bundle(config: &InertiaConfig, base_dir: &Path) -> Option<PathBuf> {
    let public_dir = base_dir.join(&config.public_dir);

    let candidates = config
        .ssr
        .bundle
        .iter()
        .map(|bundle| base_dir.join(bundle))
        .chain([
            base_dir.join("bootstrap/ssr/ssr.mjs"),
            base_dir.join("bootstrap/ssr/ssr.js"),
            public_dir.join("js/ssr.js"),
        ]);

    for candidate in candidates {
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export default {}").unwrap();
    }

    #[test]
    fn test_nothing_found() {
        let dir = tempdir().unwrap();
        assert_eq!(detect_bundle(&InertiaConfig::default(), dir.path()), None);
    }

    #[test]
    fn test_bootstrap_mjs_preferred_over_public() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("public/js/ssr.js"));
        touch(&dir.path().join("bootstrap/ssr/ssr.mjs"));
        assert_eq!(
            detect_bundle(&InertiaConfig::default(), dir.path()),
            Some(dir.path().join("bootstrap/ssr/ssr.mjs"))
        );
    }

    #[test]
    fn test_configured_bundle_wins() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("bootstrap/ssr/ssr.js"));
        touch(&dir.path().join("dist/server.js"));

        let mut config = InertiaConfig::default();
        config.ssr.bundle = Some(PathBuf::from("dist/server.js"));
        assert_eq!(
            detect_bundle(&config, dir.path()),
            Some(dir.path().join("dist/server.js"))
        );
    }

    #[test]
    fn test_missing_configured_bundle_is_skipped() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("public/js/ssr.js"));

        let mut config = InertiaConfig::default();
        config.ssr.bundle = Some(PathBuf::from("nope.js"));
        assert_eq!(
            detect_bundle(&config, dir.path()),
            Some(dir.path().join("public/js/ssr.js"))
        );
    }
}
