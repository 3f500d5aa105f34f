use std::collections::HashMap;

use bevy::prelude::*;
use constants::paths::LOCAL_ASSETS_DIR;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a splat file can be downloaded from and where its local mirror lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifestEntry {
    pub url: String,
    pub directory: String,
}

/// Shared `assets.json` document: splat file name to download location.
/// Loaded once at startup and read-only afterwards.
#[derive(Asset, TypePath, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(flatten)]
    pub entries: HashMap<String, AssetManifestEntry>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("asset manifest could not be loaded: {0}")]
    ManifestUnavailable(String),

    #[error("asset {0:?} is not listed in the manifest")]
    MissingEntry(String),
}

/// How resolved names are turned into loadable paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Use the locally mirrored copy instead of the manifest URL.
    pub local_assets: bool,
    /// Root the local mirror directory hangs off.
    pub assets_base: String,
}

impl AssetManifest {
    pub fn entry(&self, name: &str) -> Result<&AssetManifestEntry, ResolveError> {
        self.entries
            .get(name)
            .ok_or_else(|| ResolveError::MissingEntry(name.to_string()))
    }

    /// Manifest URL for `name`, or `<base>/assets/<directory>/<name>` when
    /// local assets are enabled.
    pub fn resolve(&self, name: &str, options: &ResolveOptions) -> Result<String, ResolveError> {
        let entry = self.entry(name)?;
        if options.local_assets {
            Ok(format!(
                "{}/{}/{}/{}",
                options.assets_base.trim_end_matches('/'),
                LOCAL_ASSETS_DIR,
                entry.directory,
                name
            ))
        } else {
            Ok(entry.url.clone())
        }
    }
}

/// Resolves `name` against a manifest that may have failed to load. Every
/// failure is logged and collapsed to `None`; nothing is retried.
pub fn resolve_asset_url(
    manifest: Result<&AssetManifest, ResolveError>,
    name: &str,
    options: &ResolveOptions,
) -> Option<String> {
    match manifest.and_then(|m| m.resolve(name, options)) {
        Ok(url) => Some(url),
        Err(err) => {
            error!("Failed to load asset file URL for {name}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> AssetManifest {
        serde_json::from_str(
            r#"{ "a.spz": { "url": "https://x/a.spz", "directory": "d" },
                 "penguin.spz": { "url": "https://cdn/p.spz", "directory": "animals", "size": 12 } }"#,
        )
        .unwrap()
    }

    fn options(local_assets: bool) -> ResolveOptions {
        ResolveOptions {
            local_assets,
            assets_base: "examples".to_string(),
        }
    }

    #[test]
    fn remote_url_when_local_assets_unset() {
        let url = resolve_asset_url(Ok(&manifest()), "a.spz", &options(false));
        assert_eq!(url.as_deref(), Some("https://x/a.spz"));
    }

    #[test]
    fn local_directory_when_local_assets_set() {
        let url = resolve_asset_url(Ok(&manifest()), "a.spz", &options(true)).unwrap();
        assert!(url.contains("/d/a.spz"));
        assert_eq!(url, "examples/assets/d/a.spz");
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let options = ResolveOptions {
            local_assets: true,
            assets_base: "site/examples/".to_string(),
        };
        assert_eq!(
            manifest().resolve("penguin.spz", &options).unwrap(),
            "site/examples/assets/animals/penguin.spz"
        );
    }

    #[test]
    fn missing_name_resolves_to_none() {
        assert_eq!(
            resolve_asset_url(Ok(&manifest()), "nope.spz", &options(false)),
            None
        );
        assert_eq!(
            manifest().resolve("nope.spz", &options(false)),
            Err(ResolveError::MissingEntry("nope.spz".to_string()))
        );
    }

    #[test]
    fn unavailable_manifest_resolves_to_none() {
        let failed = Err(ResolveError::ManifestUnavailable("404".to_string()));
        assert_eq!(resolve_asset_url(failed, "a.spz", &options(true)), None);
    }
}
