use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::paths::MANIFEST_FILE;

use crate::engine::assets::asset_manifest::{AssetManifest, ResolveError, resolve_asset_url};
use crate::engine::assets::splat_cloud::SplatCloud;
use crate::engine::core::config::EffectsConfig;
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::splat_sources::{SplatSource, SplatSources};

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<AssetManifest>>,
}

pub fn manifest_path(assets_base: &str) -> String {
    format!("{}/{}", assets_base.trim_end_matches('/'), MANIFEST_FILE)
}

// Start the loading process
pub fn start_loading(
    mut manifest_loader: ResMut<ManifestLoader>,
    asset_server: Res<AssetServer>,
    config: Res<EffectsConfig>,
) {
    let path = manifest_path(&config.resolve.assets_base);
    println!("Loading asset manifest from: {path}");
    manifest_loader.handle = Some(asset_server.load(path));
}

/// Once the manifest settles, resolves every splat file of the effect and
/// starts loading the ones that resolved. A failed manifest resolves every
/// name to nothing; the failure is logged per name.
pub fn resolve_splat_urls(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<AssetManifest>>,
    asset_server: Res<AssetServer>,
    config: Res<EffectsConfig>,
    mut sources: ResMut<SplatSources>,
) {
    if loading_progress.urls_resolved {
        return;
    }
    let Some(handle) = &manifest_loader.handle else {
        return;
    };

    let manifest = match manifests.get(handle) {
        Some(manifest) => {
            println!("✓ Asset manifest loaded ({} entries)", manifest.entries.len());
            Ok(manifest)
        }
        None => match asset_server.get_load_state(handle) {
            Some(LoadState::Failed(err)) => Err(ResolveError::ManifestUnavailable(err.to_string())),
            _ => return,
        },
    };

    sources.sources = config
        .effect
        .splat_files()
        .iter()
        .map(|&name| {
            let url = resolve_asset_url(manifest.clone(), name, &config.resolve);
            let handle = url.as_ref().map(|url| {
                println!("Loading splat file {name} from: {url}");
                asset_server.load::<SplatCloud>(url.clone())
            });
            SplatSource::new(name, url, handle)
        })
        .collect();

    loading_progress.urls_resolved = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::io::AssetSourceId;
    use bevy::asset::AssetPath;
    use std::path::Path;

    #[test]
    fn manifest_lives_under_the_assets_base() {
        assert_eq!(manifest_path("examples/"), format!("examples/{MANIFEST_FILE}"));
    }

    #[test]
    fn remote_urls_route_to_the_web_source() {
        let path = AssetPath::parse("https://storage.example/splats/penguin.spz");
        assert_eq!(path.source(), &AssetSourceId::from("https"));
        assert_eq!(path.path().extension(), Some(Path::new("spz").as_os_str()));

        let local = AssetPath::parse("examples/assets/animals/penguin.spz");
        assert_eq!(local.source(), &AssetSourceId::Default);
    }
}
