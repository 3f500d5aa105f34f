use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::assets::splat_cloud::SplatCloud;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplatSourceStatus {
    /// No URL; never loaded.
    Unresolved,
    Loading,
    Loaded,
    Failed,
}

/// One configured splat file, in object index order.
#[derive(Debug, Clone)]
pub struct SplatSource {
    pub name: &'static str,
    pub url: Option<String>,
    pub handle: Option<Handle<SplatCloud>>,
    pub status: SplatSourceStatus,
}

impl SplatSource {
    pub fn new(name: &'static str, url: Option<String>, handle: Option<Handle<SplatCloud>>) -> Self {
        let status = if handle.is_some() {
            SplatSourceStatus::Loading
        } else {
            SplatSourceStatus::Unresolved
        };
        Self {
            name,
            url,
            handle,
            status,
        }
    }

    /// Folds an asset server load state into the status. Settled statuses
    /// never change again.
    pub fn observe(&mut self, state: Option<&LoadState>) {
        if self.status != SplatSourceStatus::Loading {
            return;
        }
        match state {
            Some(LoadState::Loaded) => self.status = SplatSourceStatus::Loaded,
            Some(LoadState::Failed(err)) => {
                error!(
                    "Failed to load splat file {} from {}: {err}",
                    self.name,
                    self.url.as_deref().unwrap_or("<unresolved>")
                );
                self.status = SplatSourceStatus::Failed;
            }
            _ => {}
        }
    }
}

#[derive(Resource, Default, Debug, Clone)]
pub struct SplatSources {
    pub sources: Vec<SplatSource>,
}

impl SplatSources {
    pub fn all_settled(&self) -> bool {
        self.sources
            .iter()
            .all(|source| source.status != SplatSourceStatus::Loading)
    }

    pub fn loaded(&self) -> impl Iterator<Item = (usize, &SplatSource)> {
        self.sources
            .iter()
            .enumerate()
            .filter(|(_, source)| source.status == SplatSourceStatus::Loaded)
    }
}

// Check if every resolved splat file has finished loading or failed
pub fn check_splat_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    mut sources: ResMut<SplatSources>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.splats_settled || !loading_progress.urls_resolved {
        return;
    }

    for source in &mut sources.sources {
        let state = source
            .handle
            .as_ref()
            .and_then(|handle| asset_server.get_load_state(handle));
        source.observe(state.as_ref());
    }

    if sources.all_settled() {
        let loaded = sources.loaded().count();
        println!("✓ Splat files settled: {loaded}/{} loaded", sources.sources.len());
        loading_progress.splats_settled = true;
    }
}
