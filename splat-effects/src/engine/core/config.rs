use bevy::prelude::*;
use constants::paths::ASSETS_BASE;

use crate::effects::{EffectKind, UnknownEffect};
use crate::engine::assets::asset_manifest::ResolveOptions;

/// Runtime selection of the effect and of where its splat files come from.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EffectsConfig {
    pub effect: EffectKind,
    pub resolve: ResolveOptions,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            effect: EffectKind::default(),
            resolve: ResolveOptions {
                local_assets: false,
                assets_base: ASSETS_BASE.to_string(),
            },
        }
    }
}

impl EffectsConfig {
    /// Builds a config from raw values. Missing values keep their defaults.
    pub fn from_values(
        effect: Option<&str>,
        local_assets: Option<&str>,
        assets_base: Option<&str>,
    ) -> Result<Self, UnknownEffect> {
        let mut config = Self::default();
        if let Some(effect) = effect.filter(|e| !e.trim().is_empty()) {
            config.effect = effect.parse()?;
        }
        if let Some(flag) = local_assets {
            config.resolve.local_assets = parse_flag(flag);
        }
        if let Some(base) = assets_base.filter(|b| !b.trim().is_empty()) {
            config.resolve.assets_base = base.trim().to_string();
        }
        Ok(config)
    }

    /// First CLI argument selects the effect; the local-assets flag and
    /// asset base come from the environment.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_environment() -> Result<Self, UnknownEffect> {
        use constants::paths::{ASSETS_BASE_ENV, LOCAL_ASSETS_ENV};

        let effect = std::env::args().nth(1);
        let local_assets = std::env::var(LOCAL_ASSETS_ENV).ok();
        let assets_base = std::env::var(ASSETS_BASE_ENV).ok();
        Self::from_values(
            effect.as_deref(),
            local_assets.as_deref(),
            assets_base.as_deref(),
        )
    }

    /// Effect and local-assets flag are read from page globals.
    #[cfg(target_arch = "wasm32")]
    pub fn from_environment() -> Result<Self, UnknownEffect> {
        use constants::paths::{EFFECT_GLOBAL, LOCAL_ASSETS_GLOBAL};

        let effect = read_global(EFFECT_GLOBAL);
        let local_assets = read_global(LOCAL_ASSETS_GLOBAL);
        Self::from_values(effect.as_deref(), local_assets.as_deref(), None)
    }
}

/// Truthy strings: `1`, `true`, `yes`, `on` (any case).
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Reads `window[name]` as a string. Booleans are stringified so they go
/// through the same flag parsing as environment variables.
#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<String> {
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if let Some(flag) = value.as_bool() {
        return Some(flag.to_string());
    }
    value.as_string()
}
