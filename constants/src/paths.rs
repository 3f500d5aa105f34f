/// Root of the effect assets, relative to the Bevy asset folder.
pub const ASSETS_BASE: &str = "examples";

/// Manifest mapping splat file names to remote URLs and local directories.
pub const MANIFEST_FILE: &str = "assets.json";

/// Directory under [`ASSETS_BASE`] holding locally mirrored splat files.
pub const LOCAL_ASSETS_DIR: &str = "assets";

/// Environment variable enabling local asset resolution on native builds.
pub const LOCAL_ASSETS_ENV: &str = "SPARK_LOCAL_ASSETS";

/// Environment variable overriding [`ASSETS_BASE`] on native builds.
pub const ASSETS_BASE_ENV: &str = "SPARK_ASSETS_BASE";

/// Page globals read on WASM builds.
pub const LOCAL_ASSETS_GLOBAL: &str = "sparkLocalAssets";
pub const EFFECT_GLOBAL: &str = "sparkEffect";
