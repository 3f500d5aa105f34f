use splat_effects::engine::core::app_setup::create_app;
use splat_effects::engine::core::config::EffectsConfig;

fn main() {
    let config = match EffectsConfig::from_environment() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}; falling back to the default effect");
            EffectsConfig::default()
        }
    };
    let mut app = create_app(config);

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}
