use hsi_model::{
    FileStore, HsiModel, MemoryStore, SettingsStore, info,
    sim::{self, DEFAULT_SCRIPT, SimConfig, SimulatedTelemetry},
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = SimConfig::from_env();
    info!("Starting HSI simulation at {} Hz for {:?}", config.tick_hz, config.duration);

    match FileStore::open(&config.settings_path) {
        Ok(store) => {
            info!("Using settings from {}", store.path().display());
            drive(store, &config).await;
        }
        Err(e) => {
            hsi_model::warn!("Cannot load {}: {e:?}", config.settings_path.display());
            hsi_model::warn!("Falling back to volatile settings, selections will not persist");
            drive(MemoryStore::new(), &config).await;
        }
    }
}

async fn drive<S: SettingsStore>(store: S, config: &SimConfig) {
    let mut model = HsiModel::new(SimulatedTelemetry::new(config.noise), store);
    let ticks = sim::run(&mut model, config, &DEFAULT_SCRIPT).await;
    let snapshot = model.snapshot();
    info!(
        "Finished after {ticks} ticks: CDI {} xtk {:+.3}, BRG1 {:?}, BRG2 {:?}, DME {}",
        snapshot.cdi.source_label(),
        snapshot.cdi.smoothed_cross_track(),
        snapshot.bearing[0].source_id(),
        snapshot.bearing[1].source_id(),
        snapshot.dme.label(),
    );
    if let Err(e) = model.flush_settings() {
        hsi_model::warn!("Selections were not saved: {e:?}");
    }
}
