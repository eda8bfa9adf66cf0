//! Simulated host: noisy telemetry and a fixed-rate frame loop driving the model.

mod config;
mod sim_telemetry;

pub use config::SimConfig;
pub use sim_telemetry::{SimReceiver, SimulatedTelemetry};

use crate::{
    info, log,
    nav_indicator::{HsiModel, common::Clock},
    settings::SettingsStore,
};
use tokio::time::{Instant, MissedTickBehavior, interval};

/// Pilot input replayed by the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PilotAction {
    CycleCdi,
    CycleBearing(u8),
    CycleDme,
    ToggleDme,
}

/// Inputs issued during a default run, keyed by seconds since start.
pub const DEFAULT_SCRIPT: [(f64, PilotAction); 6] = [
    (2.0, PilotAction::CycleBearing(1)),
    (4.0, PilotAction::ToggleDme),
    (6.0, PilotAction::CycleBearing(2)),
    (12.0, PilotAction::CycleCdi),
    (14.0, PilotAction::CycleDme),
    (17.0, PilotAction::CycleCdi),
];

fn apply<S: SettingsStore, C: Clock>(model: &mut HsiModel<SimulatedTelemetry, S, C>, action: PilotAction) {
    match action {
        PilotAction::CycleCdi => {
            let source = model.cycle_cdi_source();
            info!("Pilot cycled CDI to {source}");
        }
        PilotAction::CycleBearing(pointer) => match model.cycle_bearing_source(pointer) {
            Ok(source) => info!("Pilot cycled bearing {pointer} to {source:?}"),
            Err(e) => crate::warn!("Pilot input rejected: {e}"),
        },
        PilotAction::CycleDme => {
            let source = model.cycle_dme_source();
            info!("Pilot cycled DME to {source}");
        }
        PilotAction::ToggleDme => {
            let shown = model.toggle_dme_display();
            info!("Pilot {} the DME window", if shown { "opened" } else { "closed" });
        }
    }
}

fn report<S: SettingsStore, C: Clock>(model: &HsiModel<SimulatedTelemetry, S, C>) {
    let cdi = model.cdi();
    log!(
        "HDG {:05.1} TRK {:05.1} ROT {:+.2} | {} {} xtk {:+.3} crs {:05.1} ({})",
        model.heading(),
        model.track(),
        model.turn_rate(),
        cdi.source_label(),
        cdi.to_from(),
        cdi.smoothed_cross_track(),
        cdi.smoothed_bearing(),
        model.flight_phase(),
    );
    for (i, brg) in model.bearing_pointers().iter().enumerate().filter(|(_, b)| b.display()) {
        log!(
            "  BRG{} {} {} {:?} nm @ {:?}",
            i + 1,
            brg.label(),
            brg.identifier(),
            brg.distance_nm(),
            brg.bearing()
        );
    }
    let dme = model.dme();
    if dme.display() {
        log!("  DME {} {} {:?} nm", dme.label(), dme.identifier(), dme.distance_nm());
    }
}

/// Drives `model` at the configured rate until the run time has passed, replaying
/// `script` along the way.
///
/// # Returns
/// - The number of ticks executed during this run.
pub async fn run<S: SettingsStore, C: Clock>(
    model: &mut HsiModel<SimulatedTelemetry, S, C>,
    config: &SimConfig,
    script: &[(f64, PilotAction)],
) -> u64 {
    let mut frames = interval(config.tick_period());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let start = Instant::now();
    let mut last = start;
    let mut pending = script.iter().peekable();
    let first_tick = model.ticks();
    let report_every = config.report_every.max(1);

    while start.elapsed() < config.duration {
        frames.tick().await;
        let now = Instant::now();
        model.telemetry_mut().advance((now - last).as_secs_f64());
        last = now;
        model.update();

        let elapsed = start.elapsed().as_secs_f64();
        while let Some((_, action)) = pending.next_if(|(at, _)| *at <= elapsed) {
            apply(model, *action);
        }
        if model.ticks() % report_every == 0 {
            report(model);
        }
    }
    model.ticks() - first_tick
}
