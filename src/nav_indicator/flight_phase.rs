use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter};

/// Area-nav flight phase, deciding how much cross-track error deflects the CDI fully.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, Serialize)]
pub enum FlightPhase {
    #[strum(serialize = "DPRT")]
    Departure,
    #[strum(serialize = "TERM")]
    Terminal,
    #[strum(serialize = "ENR")]
    Enroute,
    #[strum(serialize = "OCN")]
    Oceanic,
}

impl FlightPhase {
    /// Cross-track distance in nautical miles at full needle deflection.
    pub fn full_scale_nm(self) -> f64 { FULL_SCALE_NM_LOOKUP[&self] }
}

impl From<i64> for FlightPhase {
    fn from(code: i64) -> Self {
        match code {
            1 => FlightPhase::Departure,
            2 => FlightPhase::Terminal,
            4 => FlightPhase::Oceanic,
            // 3 is enroute. Approach and unknown codes use the enroute scale too
            _ => FlightPhase::Enroute,
        }
    }
}

static FULL_SCALE_NM_LOOKUP: LazyLock<HashMap<FlightPhase, f64>> = LazyLock::new(|| {
    let mut lookup = HashMap::new();
    let scales = vec![
        (FlightPhase::Departure, 0.3),
        (FlightPhase::Terminal, 1.0),
        (FlightPhase::Enroute, 2.0),
        (FlightPhase::Oceanic, 4.0),
    ];

    for (phase, scale) in scales {
        lookup.insert(phase, scale);
    }
    lookup
});

/// Normalized needle goal for an area-nav cross-track error, clamped to full scale.
pub fn normalized_cross_track(cross_track_nm: f64, phase: FlightPhase) -> f64 {
    let normalized = cross_track_nm / phase.full_scale_nm();
    if normalized.is_nan() { 0.0 } else { num::clamp(normalized, -1.0, 1.0) }
}
