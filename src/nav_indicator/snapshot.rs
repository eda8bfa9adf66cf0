use super::{
    bearing_pointer::BearingPointer, cdi_state::CdiState, dme_channel::DmeChannel,
    flight_phase::FlightPhase,
};
use serde::Serialize;

/// Everything a renderer needs after a tick.
///
/// Renderers keep the previous snapshot and redraw only the parts that compare unequal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HsiSnapshot {
    pub heading: f64,
    pub heading_bug: f64,
    pub track: f64,
    pub turn_rate: f64,
    pub flight_phase: FlightPhase,
    pub cdi: CdiState,
    pub bearing: [BearingPointer; 2],
    pub dme: DmeChannel,
}
