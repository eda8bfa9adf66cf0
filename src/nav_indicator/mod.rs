pub mod bearing_pointer;
pub mod cdi_state;
pub mod common;
pub mod dme_channel;
pub mod flight_phase;
mod hsi_model;
mod snapshot;
#[cfg(test)]
mod tests;

pub use bearing_pointer::{BearingPointer, BearingSource, NO_DATA};
pub use cdi_state::{CdiSource, CdiState};
pub use dme_channel::DmeChannel;
pub use flight_phase::FlightPhase;
pub use hsi_model::HsiModel;
pub use snapshot::HsiSnapshot;
