//! Host sensor interface consumed by the model once per tick.

use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// One of the two VOR/localizer receivers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, Serialize)]
pub enum NavRadio {
    #[strum(serialize = "NAV1")]
    Nav1,
    #[strum(serialize = "NAV2")]
    Nav2,
}

impl NavRadio {
    /// Receiver number as used by the autopilot NAV select (1 or 2).
    pub fn index(self) -> u8 {
        match self {
            NavRadio::Nav1 => 1,
            NavRadio::Nav2 => 2,
        }
    }
}

/// Raw reading of a receiver's To/From flag.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, Serialize)]
pub enum ToFrom {
    To,
    From,
    Unknown,
}

impl From<i64> for ToFrom {
    /// Receiver flag encoding: 1 = To, 2 = From, everything else is unflagged.
    fn from(code: i64) -> Self {
        match code {
            1 => ToFrom::To,
            2 => ToFrom::From,
            _ => ToFrom::Unknown,
        }
    }
}

/// Instantaneous readings of the aircraft and its navigation receivers.
///
/// Getters are pure reads. The two actuator methods are only invoked when the
/// pilot cycles the CDI source.
pub trait Telemetry {
    /// Magnetic heading in degrees.
    fn heading(&self) -> f64;
    /// Autopilot heading-select bug in degrees.
    fn heading_bug(&self) -> f64;
    /// Magnetic ground track in degrees.
    fn ground_track(&self) -> f64;
    /// Turn rate in degrees per second.
    fn turn_rate(&self) -> f64;

    fn has_nav(&self, radio: NavRadio) -> bool;
    fn has_localizer(&self, radio: NavRadio) -> bool;
    fn localizer_course(&self, radio: NavRadio) -> f64;
    fn obs_course(&self, radio: NavRadio) -> f64;
    /// Needle deflection on the receiver's own ±127 scale.
    fn cdi_deflection(&self, radio: NavRadio) -> f64;
    /// Raw To/From code, see [`ToFrom`].
    fn to_from_code(&self, radio: NavRadio) -> i64;
    fn has_dme(&self, radio: NavRadio) -> bool;
    /// DME slant range in nautical miles.
    fn dme_distance(&self, radio: NavRadio) -> f64;
    fn station_ident(&self, radio: NavRadio) -> String;
    /// Active frequency in MHz.
    fn active_frequency(&self, radio: NavRadio) -> f64;
    /// Radial (from the station) the aircraft is on, in degrees.
    fn radial(&self, radio: NavRadio) -> f64;

    fn gps_drives_nav1(&self) -> bool;
    /// Autopilot NAV source index. 0 means none selected.
    fn ap_nav_selected(&self) -> i64;

    /// Ident of the active area-nav waypoint, empty if there is none.
    fn next_waypoint_ident(&self) -> String;
    fn desired_track(&self) -> f64;
    /// Signed cross-track distance in nautical miles.
    fn cross_track_nm(&self) -> f64;
    fn flight_phase_code(&self) -> i64;
    fn waypoint_distance(&self) -> f64;
    fn waypoint_bearing(&self) -> f64;

    fn adf_has_signal(&self) -> bool;
    /// Relative bearing to the NDB in degrees.
    fn adf_radial(&self) -> f64;
    /// Active ADF frequency in kHz.
    fn adf_frequency(&self) -> f64;

    /// Flips the coupling that lets the area-nav computer drive NAV1.
    fn toggle_gps_drives_nav1(&mut self);
    /// Selects receiver `index` as the autopilot NAV source.
    fn set_ap_nav_source(&mut self, index: u8);
}
