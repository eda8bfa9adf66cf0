use super::{
    common::{Smoother, angle_arithmetics::wrap_360},
    flight_phase::{FlightPhase, normalized_cross_track},
};
use crate::telemetry::{NavRadio, Telemetry, ToFrom};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Receiver deflection that corresponds to a full-scale needle.
const RECEIVER_FULL_SCALE: f64 = 127.0;

/// Navigation source currently feeding the course deviation indicator.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, Serialize)]
pub enum CdiSource {
    None,
    Nav1,
    Nav2,
    AreaNav,
}

impl CdiSource {
    /// Resolves the active source from the avionics coupling state.
    ///
    /// The area-nav coupling wins over the autopilot NAV select. An out-of-range
    /// NAV index is clamped to the nearest receiver.
    pub fn from_telemetry(gps_drives_nav1: bool, ap_nav_selected: i64) -> Self {
        if gps_drives_nav1 {
            return CdiSource::AreaNav;
        }
        match ap_nav_selected {
            i64::MIN..=0 => CdiSource::None,
            1 => CdiSource::Nav1,
            _ => CdiSource::Nav2,
        }
    }

    pub fn radio(self) -> Option<NavRadio> {
        match self {
            CdiSource::Nav1 => Some(NavRadio::Nav1),
            CdiSource::Nav2 => Some(NavRadio::Nav2),
            CdiSource::None | CdiSource::AreaNav => None,
        }
    }

    pub fn is_area_nav(self) -> bool { self == CdiSource::AreaNav }

    /// Next source in the pilot's cycle, ignoring receiver availability.
    pub fn next(self) -> Self {
        match self {
            CdiSource::None | CdiSource::AreaNav => CdiSource::Nav1,
            CdiSource::Nav1 => CdiSource::Nav2,
            CdiSource::Nav2 => CdiSource::AreaNav,
        }
    }
}

/// Course deviation indicator presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdiState {
    source_id: CdiSource,
    source_label: String,
    display_deviation: bool,
    to_from: ToFrom,
    full_scale_nm: f64,
    /// Area-nav cross-track error in nautical miles. Absent for receiver sources.
    cross_track_nm: Option<f64>,
    /// Needle goal before clamping, in full-scale units.
    raw_cross_track: f64,
    goal_cross_track: f64,
    smoothed_cross_track: f64,
    raw_bearing: f64,
    smoothed_bearing: f64,
}

impl Default for CdiState {
    fn default() -> Self {
        Self {
            source_id: CdiSource::None,
            source_label: String::new(),
            display_deviation: false,
            to_from: ToFrom::Unknown,
            full_scale_nm: FlightPhase::Enroute.full_scale_nm(),
            cross_track_nm: None,
            raw_cross_track: 0.0,
            goal_cross_track: 0.0,
            smoothed_cross_track: 0.0,
            raw_bearing: 0.0,
            smoothed_bearing: 0.0,
        }
    }
}

impl CdiState {
    pub fn source_id(&self) -> CdiSource { self.source_id }
    pub fn source_label(&self) -> &str { &self.source_label }
    pub fn display_deviation(&self) -> bool { self.display_deviation }
    pub fn to_from(&self) -> ToFrom { self.to_from }
    pub fn full_scale_nm(&self) -> f64 { self.full_scale_nm }
    pub fn cross_track_nm(&self) -> Option<f64> { self.cross_track_nm }
    pub fn raw_cross_track(&self) -> f64 { self.raw_cross_track }
    pub fn goal_cross_track(&self) -> f64 { self.goal_cross_track }
    pub fn smoothed_cross_track(&self) -> f64 { self.smoothed_cross_track }
    pub fn raw_bearing(&self) -> f64 { self.raw_bearing }
    pub fn smoothed_bearing(&self) -> f64 { self.smoothed_bearing }

    pub(crate) fn set_source_id(&mut self, source_id: CdiSource) { self.source_id = source_id; }

    /// Re-reads the active source and its goals from `telemetry`.
    ///
    /// # Returns
    /// - The resolved flight phase when the area-nav computer is the source, `None` otherwise.
    pub fn select_source(&mut self, telemetry: &impl Telemetry) -> Option<FlightPhase> {
        self.source_id =
            CdiSource::from_telemetry(telemetry.gps_drives_nav1(), telemetry.ap_nav_selected());
        match self.source_id {
            CdiSource::Nav1 | CdiSource::Nav2 => {
                if let Some(radio) = self.source_id.radio() {
                    self.select_receiver(telemetry, radio);
                }
                None
            }
            CdiSource::AreaNav => Some(self.select_area_nav(telemetry)),
            CdiSource::None => {
                // needle relaxes towards whatever it was last showing
                self.source_label.clear();
                self.display_deviation = false;
                self.to_from = ToFrom::Unknown;
                self.cross_track_nm = None;
                None
            }
        }
    }

    fn select_receiver(&mut self, telemetry: &impl Telemetry, radio: NavRadio) {
        self.display_deviation = telemetry.has_nav(radio);
        let bearing = if telemetry.has_localizer(radio) {
            self.source_label = format!("LOC{}", radio.index());
            telemetry.localizer_course(radio)
        } else {
            self.source_label = format!("VOR{}", radio.index());
            telemetry.obs_course(radio)
        };
        self.set_bearing_goal(bearing);
        self.cross_track_nm = None;
        self.set_cross_track_goal(telemetry.cdi_deflection(radio) / RECEIVER_FULL_SCALE);
        self.to_from = ToFrom::from(telemetry.to_from_code(radio));
    }

    fn select_area_nav(&mut self, telemetry: &impl Telemetry) -> FlightPhase {
        self.source_label = String::from("FMS");
        self.display_deviation = !telemetry.next_waypoint_ident().is_empty();
        self.set_bearing_goal(telemetry.desired_track());

        let phase = FlightPhase::from(telemetry.flight_phase_code());
        self.full_scale_nm = phase.full_scale_nm();
        let xtk = telemetry.cross_track_nm();
        if xtk.is_finite() {
            self.cross_track_nm = Some(xtk);
            self.raw_cross_track = xtk / self.full_scale_nm;
            self.goal_cross_track = normalized_cross_track(xtk, phase);
        }
        self.to_from = ToFrom::To;
        phase
    }

    fn set_cross_track_goal(&mut self, normalized: f64) {
        if normalized.is_finite() {
            self.raw_cross_track = normalized;
            self.goal_cross_track = num::clamp(normalized, -1.0, 1.0);
        }
    }

    fn set_bearing_goal(&mut self, bearing: f64) {
        if bearing.is_finite() {
            self.raw_bearing = wrap_360(bearing);
        }
    }

    /// Moves the needle and the course pointer towards their goals.
    pub fn smooth(&mut self, smoother: &Smoother, dt: f64) {
        let xtk = smoother.smooth(self.smoothed_cross_track, self.goal_cross_track, dt);
        self.smoothed_cross_track = num::clamp(xtk, -1.0, 1.0);
        self.smoothed_bearing = smoother.smooth_angle(self.smoothed_bearing, self.raw_bearing, dt);
    }
}
