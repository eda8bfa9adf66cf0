use crate::nav_indicator::common::angle_arithmetics::{angle_delta, reciprocal, wrap_360};
use crate::telemetry::{NavRadio, Telemetry};
use rand::Rng;

/// Simulated receiver tuned to a fixed station.
#[derive(Debug, Clone)]
pub struct SimReceiver {
    pub has_nav: bool,
    pub has_localizer: bool,
    pub localizer_course: f64,
    pub obs: f64,
    pub has_dme: bool,
    pub dme_distance: f64,
    pub ident: String,
    pub frequency: f64,
    pub radial: f64,
}

impl SimReceiver {
    fn vor(ident: &str, frequency: f64, radial: f64, distance: f64) -> Self {
        Self {
            has_nav: true,
            has_localizer: false,
            localizer_course: 0.0,
            obs: radial,
            has_dme: true,
            dme_distance: distance,
            ident: ident.to_string(),
            frequency,
            radial,
        }
    }
}

/// Aircraft in a slow turn, tracking a VOR on NAV1 while the FMS flies a leg.
///
/// Every reading carries sensor noise so the smoothing has something to do.
#[derive(Debug)]
pub struct SimulatedTelemetry {
    noise: f64,
    pub heading: f64,
    pub heading_bug: f64,
    pub turn_rate: f64,
    pub receivers: [SimReceiver; 2],
    pub gps_drives_nav1: bool,
    pub ap_nav_selected: i64,
    pub next_waypoint: String,
    pub desired_track: f64,
    pub cross_track_nm: f64,
    pub flight_phase_code: i64,
    pub waypoint_distance: f64,
    pub adf_signal: bool,
    pub adf_frequency: f64,
    pub adf_bearing: f64,
    elapsed: f64,
}

impl SimulatedTelemetry {
    /// Knots of groundspeed used to run down the waypoint and DME distances.
    const GROUND_SPEED_KT: f64 = 140.0;
    /// Bearing of the simulated NDB from the aircraft's starting point.
    const NDB_BEARING: f64 = 200.0;

    pub fn new(noise: f64) -> Self {
        Self {
            noise,
            heading: 90.0,
            heading_bug: 120.0,
            turn_rate: 1.5,
            receivers: [
                SimReceiver::vor("SFO", 115.8, 250.0, 18.0),
                SimReceiver { has_nav: false, ..SimReceiver::vor("OAK", 116.8, 0.0, 0.0) },
            ],
            gps_drives_nav1: false,
            ap_nav_selected: 1,
            next_waypoint: String::from("BRIXX"),
            desired_track: 95.0,
            cross_track_nm: 0.6,
            flight_phase_code: 3,
            waypoint_distance: 24.0,
            adf_signal: true,
            adf_frequency: 362.0,
            adf_bearing: Self::NDB_BEARING,
            elapsed: 0.0,
        }
    }

    pub fn elapsed(&self) -> f64 { self.elapsed }

    /// Moves the scenario forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        self.heading = wrap_360(self.heading + self.turn_rate * dt);
        let run = Self::GROUND_SPEED_KT * dt / 3600.0;
        self.waypoint_distance = (self.waypoint_distance - run).max(0.0);
        self.cross_track_nm -= 0.02 * dt;
        let rx = &mut self.receivers[0];
        rx.dme_distance = (rx.dme_distance + run).max(0.0);
        rx.radial = wrap_360(rx.radial + 0.2 * dt);

        // NAV2 station comes into range after ten seconds
        if self.elapsed > 10.0 {
            self.receivers[1].has_nav = true;
        }
        if self.elapsed > 15.0 {
            self.flight_phase_code = 2;
        }
    }

    fn jitter(&self, value: f64) -> f64 {
        if !self.noise.is_finite() || self.noise <= 0.0 {
            return value;
        }
        value + rand::rng().random_range(-self.noise..=self.noise)
    }

    fn rx(&self, radio: NavRadio) -> &SimReceiver { &self.receivers[usize::from(radio.index() - 1)] }
}

impl Telemetry for SimulatedTelemetry {
    fn heading(&self) -> f64 { wrap_360(self.jitter(self.heading)) }
    fn heading_bug(&self) -> f64 { self.heading_bug }
    fn ground_track(&self) -> f64 { wrap_360(self.jitter(self.heading + 3.0)) }
    fn turn_rate(&self) -> f64 { self.jitter(self.turn_rate) }

    fn has_nav(&self, radio: NavRadio) -> bool { self.rx(radio).has_nav }
    fn has_localizer(&self, radio: NavRadio) -> bool { self.rx(radio).has_localizer }
    fn localizer_course(&self, radio: NavRadio) -> f64 { self.rx(radio).localizer_course }
    fn obs_course(&self, radio: NavRadio) -> f64 { self.rx(radio).obs }

    fn cdi_deflection(&self, radio: NavRadio) -> f64 {
        let rx = self.rx(radio);
        // ten degrees off the selected radial pegs the needle
        let off_course = angle_delta(rx.obs, rx.radial);
        num::clamp(self.jitter(off_course * 12.7), -127.0, 127.0)
    }

    fn to_from_code(&self, radio: NavRadio) -> i64 {
        let rx = self.rx(radio);
        if !rx.has_nav {
            0
        } else if angle_delta(rx.obs, reciprocal(rx.radial)).abs() < 90.0 {
            1
        } else {
            2
        }
    }

    fn has_dme(&self, radio: NavRadio) -> bool { self.rx(radio).has_nav && self.rx(radio).has_dme }
    fn dme_distance(&self, radio: NavRadio) -> f64 { self.rx(radio).dme_distance }
    fn station_ident(&self, radio: NavRadio) -> String { self.rx(radio).ident.clone() }
    fn active_frequency(&self, radio: NavRadio) -> f64 { self.rx(radio).frequency }
    fn radial(&self, radio: NavRadio) -> f64 { self.jitter(self.rx(radio).radial) }

    fn gps_drives_nav1(&self) -> bool { self.gps_drives_nav1 }
    fn ap_nav_selected(&self) -> i64 { self.ap_nav_selected }

    fn next_waypoint_ident(&self) -> String { self.next_waypoint.clone() }
    fn desired_track(&self) -> f64 { self.desired_track }
    fn cross_track_nm(&self) -> f64 { self.jitter(self.cross_track_nm) }
    fn flight_phase_code(&self) -> i64 { self.flight_phase_code }
    fn waypoint_distance(&self) -> f64 { self.waypoint_distance }
    fn waypoint_bearing(&self) -> f64 { wrap_360(self.desired_track - self.cross_track_nm) }

    fn adf_has_signal(&self) -> bool { self.adf_signal }
    fn adf_radial(&self) -> f64 { wrap_360(self.jitter(self.adf_bearing - self.heading)) }
    fn adf_frequency(&self) -> f64 { self.adf_frequency }

    fn toggle_gps_drives_nav1(&mut self) { self.gps_drives_nav1 = !self.gps_drives_nav1; }
    fn set_ap_nav_source(&mut self, index: u8) { self.ap_nav_selected = i64::from(index); }
}
