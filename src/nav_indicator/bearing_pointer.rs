use super::common::angle_arithmetics::{reciprocal, relative_to_magnetic, wrap_360};
use crate::telemetry::{NavRadio, Telemetry};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

/// Shown in place of an ident when the selected source has nothing to offer.
pub const NO_DATA: &str = "NO DATA";

/// Source selectable for a bearing pointer, in cycle order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter, Serialize)]
pub enum BearingSource {
    #[strum(serialize = "")]
    Off,
    #[strum(serialize = "NAV1")]
    Nav1,
    #[strum(serialize = "NAV2")]
    Nav2,
    #[strum(serialize = "GPS")]
    AreaNav,
    #[strum(serialize = "ADF")]
    Adf,
}

impl BearingSource {
    const COUNT: i64 = 5;

    /// Persisted index of this source.
    pub fn code(self) -> i64 {
        match self {
            BearingSource::Off => 0,
            BearingSource::Nav1 => 1,
            BearingSource::Nav2 => 2,
            BearingSource::AreaNav => 3,
            BearingSource::Adf => 4,
        }
    }

    pub fn next(self) -> Self { Self::from((self.code() + 1) % Self::COUNT) }

    fn radio(self) -> Option<NavRadio> {
        match self {
            BearingSource::Nav1 => Some(NavRadio::Nav1),
            BearingSource::Nav2 => Some(NavRadio::Nav2),
            _ => None,
        }
    }
}

impl From<i64> for BearingSource {
    /// Out-of-range codes are clamped to the nearest source.
    fn from(code: i64) -> Self {
        match code {
            i64::MIN..=0 => BearingSource::Off,
            1 => BearingSource::Nav1,
            2 => BearingSource::Nav2,
            3 => BearingSource::AreaNav,
            _ => BearingSource::Adf,
        }
    }
}

/// Secondary needle pointing at a selectable station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BearingPointer {
    source_id: BearingSource,
    identifier: String,
    distance_nm: Option<f64>,
    bearing: Option<f64>,
}

impl BearingPointer {
    pub fn new(source_id: BearingSource) -> Self {
        Self { source_id, identifier: String::new(), distance_nm: None, bearing: None }
    }

    pub fn source_id(&self) -> BearingSource { self.source_id }
    pub fn label(&self) -> String { self.source_id.to_string() }
    pub fn identifier(&self) -> &str { &self.identifier }
    pub fn distance_nm(&self) -> Option<f64> { self.distance_nm }
    pub fn bearing(&self) -> Option<f64> { self.bearing }
    pub fn display(&self) -> bool { self.source_id != BearingSource::Off }

    /// Advances to the next source and clears the readout until the next resolve.
    pub fn cycle(&mut self) -> BearingSource {
        self.source_id = self.source_id.next();
        self.clear();
        self.source_id
    }

    /// Refreshes ident, distance and bearing from the selected source.
    /// `heading` turns the ADF relative bearing into a magnetic one.
    pub fn resolve(&mut self, telemetry: &impl Telemetry, heading: f64) {
        match self.source_id {
            BearingSource::Off => self.clear(),
            BearingSource::Nav1 | BearingSource::Nav2 => {
                if let Some(radio) = self.source_id.radio() {
                    self.resolve_receiver(telemetry, radio);
                }
            }
            BearingSource::AreaNav => {
                self.identifier = telemetry.next_waypoint_ident();
                self.distance_nm = finite(telemetry.waypoint_distance());
                self.bearing = finite(telemetry.waypoint_bearing()).map(wrap_360);
            }
            BearingSource::Adf => {
                self.distance_nm = None;
                if telemetry.adf_has_signal() {
                    self.identifier = format!("{:.1}", telemetry.adf_frequency());
                    self.bearing = finite(telemetry.adf_radial())
                        .map(|relative| relative_to_magnetic(relative, heading));
                } else {
                    self.no_data();
                }
            }
        }
    }

    fn resolve_receiver(&mut self, telemetry: &impl Telemetry, radio: NavRadio) {
        if !telemetry.has_nav(radio) {
            self.no_data();
            return;
        }
        self.identifier = telemetry.station_ident(radio);
        self.distance_nm =
            if telemetry.has_dme(radio) { finite(telemetry.dme_distance(radio)) } else { None };
        self.bearing = finite(telemetry.radial(radio)).map(reciprocal);
    }

    fn no_data(&mut self) {
        self.identifier = String::from(NO_DATA);
        self.distance_nm = None;
        self.bearing = None;
    }

    fn clear(&mut self) {
        self.identifier.clear();
        self.distance_nm = None;
        self.bearing = None;
    }
}

pub(super) fn finite(value: f64) -> Option<f64> { value.is_finite().then_some(value) }
