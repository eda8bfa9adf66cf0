use super::bearing_pointer::finite;
use crate::telemetry::{NavRadio, Telemetry};
use serde::Serialize;

/// DME window showing the slant range of one receiver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DmeChannel {
    source_id: NavRadio,
    identifier: String,
    distance_nm: Option<f64>,
    display: bool,
}

impl DmeChannel {
    pub fn new(source_id: NavRadio, display: bool) -> Self {
        Self { source_id, identifier: String::new(), distance_nm: None, display }
    }

    /// Decodes a persisted source code.
    ///
    /// # Returns
    /// - The receiver and whether the code was unrecognized. Unrecognized codes,
    ///   0 included, resolve to NAV1.
    pub fn source_from_code(code: i64) -> (NavRadio, bool) {
        match code {
            1 => (NavRadio::Nav1, false),
            2 => (NavRadio::Nav2, false),
            _ => (NavRadio::Nav1, true),
        }
    }

    pub fn source_id(&self) -> NavRadio { self.source_id }
    pub fn label(&self) -> String { self.source_id.to_string() }
    pub fn identifier(&self) -> &str { &self.identifier }
    pub fn distance_nm(&self) -> Option<f64> { self.distance_nm }
    pub fn display(&self) -> bool { self.display }

    pub(crate) fn set_display(&mut self, display: bool) { self.display = display; }

    /// Swaps between NAV1 and NAV2.
    pub fn cycle(&mut self) -> NavRadio {
        self.source_id = match self.source_id {
            NavRadio::Nav1 => NavRadio::Nav2,
            NavRadio::Nav2 => NavRadio::Nav1,
        };
        self.source_id
    }

    /// Refreshes the tuned frequency and distance of the selected receiver.
    pub fn resolve(&mut self, telemetry: &impl Telemetry) {
        let radio = self.source_id;
        if telemetry.has_dme(radio) {
            self.identifier = format!("{:.2}", telemetry.active_frequency(radio));
            self.distance_nm = finite(telemetry.dme_distance(radio));
        } else {
            self.identifier.clear();
            self.distance_nm = None;
        }
    }
}
