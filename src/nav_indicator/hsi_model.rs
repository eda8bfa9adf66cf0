use super::{
    bearing_pointer::{BearingPointer, BearingSource},
    cdi_state::{CdiSource, CdiState},
    common::{
        Clock, MonotonicClock, Smoother, angle_arithmetics::wrap_360, clock::TickTimer,
    },
    dme_channel::DmeChannel,
    flight_phase::FlightPhase,
    snapshot::HsiSnapshot,
};
use crate::{
    error::HsiError,
    event,
    settings::{
        BRG1_SOURCE_KEY, BRG2_SOURCE_KEY, DME_SOURCE_KEY, SHOW_DME_KEY, SettingsStore,
        bearing_source_key,
    },
    telemetry::{NavRadio, Telemetry},
};

/// Navigation indicator state of one instrument, driven once per host frame.
///
/// Owns the telemetry adapter, the settings store and the clock. All reads happen in
/// [`HsiModel::update`]. All settings writes happen in the pilot commands, plus the
/// one-time DME source repair at construction.
pub struct HsiModel<T: Telemetry, S: SettingsStore, C: Clock = MonotonicClock> {
    telemetry: T,
    settings: S,
    clock: C,
    timer: TickTimer,
    smoother: Smoother,
    heading: f64,
    heading_bug: f64,
    track: f64,
    turn_rate: f64,
    flight_phase: FlightPhase,
    cdi: CdiState,
    bearing: [BearingPointer; 2],
    dme: DmeChannel,
    ticks: u64,
}

impl<T: Telemetry, S: SettingsStore> HsiModel<T, S> {
    /// Creates a model timed by the process monotonic clock.
    pub fn new(telemetry: T, settings: S) -> Self {
        Self::with_clock(telemetry, settings, MonotonicClock::new())
    }
}

impl<T: Telemetry, S: SettingsStore, C: Clock> HsiModel<T, S, C> {
    /// Divisor of the per-tick turn-rate filter. Applied per call, not per second.
    pub const TURN_RATE_DIVISOR: f64 = 5.0;

    /// Creates a model and restores the persisted source selections from `settings`.
    ///
    /// A missing or unrecognized DME source is repaired to NAV1 and written back.
    pub fn with_clock(telemetry: T, mut settings: S, clock: C) -> Self {
        let show_dme = settings.get_bool(SHOW_DME_KEY, false);
        let brg1 = BearingSource::from(settings.get(BRG1_SOURCE_KEY, 0));
        let brg2 = BearingSource::from(settings.get(BRG2_SOURCE_KEY, 0));

        let dme_code = settings.get(DME_SOURCE_KEY, 0);
        let (dme_source, repaired) = DmeChannel::source_from_code(dme_code);
        if repaired {
            event!("DME source code {dme_code} not recognized, resetting to {dme_source}");
            settings.set(DME_SOURCE_KEY, i64::from(dme_source.index()));
        }

        let timer = TickTimer::start(&clock);
        Self {
            telemetry,
            settings,
            clock,
            timer,
            smoother: Smoother::default(),
            heading: 0.0,
            heading_bug: 0.0,
            track: 0.0,
            turn_rate: 0.0,
            flight_phase: FlightPhase::Enroute,
            cdi: CdiState::default(),
            bearing: [BearingPointer::new(brg1), BearingPointer::new(brg2)],
            dme: DmeChannel::new(dme_source, show_dme),
            ticks: 0,
        }
    }

    pub fn heading(&self) -> f64 { self.heading }
    pub fn heading_bug(&self) -> f64 { self.heading_bug }
    pub fn track(&self) -> f64 { self.track }
    pub fn turn_rate(&self) -> f64 { self.turn_rate }
    pub fn flight_phase(&self) -> FlightPhase { self.flight_phase }
    pub fn cdi(&self) -> &CdiState { &self.cdi }
    pub fn bearing_pointers(&self) -> &[BearingPointer; 2] { &self.bearing }
    pub fn dme(&self) -> &DmeChannel { &self.dme }
    pub fn ticks(&self) -> u64 { self.ticks }
    pub fn telemetry(&self) -> &T { &self.telemetry }
    pub fn telemetry_mut(&mut self) -> &mut T { &mut self.telemetry }
    pub fn settings(&self) -> &S { &self.settings }

    /// Bearing pointer `pointer` (1 or 2).
    pub fn bearing_pointer(&self, pointer: u8) -> Option<&BearingPointer> {
        Self::pointer_slot(pointer).map(|i| &self.bearing[i])
    }

    /// Samples the clock and runs one tick.
    ///
    /// # Returns
    /// - The elapsed time since the previous tick in seconds.
    pub fn update(&mut self) -> f64 {
        let dt = self.timer.lap(&self.clock);
        self.tick(dt);
        dt
    }

    fn tick(&mut self, dt: f64) {
        let t = &self.telemetry;
        if let Some(heading) = finite_angle(t.heading()) {
            self.heading = heading;
        }
        if let Some(bug) = finite_angle(t.heading_bug()) {
            self.heading_bug = bug;
        }
        if let Some(track) = finite_angle(t.ground_track()) {
            self.track = track;
        }
        let raw_turn_rate = t.turn_rate();
        if raw_turn_rate.is_finite() {
            self.turn_rate += (raw_turn_rate - self.turn_rate) / Self::TURN_RATE_DIVISOR;
        }

        let previous_source = self.cdi.source_id();
        if let Some(phase) = self.cdi.select_source(t) {
            if phase != self.flight_phase {
                event!("Area-nav phase {} -> {phase}", self.flight_phase);
            }
            self.flight_phase = phase;
        }
        if previous_source != self.cdi.source_id() {
            event!("CDI source {previous_source} -> {}", self.cdi.source_id());
        }
        self.cdi.smooth(&self.smoother, dt);

        for pointer in &mut self.bearing {
            pointer.resolve(t, self.heading);
        }
        self.dme.resolve(t);
        self.ticks += 1;
    }

    /// Steps the CDI to the next source: NAV1, NAV2, area-nav, then NAV1 again.
    ///
    /// NAV2 is skipped while it has no valid signal. The avionics are kept in line
    /// with the new source. The GPS-drives-NAV1 coupling is toggled when the
    /// area-nav selection changes, and receiver sources are pushed to the
    /// autopilot NAV select.
    pub fn cycle_cdi_source(&mut self) -> CdiSource {
        let gps_driven = self.telemetry.gps_drives_nav1();
        let previous = self.cdi.source_id();
        let mut next = previous.next();
        if next == CdiSource::Nav2 && !self.telemetry.has_nav(NavRadio::Nav2) {
            next = CdiSource::AreaNav;
        }
        if next.is_area_nav() != gps_driven {
            self.telemetry.toggle_gps_drives_nav1();
        }
        if let Some(radio) = next.radio() {
            self.telemetry.set_ap_nav_source(radio.index());
        }
        self.cdi.set_source_id(next);
        event!("CDI source cycled {previous} -> {next}");
        next
    }

    /// Steps bearing pointer `pointer` (1 or 2) through off, NAV1, NAV2, GPS, ADF and
    /// persists the selection.
    ///
    /// # Errors
    /// - `HsiError::InvalidPointer` if `pointer` is neither 1 nor 2.
    pub fn cycle_bearing_source(&mut self, pointer: u8) -> Result<BearingSource, HsiError> {
        let (slot, key) = Self::pointer_slot(pointer)
            .zip(bearing_source_key(pointer))
            .ok_or(HsiError::InvalidPointer(pointer))?;
        let bearing = &mut self.bearing[slot];
        let source = bearing.cycle();
        bearing.resolve(&self.telemetry, self.heading);
        self.settings.set(key, source.code());
        event!("Bearing pointer {pointer} source -> {source:?}");
        Ok(source)
    }

    /// Swaps the DME window between NAV1 and NAV2 and persists the choice.
    pub fn cycle_dme_source(&mut self) -> NavRadio {
        let source = self.dme.cycle();
        self.dme.resolve(&self.telemetry);
        self.settings.set(DME_SOURCE_KEY, i64::from(source.index()));
        event!("DME source -> {source}");
        source
    }

    /// Shows or hides the DME window and persists the flag.
    pub fn toggle_dme_display(&mut self) -> bool {
        let display = !self.dme.display();
        self.dme.set_display(display);
        self.settings.set_bool(SHOW_DME_KEY, display);
        display
    }

    /// Pushes the persisted selections to the settings store's backing storage.
    ///
    /// # Errors
    /// - `HsiError::Settings` if the store could not write them.
    pub fn flush_settings(&self) -> Result<(), HsiError> {
        self.settings.flush()?;
        Ok(())
    }

    /// Copies the published state for a renderer.
    pub fn snapshot(&self) -> HsiSnapshot {
        HsiSnapshot {
            heading: self.heading,
            heading_bug: self.heading_bug,
            track: self.track,
            turn_rate: self.turn_rate,
            flight_phase: self.flight_phase,
            cdi: self.cdi.clone(),
            bearing: self.bearing.clone(),
            dme: self.dme.clone(),
        }
    }

    fn pointer_slot(pointer: u8) -> Option<usize> {
        match pointer {
            1 | 2 => Some(usize::from(pointer - 1)),
            _ => None,
        }
    }
}

fn finite_angle(deg: f64) -> Option<f64> { deg.is_finite().then(|| wrap_360(deg)) }
