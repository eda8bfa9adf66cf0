use super::{
    BearingSource, CdiSource, FlightPhase, HsiModel, NO_DATA,
    common::{Clock, angle_arithmetics::angle_delta},
    flight_phase::normalized_cross_track,
};
use crate::{
    error::{HsiError, SettingsError},
    settings::{
        BRG1_SOURCE_KEY, BRG2_SOURCE_KEY, DME_SOURCE_KEY, FileStore, MemoryStore, SHOW_DME_KEY,
    },
    telemetry::{NavRadio, Telemetry, ToFrom},
};
use rand::Rng;
use std::{cell::Cell, rc::Rc};
use strum::IntoEnumIterator;

const TOL: f64 = 1e-9;

/// Clock advanced by hand. Clones share the same time.
#[derive(Clone, Default)]
struct ManualClock(Rc<Cell<f64>>);

impl ManualClock {
    fn advance(&self, dt: f64) { self.0.set(self.0.get() + dt); }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 { self.0.get() }
}

#[derive(Clone, Default)]
struct MockReceiver {
    has_nav: bool,
    has_localizer: bool,
    localizer_course: f64,
    obs: f64,
    deflection: f64,
    to_from: i64,
    has_dme: bool,
    dme_distance: f64,
    ident: String,
    frequency: f64,
    radial: f64,
}

#[derive(Clone, Default)]
struct MockTelemetry {
    heading: f64,
    heading_bug: f64,
    track: f64,
    turn_rate: f64,
    rx: [MockReceiver; 2],
    gps_drives_nav1: bool,
    ap_nav_selected: i64,
    next_waypoint: String,
    desired_track: f64,
    cross_track_nm: f64,
    phase_code: i64,
    waypoint_distance: f64,
    waypoint_bearing: f64,
    adf_signal: bool,
    adf_radial: f64,
    adf_frequency: f64,
    coupling_toggles: u32,
    ap_nav_writes: Vec<u8>,
}

impl MockTelemetry {
    fn rx_mut(&mut self, radio: NavRadio) -> &mut MockReceiver {
        &mut self.rx[usize::from(radio.index() - 1)]
    }
}

impl Telemetry for MockTelemetry {
    fn heading(&self) -> f64 { self.heading }
    fn heading_bug(&self) -> f64 { self.heading_bug }
    fn ground_track(&self) -> f64 { self.track }
    fn turn_rate(&self) -> f64 { self.turn_rate }
    fn has_nav(&self, radio: NavRadio) -> bool { self.rx[usize::from(radio.index() - 1)].has_nav }
    fn has_localizer(&self, radio: NavRadio) -> bool {
        self.rx[usize::from(radio.index() - 1)].has_localizer
    }
    fn localizer_course(&self, radio: NavRadio) -> f64 {
        self.rx[usize::from(radio.index() - 1)].localizer_course
    }
    fn obs_course(&self, radio: NavRadio) -> f64 { self.rx[usize::from(radio.index() - 1)].obs }
    fn cdi_deflection(&self, radio: NavRadio) -> f64 {
        self.rx[usize::from(radio.index() - 1)].deflection
    }
    fn to_from_code(&self, radio: NavRadio) -> i64 { self.rx[usize::from(radio.index() - 1)].to_from }
    fn has_dme(&self, radio: NavRadio) -> bool { self.rx[usize::from(radio.index() - 1)].has_dme }
    fn dme_distance(&self, radio: NavRadio) -> f64 {
        self.rx[usize::from(radio.index() - 1)].dme_distance
    }
    fn station_ident(&self, radio: NavRadio) -> String {
        self.rx[usize::from(radio.index() - 1)].ident.clone()
    }
    fn active_frequency(&self, radio: NavRadio) -> f64 {
        self.rx[usize::from(radio.index() - 1)].frequency
    }
    fn radial(&self, radio: NavRadio) -> f64 { self.rx[usize::from(radio.index() - 1)].radial }
    fn gps_drives_nav1(&self) -> bool { self.gps_drives_nav1 }
    fn ap_nav_selected(&self) -> i64 { self.ap_nav_selected }
    fn next_waypoint_ident(&self) -> String { self.next_waypoint.clone() }
    fn desired_track(&self) -> f64 { self.desired_track }
    fn cross_track_nm(&self) -> f64 { self.cross_track_nm }
    fn flight_phase_code(&self) -> i64 { self.phase_code }
    fn waypoint_distance(&self) -> f64 { self.waypoint_distance }
    fn waypoint_bearing(&self) -> f64 { self.waypoint_bearing }
    fn adf_has_signal(&self) -> bool { self.adf_signal }
    fn adf_radial(&self) -> f64 { self.adf_radial }
    fn adf_frequency(&self) -> f64 { self.adf_frequency }

    fn toggle_gps_drives_nav1(&mut self) {
        self.gps_drives_nav1 = !self.gps_drives_nav1;
        self.coupling_toggles += 1;
    }

    fn set_ap_nav_source(&mut self, index: u8) {
        self.ap_nav_selected = i64::from(index);
        self.ap_nav_writes.push(index);
    }
}

type TestModel = HsiModel<MockTelemetry, MemoryStore, ManualClock>;

fn vor_telemetry() -> MockTelemetry {
    let mut t = MockTelemetry { ap_nav_selected: 1, heading: 90.0, ..MockTelemetry::default() };
    *t.rx_mut(NavRadio::Nav1) = MockReceiver {
        has_nav: true,
        obs: 120.0,
        deflection: 63.5,
        to_from: 1,
        has_dme: true,
        dme_distance: 12.5,
        ident: String::from("SFO"),
        frequency: 115.8,
        radial: 300.0,
        ..MockReceiver::default()
    };
    t
}

fn build(telemetry: MockTelemetry, store: MemoryStore) -> (TestModel, ManualClock) {
    let clock = ManualClock::default();
    (HsiModel::with_clock(telemetry, store, clock.clone()), clock)
}

fn step(model: &mut TestModel, clock: &ManualClock, dt: f64) {
    clock.advance(dt);
    model.update();
}

#[test]
fn test_update_reads_clock_delta() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::new());
    clock.advance(0.25);
    assert!((model.update() - 0.25).abs() < TOL);
    assert!(model.update().abs() < TOL);
    assert_eq!(model.ticks(), 2);
}

#[test]
fn test_vor_source_selection() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::new());
    step(&mut model, &clock, 0.1);
    let cdi = model.cdi();
    assert_eq!(cdi.source_id(), CdiSource::Nav1);
    assert_eq!(cdi.source_label(), "VOR1");
    assert!(cdi.display_deviation());
    assert_eq!(cdi.to_from(), ToFrom::To);
    assert!((cdi.raw_bearing() - 120.0).abs() < TOL);
    assert!((cdi.raw_cross_track() - 0.5).abs() < TOL);
    assert_eq!(cdi.cross_track_nm(), None);
}

#[test]
fn test_localizer_source_selection() {
    let mut t = vor_telemetry();
    t.ap_nav_selected = 2;
    *t.rx_mut(NavRadio::Nav2) = MockReceiver {
        has_nav: false,
        has_localizer: true,
        localizer_course: 284.0,
        obs: 10.0,
        deflection: -254.0,
        to_from: 2,
        ..MockReceiver::default()
    };
    let (mut model, clock) = build(t, MemoryStore::new());
    step(&mut model, &clock, 0.1);
    let cdi = model.cdi();
    assert_eq!(cdi.source_id(), CdiSource::Nav2);
    assert_eq!(cdi.source_label(), "LOC2");
    assert!(!cdi.display_deviation());
    assert_eq!(cdi.to_from(), ToFrom::From);
    assert!((cdi.raw_bearing() - 284.0).abs() < TOL);
    assert!((cdi.raw_cross_track() + 2.0).abs() < TOL);
    assert!((cdi.goal_cross_track() + 1.0).abs() < TOL);
}

#[test]
fn test_ap_nav_index_out_of_range_is_clamped() {
    assert_eq!(CdiSource::from_telemetry(false, 7), CdiSource::Nav2);
    assert_eq!(CdiSource::from_telemetry(false, -3), CdiSource::None);
    assert_eq!(CdiSource::from_telemetry(false, 0), CdiSource::None);
    assert_eq!(CdiSource::from_telemetry(true, 1), CdiSource::AreaNav);
}

#[test]
fn test_area_nav_selection_and_phase_scale() {
    let mut t = vor_telemetry();
    t.gps_drives_nav1 = true;
    t.next_waypoint = String::from("BRIXX");
    t.desired_track = 95.0;
    t.cross_track_nm = 0.15;
    t.phase_code = 1;
    let (mut model, clock) = build(t, MemoryStore::new());
    step(&mut model, &clock, 0.1);
    let cdi = model.cdi();
    assert_eq!(cdi.source_id(), CdiSource::AreaNav);
    assert_eq!(cdi.source_label(), "FMS");
    assert!(cdi.display_deviation());
    assert_eq!(cdi.to_from(), ToFrom::To);
    assert!((cdi.full_scale_nm() - 0.3).abs() < TOL);
    assert!((cdi.goal_cross_track() - 0.5).abs() < TOL);
    assert_eq!(cdi.cross_track_nm(), Some(0.15));
    assert_eq!(model.flight_phase(), FlightPhase::Departure);

    model.telemetry_mut().next_waypoint.clear();
    model.telemetry_mut().cross_track_nm = 5.0;
    model.telemetry_mut().phase_code = 99;
    step(&mut model, &clock, 0.1);
    let cdi = model.cdi();
    assert!(!cdi.display_deviation());
    assert!((cdi.full_scale_nm() - 2.0).abs() < TOL);
    assert!((cdi.raw_cross_track() - 2.5).abs() < TOL);
    assert!((cdi.goal_cross_track() - 1.0).abs() < TOL);
    assert_eq!(model.flight_phase(), FlightPhase::Enroute);
}

#[test]
fn test_flight_phase_scales() {
    assert!((FlightPhase::from(1).full_scale_nm() - 0.3).abs() < TOL);
    assert!((FlightPhase::from(2).full_scale_nm() - 1.0).abs() < TOL);
    assert!((FlightPhase::from(3).full_scale_nm() - 2.0).abs() < TOL);
    assert!((FlightPhase::from(4).full_scale_nm() - 4.0).abs() < TOL);
    assert!((FlightPhase::from(0).full_scale_nm() - 2.0).abs() < TOL);
    assert!((FlightPhase::from(-12).full_scale_nm() - 2.0).abs() < TOL);
    let labels: Vec<String> = FlightPhase::iter().map(|p| p.to_string()).collect();
    assert_eq!(labels, ["DPRT", "TERM", "ENR", "OCN"]);
    assert!(normalized_cross_track(f64::NAN, FlightPhase::Terminal).abs() < TOL);
}

#[test]
fn test_cross_track_always_clamped() {
    let mut rng = rand::rng();
    let mut t = vor_telemetry();
    t.gps_drives_nav1 = true;
    let (mut model, clock) = build(t, MemoryStore::new());
    for _ in 0..2000 {
        model.telemetry_mut().cross_track_nm = rng.random_range(-100.0..100.0);
        model.telemetry_mut().phase_code = rng.random_range(0..6);
        step(&mut model, &clock, rng.random_range(0.0..3.0));
        let xtk = model.cdi().smoothed_cross_track();
        assert!((-1.0..=1.0).contains(&xtk), "cross track out of range: {xtk}");
    }
}

#[test]
fn test_model_smoothing_frame_rate_independent() {
    let (mut slow, slow_clock) = build(vor_telemetry(), MemoryStore::new());
    let (mut fast, fast_clock) = build(vor_telemetry(), MemoryStore::new());
    step(&mut slow, &slow_clock, 1.0);
    for _ in 0..10 {
        step(&mut fast, &fast_clock, 0.1);
    }
    let (a, b) = (slow.cdi(), fast.cdi());
    assert!((a.smoothed_cross_track() - b.smoothed_cross_track()).abs() < 1e-9);
    assert!(angle_delta(a.smoothed_bearing(), b.smoothed_bearing()).abs() < 1e-6);
    assert!(a.smoothed_cross_track() > 0.0 && a.smoothed_cross_track() < 0.5);
}

#[test]
fn test_zero_dt_tick_keeps_needle() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::new());
    step(&mut model, &clock, 0.2);
    let before = model.cdi().smoothed_cross_track();
    step(&mut model, &clock, 0.0);
    assert!((model.cdi().smoothed_cross_track() - before).abs() < TOL);
    assert!(model.cdi().smoothed_cross_track().is_finite());
}

#[test]
fn test_course_pointer_wraps_short_way() {
    let mut t = vor_telemetry();
    t.rx_mut(NavRadio::Nav1).obs = 350.0;
    let (mut model, clock) = build(t, MemoryStore::new());
    step(&mut model, &clock, 10.0);
    assert!(angle_delta(model.cdi().smoothed_bearing(), 350.0).abs() < 1e-6);
    model.telemetry_mut().rx_mut(NavRadio::Nav1).obs = 10.0;
    step(&mut model, &clock, 0.1);
    let brg = model.cdi().smoothed_bearing();
    assert!(brg < 10.0 || brg > 350.0, "course pointer went the long way: {brg}");
}

#[test]
fn test_turn_rate_filter_is_per_tick() {
    let mut t = vor_telemetry();
    t.turn_rate = 10.0;
    let (mut model, clock) = build(t, MemoryStore::new());
    step(&mut model, &clock, 0.01);
    assert!((model.turn_rate() - 2.0).abs() < TOL);
    step(&mut model, &clock, 5.0);
    assert!((model.turn_rate() - 3.6).abs() < TOL);
}

#[test]
fn test_heading_and_track_wrap() {
    let mut t = vor_telemetry();
    t.heading = 370.0;
    t.track = -5.0;
    t.heading_bug = 720.0;
    let (mut model, clock) = build(t, MemoryStore::new());
    step(&mut model, &clock, 0.1);
    assert!((model.heading() - 10.0).abs() < TOL);
    assert!((model.track() - 355.0).abs() < TOL);
    assert!(model.heading_bug().abs() < TOL);
}

#[test]
fn test_cycle_cdi_skips_dead_nav2() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::new());
    step(&mut model, &clock, 0.1);
    assert_eq!(model.cdi().source_id(), CdiSource::Nav1);

    assert_eq!(model.cycle_cdi_source(), CdiSource::AreaNav);
    assert_eq!(model.telemetry().coupling_toggles, 1);
    assert!(model.telemetry().gps_drives_nav1);
    assert!(model.telemetry().ap_nav_writes.is_empty());

    step(&mut model, &clock, 0.1);
    assert_eq!(model.cdi().source_id(), CdiSource::AreaNav);
    assert_eq!(model.cycle_cdi_source(), CdiSource::Nav1);
    assert_eq!(model.telemetry().coupling_toggles, 2);
    assert!(!model.telemetry().gps_drives_nav1);
    assert_eq!(model.telemetry().ap_nav_writes, [1]);
}

#[test]
fn test_cycle_cdi_through_live_nav2() {
    let mut t = vor_telemetry();
    t.rx_mut(NavRadio::Nav2).has_nav = true;
    let (mut model, clock) = build(t, MemoryStore::new());
    step(&mut model, &clock, 0.1);
    assert_eq!(model.cycle_cdi_source(), CdiSource::Nav2);
    assert_eq!(model.telemetry().coupling_toggles, 0);
    assert_eq!(model.telemetry().ap_nav_writes, [2]);
    step(&mut model, &clock, 0.1);
    assert_eq!(model.cdi().source_id(), CdiSource::Nav2);
    assert_eq!(model.cdi().source_label(), "VOR2");
    assert_eq!(model.cycle_cdi_source(), CdiSource::AreaNav);
    assert_eq!(model.telemetry().coupling_toggles, 1);
}

#[test]
fn test_cycle_cdi_before_first_tick_starts_at_nav1() {
    let mut t = vor_telemetry();
    t.gps_drives_nav1 = true;
    let (mut model, _clock) = build(t, MemoryStore::new());
    assert_eq!(model.cdi().source_id(), CdiSource::None);
    assert_eq!(model.cycle_cdi_source(), CdiSource::Nav1);
    assert!(!model.telemetry().gps_drives_nav1);
    assert_eq!(model.telemetry().ap_nav_writes, [1]);
}

#[test]
fn test_bearing_pointer_cycle_length_five() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::new());
    step(&mut model, &clock, 0.1);
    let start = model.bearing_pointers()[0].source_id();
    let visited: Vec<BearingSource> =
        (0..5).map(|_| model.cycle_bearing_source(1)).collect::<Result<_, _>>().unwrap();
    assert_eq!(
        visited,
        [
            BearingSource::Nav1,
            BearingSource::Nav2,
            BearingSource::AreaNav,
            BearingSource::Adf,
            BearingSource::Off
        ]
    );
    assert_eq!(model.bearing_pointers()[0].source_id(), start);
    assert_eq!(model.settings().writes_to(BRG1_SOURCE_KEY), [1, 2, 3, 4, 0]);
    assert!(model.settings().writes_to(BRG2_SOURCE_KEY).is_empty());
    assert_eq!(model.bearing_pointers()[1].source_id(), BearingSource::Off);
}

#[test]
fn test_bearing_pointer_display_flag() {
    let (mut model, _clock) = build(vor_telemetry(), MemoryStore::new());
    assert!(!model.bearing_pointer(2).is_some_and(|b| b.display()));
    model.cycle_bearing_source(2).unwrap();
    let brg = model.bearing_pointer(2).unwrap();
    assert!(brg.display());
    assert_eq!(brg.label(), "NAV1");
}

#[test]
fn test_invalid_pointer_index() {
    let (mut model, _clock) = build(vor_telemetry(), MemoryStore::new());
    assert!(matches!(model.cycle_bearing_source(0), Err(HsiError::InvalidPointer(0))));
    assert!(matches!(model.cycle_bearing_source(3), Err(HsiError::InvalidPointer(3))));
    assert!(model.bearing_pointer(3).is_none());
    assert!(model.settings().writes_to(BRG1_SOURCE_KEY).is_empty());
    assert!(model.settings().writes_to(BRG2_SOURCE_KEY).is_empty());
}

#[test]
fn test_flush_settings_surfaces_store_errors() {
    let (model, _clock) = build(vor_telemetry(), MemoryStore::new());
    assert!(model.flush_settings().is_ok());

    let path = std::env::temp_dir()
        .join(format!("hsi_no_such_dir_{}", std::process::id()))
        .join("settings.bin");
    let store = FileStore::open(&path).unwrap();
    let mut model = HsiModel::with_clock(vor_telemetry(), store, ManualClock::default());
    model.cycle_bearing_source(1).unwrap();
    assert_eq!(model.bearing_pointers()[0].source_id(), BearingSource::Nav1);
    assert!(matches!(
        model.flush_settings(),
        Err(HsiError::Settings(SettingsError::Io(_)))
    ));
}

#[test]
fn test_pointer_sources_restored_independently() {
    let store = MemoryStore::with_entries([(BRG1_SOURCE_KEY, 4), (BRG2_SOURCE_KEY, 2)]);
    let (model, _clock) = build(vor_telemetry(), store);
    assert_eq!(model.bearing_pointers()[0].source_id(), BearingSource::Adf);
    assert_eq!(model.bearing_pointers()[1].source_id(), BearingSource::Nav2);

    let store = MemoryStore::with_entries([(BRG1_SOURCE_KEY, 9), (BRG2_SOURCE_KEY, -3)]);
    let (model, _clock) = build(vor_telemetry(), store);
    assert_eq!(model.bearing_pointers()[0].source_id(), BearingSource::Adf);
    assert_eq!(model.bearing_pointers()[1].source_id(), BearingSource::Off);
}

#[test]
fn test_nav_pointer_resolution() {
    let store = MemoryStore::with_entries([(BRG1_SOURCE_KEY, 1), (BRG2_SOURCE_KEY, 2)]);
    let (mut model, clock) = build(vor_telemetry(), store);
    step(&mut model, &clock, 0.1);
    let brg1 = &model.bearing_pointers()[0];
    assert_eq!(brg1.identifier(), "SFO");
    assert_eq!(brg1.distance_nm(), Some(12.5));
    assert!((brg1.bearing().unwrap() - 120.0).abs() < TOL);
    let brg2 = &model.bearing_pointers()[1];
    assert_eq!(brg2.identifier(), NO_DATA);
    assert_eq!(brg2.distance_nm(), None);
    assert_eq!(brg2.bearing(), None);

    model.telemetry_mut().rx_mut(NavRadio::Nav1).has_dme = false;
    step(&mut model, &clock, 0.1);
    assert_eq!(model.bearing_pointers()[0].distance_nm(), None);
    assert!(model.bearing_pointers()[0].bearing().is_some());
}

#[test]
fn test_area_nav_pointer_resolution() {
    let mut t = vor_telemetry();
    t.next_waypoint = String::from("KLAX");
    t.waypoint_distance = 33.2;
    t.waypoint_bearing = 187.0;
    let (mut model, clock) = build(t, MemoryStore::with_entries([(BRG1_SOURCE_KEY, 3)]));
    step(&mut model, &clock, 0.1);
    let brg = &model.bearing_pointers()[0];
    assert_eq!(brg.label(), "GPS");
    assert_eq!(brg.identifier(), "KLAX");
    assert_eq!(brg.distance_nm(), Some(33.2));
    assert_eq!(brg.bearing(), Some(187.0));
}

#[test]
fn test_adf_bearing_adds_heading() {
    let mut t = vor_telemetry();
    t.heading = 270.0;
    t.adf_signal = true;
    t.adf_radial = 90.0;
    t.adf_frequency = 362.0;
    let (mut model, clock) = build(t, MemoryStore::with_entries([(BRG2_SOURCE_KEY, 4)]));
    step(&mut model, &clock, 0.1);
    let brg = &model.bearing_pointers()[1];
    assert_eq!(brg.label(), "ADF");
    assert_eq!(brg.identifier(), "362.0");
    assert!(brg.bearing().unwrap().abs() < TOL);
    assert_eq!(brg.distance_nm(), None);

    model.telemetry_mut().adf_signal = false;
    step(&mut model, &clock, 0.1);
    let brg = &model.bearing_pointers()[1];
    assert_eq!(brg.identifier(), NO_DATA);
    assert_eq!(brg.bearing(), None);
}

#[test]
fn test_off_pointer_is_cleared() {
    let store = MemoryStore::with_entries([(BRG1_SOURCE_KEY, 4)]);
    let (mut model, clock) = build(vor_telemetry(), store);
    step(&mut model, &clock, 0.1);
    assert_eq!(model.cycle_bearing_source(1).unwrap(), BearingSource::Off);
    let brg = &model.bearing_pointers()[0];
    assert!(!brg.display());
    assert_eq!(brg.identifier(), "");
    assert_eq!(brg.label(), "");
    assert_eq!(brg.bearing(), None);
}

#[test]
fn test_dme_self_heals_missing_source() {
    let (model, _clock) = build(vor_telemetry(), MemoryStore::new());
    assert_eq!(model.dme().source_id(), NavRadio::Nav1);
    assert_eq!(model.settings().writes_to(DME_SOURCE_KEY), [1]);

    let (model, _clock) = build(vor_telemetry(), MemoryStore::with_entries([(DME_SOURCE_KEY, 7)]));
    assert_eq!(model.dme().source_id(), NavRadio::Nav1);
    assert_eq!(model.settings().value(DME_SOURCE_KEY), Some(1));

    let (model, _clock) = build(vor_telemetry(), MemoryStore::with_entries([(DME_SOURCE_KEY, 2)]));
    assert_eq!(model.dme().source_id(), NavRadio::Nav2);
    assert!(model.settings().writes().is_empty());
}

#[test]
fn test_dme_cycle_and_resolution() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::with_entries([(DME_SOURCE_KEY, 1)]));
    step(&mut model, &clock, 0.1);
    assert_eq!(model.dme().label(), "NAV1");
    assert_eq!(model.dme().identifier(), "115.80");
    assert_eq!(model.dme().distance_nm(), Some(12.5));

    assert_eq!(model.cycle_dme_source(), NavRadio::Nav2);
    assert_eq!(model.dme().identifier(), "");
    assert_eq!(model.dme().distance_nm(), None);
    assert_eq!(model.cycle_dme_source(), NavRadio::Nav1);
    assert_eq!(model.settings().writes_to(DME_SOURCE_KEY), [2, 1]);
}

#[test]
fn test_dme_display_toggle_persists() {
    let (mut model, _clock) = build(vor_telemetry(), MemoryStore::with_entries([(SHOW_DME_KEY, 1)]));
    assert!(model.dme().display());
    assert!(!model.toggle_dme_display());
    assert!(model.toggle_dme_display());
    assert_eq!(model.settings().writes_to(SHOW_DME_KEY), [0, 1]);
}

#[test]
fn test_snapshot_tracks_changes() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::new());
    step(&mut model, &clock, 0.1);
    let first = model.snapshot();
    assert_eq!(first, model.snapshot());
    assert_eq!(first.cdi.source_label(), "VOR1");

    model.cycle_bearing_source(1).unwrap();
    let second = model.snapshot();
    assert_ne!(first.bearing[0], second.bearing[0]);
    assert_eq!(first.dme, second.dme);
}

#[test]
fn test_non_finite_readings_are_ignored() {
    let (mut model, clock) = build(vor_telemetry(), MemoryStore::with_entries([(BRG1_SOURCE_KEY, 1)]));
    step(&mut model, &clock, 0.5);
    let t = model.telemetry_mut();
    t.heading = f64::NAN;
    t.rx_mut(NavRadio::Nav1).deflection = f64::INFINITY;
    t.rx_mut(NavRadio::Nav1).obs = f64::NAN;
    t.rx_mut(NavRadio::Nav1).radial = f64::NAN;
    step(&mut model, &clock, 0.5);
    assert!((model.heading() - 90.0).abs() < TOL);
    assert!(model.cdi().smoothed_cross_track().is_finite());
    assert!(model.cdi().smoothed_bearing().is_finite());
    assert_eq!(model.bearing_pointers()[0].bearing(), None);
}
