//! Integration tests for the MonitorService sample → classify → report
//! → uplink pipeline.
//!
//! These run on the host (x86_64) and drive full cycles through mock
//! sensors, a recording delay, a recording transport and a recording
//! event sink.

use super::mock_hw::{FlakyTransport, RecordingDelay, RecordingSink, RecordingTransport, ScriptedSensors};

use aquasense::app::classifier::QualityClass;
use aquasense::app::events::AppEvent;
use aquasense::app::service::MonitorService;
use aquasense::config::SystemConfig;

/// Raw counts for pH 7.00 with the default calibration.
const PH7_RAW: u16 = 3122;
/// One count short of clear water; mixed 9:1 with [`TURB_LOW_RAW`] the
/// window averages to 2.00 NTU.
const TURB_HIGH_RAW: u16 = 3466;
const TURB_LOW_RAW: u16 = 3465;

fn clean_water() -> ScriptedSensors {
    let mut hw = ScriptedSensors::constant(PH7_RAW, TURB_LOW_RAW, 22.0);
    hw.queue_turbidity(&[TURB_HIGH_RAW; 9]).queue_turbidity(&[TURB_LOW_RAW]);
    hw
}

fn make_service() -> (MonitorService, RecordingDelay, RecordingSink) {
    let mut svc = MonitorService::new(SystemConfig::default());
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    sink.clear();
    (svc, RecordingDelay::default(), sink)
}

// ── End to end ────────────────────────────────────────────────

#[test]
fn clean_water_cycle_reports_good_and_uplinks_line() {
    let (mut svc, mut delay, mut sink) = make_service();
    let mut hw = clean_water();
    let mut uplink = RecordingTransport::new();

    let report = svc.run_cycle(&mut hw, &mut delay, &mut uplink, &mut sink);

    assert_eq!(report.class, QualityClass::Good);
    assert_eq!(report.score, 1.0);
    assert!((report.ph - 7.0).abs() < 0.005, "ph {}", report.ph);
    assert!((report.turbidity - 2.0).abs() < 0.005, "turbidity {}", report.turbidity);
    assert_eq!(report.temperature_c, 22.0);
    assert!((report.conductivity - 714.0).abs() < 0.1, "conductivity {}", report.conductivity);

    assert_eq!(
        uplink.lines(),
        vec!["/update?ph=7.00&turbidity=2.00&temperature=22.00&status=GOOD\n".to_owned()]
    );
    assert_eq!(uplink.flushes, 1);

    // One report, no alerts, no uplink failures.
    assert_eq!(sink.events.len(), 1);
    assert!(matches!(sink.events[0], AppEvent::Report(r) if r == report));
}

#[test]
fn cycle_samples_ten_times_per_channel_with_gaps() {
    let (mut svc, mut delay, mut sink) = make_service();
    let mut hw = clean_water();

    svc.run_cycle(&mut hw, &mut delay, &mut RecordingTransport::new(), &mut sink);

    assert_eq!(hw.raw_reads, 20);
    assert_eq!(hw.temperature_reads, 1);
    assert_eq!(delay.delays_ns.len(), 18);
    assert!(delay.delays_ns.iter().all(|&ns| ns == 100_000_000));
    assert_eq!(delay.total_ms(), 1800);
}

#[test]
fn configured_cadence_is_honoured() {
    let config = SystemConfig {
        num_samples: 4,
        sample_delay_ms: 250,
        ..SystemConfig::default()
    };
    let mut svc = MonitorService::new(config);
    let mut hw = clean_water();
    let mut delay = RecordingDelay::default();

    svc.run_cycle(&mut hw, &mut delay, &mut RecordingTransport::new(), &mut RecordingSink::new());

    assert_eq!(hw.raw_reads, 8);
    assert_eq!(delay.delays_ns, vec![250_000_000; 6]);
}

// ── Classification & alerts ───────────────────────────────────

#[test]
fn polluted_water_raises_every_alert() {
    let (mut svc, mut delay, mut sink) = make_service();
    // pH ≈ 9.25, turbidity ≈ 120 NTU, 40 °C.
    let mut hw = ScriptedSensors::constant(2632, 2953, 40.0);
    let mut uplink = RecordingTransport::new();

    let report = svc.run_cycle(&mut hw, &mut delay, &mut uplink, &mut sink);

    assert_eq!(report.class, QualityClass::Poor);
    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 4, "{alerts:?}");
    assert_eq!(alerts[0], "ALERT: pH out of safe range (9.25)");
    assert!(alerts[1].starts_with("ALERT: high turbidity (120."), "{}", alerts[1]);
    assert_eq!(alerts[2], "ALERT: abnormal water temperature (40.00 C)");
    assert_eq!(alerts[3], "ALERT: poor water quality detected");

    // Report precedes alerts.
    assert!(matches!(sink.events[0], AppEvent::Report(_)));
    assert!(uplink.lines()[0].ends_with("&status=POOR\n"));
}

#[test]
fn murky_water_is_moderate_without_poor_alert() {
    let (mut svc, mut delay, mut sink) = make_service();
    // pH 7.00, turbidity ≈ 60 NTU, 22 °C → 10 + 35 + 15 + 5 = 65 points.
    let mut hw = ScriptedSensors::constant(PH7_RAW, 3214, 22.0);

    let report = svc.run_cycle(&mut hw, &mut delay, &mut RecordingTransport::new(), &mut sink);

    assert_eq!(report.class, QualityClass::Moderate);
    assert!((report.score - 0.65).abs() < 1e-6);
    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("ALERT: high turbidity"));

    let state = svc.last_cycle().expect("state after a cycle");
    assert_eq!(state.breakdown.points(), 65);
}

#[test]
fn faulted_temperature_probe_uses_default() {
    let (mut svc, mut delay, mut sink) = make_service();
    let mut hw = clean_water();
    hw.queue_temperature(&[-127.0]);
    let mut uplink = RecordingTransport::new();

    let report = svc.run_cycle(&mut hw, &mut delay, &mut uplink, &mut sink);

    assert_eq!(report.temperature_c, 25.0);
    assert_eq!(report.class, QualityClass::Good);
    assert!(svc.last_cycle().is_some_and(|s| s.temperature_fallback));
    assert!(sink.alerts().is_empty());
    assert!(uplink.lines()[0].contains("temperature=25.00"));
}

// ── Uplink resilience ─────────────────────────────────────────

#[test]
fn uplink_failures_are_counted_and_reset_on_recovery() {
    let (mut svc, mut delay, mut sink) = make_service();
    let mut hw = ScriptedSensors::constant(PH7_RAW, TURB_HIGH_RAW, 22.0);
    let mut uplink = FlakyTransport::down();

    for _ in 0..3 {
        svc.run_cycle(&mut hw, &mut delay, &mut uplink, &mut sink);
    }
    assert_eq!(svc.uplink_failures(), 3);
    assert_eq!(sink.uplink_failures(), vec![1, 2, 3]);
    assert_eq!(sink.reports(), 3, "failed uplinks must not drop reports");

    uplink.down = false;
    svc.run_cycle(&mut hw, &mut delay, &mut uplink, &mut sink);

    assert_eq!(svc.uplink_failures(), 0);
    assert_eq!(svc.cycle_count(), 4);
    assert_eq!(uplink.inner.lines().len(), 1);
    assert_eq!(sink.uplink_failures().len(), 3);
}

#[test]
fn short_writes_still_deliver_whole_line() {
    let (mut svc, mut delay, mut sink) = make_service();
    let mut hw = clean_water();
    let mut uplink = RecordingTransport::with_chunk(7);

    svc.run_cycle(&mut hw, &mut delay, &mut uplink, &mut sink);

    assert_eq!(
        String::from_utf8(uplink.sent.clone()).unwrap(),
        "/update?ph=7.00&turbidity=2.00&temperature=22.00&status=GOOD\n"
    );
    assert_eq!(uplink.flushes, 1);
    assert_eq!(svc.uplink_failures(), 0);
}

#[test]
fn custom_uplink_path_is_used() {
    let mut config = SystemConfig::default();
    config.uplink_path.clear();
    config.uplink_path.push_str("/api/v1/wq").unwrap();
    let mut svc = MonitorService::new(config);
    let mut uplink = RecordingTransport::new();

    svc.run_cycle(
        &mut clean_water(),
        &mut RecordingDelay::default(),
        &mut uplink,
        &mut RecordingSink::new(),
    );

    assert!(uplink.lines()[0].starts_with("/api/v1/wq?ph="));
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn start_emits_started_event() {
    let mut svc = MonitorService::new(SystemConfig::default());
    let mut sink = RecordingSink::new();
    svc.start(&mut sink);
    assert!(matches!(sink.events.as_slice(), [AppEvent::Started]));
    assert_eq!(svc.cycle_count(), 0);
}
