//! Integration tests for the uplink encoder over the host serial adapter.

use aquasense::adapters::serial_uplink::SerialUplink;
use aquasense::app::classifier::QualityClass;
use aquasense::app::context::SensorReading;
use aquasense::uplink::{send_line, UplinkError, UplinkRequest};

#[test]
fn cycle_request_goes_out_over_serial() {
    let reading = SensorReading::new(6.2, 35.0, 18.5);
    let req = UplinkRequest::from_cycle(&reading, QualityClass::Moderate).unwrap();
    let line = req.encode("/update").unwrap();

    let mut serial = SerialUplink::new();
    send_line(&mut serial, &line).unwrap();

    assert_eq!(
        serial.sent(),
        b"/update?ph=6.20&turbidity=35.00&temperature=18.50&status=MODERATE\n"
    );
}

#[test]
fn extra_fields_append_after_standard_ones() {
    let reading = SensorReading::new(7.0, 2.0, 22.0);
    let mut req = UplinkRequest::from_cycle(&reading, QualityClass::Good).unwrap();
    req.insert("device", "aq-01").unwrap();
    req.insert_f32("ph", 7.1).unwrap();

    let line = req.encode("/update").unwrap();
    assert_eq!(
        line.as_str(),
        "/update?ph=7.10&turbidity=2.00&temperature=22.00&status=GOOD&device=aq-01\n"
    );
}

#[test]
fn unsafe_characters_are_rejected() {
    let mut req = UplinkRequest::new();
    assert_eq!(req.insert("bad key", "1"), Err(UplinkError::InvalidKey));
    assert_eq!(req.insert("note", "a&b=c"), Err(UplinkError::InvalidValue));
    assert!(req.is_empty());
}
