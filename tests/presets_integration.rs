//! Integration tests for built-in requests, TOML loading, and CSV export.

use std::fs;
use std::path::PathBuf;

use home_energy::config::RequestConfig;
use home_energy::io::export::{export_csv, write_csv};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("home-energy-{}-{name}", std::process::id()))
}

#[test]
fn every_preset_evaluates() {
    for name in RequestConfig::PRESETS {
        let cfg = RequestConfig::from_preset(name).unwrap();
        let report = cfg.evaluate();
        assert!(report.is_ok(), "preset \"{name}\" failed: {:?}", report.err());
    }
}

#[test]
fn presets_reproduce_reference_outcomes() {
    let spike = RequestConfig::price_spike().evaluate().unwrap();
    assert!(spike.energy_saving_mode);
    assert_eq!(spike.device_status.get("Light"), Some(false));

    let baseline = RequestConfig::baseline().evaluate().unwrap();
    assert!(!baseline.energy_saving_mode);
    assert_eq!(baseline.device_status.get("Light"), Some(true));

    let night = RequestConfig::night().evaluate().unwrap();
    assert_eq!(night.device_status.get("Light"), Some(false));
    assert_eq!(night.device_status.get("TV"), Some(false));
    assert_eq!(night.device_status.get("Security"), Some(true));
    assert_eq!(night.device_status.get("Refrigerator"), Some(true));

    let cold = RequestConfig::cold_snap().evaluate().unwrap();
    assert!(cold.temperature_regulation_active);
    assert_eq!(cold.device_status.get("Heating"), Some(true));
    assert_eq!(cold.device_status.get("Cooling"), Some(false));

    let over = RequestConfig::over_cap().evaluate().unwrap();
    assert!(over.total_energy_used < 120.0);
    assert_eq!(over.device_status.get("Security"), Some(true));

    let scheduled = RequestConfig::scheduled().evaluate().unwrap();
    assert!(scheduled.energy_saving_mode);
    assert_eq!(scheduled.device_status.get("Light"), Some(true));
}

#[test]
fn request_file_round_trips_through_engine() {
    let path = temp_path("request.toml");
    fs::write(
        &path,
        r#"
[market]
current_price = 180.0

[clock]
current_time = "2024-03-10T18:00:00"

[energy]
usage_limit = 20.0
used_today = 21.0

[devices]
Light = 2
Oven = 4
Refrigerator = 1

[[schedule]]
device = "Light"
time = "2024-03-10T18:00:00"
"#,
    )
    .unwrap();

    let cfg = RequestConfig::from_toml_file(&path).unwrap();
    fs::remove_file(&path).ok();
    assert!(cfg.validate().is_empty());

    let report = cfg.evaluate().unwrap();
    assert!(report.energy_saving_mode);
    // saving mode already turned Oven and Light off, nothing left to shed
    assert!(report.shed_devices.is_empty());
    assert_eq!(report.total_energy_used, 21.0);
    assert_eq!(report.device_status.get("Light"), Some(true));
    assert_eq!(report.device_status.get("Oven"), Some(false));
}

#[test]
fn missing_request_file_reports_path() {
    let err = RequestConfig::from_toml_file(&temp_path("missing.toml")).unwrap_err();
    assert_eq!(err.field, "request");
    assert!(err.message.contains("missing.toml"));
}

#[test]
fn csv_export_lists_every_device() {
    let report = RequestConfig::over_cap().evaluate().unwrap();
    let path = temp_path("report.csv");
    export_csv(&report, &path).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();

    let mut buf = Vec::new();
    write_csv(&report, &mut buf).unwrap();
    assert_eq!(written.as_bytes(), buf.as_slice());

    let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
    let rows: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();
    assert_eq!(rows.len(), report.device_status.len());
    let tv = rows.iter().find(|r| &r[0] == "TV").unwrap();
    assert_eq!(&tv[1], "false");
    assert_eq!(&tv[2], "true");
}
