use std::io::Write;
use std::path::PathBuf;

use kmv_converter::{
    Axis, ConversionError, ConverterConfig, CorrelationRow, CorrelationTable, KmvConverter,
    LoadError,
};
use proptest::prelude::*;
use tempfile::{tempdir, Builder};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/diode_sample.txt")
}

fn sample() -> KmvConverter {
    KmvConverter::from_path(sample_path()).expect("sample table should load")
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_loads_sample_table() {
    let converter = sample();
    let table = converter.table();

    // Header comment line is skipped.
    assert_eq!(table.len(), 78);
    assert_eq!(table.first(), Some(&CorrelationRow::new(1.23, 1.709417)));
    assert_eq!(table.last(), Some(&CorrelationRow::new(500.0, 0.198022)));
    assert_eq!(converter.kelvin_range(), (1.23, 500.0));
}

#[test]
fn test_missing_file_fails_to_load() {
    let dir = tempdir().unwrap();
    let err = KmvConverter::from_path(dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_file_without_rows_fails_to_load() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = Builder::new().suffix(".txt").tempfile()?;
    writeln!(file, "# K V dV/dT")?;
    writeln!(file, "only two 1.0")?;

    let err = KmvConverter::from_path(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Empty { .. }));
    assert!(err.to_string().contains("no usable rows"));
    Ok(())
}

#[test]
fn test_loads_csv_and_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    let csv_path = dir.path().join("table.csv");
    std::fs::write(
        &csv_path,
        "kelvin,millivolt,dvdt\n1.0,1.6,-0.1\n2.0,1.5,-0.1\n4.0,1.1,-0.2\n",
    )?;
    let json_path = dir.path().join("table.json");
    std::fs::write(
        &json_path,
        r#"[
            {"kelvin": 1.0, "millivolt": 1.6},
            {"kelvin": 2.0, "millivolt": 1.5},
            {"kelvin": 4.0, "millivolt": 1.1}
        ]"#,
    )?;

    let from_csv = KmvConverter::from_path(&csv_path)?;
    let from_json = KmvConverter::from_path(&json_path)?;
    assert_eq!(from_csv.table(), from_json.table());

    let mv = from_csv.kelvin_to_millivolt(3.0)?.unwrap();
    assert!(close(mv, 1.3 / 1000.0));
    Ok(())
}

// ============================================================================
// Conversions against the sample table
// ============================================================================

#[test]
fn test_exact_rows_both_directions() {
    let converter = sample();
    let rows = converter.table().rows().to_vec();

    for row in rows {
        assert_eq!(
            converter.kelvin_to_millivolt(row.kelvin),
            Ok(Some(row.millivolt / 1000.0)),
            "kelvin {}",
            row.kelvin
        );
        assert_eq!(
            converter.millivolt_to_kelvin(row.millivolt * 1000.0),
            Ok(Some(row.kelvin)),
            "voltage {}",
            row.millivolt
        );
    }
}

#[test]
fn test_boundaries_return_stored_values() {
    let converter = sample();
    assert_eq!(converter.kelvin_to_millivolt(1.23), Ok(Some(1.709417 / 1000.0)));
    assert_eq!(converter.kelvin_to_millivolt(500.0), Ok(Some(0.198022 / 1000.0)));
    assert_eq!(converter.millivolt_to_kelvin(1709.417), Ok(Some(1.23)));
    assert_eq!(converter.millivolt_to_kelvin(198.022), Ok(Some(500.0)));
}

#[test]
fn test_interpolates_between_bracketing_rows() {
    let converter = sample();

    // 2.0 K lies between the 1.40 K and 2.1 K rows.
    let mv = converter.kelvin_to_millivolt(2.0).unwrap().unwrap();
    assert!(mv < 1.707960 / 1000.0);
    assert!(mv > 1.701973 / 1000.0);

    // 1690 mV lies between the 3.5 K and 4 K rows.
    let k = converter.millivolt_to_kelvin(1690.0).unwrap().unwrap();
    assert!(k > 3.5 && k < 4.0);
}

#[test]
fn test_rejects_values_outside_table() {
    let converter = sample();
    for k in [0.0, 1.229, 500.001, 505.13, -4.0, f64::INFINITY] {
        assert_eq!(converter.kelvin_to_millivolt(k), Ok(None), "kelvin {k}");
    }
    for mv in [85.023, 100.0, 198.0, 1709.5, 1725.0, f64::NAN] {
        assert_eq!(converter.millivolt_to_kelvin(mv), Ok(None), "millivolts {mv}");
    }
}

#[test]
fn test_rejects_values_just_past_the_ends() {
    let converter = sample();
    for k in [1.2299999385, 1.23 * (1.0 - 1e-12), 500.000025, 500.0 * (1.0 + 1e-12)] {
        assert_eq!(converter.kelvin_to_millivolt(k), Ok(None), "kelvin {k}");
    }
    for mv in [1709.4170855, 198.0219901] {
        assert_eq!(converter.millivolt_to_kelvin(mv), Ok(None), "millivolts {mv}");
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ConverterConfig {
        voltage_scale: 0.0,
        ..ConverterConfig::default()
    };
    let err = KmvConverter::with_config(sample_path(), &config).unwrap_err();
    assert!(matches!(err, LoadError::Config(_)));
    assert!(err.to_string().contains("voltage_scale"));
}

#[test]
fn test_demonstration_set() {
    let converter = sample();

    let kelvin = [1.23, 1.34, 1.40, 2.1, 3.5, 4.0125, 40.125, 401.25, 505.13, 99.1];
    let defined: Vec<bool> = kelvin
        .iter()
        .map(|&k| converter.kelvin_to_millivolt(k).unwrap().is_some())
        .collect();
    assert_eq!(
        defined,
        [true, true, true, true, true, true, true, true, false, true]
    );

    let millivolts = [85.023, 628.302, 892.35, 1725.0, 1600.2, 1050.13, 100.0];
    let defined: Vec<bool> = millivolts
        .iter()
        .map(|&mv| converter.millivolt_to_kelvin(mv).unwrap().is_some())
        .collect();
    assert_eq!(defined, [false, true, true, false, true, true, false]);
}

#[test]
fn test_queries_from_many_threads() {
    let converter = sample();
    let expected = converter.kelvin_to_millivolt(77.0).unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(converter.kelvin_to_millivolt(77.0).unwrap(), expected);
                }
            });
        }
    });
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_zero_table_value_needs_exact_match() {
    let table = CorrelationTable::from_rows(vec![
        CorrelationRow::new(0.0, 2.0),
        CorrelationRow::new(10.0, 1.0),
        CorrelationRow::new(20.0, 0.0),
    ]);
    let converter = KmvConverter::from_table(table, &ConverterConfig::default()).unwrap();

    assert_eq!(converter.kelvin_to_millivolt(0.0), Ok(Some(2.0 / 1000.0)));
    assert_eq!(converter.millivolt_to_kelvin(0.0), Ok(Some(20.0)));

    // Just above 0 V is an interpolation, not a hit on the 0 V row.
    let k = converter.millivolt_to_kelvin(1e-9).unwrap().unwrap();
    assert!(k < 20.0);
}

#[test]
fn test_degenerate_interval_is_reported() {
    let table = CorrelationTable::from_rows(vec![
        CorrelationRow::new(1.0, f64::INFINITY),
        CorrelationRow::new(2.0, f64::INFINITY),
    ]);
    let converter = KmvConverter::from_table(table, &ConverterConfig::default()).unwrap();

    let err = converter.millivolt_to_kelvin(f64::INFINITY).unwrap_err();
    assert_eq!(
        err,
        ConversionError::DegenerateInterval {
            axis: Axis::Voltage,
            low: 0,
            high: 1
        }
    );
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        /// Voltage falls as temperature rises.
        #[test]
        fn test_voltage_non_increasing(a in 1.23f64..=500.0, b in 1.23f64..=500.0) {
            let converter = sample();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

            let v_lo = converter.kelvin_to_millivolt(lo).unwrap().unwrap();
            let v_hi = converter.kelvin_to_millivolt(hi).unwrap().unwrap();
            prop_assert!(v_lo >= v_hi, "{lo} K -> {v_lo}, {hi} K -> {v_hi}");
        }

        /// Going through the voltage column and back lands on the same
        /// temperature, or on the row it was an exact hit for.
        #[test]
        fn test_kelvin_round_trip(k in 1.23f64..=500.0) {
            let config = ConverterConfig {
                voltage_scale: 1.0,
                ..ConverterConfig::default()
            };
            let converter = KmvConverter::with_config(sample_path(), &config).unwrap();

            let mv = converter.kelvin_to_millivolt(k).unwrap().unwrap();
            let back = converter.millivolt_to_kelvin(mv).unwrap().unwrap();
            let on_row = converter.table().rows().iter().any(|row| row.kelvin == back);
            prop_assert!(close(back, k) || on_row, "{k} K -> {mv} -> {back} K");
        }

        /// Anything below or above the table is undefined.
        #[test]
        fn test_out_of_range_is_none(k in prop_oneof![-1.0e6f64..1.2299, 500.0001f64..1.0e6]) {
            let converter = sample();
            prop_assert_eq!(converter.kelvin_to_millivolt(k), Ok(None));
        }
    }
}
