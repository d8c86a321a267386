use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use kmv_converter::CorrelationRow;

/// Forward voltage at 0 K extrapolated from the curve (V).
const V_COLD: f64 = 1.72;
/// Forward voltage the curve settles towards when warm (V).
const V_WARM: f64 = 0.08;
/// Temperature constant of the decay (K).
const T_SCALE: f64 = 190.0;

/// Synthetic silicon-diode style response: voltage falls monotonically with
/// temperature.
fn diode_voltage(kelvin: f64) -> f64 {
    V_WARM + (V_COLD - V_WARM) * (-kelvin / T_SCALE).exp()
}

/// dV/dT of [`diode_voltage`] in mV/K.
fn diode_slope(kelvin: f64) -> f64 {
    -(V_COLD - V_WARM) / T_SCALE * (-kelvin / T_SCALE).exp() * 1000.0
}

/// Dense at cryogenic temperatures, coarser when warm.
fn temperatures() -> Vec<f64> {
    let mut t = vec![1.23, 1.34, 1.40, 2.1, 3.5];
    t.extend((4..=20_i32).map(f64::from));
    t.extend((5..=20_i32).map(|i| f64::from(i) * 5.0));
    t.extend((11..=50_i32).map(|i| f64::from(i) * 10.0));
    t
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_table.txt".to_string());

    let rows: Vec<(CorrelationRow, f64)> = temperatures()
        .into_iter()
        .map(|k| (CorrelationRow::new(k, diode_voltage(k)), diode_slope(k)))
        .collect();

    let ext = Path::new(&output_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = File::create(&output_path).expect("Failed to create output file");

    match ext.as_str() {
        "csv" => {
            let mut writer = csv::Writer::from_writer(file);
            writer
                .write_record(["kelvin", "millivolt", "dvdt"])
                .expect("Failed to write header");
            for (row, slope) in &rows {
                writer
                    .write_record([
                        row.kelvin.to_string(),
                        format!("{:.6}", row.millivolt),
                        format!("{slope:.4}"),
                    ])
                    .expect("Failed to write row");
            }
            writer.flush().expect("Failed to flush output");
        }
        "json" => {
            let table: Vec<CorrelationRow> = rows.iter().map(|(row, _)| *row).collect();
            serde_json::to_writer_pretty(BufWriter::new(file), &table)
                .expect("Failed to write JSON");
        }
        _ => {
            let mut out = BufWriter::new(file);
            for (row, slope) in &rows {
                writeln!(out, "{:<8} {:.6}  {:.4}", row.kelvin, row.millivolt, slope)
                    .expect("Failed to write row");
            }
            out.flush().expect("Failed to flush output");
        }
    }

    println!("Wrote {} calibration points to {output_path}", rows.len());
}
