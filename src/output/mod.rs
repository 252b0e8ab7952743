//! Output for the CLI frontend.
//!
//! Writes the sample sequence as CSV, or the metrics as a plain table, to
//! any writer (stdout in the binary).

use std::io::Write;

use crate::error::{RectifierError, Result};
use crate::solver::SimulationResult;
use crate::waveform::Waveform;

/// Supply column labels for single- and three-phase sources.
const SINGLE_PHASE_COLUMNS: [&str; 1] = ["supply [V]"];
const THREE_PHASE_COLUMNS: [&str; 3] = ["phase a [V]", "phase b [V]", "phase c [V]"];

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2} %", v))
}

fn output_error(e: impl ToString) -> RectifierError {
    RectifierError::OutputError {
        message: e.to_string(),
    }
}

/// Write the waveform as CSV: time, voltage, current, then supply phases.
pub fn write_csv<W: Write>(waveform: &Waveform, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let phases = waveform.phase_count();
    let mut header = vec!["time [s]", "voltage [V]", "current [A]"];
    if phases == 3 {
        header.extend(THREE_PHASE_COLUMNS);
    } else {
        header.extend(SINGLE_PHASE_COLUMNS);
    }
    wtr.write_record(&header).map_err(output_error)?;

    for (k, sample) in waveform.samples.iter().enumerate() {
        let mut record = vec![
            sample.time.to_string(),
            sample.voltage.to_string(),
            sample.current.to_string(),
        ];
        record.extend(waveform.supply.iter().map(|column| column[k].to_string()));
        wtr.write_record(&record).map_err(output_error)?;
    }

    wtr.flush().map_err(output_error)
}

/// Write the conduction summary and metrics as an aligned table.
pub fn write_metrics<W: Write>(result: &SimulationResult, mut writer: W) -> Result<()> {
    let m = &result.metrics;
    let c = &result.conduction;

    let rows: [(&str, String); 15] = [
        ("Conduction mode", format!("{:?}", c.mode)),
        ("Conduction width", format!("{:.2} deg", c.conduction_width().to_degrees())),
        ("Average voltage", format!("{:.4} V", m.average_voltage)),
        ("RMS voltage", format!("{:.4} V", m.rms_voltage)),
        ("Average current", format!("{:.4} A", m.average_current)),
        ("RMS current", format!("{:.4} A", m.rms_current)),
        ("Form factor", format!("{:.4}", m.form_factor)),
        ("Ripple factor", format!("{:.4}", m.ripple_factor)),
        ("Efficiency", format!("{:.2} %", m.rectification_efficiency * 100.0)),
        ("Voltage THD", percent(m.thd_percent)),
        ("Current THD", percent(m.current_thd_percent)),
        ("DC output power", format!("{:.3} W", m.dc_output_power)),
        ("Peak inverse voltage", format!("{:.3} V", m.peak_inverse_voltage)),
        ("Ripple frequency", format!("{:.1} Hz", m.ripple_frequency)),
        ("Integration", m.method.to_string()),
    ];

    for (label, value) in rows.iter() {
        writeln!(writer, "{:<22}{}", label, value).map_err(output_error)?;
    }
    writer.flush().map_err(output_error)
}
