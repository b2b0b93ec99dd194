//! Tabular output: one row per time step, a `time` column then one column per node.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::types::TimeSeries;
use crate::{ResultsError, ResultsResult};

pub const TIME_COLUMN: &str = "time";

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the series as CSV text.
pub fn to_csv_string(series: &TimeSeries) -> String {
    let mut csv = String::from(TIME_COLUMN);
    for name in series.node_names() {
        csv.push(',');
        csv.push_str(&escape(name));
    }
    csv.push('\n');

    for record in series.records() {
        csv.push_str(&record.time_s.to_string());
        for t in &record.temperatures_k {
            csv.push(',');
            csv.push_str(&t.to_string());
        }
        csv.push('\n');
    }
    csv
}

/// Write the series to `path`, replacing any existing file.
pub fn write_csv(path: &Path, series: &TimeSeries) -> ResultsResult<()> {
    fs::write(path, to_csv_string(series))?;
    debug!(path = %path.display(), rows = series.len(), "wrote temperature series");
    Ok(())
}

fn split_line(line: &str, line_no: usize) -> ResultsResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, quoted) {
            ('"', true) if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            ('"', true) => quoted = false,
            ('"', false) if current.is_empty() => quoted = true,
            (',', false) => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if quoted {
        return Err(ResultsError::Malformed {
            line: line_no,
            reason: "unterminated quote".to_string(),
        });
    }
    fields.push(current);
    Ok(fields)
}

/// Load a series previously written by [`write_csv`].
pub fn read_csv(path: &Path) -> ResultsResult<TimeSeries> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or(ResultsError::Malformed {
        line: 1,
        reason: "missing header".to_string(),
    })?;
    let mut columns = split_line(header, 1)?;
    if columns.first().map(String::as_str) != Some(TIME_COLUMN) {
        return Err(ResultsError::Malformed {
            line: 1,
            reason: format!("first column must be '{TIME_COLUMN}'"),
        });
    }
    columns.remove(0);
    let mut series = TimeSeries::new(columns);

    for (i, line) in lines {
        let line_no = i + 1;
        let values = split_line(line, line_no)?
            .iter()
            .map(|v| {
                v.trim().parse::<f64>().map_err(|e| ResultsError::Malformed {
                    line: line_no,
                    reason: format!("'{v}': {e}"),
                })
            })
            .collect::<ResultsResult<Vec<f64>>>()?;
        let Some((&time_s, temps)) = values.split_first() else {
            continue;
        };
        series.push(time_s, temps.to_vec())?;
    }
    Ok(series)
}
