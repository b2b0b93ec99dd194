//! JSON form of a series, for tools that prefer structured output.

use std::fs;
use std::path::Path;

use crate::ResultsResult;
use crate::types::TimeSeries;

pub fn write_json(path: &Path, series: &TimeSeries) -> ResultsResult<()> {
    let content = serde_json::to_string_pretty(series)?;
    fs::write(path, content)?;
    Ok(())
}

pub fn read_json(path: &Path) -> ResultsResult<TimeSeries> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
