//! Result data types.

use serde::{Deserialize, Serialize};

use crate::{ResultsError, ResultsResult};

/// Temperatures of every node at one simulated time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub time_s: f64,
    /// Kelvin, in the series' node order.
    pub temperatures_k: Vec<f64>,
}

/// Append-only series of temperature records with a fixed node column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    node_names: Vec<String>,
    records: Vec<TemperatureRecord>,
}

impl TimeSeries {
    pub fn new(node_names: Vec<String>) -> Self {
        Self {
            node_names,
            records: Vec::new(),
        }
    }

    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    pub fn records(&self) -> &[TemperatureRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Append one row; it must carry one value per node.
    pub fn push(&mut self, time_s: f64, temperatures_k: Vec<f64>) -> ResultsResult<()> {
        if temperatures_k.len() != self.node_names.len() {
            return Err(ResultsError::RowWidth {
                time_s,
                expected: self.node_names.len(),
                actual: temperatures_k.len(),
            });
        }
        self.records.push(TemperatureRecord {
            time_s,
            temperatures_k,
        });
        Ok(())
    }

    /// Column position of a node.
    pub fn node_position(&self, name: &str) -> Option<usize> {
        self.node_names.iter().position(|n| n == name)
    }

    /// Times of every record.
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time_s).collect()
    }

    /// One node's temperature history.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let pos = self.node_position(name)?;
        Some(self.records.iter().map(|r| r.temperatures_k[pos]).collect())
    }

    /// Reading keyed by (record index, node name).
    pub fn temperature(&self, record: usize, name: &str) -> Option<f64> {
        let pos = self.node_position(name)?;
        self.records.get(record).map(|r| r.temperatures_k[pos])
    }

    pub fn last(&self) -> Option<&TemperatureRecord> {
        self.records.last()
    }
}
