//! The thermal network engine: forward-Euler stepping of a built [`Network`].

use std::fmt;
use std::path::Path;

use tn_core::Real;
use tn_network::Network;
use tn_results::TimeSeries;
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;
use crate::sim::{SimOptions, SimSummary, run_sim, step_count};

/// Adapter exposing a network as a [`TransientModel`].
///
/// State is the temperature vector indexed by `HsnId`; the rate is the net
/// power of every node read from that same vector.
pub struct ThermalModel<'a> {
    network: &'a mut Network,
    readings: &'a mut TimeSeries,
    parallel: bool,
}

impl<'a> ThermalModel<'a> {
    pub fn new(network: &'a mut Network, readings: &'a mut TimeSeries, parallel: bool) -> Self {
        Self {
            network,
            readings,
            parallel,
        }
    }
}

impl TransientModel for ThermalModel<'_> {
    type State = Vec<Real>;
    type Rate = Vec<Real>;

    fn initial_state(&self) -> Vec<Real> {
        self.network.temperatures()
    }

    fn rhs(&mut self, _t: f64, x: &Vec<Real>) -> SimResult<Vec<Real>> {
        let powers = if self.parallel {
            self.network.net_powers_par(x)?
        } else {
            self.network.net_powers(x)?
        };
        Ok(powers)
    }

    fn advance(&self, x: &Vec<Real>, rate: &Vec<Real>, dt: f64) -> Vec<Real> {
        self.network
            .nodes()
            .iter()
            .zip(x.iter().zip(rate))
            .map(|(node, (&t, &p))| t + node.temperature_increment(p, dt))
            .collect()
    }

    fn commit(&mut self, t: f64, x: &Vec<Real>) -> SimResult<()> {
        self.network.commit_temperatures(x)?;
        self.readings.push(t, x.clone())?;
        Ok(())
    }
}

/// A network together with its run settings and the readings of the last run.
#[derive(Debug, Clone)]
pub struct ThermalNetwork {
    network: Network,
    options: SimOptions,
    initial_temperatures: Vec<Real>,
    readings: TimeSeries,
    steps_taken: usize,
}

impl ThermalNetwork {
    /// Wrap a built network. The network's current temperatures become the
    /// state every [`ThermalNetwork::simulate`] starts from.
    pub fn new(network: Network, options: SimOptions) -> SimResult<Self> {
        options.validate()?;
        let names = network.nodes().iter().map(|n| n.name.clone()).collect();
        let initial_temperatures = network.temperatures();
        info!(
            nodes = network.nodes().len(),
            links = network.links().len(),
            duration_s = options.t_end,
            timestep_s = options.dt,
            "thermal network ready"
        );
        Ok(Self {
            network,
            options,
            initial_temperatures,
            readings: TimeSeries::new(names),
            steps_taken: 0,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn options(&self) -> &SimOptions {
        &self.options
    }

    /// One record per completed step since the last reset.
    pub fn readings(&self) -> &TimeSeries {
        &self.readings
    }

    /// Time of the last completed step (s).
    pub fn time(&self) -> f64 {
        self.steps_taken as f64 * self.options.dt
    }

    /// Steps the full duration would take.
    pub fn step_count(&self) -> SimResult<usize> {
        step_count(self.options.t_end, self.options.dt)
    }

    /// Restore the initial temperatures and drop all readings.
    pub fn reset(&mut self) -> SimResult<()> {
        self.network.commit_temperatures(&self.initial_temperatures)?;
        self.readings.clear();
        self.steps_taken = 0;
        Ok(())
    }

    /// Run every whole step of the configured duration from the initial state.
    ///
    /// Calling this twice gives identical readings.
    pub fn simulate(&mut self) -> SimResult<SimSummary> {
        self.reset()?;
        info!(
            duration_s = self.options.t_end,
            timestep_s = self.options.dt,
            parallel = self.options.parallel,
            "simulation started"
        );
        let mut model = ThermalModel::new(
            &mut self.network,
            &mut self.readings,
            self.options.parallel,
        );
        let summary = run_sim(&mut model, &self.options)?;
        self.steps_taken = summary.steps;
        info!(steps = summary.steps, t_final = summary.t_final, "simulation finished");
        Ok(summary)
    }

    /// Advance one step from the committed temperatures and record it.
    ///
    /// Ignores the configured duration. Returns the new time.
    pub fn step(&mut self) -> SimResult<f64> {
        let dt = self.options.dt;
        let t = self.time();
        let x = self.network.temperatures();
        let mut model = ThermalModel::new(
            &mut self.network,
            &mut self.readings,
            self.options.parallel,
        );
        let next = ForwardEuler.step(&mut model, t, &x, dt)?;
        let t_next = (self.steps_taken + 1) as f64 * dt;
        model.commit(t_next, &next)?;
        self.steps_taken += 1;
        Ok(t_next)
    }

    /// Write the readings as CSV: a `time` column then one column per node.
    pub fn save(&self, path: impl AsRef<Path>) -> SimResult<()> {
        let path = path.as_ref();
        tn_results::write_csv(path, &self.readings)?;
        debug!(path = %path.display(), rows = self.readings.len(), "readings saved");
        Ok(())
    }

    /// Committed temperature of a node (K).
    pub fn temperature(&self, node: &str) -> SimResult<Real> {
        let id = self.node_id(node)?;
        Ok(self.network.temperatures()[id.index()])
    }

    /// Replace a node's internal generation (W). Applies from the next step.
    pub fn set_heat_generation(&mut self, node: &str, watts: Real) -> SimResult<()> {
        let id = self.node_id(node)?;
        self.network.set_heat_generation(id, watts)?;
        Ok(())
    }

    /// Current rate of one link (W into its source node).
    pub fn link_heat_exchange(&self, node: &str, interface: &str, link: &str) -> SimResult<Real> {
        let id = self
            .network
            .link_id(node, interface, link)
            .ok_or_else(|| SimError::UnknownLink {
                node: node.to_string(),
                interface: interface.to_string(),
                link: link.to_string(),
            })?;
        Ok(self
            .network
            .link_heat_exchange(id, &self.network.temperatures())?)
    }

    /// Σ m·c·T over all nodes at the committed temperatures (J).
    pub fn stored_energy(&self) -> SimResult<Real> {
        Ok(self.network.stored_energy(&self.network.temperatures())?)
    }

    fn node_id(&self, name: &str) -> SimResult<tn_core::HsnId> {
        self.network
            .node_id(name)
            .ok_or_else(|| SimError::UnknownNode {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for ThermalNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "duration {} s, timestep {} s",
            self.options.t_end, self.options.dt
        )?;
        write!(f, "{}", self.network)
    }
}
