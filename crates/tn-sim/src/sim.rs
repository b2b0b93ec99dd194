//! Fixed-step simulation runner.

use tn_core::{Tolerances, ensure_finite, ensure_positive, nearly_equal};
use tracing::{trace, warn};

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;

/// Options for simulation runs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Simulation duration (seconds)
    pub t_end: f64,
    /// Evaluate per-node net powers on the rayon pool
    pub parallel: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1.0,
            t_end: 60.0,
            parallel: false,
        }
    }
}

impl SimOptions {
    pub fn new(t_end: f64, dt: f64) -> Self {
        Self {
            dt,
            t_end,
            parallel: false,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.dt, "dt")?;
        if ensure_finite(self.t_end, "t_end")? < 0.0 {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        Ok(())
    }
}

/// What a completed run did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimSummary {
    pub steps: usize,
    /// Time of the last completed step (seconds)
    pub t_final: f64,
}

/// Number of whole steps that fit in `t_end`.
///
/// A trailing partial interval is never executed, so `t_end = 10, dt = 3`
/// gives 3 steps. A ratio within tolerance of an integer counts as that
/// integer so `0.3 / 0.1` gives 3.
pub fn step_count(t_end: f64, dt: f64) -> SimResult<usize> {
    SimOptions::new(t_end, dt).validate()?;
    let ratio = t_end / dt;
    let nearest = ratio.round();
    let tol = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };
    let steps = if nearly_equal(ratio, nearest, tol) {
        nearest
    } else {
        warn!(
            t_end,
            dt,
            skipped_s = t_end - ratio.floor() * dt,
            "duration is not a multiple of the time step; final partial interval skipped"
        );
        ratio.floor()
    };
    Ok(steps as usize)
}

/// Run a model from its initial state through every whole step of `opts`.
///
/// Step `k` ends at `k·dt`; the model's `commit` sees every step.
pub fn run_sim<M: TransientModel>(model: &mut M, opts: &SimOptions) -> SimResult<SimSummary> {
    let steps = step_count(opts.t_end, opts.dt)?;
    let mut x = model.initial_state();
    let mut t = 0.0;

    for k in 1..=steps {
        x = ForwardEuler.step(model, t, &x, opts.dt)?;
        t = k as f64 * opts.dt;
        model.commit(t, &x)?;
        trace!(step = k, t, "step complete");
    }

    Ok(SimSummary { steps, t_final: t })
}
