//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - Initial state
/// - Rate computation from a frozen state: r = f(t, x)
/// - Advancing a state by a rate over one step
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Whatever `rhs` produces and `advance` consumes.
    type Rate;

    /// State at the start of a run.
    fn initial_state(&self) -> Self::State;

    /// Compute rates from `x`. Must not observe any state other than `x`.
    fn rhs(&mut self, t: f64, x: &Self::State) -> SimResult<Self::Rate>;

    /// Apply `rate` to `x` over `dt`.
    fn advance(&self, x: &Self::State, rate: &Self::Rate, dt: f64) -> Self::State;

    /// Called once per completed step with the new state and its time.
    fn commit(&mut self, _t: f64, _x: &Self::State) -> SimResult<()> {
        Ok(())
    }
}
