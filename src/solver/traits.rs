//! Strategy contracts of the time-stepping driver
//!
//! The driver only talks to these traits. Each one is a plug point selected
//! at configuration time:
//!
//! - `TimeStepMethod`: stability-bounded step size
//! - `TimeIntegralMethod`: in-place advance by one step
//! - `SolveEndCondition`: when to stop, clamped to hit the end time exactly
//! - `SolvePostCondition`: when to emit an intermediate snapshot

use crate::error::FvmResult;
use crate::physics::Solution;
use crate::solver::SemiDiscreteEquation;

// =================================================================================================
// Time step
// =================================================================================================

/// Step-size selection
pub trait TimeStepMethod: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Raw step size for the current solution
    ///
    /// The caller ([`SemiDiscreteEquation::calculate_time_step`]) rejects
    /// non-positive, NaN and infinite values.
    fn calculate_time_step(&self, semi_discrete_eq: &SemiDiscreteEquation, solutions: &[Solution]) -> f64;
}

// =================================================================================================
// Time integration
// =================================================================================================

/// Explicit time integrator
///
/// # Contract
///
/// - advances `solutions` in place by exactly `dt`
/// - never changes the number of cells (the slice cannot be resized)
/// - stable for `dt` up to the bound computed on the pre-step solution;
///   larger steps are the caller's responsibility
/// - returns `NumericalInstability` if the new solution is not finite
pub trait TimeIntegralMethod: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Number of residual evaluations per step
    fn stages(&self) -> usize;

    /// Advance `solutions` by one step of size `dt`
    fn update_solutions(
        &self,
        semi_discrete_eq: &SemiDiscreteEquation,
        solutions: &mut [Solution],
        dt: f64,
    ) -> FvmResult<()>;
}

// =================================================================================================
// End / post conditions
// =================================================================================================

/// Termination rule
pub trait SolveEndCondition: Send {
    /// `true` if a step of `dt` from `current_time` reaches or crosses the end
    fn check(&self, current_time: f64, dt: f64) -> bool;

    /// Clamped step `0 < dt' <= dt` landing exactly on the end time
    fn adjust(&self, current_time: f64, dt: f64) -> f64;

    /// Time the clock is set to after the final step
    fn end_time(&self) -> f64;
}

/// Intermediate snapshot schedule
pub trait SolvePostCondition: Send {
    /// `true` if a step of `dt` from `current_time` lands at or after the next
    /// scheduled snapshot time
    fn check(&self, current_time: f64, dt: f64) -> bool;

    /// Clamped step `0 < dt' <= dt` landing exactly on the next snapshot time,
    /// then advance the schedule to the following one
    fn adjust(&mut self, current_time: f64, dt: f64) -> f64;

    /// Next scheduled snapshot time, `None` if nothing is scheduled
    fn next_post_time(&self) -> Option<f64>;

    /// Rewind the schedule for a new run
    fn reset(&mut self);
}
