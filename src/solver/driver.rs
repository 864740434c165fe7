//! Discrete equation driver
//!
//! [`DiscreteEquation`] runs the outer time loop as a three-state machine:
//!
//! ```text
//! Init ──► Stepping ──► Terminated
//!            │  ▲
//!            └──┘
//! ```
//!
//! - **Init**: rewind the post schedule, validate the solution array, emit
//!   the `"initial"` snapshot at `t = 0`.
//! - **Stepping**: one iteration per time step:
//!   1. `dt` from the time step method
//!   2. if the end condition triggers: clamp `dt`, update, set the clock to
//!      the end time, emit `"final"`, go to **Terminated**
//!   3. else if the post condition triggers: clamp `dt`, update, set the
//!      clock to the post time, emit `""`
//!   4. else update with the full `dt`, advance the clock
//!
//! When both conditions trigger on the same step, the end condition wins and
//! no intermediate snapshot is emitted for that step.

use crate::error::{FvmError, FvmResult};
use crate::output::{SnapshotLabel, SnapshotSink};
use crate::physics::Solution;
use crate::solver::{
    SemiDiscreteEquation, SolveEndCondition, SolvePostCondition, TimeIntegralMethod, TimeStepMethod,
};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Before the initial snapshot
    Init,
    /// Inside the time loop
    Stepping,
    /// Final snapshot emitted
    Terminated,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct SolveSummary {
    /// Number of time steps taken
    pub iterations: usize,
    /// Simulated time at termination, equal to the end time
    pub final_time: f64,
    /// Snapshots emitted, initial and final included
    pub snapshots: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Time-stepping driver
pub struct DiscreteEquation {
    time_integral_method: Box<dyn TimeIntegralMethod>,
    time_step_method: Box<dyn TimeStepMethod>,
    end_condition: Box<dyn SolveEndCondition>,
    post_condition: Box<dyn SolvePostCondition>,
    state: DriverState,
    current_time: f64,
}

impl DiscreteEquation {
    /// Assemble a driver from its four strategies
    ///
    /// The driver starts in [`DriverState::Init`] at `t = 0`.
    pub fn new(
        time_integral_method: Box<dyn TimeIntegralMethod>,
        time_step_method: Box<dyn TimeStepMethod>,
        end_condition: Box<dyn SolveEndCondition>,
        post_condition: Box<dyn SolvePostCondition>,
    ) -> Self {
        Self {
            time_integral_method,
            time_step_method,
            end_condition,
            post_condition,
            state: DriverState::Init,
            current_time: 0.0,
        }
    }

    /// Current state of the machine
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Simulated time reached so far
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Integrator used for every step
    pub fn time_integral_method(&self) -> &dyn TimeIntegralMethod {
        self.time_integral_method.as_ref()
    }

    /// Method proposing the step size
    pub fn time_step_method(&self) -> &dyn TimeStepMethod {
        self.time_step_method.as_ref()
    }

    /// Integrate `solutions` in place from `t = 0` to the end time
    ///
    /// Every snapshot goes to `sink`. The driver can be reused: each call
    /// starts over from **Init**.
    ///
    /// # Errors
    ///
    /// - [`FvmError::Configuration`] if `solutions` does not match the grid
    /// - [`FvmError::NumericalInstability`] on a bad time step or a
    ///   non-finite solution
    /// - any error raised by `sink`
    ///
    /// The loop stops at the first error; `solutions` then holds the last
    /// state reached.
    pub fn solve(
        &mut self,
        semi_discrete_eq: &SemiDiscreteEquation,
        solutions: &mut [Solution],
        sink: &mut dyn SnapshotSink,
    ) -> FvmResult<SolveSummary> {
        let start = Instant::now();

        // ====== Init ======

        self.state = DriverState::Init;
        self.current_time = 0.0;
        self.post_condition.reset();

        semi_discrete_eq.check_solutions(solutions)?;
        crate::solver::validate_solutions(solutions)?;

        info!(
            equation = semi_discrete_eq.equation().name(),
            flux = semi_discrete_eq.flux().name(),
            integrator = self.time_integral_method.name(),
            time_step = self.time_step_method.name(),
            cells = semi_discrete_eq.num_cells(),
            end_time = self.end_condition.end_time(),
            "solve started"
        );

        sink.record(solutions, self.current_time, SnapshotLabel::Initial)?;
        let mut snapshots = 1;
        let mut iterations = 0;
        self.state = DriverState::Stepping;

        // ====== Stepping ======

        while self.state == DriverState::Stepping {
            let dt = semi_discrete_eq.calculate_time_step(solutions, self.time_step_method.as_ref())?;
            iterations += 1;

            if self.end_condition.check(self.current_time, dt) {
                let adjusted = self.end_condition.adjust(self.current_time, dt);
                self.advance(semi_discrete_eq, solutions, adjusted)?;
                self.current_time = self.end_condition.end_time();

                sink.record(solutions, self.current_time, SnapshotLabel::Final)?;
                snapshots += 1;
                self.state = DriverState::Terminated;
            } else if self.post_condition.check(self.current_time, dt) {
                let post_time = self.post_condition.next_post_time();
                let adjusted = self.post_condition.adjust(self.current_time, dt);
                self.advance(semi_discrete_eq, solutions, adjusted)?;
                self.current_time = post_time.unwrap_or(self.current_time + adjusted);

                sink.record(solutions, self.current_time, SnapshotLabel::Intermediate)?;
                snapshots += 1;
            } else {
                self.advance(semi_discrete_eq, solutions, dt)?;
                self.current_time += dt;
            }

            debug!(iteration = iterations, time = self.current_time, dt, "step completed");
        }

        // ====== Terminated ======

        let elapsed = start.elapsed();
        info!(
            iterations,
            final_time = self.current_time,
            snapshots,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "solve finished"
        );

        Ok(SolveSummary {
            iterations,
            final_time: self.current_time,
            snapshots,
            elapsed,
        })
    }

    fn advance(&self, semi_discrete_eq: &SemiDiscreteEquation, solutions: &mut [Solution], dt: f64) -> FvmResult<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(FvmError::instability(format!(
                "adjusted time step {} at t = {} is not positive",
                dt, self.current_time
            )));
        }

        self.time_integral_method.update_solutions(semi_discrete_eq, solutions, dt)
    }
}

impl std::fmt::Debug for DiscreteEquation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscreteEquation")
            .field("time_integral_method", &self.time_integral_method.name())
            .field("time_step_method", &self.time_step_method.name())
            .field("end_time", &self.end_condition.end_time())
            .field("next_post_time", &self.post_condition.next_post_time())
            .field("state", &self.state)
            .field("current_time", &self.current_time)
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
