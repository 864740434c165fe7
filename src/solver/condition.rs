//! End and post conditions
//!
//! Both conditions work the same way: `check` tells the driver whether the
//! proposed step reaches or crosses a threshold, and `adjust` returns the
//! shortened step that lands on it exactly. The driver then snaps the clock
//! to the threshold itself, so round-off in `t + dt'` never leaves the run a
//! hair short of (or past) a target.

use crate::error::{FvmError, FvmResult};
use crate::solver::{SolveEndCondition, SolvePostCondition};

// =================================================================================================
// End conditions
// =================================================================================================

/// Stop at a fixed simulated time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndByTime {
    end_time: f64,
}

impl EndByTime {
    /// # Errors
    ///
    /// [`FvmError::Configuration`] unless `end_time` is positive and finite.
    pub fn new(end_time: f64) -> FvmResult<Self> {
        if !(end_time.is_finite() && end_time > 0.0) {
            return Err(FvmError::config(format!("end time must be positive and finite, got {}", end_time)));
        }
        Ok(Self { end_time })
    }
}

impl SolveEndCondition for EndByTime {
    fn check(&self, current_time: f64, dt: f64) -> bool {
        current_time + dt >= self.end_time
    }

    fn adjust(&self, current_time: f64, dt: f64) -> f64 {
        (self.end_time - current_time).min(dt)
    }

    fn end_time(&self) -> f64 {
        self.end_time
    }
}

// =================================================================================================
// Post conditions
// =================================================================================================

/// Snapshot every `interval` of simulated time
///
/// Targets are `interval, 2*interval, 3*interval, ...`, each computed as
/// `k * interval` rather than by repeated addition.
///
/// # Example
///
/// ```rust
/// use fvm_rs::solver::{PostByTime, SolvePostCondition};
///
/// let mut post = PostByTime::new(1.0)?;
/// assert!(!post.check(0.0, 0.5));
/// assert!(post.check(0.9, 0.5));
///
/// let dt = post.adjust(0.9, 0.5);
/// assert!((dt - 0.1).abs() < 1e-12);
/// assert_eq!(post.next_post_time(), Some(2.0));
/// # Ok::<(), fvm_rs::FvmError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PostByTime {
    interval: f64,
    post_count: u64,
}

impl PostByTime {
    /// # Errors
    ///
    /// [`FvmError::Configuration`] unless `interval` is positive and finite.
    pub fn new(interval: f64) -> FvmResult<Self> {
        if !(interval.is_finite() && interval > 0.0) {
            return Err(FvmError::config(format!("post interval must be positive and finite, got {}", interval)));
        }
        Ok(Self { interval, post_count: 0 })
    }

    /// Snapshot interval
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Snapshots scheduled so far
    pub fn post_count(&self) -> u64 {
        self.post_count
    }

    fn target(&self) -> f64 {
        (self.post_count + 1) as f64 * self.interval
    }
}

impl SolvePostCondition for PostByTime {
    fn check(&self, current_time: f64, dt: f64) -> bool {
        current_time + dt >= self.target()
    }

    fn adjust(&mut self, current_time: f64, dt: f64) -> f64 {
        let adjusted = (self.target() - current_time).min(dt);
        self.post_count += 1;
        adjusted
    }

    fn next_post_time(&self) -> Option<f64> {
        Some(self.target())
    }

    fn reset(&mut self) {
        self.post_count = 0;
    }
}

/// No intermediate snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostNever;

impl SolvePostCondition for PostNever {
    fn check(&self, _current_time: f64, _dt: f64) -> bool {
        false
    }

    fn adjust(&mut self, _current_time: f64, dt: f64) -> f64 {
        dt
    }

    fn next_post_time(&self) -> Option<f64> {
        None
    }

    fn reset(&mut self) {}
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_end_check_is_inclusive() {
        let end = EndByTime::new(10.0).unwrap();
        assert!(!end.check(9.0, 0.5));
        assert!(end.check(9.5, 0.5));
        assert!(end.check(9.5, 1.0));
    }

    #[test]
    fn test_end_adjust_clamps() {
        let end = EndByTime::new(10.0).unwrap();
        assert_eq!(end.adjust(9.5, 1.0), 0.5);
        assert_eq!(end.adjust(2.0, 1.0), 1.0);
        assert_eq!(end.end_time(), 10.0);
    }

    #[test]
    fn test_end_rejects_invalid_time() {
        assert!(EndByTime::new(0.0).is_err());
        assert!(EndByTime::new(-1.0).is_err());
        assert!(EndByTime::new(f64::NAN).is_err());
    }

    #[test]
    fn test_post_schedule_advances() {
        let mut post = PostByTime::new(1.0).unwrap();
        assert_eq!(post.next_post_time(), Some(1.0));

        assert!(post.check(0.9, 0.5));
        assert_relative_eq!(post.adjust(0.9, 0.5), 0.1, epsilon = 1e-12);
        assert_eq!(post.post_count(), 1);
        assert_eq!(post.next_post_time(), Some(2.0));

        assert!(!post.check(1.0, 0.5));
    }

    #[test]
    fn test_post_targets_do_not_drift() {
        let mut post = PostByTime::new(0.1).unwrap();
        for k in 1..=1000u64 {
            let target = post.next_post_time().unwrap();
            assert_eq!(target, k as f64 * 0.1);
            post.adjust(target, 1.0);
        }
    }

    #[test]
    fn test_post_reset() {
        let mut post = PostByTime::new(0.5).unwrap();
        post.adjust(0.4, 1.0);
        post.adjust(0.9, 1.0);
        post.reset();
        assert_eq!(post.next_post_time(), Some(0.5));
    }

    #[test]
    fn test_post_never() {
        let mut post = PostNever;
        assert!(!post.check(0.0, f64::MAX));
        assert_eq!(post.adjust(0.0, 0.25), 0.25);
        assert_eq!(post.next_post_time(), None);
    }
}
