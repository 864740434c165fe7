//! Face-state reconstruction
//!
//! A reconstruction maps cell averages to the two states seen on either side
//! of a face. First-order finite volumes use the cell averages unmodified.

use crate::error::FvmResult;
use crate::physics::{GoverningEquation, Solution};
use std::borrow::Cow;

/// Face-side state strategy
pub trait Reconstruction: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Reject governing equations this reconstruction cannot handle
    fn check_compatibility(&self, equation: &dyn GoverningEquation) -> FvmResult<()> {
        let _ = equation;
        Ok(())
    }

    /// Owner-side and neighbor-side states at face `face`
    ///
    /// `face` lets higher-order variants look up per-face geometry. Variants
    /// that do not modify the averages return borrowed states.
    fn reconstruct<'a>(
        &self,
        solutions: &'a [Solution],
        face: usize,
        owner: usize,
        neighbor: usize,
    ) -> (Cow<'a, Solution>, Cow<'a, Solution>);
}

/// Piecewise-constant reconstruction: face states are the cell averages
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantReconstruction;

impl Reconstruction for ConstantReconstruction {
    fn name(&self) -> &str {
        "Constant"
    }

    fn reconstruct<'a>(
        &self,
        solutions: &'a [Solution],
        _face: usize,
        owner: usize,
        neighbor: usize,
    ) -> (Cow<'a, Solution>, Cow<'a, Solution>) {
        (Cow::Borrowed(&solutions[owner]), Cow::Borrowed(&solutions[neighbor]))
    }
}
