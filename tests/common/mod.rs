//! Common utilities for integration tests

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{SplitAdvection, three_cell_exact};
pub use test_helpers::{
    assert_solutions_close,
    flatten_scalar,
    periodic_line,
    relative_error,
    scalar_solutions,
    total_mass,
};
