//! Report export
//!
//! Plain-text reports in the historical layout, plus an optional JSON
//! summary of a whole run.

mod report;
mod summary;

pub use report::{
    BASELINE_FILE, LAPLACE_MATRIX_FILE, PREDICTION_FILE, RAW_MATRIX_FILE, ReportWriter,
    STEADY_STATE_FILE, render_baseline, render_matrix, render_predictions, render_steady_state,
};
pub use summary::{
    AccuracySection, BaselineSection, MatrixSection, RunSummary, StateCount, SteadyStateEntry,
    SteadyStateSection,
};
