//! Analysis configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    markov::{Smoothing, SolverConfig},
    records::{MarkerPolicy, RecordSchema},
};

/// Everything that parameterises one analysis run
///
/// # Examples
///
/// ```
/// use rebound_markov::{
///     markov::Smoothing,
///     pipeline::AnalysisConfig,
///     records::MarkerPolicy,
/// };
///
/// let config = AnalysisConfig::default()
///     .with_marker_policy(MarkerPolicy::Strict)
///     .with_evaluation_matrix(Smoothing::None)
///     .with_tolerance(1e-9);
/// assert_eq!(config.solver.max_iterations, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Input column layout and result-marker handling
    pub schema: RecordSchema,
    /// Power-iteration parameters
    pub solver: SolverConfig,
    /// Matrix used for the steady state and the predictor
    pub evaluation_matrix: Smoothing,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema: RecordSchema::default(),
            solver: SolverConfig::default(),
            evaluation_matrix: Smoothing::Laplace,
        }
    }
}

impl AnalysisConfig {
    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_marker_policy(mut self, policy: MarkerPolicy) -> Self {
        self.schema.marker_policy = policy;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.solver.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    pub fn with_evaluation_matrix(mut self, smoothing: Smoothing) -> Self {
        self.evaluation_matrix = smoothing;
        self
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::io(format!("open config '{}'", path.display()), e))?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a bad solver tolerance or
    /// a schema whose two columns coincide.
    pub fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        if self.schema.result_column == self.schema.rebounds_column {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "result and rebounds columns must differ (both are {})",
                    self.schema.result_column
                ),
            });
        }
        if self.schema.win_marker == self.schema.loss_marker {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "win and loss markers must differ (both are '{}')",
                    self.schema.win_marker
                ),
            });
        }
        Ok(())
    }
}
