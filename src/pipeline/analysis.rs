//! End-to-end analysis of one season file

use std::path::{Path, PathBuf};

use super::config::AnalysisConfig;
use crate::{
    Result,
    analysis::{AccuracyEvaluator, AccuracyReport, BaselineEvaluator, BaselineReport},
    markov::{Smoothing, StationaryDistribution, SteadyStateSolver, TransitionMatrix},
    records::RecordReader,
    sequence::{ClassifiedSeason, SequenceBuilder, StateFrequencies, StateSequence},
};

/// Every product of an analysis run
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub source: PathBuf,
    pub sequence: StateSequence,
    pub frequencies: StateFrequencies,
    pub raw_matrix: TransitionMatrix,
    pub smoothed_matrix: TransitionMatrix,
    /// Which of the two matrices fed the solver and the predictor
    pub evaluation_matrix: Smoothing,
    pub stationary: StationaryDistribution,
    pub accuracy: AccuracyReport,
    pub baseline: BaselineReport,
}

impl AnalysisOutcome {
    pub fn matrix(&self, smoothing: Smoothing) -> &TransitionMatrix {
        match smoothing {
            Smoothing::None => &self.raw_matrix,
            Smoothing::Laplace => &self.smoothed_matrix,
        }
    }
}

/// Runs records → sequence → matrices → solver and evaluators
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    reader: RecordReader,
    solver: SteadyStateSolver,
}

impl AnalysisPipeline {
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let reader = RecordReader::new(config.schema.clone());
        let solver = SteadyStateSolver::new(config.solver)?;
        Ok(Self {
            config,
            reader,
            solver,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Read and classify the season without estimating anything.
    pub fn classify(&self, path: &Path) -> Result<ClassifiedSeason> {
        SequenceBuilder::from_path(&self.reader, path)
    }

    /// Run the full analysis on the file at `path`.
    pub fn run(&self, path: &Path) -> Result<AnalysisOutcome> {
        let season = self.classify(path)?;
        Ok(self.analyze(path.to_path_buf(), season))
    }

    /// Run the estimation and evaluation stages on an already classified
    /// season.
    pub fn analyze(&self, source: PathBuf, season: ClassifiedSeason) -> AnalysisOutcome {
        let ClassifiedSeason {
            sequence,
            frequencies,
        } = season;

        if sequence.len() < 2 {
            log::warn!(
                "{} has {} game(s); transition estimates are degenerate",
                source.display(),
                sequence.len()
            );
        }

        let raw_matrix = TransitionMatrix::estimate(&sequence, Smoothing::None);
        let smoothed_matrix = TransitionMatrix::estimate(&sequence, Smoothing::Laplace);

        let evaluation_matrix = self.config.evaluation_matrix;
        let chosen = match evaluation_matrix {
            Smoothing::None => &raw_matrix,
            Smoothing::Laplace => &smoothed_matrix,
        };
        let stationary = self.solver.solve(chosen);
        let accuracy = AccuracyEvaluator::new(chosen).evaluate(&sequence);
        let baseline = BaselineEvaluator::evaluate(&sequence);

        AnalysisOutcome {
            source,
            sequence,
            frequencies,
            raw_matrix,
            smoothed_matrix,
            evaluation_matrix,
            stationary,
            accuracy,
            baseline,
        }
    }
}
