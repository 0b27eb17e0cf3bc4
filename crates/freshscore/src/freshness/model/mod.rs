//! Throwaway regression model refit on synthetic data for every submission.
//!
//! The training data has no relationship to real cold-chain conditions; only
//! its shape matches the encoded reading. Scores are therefore not comparable
//! across submissions.

mod forest;
pub mod synthetic;
mod tree;

pub use forest::{ForestParams, RandomForestRegressor};
pub use synthetic::{make_regression, SyntheticDataset};
pub use tree::{RegressionTree, TreeParams};

use super::domain::FreshScore;
use super::encoder::{FeatureVector, FEATURE_COUNT};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error(
        "feature vector has {actual} columns but the model is trained on {expected}; \
         the encoder and scoring configuration are out of sync"
    )]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("synthetic training set is empty")]
    EmptyTrainingSet,
    #[error("training rows are inconsistent: {detail}")]
    InconsistentRows { detail: String },
    #[error("forest must contain at least one tree")]
    NoEstimators,
}

/// Knobs for the synthetic dataset and the forest fitted on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub trees: usize,
    pub samples: usize,
    pub noise: f64,
    pub informative_features: usize,
    pub expected_features: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub forest_seed: Option<u64>,
    pub data_seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            trees: 100,
            samples: 1000,
            noise: 0.1,
            informative_features: 10,
            expected_features: FEATURE_COUNT,
            max_depth: None,
            min_samples_split: 2,
            forest_seed: Some(42),
            data_seed: None,
        }
    }
}

impl ScoringConfig {
    fn forest_params(&self) -> ForestParams {
        ForestParams {
            trees: self.trees,
            tree: TreeParams {
                max_depth: self.max_depth,
                min_samples_split: self.min_samples_split,
            },
            seed: self.forest_seed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringModel {
    config: ScoringConfig,
}

impl ScoringModel {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Fits a fresh forest on synthetic data and predicts `features`.
    pub fn score(&self, features: &FeatureVector) -> Result<FreshScore, ScoringError> {
        let expected = self.config.expected_features;
        if features.len() != expected {
            return Err(ScoringError::ShapeMismatch {
                expected,
                actual: features.len(),
            });
        }

        let mut rng = forest::seeded_rng(self.config.data_seed);
        let dataset = make_regression(
            &mut rng,
            self.config.samples,
            expected,
            self.config.informative_features,
            self.config.noise,
        );

        let forest = RandomForestRegressor::fit(
            &dataset.features,
            &dataset.targets,
            &self.config.forest_params(),
        )?;
        let raw = forest.predict(features.values())?;
        debug!(
            raw,
            trees = forest.tree_count(),
            samples = dataset.samples(),
            "forest prediction"
        );

        Ok(FreshScore::clamped(raw))
    }
}

impl Default for ScoringModel {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
