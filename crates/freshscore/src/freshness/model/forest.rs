use super::tree::{RegressionTree, TreeParams};
use super::ScoringError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub trees: usize,
    pub tree: TreeParams,
    /// Fixed seed for bootstrap sampling; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Bagged ensemble of regression trees averaging their predictions.
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
    width: usize,
}

impl RandomForestRegressor {
    pub fn fit(
        rows: &[Vec<f64>],
        targets: &[f64],
        params: &ForestParams,
    ) -> Result<Self, ScoringError> {
        if rows.is_empty() || targets.is_empty() {
            return Err(ScoringError::EmptyTrainingSet);
        }
        if rows.len() != targets.len() {
            return Err(ScoringError::InconsistentRows {
                detail: format!("{} rows but {} targets", rows.len(), targets.len()),
            });
        }
        if params.trees == 0 {
            return Err(ScoringError::NoEstimators);
        }

        let width = rows[0].len();
        if let Some(position) = rows.iter().position(|row| row.len() != width) {
            return Err(ScoringError::InconsistentRows {
                detail: format!(
                    "row {position} has {} columns, expected {width}",
                    rows[position].len()
                ),
            });
        }

        let mut rng = seeded_rng(params.seed);
        let samples = rows.len();
        let trees = (0..params.trees)
            .map(|_| {
                let bootstrap: Vec<usize> =
                    (0..samples).map(|_| rng.gen_range(0..samples)).collect();
                RegressionTree::fit(rows, targets, bootstrap, params.tree)
            })
            .collect();

        Ok(Self { trees, width })
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64, ScoringError> {
        if row.len() != self.width {
            return Err(ScoringError::ShapeMismatch {
                expected: self.width,
                actual: row.len(),
            });
        }

        let total: f64 = self.trees.iter().map(|tree| tree.predict(row)).sum();
        Ok(total / self.trees.len() as f64)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(trees: usize) -> ForestParams {
        ForestParams {
            trees,
            tree: TreeParams::default(),
            seed: Some(42),
        }
    }

    fn linear_rows() -> (Vec<Vec<f64>>, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..200).map(|i| vec![i as f64 / 2.0]).collect();
        let targets = rows.iter().map(|row| 3.0 * row[0] + 1.0).collect();
        (rows, targets)
    }

    #[test]
    fn approximates_a_monotone_signal() {
        let (rows, targets) = linear_rows();
        let forest = RandomForestRegressor::fit(&rows, &targets, &params(20)).expect("fits");
        assert_eq!(forest.tree_count(), 20);
        assert_eq!(forest.width(), 1);

        let low = forest.predict(&[10.0]).expect("predicts");
        let high = forest.predict(&[90.0]).expect("predicts");
        assert!((low - 31.0).abs() < 5.0, "low prediction {low}");
        assert!((high - 271.0).abs() < 5.0, "high prediction {high}");
    }

    #[test]
    fn predictions_stay_within_training_target_range() {
        let (rows, targets) = linear_rows();
        let forest = RandomForestRegressor::fit(&rows, &targets, &params(10)).expect("fits");
        let max = targets.iter().cloned().fold(f64::MIN, f64::max);
        for probe in [-1_000.0, 0.0, 50.0, 1_000.0] {
            let value = forest.predict(&[probe]).expect("predicts");
            assert!((1.0..=max).contains(&value));
        }
    }

    #[test]
    fn seeded_forests_are_reproducible() {
        let (rows, targets) = linear_rows();
        let first = RandomForestRegressor::fit(&rows, &targets, &params(5)).expect("fits");
        let second = RandomForestRegressor::fit(&rows, &targets, &params(5)).expect("fits");
        assert_eq!(first.predict(&[33.3]).ok(), second.predict(&[33.3]).ok());
    }

    #[test]
    fn rejects_degenerate_training_input() {
        let empty: Vec<Vec<f64>> = Vec::new();
        assert!(matches!(
            RandomForestRegressor::fit(&empty, &[], &params(3)),
            Err(ScoringError::EmptyTrainingSet)
        ));

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            RandomForestRegressor::fit(&ragged, &[1.0, 2.0], &params(3)),
            Err(ScoringError::InconsistentRows { .. })
        ));

        let rows = vec![vec![1.0], vec![2.0]];
        assert!(matches!(
            RandomForestRegressor::fit(&rows, &[1.0, 2.0], &params(0)),
            Err(ScoringError::NoEstimators)
        ));
    }

    #[test]
    fn predict_checks_row_width() {
        let (rows, targets) = linear_rows();
        let forest = RandomForestRegressor::fit(&rows, &targets, &params(2)).expect("fits");
        let err = forest.predict(&[1.0, 2.0]).expect_err("too wide");
        assert!(matches!(
            err,
            ScoringError::ShapeMismatch {
                expected: 1,
                actual: 2
            }
        ));
    }
}
