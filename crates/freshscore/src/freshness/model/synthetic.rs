use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;

/// Randomly generated regression problem with a linear ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
    pub coefficients: Vec<f64>,
}

impl SyntheticDataset {
    pub fn samples(&self) -> usize {
        self.targets.len()
    }

    pub fn width(&self) -> usize {
        self.coefficients.len()
    }
}

/// Draws `samples` rows of standard-normal inputs and a noisy linear target.
///
/// Only `informative` columns carry weight, each drawn from `100 * U(0, 1)`
/// and placed at random positions. The rest have a zero coefficient.
pub fn make_regression<R: Rng + ?Sized>(
    rng: &mut R,
    samples: usize,
    features: usize,
    informative: usize,
    noise: f64,
) -> SyntheticDataset {
    let mut columns: Vec<usize> = (0..features).collect();
    columns.shuffle(rng);

    let mut coefficients = vec![0.0; features];
    for &column in columns.iter().take(informative.min(features)) {
        coefficients[column] = 100.0 * rng.gen::<f64>();
    }

    let mut rows = Vec::with_capacity(samples);
    let mut targets = Vec::with_capacity(samples);
    for _ in 0..samples {
        let row: Vec<f64> = (0..features)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect();
        let mut target: f64 = row
            .iter()
            .zip(&coefficients)
            .map(|(value, weight)| value * weight)
            .sum();
        if noise > 0.0 {
            target += noise * rng.sample::<f64, _>(StandardNormal);
        }
        rows.push(row);
        targets.push(target);
    }

    SyntheticDataset {
        features: rows,
        targets,
        coefficients,
    }
}
