/// Growth limits shared by every tree in a forest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// CART regression tree grown on squared-error reduction.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grows a tree over `sample` (row indices into `rows`, duplicates allowed).
    ///
    /// Callers guarantee a non-empty sample and rows of equal width.
    pub(crate) fn fit(
        rows: &[Vec<f64>],
        targets: &[f64],
        sample: Vec<usize>,
        params: TreeParams,
    ) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let mut builder = TreeBuilder {
            rows,
            targets,
            width,
            params,
            nodes: Vec::new(),
            scratch: Vec::with_capacity(sample.len()),
        };
        builder.grow(sample, 0);
        Self {
            nodes: builder.nodes,
        }
    }

    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + walk(nodes, *left).max(walk(nodes, *right))
                }
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f64>],
    targets: &'a [f64],
    width: usize,
    params: TreeParams,
    nodes: Vec<Node>,
    scratch: Vec<(f64, f64)>,
}

impl TreeBuilder<'_> {
    /// Returns the arena index of the node built for `sample`.
    fn grow(&mut self, sample: Vec<usize>, depth: usize) -> usize {
        let mean = sample.iter().map(|&i| self.targets[i]).sum::<f64>() / sample.len() as f64;
        let slot = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });

        let depth_exhausted = self.params.max_depth.is_some_and(|limit| depth >= limit);
        if depth_exhausted || sample.len() < self.params.min_samples_split.max(2) {
            return slot;
        }

        let first = self.targets[sample[0]];
        if sample.iter().all(|&i| self.targets[i] == first) {
            return slot;
        }

        let Some(split) = self.best_split(&sample) else {
            return slot;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = sample
            .into_iter()
            .partition(|&i| self.rows[i][split.feature] <= split.threshold);

        let left = self.grow(left, depth + 1);
        let right = self.grow(right, depth + 1);
        self.nodes[slot] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        slot
    }

    /// Maximises `sum_l^2 / n_l + sum_r^2 / n_r`, which minimises the
    /// children's summed squared error.
    fn best_split(&mut self, sample: &[usize]) -> Option<SplitCandidate> {
        let count = sample.len() as f64;
        let total: f64 = sample.iter().map(|&i| self.targets[i]).sum();
        let parent = total * total / count;
        let tolerance = 1e-12 * parent.abs().max(1.0);

        let mut best: Option<SplitCandidate> = None;
        for feature in 0..self.width {
            self.scratch.clear();
            self.scratch
                .extend(sample.iter().map(|&i| (self.rows[i][feature], self.targets[i])));
            self.scratch.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_sum = 0.0;
            for k in 1..self.scratch.len() {
                left_sum += self.scratch[k - 1].1;
                let (previous, current) = (self.scratch[k - 1].0, self.scratch[k].0);
                if previous == current {
                    continue;
                }

                let left_count = k as f64;
                let right_sum = total - left_sum;
                let score = left_sum * left_sum / left_count
                    + right_sum * right_sum / (count - left_count);
                let gain = score - parent;
                if gain > tolerance && best.map_or(true, |current| gain > current.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: previous + (current - previous) / 2.0,
                        gain,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 0.5]).collect();
        let targets = (0..10).map(|i| if i < 5 { 10.0 } else { 90.0 }).collect();
        (rows, targets)
    }

    #[test]
    fn learns_single_step_with_one_split() {
        let (rows, targets) = step_data();
        let tree = RegressionTree::fit(&rows, &targets, (0..10).collect(), TreeParams::default());
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict(&[2.0, 0.5]), 10.0);
        assert_eq!(tree.predict(&[4.4, 0.5]), 10.0);
        assert_eq!(tree.predict(&[4.6, 0.5]), 90.0);
        assert_eq!(tree.predict(&[100.0, 0.5]), 90.0);
    }

    #[test]
    fn constant_targets_collapse_to_leaf() {
        let rows: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let targets = vec![3.0; 6];
        let tree = RegressionTree::fit(&rows, &targets, (0..6).collect(), TreeParams::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[42.0]), 3.0);
    }

    #[test]
    fn identical_inputs_cannot_be_split() {
        let rows = vec![vec![1.0]; 4];
        let targets = vec![1.0, 2.0, 3.0, 4.0];
        let tree = RegressionTree::fit(&rows, &targets, (0..4).collect(), TreeParams::default());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.predict(&[1.0]), 2.5);
    }

    #[test]
    fn max_depth_limits_growth() {
        let rows: Vec<Vec<f64>> = (0..32).map(|i| vec![i as f64]).collect();
        let targets: Vec<f64> = (0..32).map(|i| (i * i) as f64).collect();
        let params = TreeParams {
            max_depth: Some(2),
            ..TreeParams::default()
        };
        let tree = RegressionTree::fit(&rows, &targets, (0..32).collect(), params);
        assert!(tree.depth() <= 2);
        assert!(tree.leaf_count() <= 4);

        let full = RegressionTree::fit(&rows, &targets, (0..32).collect(), TreeParams::default());
        assert_eq!(full.leaf_count(), 32);
        assert_eq!(full.predict(&[7.0]), 49.0);
    }
}
