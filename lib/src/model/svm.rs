use itertools::Itertools;
use linfa::prelude::*;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};
use tracing::{debug, info, instrument};

use super::{classifier::check_training_set, Classifier, FeatureVector, Label, INPUT_DIMENSION};
use crate::error::ClassifierError;

/// Regularization used when none is configured.
pub const DEFAULT_C: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvmParams {
  /// RBF kernel coefficient in `exp(-gamma * |x - x'|^2)`.
  /// `None` derives it from the training data as `1 / (n_features * var(X))`.
  pub gamma: Option<f64>,
  pub c: f64,
}

impl Default for SvmParams {
  fn default() -> Self {
    Self {
      gamma: None,
      c: DEFAULT_C,
    }
  }
}

/// Binary machine separating `classes[positive]` (true) from `classes[negative]`.
struct PairModel {
  positive: usize,
  negative: usize,
  model: Svm<f64, bool>,
}

/// RBF support vector classifier, one-vs-one over every pair of classes seen
/// during `fit`. Prediction is a pairwise vote; ties go to the smaller label.
pub struct SvmClassifier {
  params: SvmParams,
  classes: Vec<Label>,
  pairs: Vec<PairModel>,
}

impl SvmClassifier {
  pub fn new(params: SvmParams) -> Self {
    Self {
      params,
      classes: Vec::new(),
      pairs: Vec::new(),
    }
  }

  pub fn classes(&self) -> &[Label] {
    &self.classes
  }
}

impl Default for SvmClassifier {
  fn default() -> Self {
    Self::new(SvmParams::default())
  }
}

impl Classifier for SvmClassifier {
  #[instrument(level = "debug", skip_all)]
  fn fit(&mut self, x: &[FeatureVector], y: &[Label]) -> Result<(), ClassifierError> {
    check_training_set(x, y)?;
    let classes: Vec<Label> = y.iter().copied().unique().sorted().collect();
    let gamma = self.params.gamma.unwrap_or_else(|| scale_gamma(x));
    if !(gamma.is_finite() && gamma > 0.0) {
      return Err(ClassifierError::backend(format!(
        "gamma must be finite and positive, got {gamma}"
      )));
    }
    info!(
      "fitting svm on {} samples, {} classes, gamma = {gamma:e}, c = {}",
      x.len(),
      classes.len(),
      self.params.c
    );

    let mut pairs = Vec::new();
    for (positive, negative) in (0..classes.len()).tuple_combinations() {
      let (pos_label, neg_label) = (classes[positive], classes[negative]);
      let rows: Vec<usize> = (0..y.len())
        .filter(|&i| y[i] == pos_label || y[i] == neg_label)
        .collect();
      let records = to_matrix(rows.iter().map(|&i| &x[i]))?;
      let targets = Array1::from_iter(rows.iter().map(|&i| y[i] == pos_label));
      let dataset = Dataset::new(records, targets);

      // linfa's gaussian kernel is exp(-|x - x'|^2 / eps)
      let model = Svm::<_, bool>::params()
        .pos_neg_weights(self.params.c, self.params.c)
        .gaussian_kernel(1.0 / gamma)
        .fit(&dataset)
        .map_err(ClassifierError::backend)?;
      debug!("trained {pos_label} vs {neg_label} on {} samples", rows.len());
      pairs.push(PairModel {
        positive,
        negative,
        model,
      });
    }

    self.classes = classes;
    self.pairs = pairs;
    Ok(())
  }

  fn predict(&self, x: &[FeatureVector]) -> Result<Vec<Label>, ClassifierError> {
    match self.classes.as_slice() {
      [] => return Err(ClassifierError::NotFitted),
      [only] => return Ok(vec![*only; x.len()]),
      _ => {}
    }
    if x.is_empty() {
      return Ok(Vec::new());
    }

    let records = to_matrix(x.iter())?;
    let mut votes = vec![vec![0usize; self.classes.len()]; x.len()];
    for pair in &self.pairs {
      let outcome: Array1<bool> = pair.model.predict(&records);
      for (row, &is_positive) in outcome.iter().enumerate() {
        let winner = if is_positive { pair.positive } else { pair.negative };
        votes[row][winner] += 1;
      }
    }

    Ok(votes.iter().map(|row| self.classes[most_votes(row)]).collect())
  }
}

/// Index of the highest count; ties go to the lowest index, which is the
/// smaller label since classes are kept sorted.
fn most_votes(row: &[usize]) -> usize {
  let mut best = 0;
  for (class, &count) in row.iter().enumerate() {
    if count > row[best] {
      best = class;
    }
  }
  best
}

/// `1 / (n_features * var(X))`, or 1.0 for constant data.
pub fn scale_gamma(x: &[FeatureVector]) -> f64 {
  let n = (x.len() * INPUT_DIMENSION) as f64;
  if n == 0.0 {
    return 1.0;
  }
  let values = || x.iter().flat_map(|row| row.iter().map(|&v| f64::from(v)));
  let mean = values().sum::<f64>() / n;
  let variance = values().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
  if variance > 0.0 {
    1.0 / (INPUT_DIMENSION as f64 * variance)
  } else {
    1.0
  }
}

fn to_matrix<'a>(
  rows: impl Iterator<Item = &'a FeatureVector>,
) -> Result<Array2<f64>, ClassifierError> {
  let flat: Vec<f64> = rows.flat_map(|row| row.iter().map(|&v| f64::from(v))).collect();
  let n = flat.len() / INPUT_DIMENSION;
  Array2::from_shape_vec((n, INPUT_DIMENSION), flat).map_err(ClassifierError::backend)
}
