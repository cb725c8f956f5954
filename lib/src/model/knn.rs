use itertools::Itertools;
use tracing::debug;

use super::{
  classifier::check_training_set, Classifier, FeatureVector, InputsVec, Label, OutputsVec,
};
use crate::error::ClassifierError;

pub const DEFAULT_K: usize = 3;

/// k-nearest-neighbours by squared euclidean distance.
///
/// Votes are counted over the `k` closest training samples. On a tied count the
/// label that shows up first in distance order wins.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
  k: usize,
  x: InputsVec,
  y: OutputsVec,
}

impl KnnClassifier {
  pub fn new(k: usize) -> Self {
    Self {
      k: k.max(1),
      x: Vec::new(),
      y: Vec::new(),
    }
  }

  pub fn k(&self) -> usize {
    self.k
  }

  fn predict_one(&self, sample: &FeatureVector) -> Label {
    let nearest = self
      .x
      .iter()
      .zip(self.y.iter())
      .map(|(x, &y)| (squared_distance(x, sample), y))
      .sorted_by(|a, b| a.0.total_cmp(&b.0))
      .take(self.k);

    // (label, votes), in order of first appearance
    let mut votes: Vec<(Label, usize)> = Vec::new();
    for (_, label) in nearest {
      match votes.iter_mut().find(|(l, _)| *l == label) {
        Some(entry) => entry.1 += 1,
        None => votes.push((label, 1)),
      }
    }
    let mut best = votes[0];
    for &candidate in &votes[1..] {
      if candidate.1 > best.1 {
        best = candidate;
      }
    }
    best.0
  }
}

impl Default for KnnClassifier {
  fn default() -> Self {
    Self::new(DEFAULT_K)
  }
}

impl Classifier for KnnClassifier {
  fn fit(&mut self, x: &[FeatureVector], y: &[Label]) -> Result<(), ClassifierError> {
    check_training_set(x, y)?;
    self.x = x.to_vec();
    self.y = y.to_vec();
    debug!("knn memorised {} samples, k = {}", self.x.len(), self.k);
    Ok(())
  }

  fn predict(&self, x: &[FeatureVector]) -> Result<Vec<Label>, ClassifierError> {
    if self.x.is_empty() {
      return Err(ClassifierError::NotFitted);
    }
    Ok(x.iter().map(|sample| self.predict_one(sample)).collect())
  }
}

fn squared_distance(a: &FeatureVector, b: &FeatureVector) -> f32 {
  a.iter().zip(b.iter()).map(|(p, q)| (p - q) * (p - q)).sum()
}
