use crate::error::ClassifierError;

use super::{FeatureVector, Label};

/// Anything that can be trained on labeled feature vectors and then label
/// unseen ones.
pub trait Classifier {
  /// Trains on paired `x`/`y`. Replaces whatever was learned before.
  fn fit(&mut self, x: &[FeatureVector], y: &[Label]) -> Result<(), ClassifierError>;

  /// One label per input, in input order.
  fn predict(&self, x: &[FeatureVector]) -> Result<Vec<Label>, ClassifierError>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
  fn fit(&mut self, x: &[FeatureVector], y: &[Label]) -> Result<(), ClassifierError> {
    (**self).fit(x, y)
  }

  fn predict(&self, x: &[FeatureVector]) -> Result<Vec<Label>, ClassifierError> {
    (**self).predict(x)
  }
}

/// Shared argument checks for `fit`.
pub(crate) fn check_training_set(x: &[FeatureVector], y: &[Label]) -> Result<(), ClassifierError> {
  if x.len() != y.len() {
    return Err(ClassifierError::ShapeMismatch {
      inputs: x.len(),
      labels: y.len(),
    });
  }
  if x.is_empty() {
    return Err(ClassifierError::EmptyTrainingSet);
  }
  Ok(())
}
