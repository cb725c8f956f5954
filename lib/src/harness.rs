//! Train on the training half, then check the classifier against one random
//! sample of the test half.

use rand::Rng;
use tracing::{info, instrument};

use crate::{
  display::SampleViewer,
  error::ClassifierError,
  model::{Classifier, Prediction, Split},
  Error, Result,
};

/// Source of the test index to evaluate.
pub trait SampleSelector {
  /// An index in `[0, len)`; `len` is never zero.
  fn select(&mut self, len: usize) -> usize;
}

/// Uniform choice through any `rand` generator.
#[derive(Debug)]
pub struct RandomSelector<R: Rng>(pub R);

impl<R: Rng> SampleSelector for RandomSelector<R> {
  fn select(&mut self, len: usize) -> usize {
    self.0.gen_range(0..len)
  }
}

/// Always picks the same index.
#[derive(Debug, Clone, Copy)]
pub struct FixedSelector(pub usize);

impl SampleSelector for FixedSelector {
  fn select(&mut self, _len: usize) -> usize {
    self.0
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
  pub correct: usize,
  pub total: usize,
}

impl Evaluation {
  pub fn accuracy(&self) -> f64 {
    if self.total == 0 {
      0.0
    } else {
      self.correct as f64 / self.total as f64
    }
  }
}

pub struct Harness<C, V> {
  classifier: C,
  viewer: V,
}

impl<C: Classifier, V: SampleViewer> Harness<C, V> {
  pub fn new(classifier: C, viewer: V) -> Self {
    Self { classifier, viewer }
  }

  pub fn classifier(&self) -> &C {
    &self.classifier
  }

  pub fn viewer(&self) -> &V {
    &self.viewer
  }

  pub fn into_parts(self) -> (C, V) {
    (self.classifier, self.viewer)
  }

  /// fit → pick one test sample → predict it → show it.
  ///
  /// Fails with [`Error::EmptyDataset`] before touching the classifier if
  /// either half of the split is empty. Classifier errors are passed through
  /// as they are.
  #[instrument(skip_all)]
  pub fn run<S: SampleSelector + ?Sized>(
    &mut self,
    split: &Split,
    selector: &mut S,
  ) -> Result<Prediction> {
    check_split(split)?;
    self.fit(split)?;

    let len = split.test_x.len();
    let index = selector.select(len);
    if index >= len {
      return Err(Error::IndexOutOfRange { index, len });
    }
    let image = split.test_x[index];
    let predicted = self.classifier.predict(&[image])?;
    let predicted = match predicted.as_slice() {
      [label] => *label,
      other => {
        return Err(
          ClassifierError::UnexpectedOutput {
            expected: 1,
            got: other.len(),
          }
          .into(),
        )
      }
    };

    let prediction = Prediction {
      image,
      actual: split.test_y[index],
      predicted,
    };
    info!(
      "test sample {index}: actual {}, predicted {}",
      prediction.actual, prediction.predicted
    );
    self.viewer.show(&prediction)?;
    Ok(prediction)
  }

  /// fit, then [`Harness::score`] the whole test half.
  #[instrument(skip_all)]
  pub fn evaluate_all(&mut self, split: &Split) -> Result<Evaluation> {
    check_split(split)?;
    self.fit(split)?;
    self.score(split)
  }

  /// Predicts every test sample with the classifier as currently trained.
  pub fn score(&self, split: &Split) -> Result<Evaluation> {
    if split.test_x.is_empty() {
      return Err(Error::empty_dataset("test"));
    }
    let predicted = self.classifier.predict(&split.test_x)?;
    if predicted.len() != split.test_y.len() {
      return Err(
        ClassifierError::UnexpectedOutput {
          expected: split.test_y.len(),
          got: predicted.len(),
        }
        .into(),
      );
    }
    let correct = predicted
      .iter()
      .zip(split.test_y.iter())
      .filter(|(p, a)| p == a)
      .count();
    let evaluation = Evaluation {
      correct,
      total: predicted.len(),
    };
    info!(
      "accuracy {:.3} ({}/{})",
      evaluation.accuracy(),
      evaluation.correct,
      evaluation.total
    );
    Ok(evaluation)
  }

  fn fit(&mut self, split: &Split) -> Result<()> {
    info!("training on {} samples", split.train_x.len());
    self.classifier.fit(&split.train_x, &split.train_y)?;
    Ok(())
  }
}

/// Paired halves of equal length, neither of them empty.
fn check_split(split: &Split) -> Result<()> {
  for (inputs, outputs) in [
    (split.train_x.len(), split.train_y.len()),
    (split.test_x.len(), split.test_y.len()),
  ] {
    if inputs != outputs {
      return Err(Error::ShapeMismatch { inputs, outputs });
    }
  }
  if split.train_x.is_empty() {
    return Err(Error::empty_dataset("train"));
  }
  if split.test_x.is_empty() {
    return Err(Error::empty_dataset("test"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{FeatureVector, Label, INPUT_DIMENSION};
  use rand::{rngs::StdRng, SeedableRng};
  use std::result::Result as StdResult;

  /// Predicts `answer` for everything and counts calls.
  #[derive(Default)]
  struct Constant {
    answer: Label,
    fit_calls: usize,
    predict_calls: std::cell::Cell<usize>,
    trained_on: usize,
  }

  impl Classifier for Constant {
    fn fit(&mut self, x: &[FeatureVector], _y: &[Label]) -> StdResult<(), ClassifierError> {
      self.fit_calls += 1;
      self.trained_on = x.len();
      Ok(())
    }

    fn predict(&self, x: &[FeatureVector]) -> StdResult<Vec<Label>, ClassifierError> {
      self.predict_calls.set(self.predict_calls.get() + 1);
      Ok(vec![self.answer; x.len()])
    }
  }

  struct Broken;

  impl Classifier for Broken {
    fn fit(&mut self, _x: &[FeatureVector], _y: &[Label]) -> StdResult<(), ClassifierError> {
      Err(ClassifierError::backend("solver diverged"))
    }

    fn predict(&self, _x: &[FeatureVector]) -> StdResult<Vec<Label>, ClassifierError> {
      Ok(Vec::new())
    }
  }

  /// Fits fine but answers with the wrong number of labels.
  struct Chatty;

  impl Classifier for Chatty {
    fn fit(&mut self, _x: &[FeatureVector], _y: &[Label]) -> StdResult<(), ClassifierError> {
      Ok(())
    }

    fn predict(&self, x: &[FeatureVector]) -> StdResult<Vec<Label>, ClassifierError> {
      Ok(vec![0; x.len() + 1])
    }
  }

  #[derive(Default)]
  struct Recorder {
    shown: Vec<Prediction>,
  }

  impl SampleViewer for Recorder {
    fn show(&mut self, prediction: &Prediction) -> Result<()> {
      self.shown.push(prediction.clone());
      Ok(())
    }
  }

  fn image(value: f32) -> FeatureVector {
    [value; INPUT_DIMENSION]
  }

  fn split(train: usize, test: usize) -> Split {
    Split {
      train_x: (0..train).map(|i| image(i as f32)).collect(),
      train_y: (0..train).map(|i| i as Label).collect(),
      test_x: (0..test).map(|i| image(100.0 + i as f32)).collect(),
      test_y: (0..test).map(|i| 50 + i as Label).collect(),
    }
  }

  #[test]
  fn test_run_shows_selected_sample() {
    let mut harness = Harness::new(
      Constant {
        answer: 9,
        ..Default::default()
      },
      Recorder::default(),
    );
    let split = split(4, 3);
    let prediction = harness.run(&split, &mut FixedSelector(2)).unwrap();

    assert_eq!(
      prediction,
      Prediction {
        image: image(102.0),
        actual: 52,
        predicted: 9,
      }
    );
    assert!(!prediction.is_correct());
    assert_eq!(harness.classifier().fit_calls, 1);
    assert_eq!(harness.classifier().trained_on, 4);
    assert_eq!(harness.classifier().predict_calls.get(), 1);
    assert_eq!(harness.viewer().shown, vec![prediction]);
  }

  #[test]
  fn test_empty_test_split_never_calls_classifier() {
    let mut harness = Harness::new(Constant::default(), Recorder::default());
    let err = harness.run(&split(5, 0), &mut FixedSelector(0)).unwrap_err();

    assert!(matches!(err, Error::EmptyDataset { split: "test" }));
    assert_eq!(harness.classifier().fit_calls, 0);
    assert_eq!(harness.classifier().predict_calls.get(), 0);
    assert!(harness.viewer().shown.is_empty());
  }

  #[test]
  fn test_empty_train_split_never_calls_classifier() {
    let mut harness = Harness::new(Constant::default(), Recorder::default());
    let err = harness.run(&split(0, 5), &mut FixedSelector(0)).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset { split: "train" }));
    assert_eq!(harness.classifier().fit_calls, 0);
  }

  #[test]
  fn test_unpaired_split_never_calls_classifier() {
    let mut unpaired_test = split(3, 2);
    unpaired_test.test_y.pop();
    let mut unpaired_train = split(3, 2);
    unpaired_train.train_y.push(7);

    for (broken, inputs, outputs) in [(unpaired_test, 2, 1), (unpaired_train, 3, 4)] {
      let mut harness = Harness::new(Constant::default(), Recorder::default());
      let err = harness.run(&broken, &mut FixedSelector(1)).unwrap_err();
      match err {
        Error::ShapeMismatch {
          inputs: i,
          outputs: o,
        } => assert_eq!((i, o), (inputs, outputs)),
        other => panic!("unexpected error {other:?}"),
      }
      assert!(harness.evaluate_all(&broken).is_err());
      assert_eq!(harness.classifier().fit_calls, 0);
      assert_eq!(harness.classifier().predict_calls.get(), 0);
      assert!(harness.viewer().shown.is_empty());
    }
  }

  #[test]
  fn test_classifier_failure_propagates_without_display() {
    let mut harness = Harness::new(Broken, Recorder::default());
    let err = harness.run(&split(2, 2), &mut FixedSelector(0)).unwrap_err();
    match err {
      Error::Classifier(ClassifierError::Backend(msg)) => assert_eq!(msg, "solver diverged"),
      other => panic!("unexpected error {other:?}"),
    }
    assert!(harness.viewer().shown.is_empty());
  }

  #[test]
  fn test_wrong_prediction_count() {
    let mut harness = Harness::new(Chatty, Recorder::default());
    let err = harness.run(&split(2, 2), &mut FixedSelector(0)).unwrap_err();
    assert!(matches!(
      err,
      Error::Classifier(ClassifierError::UnexpectedOutput { expected: 1, got: 2 })
    ));
  }

  #[test]
  fn test_out_of_range_selection() {
    let mut harness = Harness::new(Constant::default(), Recorder::default());
    let err = harness.run(&split(2, 3), &mut FixedSelector(3)).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 3 }));
    assert!(harness.viewer().shown.is_empty());
  }

  #[test]
  fn test_random_selector_stays_in_range() {
    let mut selector = RandomSelector(StdRng::seed_from_u64(1));
    for len in 1..50 {
      assert!(selector.select(len) < len);
    }
    assert_eq!(selector.select(1), 0);
  }

  #[test]
  fn test_seeded_runs_pick_the_same_sample() {
    let split = split(3, 20);
    let run = |seed| {
      let mut harness = Harness::new(Constant::default(), Recorder::default());
      harness
        .run(&split, &mut RandomSelector(StdRng::seed_from_u64(seed)))
        .unwrap()
    };
    assert_eq!(run(11), run(11));
  }

  #[test]
  fn test_evaluate_all() {
    let mut harness = Harness::new(
      Constant {
        answer: 51,
        ..Default::default()
      },
      Recorder::default(),
    );
    let evaluation = harness.evaluate_all(&split(2, 4)).unwrap();
    assert_eq!(evaluation, Evaluation { correct: 1, total: 4 });
    assert_eq!(evaluation.accuracy(), 0.25);
    assert!(harness.viewer().shown.is_empty());

    let err = harness.score(&split(2, 0)).unwrap_err();
    assert!(matches!(err, Error::EmptyDataset { split: "test" }));
  }
}
