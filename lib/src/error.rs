//! Error types for splitting, evaluation and dataset loading.

use thiserror::Error;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that halt the evaluation flow.
#[derive(Debug, Error)]
pub enum Error {
  /// The train or test set an operation needs has no records.
  #[error("{split} set is empty")]
  EmptyDataset { split: &'static str },

  /// Inputs and outputs are not paired one-to-one.
  #[error("shape mismatch: {inputs} inputs but {outputs} outputs")]
  ShapeMismatch { inputs: usize, outputs: usize },

  /// Failure surfaced by a classifier's fit or predict.
  #[error(transparent)]
  Classifier(#[from] ClassifierError),

  /// A sample selector picked an index outside the test set.
  #[error("selected index {index} is out of range for {len} test records")]
  IndexOutOfRange { index: usize, len: usize },

  /// Malformed line in a dataset file.
  #[error("line {line}: {reason}")]
  Parse { line: usize, reason: String },

  #[error("failed to read dataset: {0}")]
  Io(#[from] std::io::Error),

  /// The display collaborator could not render a prediction.
  #[error("failed to display prediction: {0}")]
  Display(#[source] std::io::Error),
}

impl Error {
  #[must_use]
  pub const fn empty_dataset(split: &'static str) -> Self {
    Self::EmptyDataset { split }
  }

  #[must_use]
  pub fn parse(line: usize, reason: impl Into<String>) -> Self {
    Self::Parse {
      line,
      reason: reason.into(),
    }
  }
}

/// Errors raised by [`crate::model::Classifier`] implementations.
#[derive(Debug, Error)]
pub enum ClassifierError {
  #[error("classifier has not been fitted")]
  NotFitted,

  #[error("cannot fit on an empty training set")]
  EmptyTrainingSet,

  #[error("shape mismatch: {inputs} feature vectors but {labels} labels")]
  ShapeMismatch { inputs: usize, labels: usize },

  /// The learning backend rejected the data or failed to converge.
  #[error("classifier backend failed: {0}")]
  Backend(String),

  #[error("expected {expected} predicted labels, got {got}")]
  UnexpectedOutput { expected: usize, got: usize },
}

impl ClassifierError {
  #[must_use]
  pub fn backend(details: impl ToString) -> Self {
    Self::Backend(details.to_string())
  }
}
