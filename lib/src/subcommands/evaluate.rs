use std::{fmt, path::PathBuf, str::FromStr};

use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use tracing::info;

use crate::{
  display::{SampleViewer, TerminalViewer},
  harness::{Evaluation, Harness, RandomSelector},
  model::{
    read_dataset, split_dataset, synthetic_digits, Classifier, Dataset, KnnClassifier, Prediction,
    SvmClassifier, SvmParams, DEFAULT_RATIO,
  },
  Result,
};

/// Roughly the per-digit count of the reference 8x8 digits data.
pub const DEFAULT_PER_CLASS: usize = 180;
pub const DEFAULT_NOISE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
  #[default]
  Svm,
  Knn,
}

impl FromStr for ClassifierKind {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "svm" => Ok(Self::Svm),
      "knn" => Ok(Self::Knn),
      other => Err(format!("unknown classifier {other:?}, expected svm or knn")),
    }
  }
}

impl fmt::Display for ClassifierKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Svm => write!(f, "svm"),
      Self::Knn => write!(f, "knn"),
    }
  }
}

/// Fully resolved settings for one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateParams {
  /// Dataset file; the built-in synthetic digits are used when absent.
  pub data: Option<PathBuf>,
  pub ratio: f64,
  /// Seeds both the synthetic data and the sample choice. Entropy when absent.
  pub seed: Option<u64>,
  pub classifier: ClassifierKind,
  pub svm: SvmParams,
  pub k: usize,
  pub noise: f32,
  pub per_class: usize,
  /// Also report accuracy over the whole test half.
  pub score: bool,
}

impl Default for EvaluateParams {
  fn default() -> Self {
    Self {
      data: None,
      ratio: DEFAULT_RATIO,
      seed: None,
      classifier: ClassifierKind::default(),
      svm: SvmParams::default(),
      k: crate::model::DEFAULT_K,
      noise: DEFAULT_NOISE,
      per_class: DEFAULT_PER_CLASS,
      score: false,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
  pub prediction: Prediction,
  pub evaluation: Option<Evaluation>,
}

pub struct Evaluate {
  params: EvaluateParams,
}

impl Evaluate {
  pub fn new(params: EvaluateParams) -> Self {
    Self { params }
  }

  pub fn run(self) -> Result<Outcome> {
    self.run_with(TerminalViewer::stdout())
  }

  /// load → split → fit → predict one random test sample → show it.
  pub fn run_with<V: SampleViewer>(self, viewer: V) -> Result<Outcome> {
    let params = self.params;
    let mut rng = match params.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };

    let (x, y): Dataset = match &params.data {
      Some(path) => read_dataset(path)?,
      None => {
        info!(
          "no dataset given, generating {} synthetic samples per digit",
          params.per_class
        );
        synthetic_digits(params.per_class, params.noise, &mut rng)
      }
    };
    info!("loaded {} records", x.len());
    let split = split_dataset(x, y, params.ratio)?;

    let classifier: Box<dyn Classifier> = match params.classifier {
      ClassifierKind::Svm => Box::new(SvmClassifier::new(params.svm)),
      ClassifierKind::Knn => Box::new(KnnClassifier::new(params.k)),
    };
    info!("using {} classifier", params.classifier);

    let mut harness = Harness::new(classifier, viewer);
    let prediction = harness.run(&split, &mut RandomSelector(&mut rng))?;
    let evaluation = if params.score {
      Some(harness.score(&split)?)
    } else {
      None
    };
    Ok(Outcome {
      prediction,
      evaluation,
    })
  }
}
