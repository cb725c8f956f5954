use std::{error::Error, path::{Path, PathBuf}};

use digits::{
  model::SvmParams,
  subcommands::{ClassifierKind, EvaluateParams},
};
use serde::Deserialize;

/// Settings for `evaluate`. Also defines the config file format: every field
/// is optional and unset fields fall through to the built-in defaults.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
  /// Dataset in optdigits text layout
  pub data: Option<PathBuf>,
  /// Fraction of records used for training
  pub ratio: Option<f64>,
  pub seed: Option<u64>,
  pub classifier: Option<ClassifierKind>,
  /// RBF kernel coefficient for svm
  pub gamma: Option<f64>,
  /// Regularization for svm
  pub c: Option<f64>,
  /// Neighbour count for knn
  pub k: Option<usize>,
  /// Pixel noise of the synthetic digits
  pub noise: Option<f32>,
  /// Synthetic samples per digit
  pub per_class: Option<usize>,
  /// Report accuracy over the whole test set
  pub score: Option<bool>,
}

impl AppConfig {
  pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    Self::from_yaml(&content)
  }

  pub fn from_yaml(content: &str) -> Result<Self, Box<dyn Error>> {
    Ok(serde_yaml::from_str(content)?)
  }

  // merge configs where the second overwrites the first
  pub fn merge(self, other: Self) -> Self {
    Self {
      data: other.data.or(self.data),
      ratio: other.ratio.or(self.ratio),
      seed: other.seed.or(self.seed),
      classifier: other.classifier.or(self.classifier),
      gamma: other.gamma.or(self.gamma),
      c: other.c.or(self.c),
      k: other.k.or(self.k),
      noise: other.noise.or(self.noise),
      per_class: other.per_class.or(self.per_class),
      score: other.score.or(self.score),
    }
  }

  pub fn into_params(self) -> EvaluateParams {
    let defaults = EvaluateParams::default();
    EvaluateParams {
      data: self.data,
      ratio: self.ratio.unwrap_or(defaults.ratio),
      seed: self.seed,
      classifier: self.classifier.unwrap_or(defaults.classifier),
      svm: SvmParams {
        gamma: self.gamma.or(defaults.svm.gamma),
        c: self.c.unwrap_or(defaults.svm.c),
      },
      k: self.k.unwrap_or(defaults.k),
      noise: self.noise.unwrap_or(defaults.noise),
      per_class: self.per_class.unwrap_or(defaults.per_class),
      score: self.score.unwrap_or(defaults.score),
    }
  }
}
