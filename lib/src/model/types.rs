/// Pixels per image side.
pub const IMAGE_SIDE: usize = 8;
pub const INPUT_DIMENSION: usize = IMAGE_SIDE * IMAGE_SIDE;
/// Digits 0 to 9.
pub const N_CLASSES: usize = 10;
/// Brightest intensity in the reference 8x8 digits data.
pub const MAX_INTENSITY: f32 = 16.0;
pub const DEFAULT_RATIO: f64 = 0.8;

pub type FeatureVector = [f32; INPUT_DIMENSION];
pub type Label = u8;

pub type InputsVec = Vec<FeatureVector>;
pub type OutputsVec = Vec<Label>;

pub type Dataset = (InputsVec, OutputsVec);

/// Result of a positional train/test cut. Both halves keep the original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Split {
  pub train_x: InputsVec,
  pub train_y: OutputsVec,
  pub test_x: InputsVec,
  pub test_y: OutputsVec,
}

/// One test sample together with what the classifier made of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
  pub image: FeatureVector,
  pub actual: Label,
  pub predicted: Label,
}

impl Prediction {
  pub fn is_correct(&self) -> bool {
    self.actual == self.predicted
  }
}
