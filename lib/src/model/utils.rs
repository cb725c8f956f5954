use std::path::Path;

use tracing::{debug, instrument};

use super::{Dataset, FeatureVector, InputsVec, Label, OutputsVec, Split, INPUT_DIMENSION};
use crate::{Error, Result};

/// Parses the optdigits text layout: each non-empty line holds the 64 pixel
/// values followed by the label, separated by commas and/or whitespace.
/// Lines starting with `#` are skipped.
pub fn parse_dataset(content: &str) -> Result<Dataset> {
  let mut x: InputsVec = Vec::new();
  let mut y: OutputsVec = Vec::new();
  for (i, line) in content.lines().enumerate() {
    let line_no = i + 1;
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    let parts: Vec<&str> = line
      .split(|c: char| c == ',' || c.is_whitespace())
      .filter(|part| !part.is_empty())
      .collect();
    if parts.len() != INPUT_DIMENSION + 1 {
      return Err(Error::parse(
        line_no,
        format!("expected {} values, got {}", INPUT_DIMENSION + 1, parts.len()),
      ));
    }
    let pixels = parts[..INPUT_DIMENSION]
      .iter()
      .map(|val| -> Result<f32> {
        let pixel = val
          .parse::<f32>()
          .map_err(|e| Error::parse(line_no, format!("bad pixel value {val:?}: {e}")))?;
        if !pixel.is_finite() {
          return Err(Error::parse(line_no, format!("pixel value {val:?} is not finite")));
        }
        Ok(pixel)
      })
      .collect::<Result<Vec<f32>>>()?;
    let label_str = parts[INPUT_DIMENSION];
    let label = label_str
      .parse::<Label>()
      .map_err(|e| Error::parse(line_no, format!("bad label {label_str:?}: {e}")))?;
    let image: FeatureVector = pixels
      .try_into()
      .map_err(|_| Error::parse(line_no, "wrong number of pixels"))?;
    x.push(image);
    y.push(label);
  }
  Ok((x, y))
}

pub fn read_dataset(path: &Path) -> Result<Dataset> {
  let content = std::fs::read_to_string(path)?;
  let dataset = parse_dataset(&content)?;
  debug!("read {} records from {:?}", dataset.0.len(), path);
  Ok(dataset)
}

/// Index of the cut: `floor(len * ratio)` clamped to `[0, len]`. NaN cuts at 0.
pub fn splitting_point(len: usize, ratio: f64) -> usize {
  // float to int `as` casts saturate, so negatives and NaN land on 0
  ((len as f64 * ratio).floor() as usize).min(len)
}

/// Order-preserving positional partition of paired records.
/// Returns `(train_x, train_y, test_x, test_y)`.
pub fn split_at_ratio<X, Y>(
  mut x: Vec<X>,
  mut y: Vec<Y>,
  ratio: f64,
) -> Result<(Vec<X>, Vec<Y>, Vec<X>, Vec<Y>)> {
  if x.len() != y.len() {
    return Err(Error::ShapeMismatch {
      inputs: x.len(),
      outputs: y.len(),
    });
  }
  let point = splitting_point(x.len(), ratio);
  let x_test = x.split_off(point);
  let y_test = y.split_off(point);
  Ok((x, y, x_test, y_test))
}

#[instrument(level = "debug", skip(x, y))]
pub fn split_dataset(x: InputsVec, y: OutputsVec, ratio: f64) -> Result<Split> {
  let (train_x, train_y, test_x, test_y) = split_at_ratio(x, y, ratio)?;
  debug!(
    "dataset split: {} training, {} test",
    train_x.len(),
    test_x.len()
  );
  Ok(Split {
    train_x,
    train_y,
    test_x,
    test_y,
  })
}
