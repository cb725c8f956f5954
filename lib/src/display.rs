use std::io::{self, Write};

use crate::{
  model::{Prediction, IMAGE_SIDE, MAX_INTENSITY},
  Error, Result,
};

/// Receives the one sample the harness evaluated.
pub trait SampleViewer {
  fn show(&mut self, prediction: &Prediction) -> Result<()>;
}

impl<V: SampleViewer + ?Sized> SampleViewer for &mut V {
  fn show(&mut self, prediction: &Prediction) -> Result<()> {
    (**self).show(prediction)
  }
}

/// Light to dark, like a reversed grey colormap: 0 is blank paper.
const RAMP: [char; 5] = [' ', '░', '▒', '▓', '█'];

pub fn title(prediction: &Prediction) -> String {
  format!(
    "ACTUAL {} | PREDICTION {}",
    prediction.actual, prediction.predicted
  )
}

/// Nearest-neighbour rendering of the 8x8 image, two characters per pixel so
/// the grid comes out roughly square.
pub fn render_grid(image: &[f32]) -> Vec<String> {
  image
    .chunks(IMAGE_SIDE)
    .map(|row| {
      row
        .iter()
        .flat_map(|&pixel| {
          let shade = shade(pixel);
          [shade, shade]
        })
        .collect()
    })
    .collect()
}

fn shade(pixel: f32) -> char {
  let level = (pixel / MAX_INTENSITY).clamp(0.0, 1.0);
  let last = RAMP.len() - 1;
  RAMP[(level * last as f32).round() as usize]
}

/// Writes the title and the grid to any writer, stdout by default.
pub struct TerminalViewer<W: Write> {
  out: W,
}

impl TerminalViewer<io::Stdout> {
  pub fn stdout() -> Self {
    Self::new(io::stdout())
  }
}

impl<W: Write> TerminalViewer<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> SampleViewer for TerminalViewer<W> {
  fn show(&mut self, prediction: &Prediction) -> Result<()> {
    let border = "-".repeat(IMAGE_SIDE * 2);
    writeln!(self.out, "{}", title(prediction)).map_err(Error::Display)?;
    writeln!(self.out, "+{border}+").map_err(Error::Display)?;
    for line in render_grid(&prediction.image) {
      writeln!(self.out, "|{line}|").map_err(Error::Display)?;
    }
    writeln!(self.out, "+{border}+").map_err(Error::Display)?;
    self.out.flush().map_err(Error::Display)
  }
}
