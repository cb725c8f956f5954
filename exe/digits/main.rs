mod app_config;

use digits::{pet, subcommands, utils};

use app_config::AppConfig;
use clap::{Parser, Subcommand};
use std::{error::Error, path::PathBuf};

#[derive(Parser)]
#[command(version, about = "Train a digit classifier and check it on one random test sample")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Split the dataset, train, and show one random test prediction
  Evaluate {
    /// YAML config file; flags given here override it
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Dataset in optdigits layout (64 pixels then the label per line)
    #[arg(short, long, value_name = "PATH")]
    data: Option<PathBuf>,
    /// Fraction of records used for training [default: 0.8]
    #[arg(short, long)]
    ratio: Option<f64>,
    #[arg(short, long)]
    seed: Option<u64>,
    /// svm or knn [default: svm]
    #[arg(long)]
    classifier: Option<subcommands::ClassifierKind>,
    #[arg(long)]
    gamma: Option<f64>,
    #[arg(short, long)]
    c: Option<f64>,
    #[arg(short, long)]
    k: Option<usize>,
    /// Pixel noise of the synthetic digits, as a fraction of full intensity
    #[arg(long)]
    noise: Option<f32>,
    #[arg(long, value_name = "INT")]
    per_class: Option<usize>,
    /// Also report accuracy over the whole test set
    #[arg(long)]
    score: bool,
  },
  /// Visit a virtual pet
  Pet {
    #[arg(long)]
    name: String,
    #[arg(long, default_value_t = 1)]
    age: u32,
    #[arg(long, default_value_t = 1.0)]
    weight: f64,
    #[arg(long, default_value = "(=^.^=)")]
    photo: String,
    #[arg(long)]
    feed: bool,
    #[arg(long)]
    play: bool,
  },
}

fn main() -> Result<(), Box<dyn Error>> {
  utils::init_logging()?;
  let args = Cli::parse();

  match args.command {
    Command::Evaluate {
      config,
      data,
      ratio,
      seed,
      classifier,
      gamma,
      c,
      k,
      noise,
      per_class,
      score,
    } => {
      let file_config = match config {
        Some(path) => AppConfig::from_file(&path)?,
        None => AppConfig::default(),
      };
      let cli_config = AppConfig {
        data,
        ratio,
        seed,
        classifier,
        gamma,
        c,
        k,
        noise,
        per_class,
        score: score.then_some(true),
      };
      let params = AppConfig::default()
        .merge(file_config)
        .merge(cli_config)
        .into_params();

      let outcome = match subcommands::Evaluate::new(params).run() {
        Ok(outcome) => outcome,
        Err(e) => {
          tracing::error!("evaluation failed: {e}");
          return Err(e.into());
        }
      };
      let verdict = if outcome.prediction.is_correct() {
        "correct"
      } else {
        "wrong"
      };
      println!("Prediction was {verdict}.");
      if let Some(evaluation) = outcome.evaluation {
        println!(
          "Test accuracy: {:.2}% ({}/{})",
          evaluation.accuracy() * 100.0,
          evaluation.correct,
          evaluation.total
        );
      }
    }
    Command::Pet {
      name,
      age,
      weight,
      photo,
      feed,
      play,
    } => {
      let pet = pet::Pet::new(name, age, weight, photo);
      for line in subcommands::Visit::new(pet, feed, play).run() {
        println!("{line}");
      }
    }
  }
  Ok(())
}
