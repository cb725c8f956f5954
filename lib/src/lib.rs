pub mod display;
pub mod error;
pub mod harness;
pub mod model;
pub mod pet;
pub mod subcommands;
pub mod utils;

pub use error::{ClassifierError, Error, Result};
pub use harness::{Evaluation, FixedSelector, Harness, RandomSelector, SampleSelector};
