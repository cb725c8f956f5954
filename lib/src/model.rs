pub mod classifier;
pub mod knn;
pub mod svm;
pub mod synthetic;
pub mod types;
pub mod utils;

pub use classifier::*;
pub use knn::*;
pub use svm::*;
pub use synthetic::*;
pub use types::*;
pub use utils::*;
