pub use evaluate::*;
pub use visit::*;

pub mod evaluate;
pub mod visit;
