#[cfg(not(debug_assertions))]
use human_panic::setup_panic;
use tracing::subscriber::{self, DefaultGuard, SetGlobalDefaultError};

#[cfg(debug_assertions)]
extern crate better_panic;

use tracing_subscriber::{fmt, EnvFilter};

// [NOTE] tracing
//
// In code use:
//
// use tracing::{trace, debug, info, warn, error, instrument};
//
// `#[instrument]` opens a span named after the function on every call and
// records its arguments as fields (use `skip_all` for datasets).

/// `RUST_LOG` wins; otherwise `info` for everything.
fn env_filter() -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn install_logger() -> Result<(), SetGlobalDefaultError> {
  let subscriber = fmt().compact().with_env_filter(env_filter()).finish();
  subscriber::set_global_default(subscriber)
}

pub fn init_logging() -> Result<(), SetGlobalDefaultError> {
  // Human Panic. Only enabled when *not* debugging.
  #[cfg(not(debug_assertions))]
  {
    setup_panic!();
  }

  // Better Panic. Only enabled *when* debugging.
  #[cfg(debug_assertions)]
  {
    better_panic::Settings::debug()
      .most_recent_first(false)
      .lineno_suffix(true)
      .verbosity(better_panic::Verbosity::Full)
      .install();
  }

  install_logger()?;

  Ok(())
}

/// Thread-local subscriber for tests, routed through the libtest capture.
/// Logging stops when the guard drops.
pub fn init_logging_tests() -> DefaultGuard {
  let subscriber = fmt()
    .compact()
    .with_env_filter(env_filter())
    .with_test_writer()
    .finish();
  subscriber::set_default(subscriber)
}
