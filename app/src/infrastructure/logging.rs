use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so stdout only carries catalog output.
///
/// `RUST_LOG` wins over the `-v` count when set.
pub fn init(verbose: u8) {
  let default_level = match verbose {
    0 => Level::WARN,
    1 => Level::INFO,
    _ => Level::DEBUG,
  };

  let filter = EnvFilter::builder().with_default_directive(default_level.into()).from_env_lossy();

  // A second init (tests, embedding) is not an error worth surfacing.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
