mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, CancioneroPaths, ConfigError};

use once_cell::sync::Lazy;

// Singleton del backend de config. Se resuelve una sola vez; si el directorio
// no se puede preparar el error queda guardado en lugar de abortar.
static CONFIG_BACKEND: Lazy<Result<TomlConfigBackend, ConfigError>> =
  Lazy::new(|| CancioneroPaths::detect().map(TomlConfigBackend::new));

/// Backend de config del proceso (portable o de sistema).
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.as_ref().map_err(|e| ConfigError::Unavailable(e.to_string()))
}
