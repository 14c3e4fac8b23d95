use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Variable de entorno para el modo portable: la config cuelga de este directorio.
pub const BASE_DIR_ENV: &str = "CANCIONERO_BASE_DIR";

const CONFIG_FILE: &str = "cancionero.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
  #[error("config directory unavailable: {0}")]
  Unavailable(String),
}

/// Dónde vive `cancionero.toml`.
///
/// Con `CANCIONERO_BASE_DIR` todo queda bajo `{base}/config`; si no, se usa el
/// directorio de configuración de la plataforma.
#[derive(Debug, Clone)]
pub struct CancioneroPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
}

impl CancioneroPaths {
  pub fn detect() -> Result<Self, ConfigError> {
    match std::env::var(BASE_DIR_ENV) {
      Ok(base) if !base.trim().is_empty() => Self::rooted_at(base),
      _ => {
        let proj_dirs =
          ProjectDirs::from("com", "cancionero", "cancionero").ok_or(ConfigError::Directories)?;
        let config_dir = proj_dirs.config_dir().to_path_buf();
        std::fs::create_dir_all(&config_dir)?;
        Ok(Self { base_dir: config_dir.clone(), config_dir })
      }
    }
  }

  /// Paths enraizados en un directorio concreto, sin mirar el entorno.
  pub fn rooted_at(base: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let base_dir = base.into();
    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir)?;
    Ok(Self { base_dir, config_dir })
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE)
  }

  pub fn is_portable(&self) -> bool {
    self.config_dir.parent() == Some(Path::new(&self.base_dir))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use tempfile::tempdir;

  struct EnvVarGuard {
    key: String,
    original: Option<String>,
  }

  impl EnvVarGuard {
    fn new(key: &str, value: &str) -> Self {
      let original = std::env::var(key).ok();
      unsafe { std::env::set_var(key, value) };
      EnvVarGuard { key: key.to_owned(), original }
    }
  }

  impl Drop for EnvVarGuard {
    fn drop(&mut self) {
      match &self.original {
        Some(val) => unsafe { std::env::set_var(&self.key, val) },
        None => unsafe { std::env::remove_var(&self.key) },
      }
    }
  }

  #[test]
  #[serial]
  fn base_dir_env_enables_portable_mode() {
    let tmp = tempdir().unwrap();
    let _env = EnvVarGuard::new(BASE_DIR_ENV, tmp.path().to_str().unwrap());

    let paths = CancioneroPaths::detect().unwrap();

    assert_eq!(paths.base_dir, tmp.path());
    assert!(paths.config_dir.exists());
    assert!(paths.is_portable());
    assert_eq!(paths.config_file(), tmp.path().join("config").join("cancionero.toml"));
  }

  #[test]
  fn rooted_at_creates_config_dir() {
    let tmp = tempdir().unwrap();
    let paths = CancioneroPaths::rooted_at(tmp.path()).unwrap();
    assert!(paths.config_dir.exists());
    assert_eq!(paths.base_dir, tmp.path());
  }
}
