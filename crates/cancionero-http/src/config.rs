use cancionero_config::{ConfigBackend, ConfigError, TomlConfigBackend, config_backend};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Variable de entorno que sustituye `base_url` sin tocar el archivo.
pub const API_URL_ENV: &str = "CANCIONERO_API_URL";

const API_PREFIX: &str = "/api";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
  /// Raíz del servicio remoto, sin el prefijo `/api`.
  #[serde(default = "default_base_url")]
  pub base_url: String,

  /// Tiempo máximo por petición.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_base_url() -> String {
  "http://localhost:3000".into()
}

fn default_timeout_secs() -> u64 {
  30
}

impl Default for ApiConfig {
  fn default() -> Self {
    ApiConfig { base_url: default_base_url(), timeout_secs: default_timeout_secs() }
  }
}

impl ApiConfig {
  /// Lee `[api]` (escribiendo los valores por defecto si faltaban) y aplica
  /// `CANCIONERO_API_URL` encima. El override de entorno nunca se persiste.
  ///
  /// Un archivo inutilizable no es fatal: se avisa y se siguen los valores por defecto.
  pub fn load_or_default() -> Self {
    Self::from_file_layer(config_backend())
  }

  fn from_file_layer(backend: Result<&TomlConfigBackend, ConfigError>) -> Self {
    match backend.and_then(Self::load_from) {
      Ok(cfg) => cfg,
      Err(e) => {
        warn!(error = %e, "config file unavailable, using defaults");
        Self::default()
      }
    }
    .with_env_override()
  }

  pub fn load_from(backend: &TomlConfigBackend) -> Result<Self, ConfigError> {
    let cfg: ApiConfig = backend.load_section_with_default("api")?;
    backend.save_section("api", &cfg)?;
    Ok(cfg)
  }

  pub fn save_to(&self, backend: &TomlConfigBackend) -> Result<(), ConfigError> {
    backend.save_section("api", self)
  }

  pub fn with_env_override(self) -> Self {
    match std::env::var(API_URL_ENV) {
      Ok(url) if !url.trim().is_empty() => self.with_base_url(url),
      _ => self,
    }
  }

  pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
    self.base_url = url.into();
    self
  }

  /// `{base_url}/api`, tolerando una barra final en `base_url`.
  pub fn api_root(&self) -> String {
    format!("{}{API_PREFIX}", self.base_url.trim_end_matches('/'))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use cancionero_config::CancioneroPaths;
  use serial_test::serial;
  use tempfile::tempdir;

  /// Fija (o borra) una variable de entorno y la restaura al salir del scope.
  struct EnvVarGuard {
    key: &'static str,
    original: Option<String>,
  }

  impl EnvVarGuard {
    fn set(key: &'static str, value: &str) -> Self {
      let original = std::env::var(key).ok();
      unsafe { std::env::set_var(key, value) };
      EnvVarGuard { key, original }
    }

    fn unset(key: &'static str) -> Self {
      let original = std::env::var(key).ok();
      unsafe { std::env::remove_var(key) };
      EnvVarGuard { key, original }
    }
  }

  impl Drop for EnvVarGuard {
    fn drop(&mut self) {
      match &self.original {
        Some(val) => unsafe { std::env::set_var(self.key, val) },
        None => unsafe { std::env::remove_var(self.key) },
      }
    }
  }

  fn backend_in(dir: &std::path::Path) -> TomlConfigBackend {
    TomlConfigBackend::new(CancioneroPaths::rooted_at(dir).unwrap())
  }

  #[test]
  fn api_root_appends_prefix_once() {
    assert_eq!(ApiConfig::default().api_root(), "http://localhost:3000/api");
    let cfg = ApiConfig::default().with_base_url("https://music.example/");
    assert_eq!(cfg.api_root(), "https://music.example/api");
  }

  #[test]
  fn load_from_fills_defaults_and_persists_them() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    std::fs::write(backend.config_path(), "[api]\nbase_url = \"http://10.0.0.2:4000\"\n").unwrap();

    let cfg = ApiConfig::load_from(&backend).unwrap();
    assert_eq!(cfg.base_url, "http://10.0.0.2:4000");
    assert_eq!(cfg.timeout_secs, 30);

    let raw = std::fs::read_to_string(backend.config_path()).unwrap();
    assert!(raw.contains("timeout_secs = 30"));
  }

  #[test]
  fn save_to_round_trips() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    let cfg = ApiConfig { base_url: "http://music.lan".into(), timeout_secs: 5 };
    cfg.save_to(&backend).unwrap();

    assert_eq!(ApiConfig::load_from(&backend).unwrap(), cfg);
  }

  #[test]
  #[serial]
  fn env_override_wins_over_file_value() {
    let _env = EnvVarGuard::set(API_URL_ENV, "http://staging:3000");

    let cfg = ApiConfig::default().with_env_override();

    assert_eq!(cfg.base_url, "http://staging:3000");
  }

  #[test]
  #[serial]
  fn blank_env_value_is_ignored() {
    let _env = EnvVarGuard::set(API_URL_ENV, "  ");

    let cfg = ApiConfig::default().with_env_override();

    assert_eq!(cfg, ApiConfig::default());
  }

  #[test]
  #[serial]
  fn missing_config_dir_falls_back_to_defaults() {
    let _env = EnvVarGuard::unset(API_URL_ENV);

    let cfg = ApiConfig::from_file_layer(Err(ConfigError::Unavailable("not a directory".into())));

    assert_eq!(cfg, ApiConfig::default());
  }

  #[test]
  #[serial]
  fn unreadable_config_file_still_honours_env_override() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    // Un directorio donde debería estar el archivo: la lectura falla con un error distinto de NotFound.
    std::fs::create_dir(backend.config_path()).unwrap();
    let _env = EnvVarGuard::set(API_URL_ENV, "http://10.0.0.9:3000");

    let cfg = ApiConfig::from_file_layer(Ok(&backend));

    assert_eq!(cfg.base_url, "http://10.0.0.9:3000");
    assert_eq!(cfg.timeout_secs, 30);
  }
}
