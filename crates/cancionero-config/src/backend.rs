use crate::io::atomic_write_str;
use crate::paths::{CancioneroPaths, ConfigError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

// toml_edit para escribir preservando comentarios del usuario
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  paths: CancioneroPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: CancioneroPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &CancioneroPaths {
    &self.paths
  }

  pub fn config_path(&self) -> PathBuf {
    self.paths.config_file()
  }

  /// Como `load_section`, pero un archivo o sección ausente produce `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    use std::io::ErrorKind;

    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        tracing::debug!(?path, "config file not found, using defaults for [{section}]");
        return Ok(T::default());
      }
      Err(e) => return Err(e.into()),
    };

    let table: toml::Table = toml::from_str(&content)?;

    let Some(value) = table.get(section) else {
      return Ok(T::default());
    };

    decode_section(section, value)
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, value: &toml::Value) -> Result<T, ConfigError> {
  value.clone().try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let content = fs::read_to_string(&path)?;
    let table: toml::Table = toml::from_str(&content)?;

    let value = table
      .get(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", path)))?;

    decode_section(section, value)
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    use std::io::ErrorKind;

    let path = self.paths.config_file();

    // 1) Leer config actual como DocumentMut o crear doc vacío si no existe.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar sólo la sección con `toml` (serde).
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    // 3) `section_str` es una tabla sin cabecera ("foo = 1\nbar = 2\n"): se
    //    re-parsea como documento y se convierte en Item.
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    // 4) Reemplazar la sección en la raíz; el resto del documento no se toca.
    doc[section] = section_item;

    atomic_write_str(&path, &doc.to_string())?;
    tracing::debug!(?path, "saved config section [{section}]");

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Sample {
    base_url: String,
    timeout_secs: u64,
  }

  impl Default for Sample {
    fn default() -> Self {
      Sample { base_url: "http://localhost:3000".into(), timeout_secs: 30 }
    }
  }

  fn backend_in(dir: &std::path::Path) -> TomlConfigBackend {
    TomlConfigBackend::new(CancioneroPaths::rooted_at(dir).unwrap())
  }

  #[test]
  fn missing_file_yields_default() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());

    let loaded: Sample = backend.load_section_with_default("api").unwrap();
    assert_eq!(loaded, Sample::default());
  }

  #[test]
  fn strict_load_reports_missing_section() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    fs::write(backend.config_path(), "[other]\nx = 1\n").unwrap();

    let err = backend.load_section::<Sample>("api").unwrap_err();
    assert!(err.to_string().contains("missing section [api]"));
  }

  #[test]
  fn save_then_load_roundtrips_and_keeps_comments() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    fs::write(backend.config_path(), "# mis ajustes\n[ui]\ntheme = \"dark\"\n").unwrap();

    let value = Sample { base_url: "http://api.example:8080".into(), timeout_secs: 5 };
    backend.save_section("api", &value).unwrap();

    let raw = fs::read_to_string(backend.config_path()).unwrap();
    assert!(raw.contains("# mis ajustes"));
    assert!(raw.contains("theme = \"dark\""));

    let loaded: Sample = backend.load_section("api").unwrap();
    assert_eq!(loaded, value);
  }

  #[test]
  fn undecodable_section_is_reported() {
    let tmp = tempdir().unwrap();
    let backend = backend_in(tmp.path());
    fs::write(backend.config_path(), "[api]\ntimeout_secs = \"soon\"\n").unwrap();

    let err = backend.load_section_with_default::<Sample>("api").unwrap_err();
    assert!(err.to_string().contains("decode section [api]"));
  }
}
