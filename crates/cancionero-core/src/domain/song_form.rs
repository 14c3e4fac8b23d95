use crate::domain::song::Song;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errores de validación del formulario, detectados antes de tocar la red.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Título y artista son requeridos.")]
  MissingRequired,

  #[error("año inválido: {0}")]
  InvalidYear(String),
}

/// Datos de alta/edición de una canción: los mismos campos que [`Song`] sin el `id`.
///
/// Es el cuerpo JSON de `POST /songs` y `PUT /songs/{id}`. Los campos opcionales
/// ausentes viajan como `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFormData {
  pub title: String,
  pub artist: String,
  pub album: Option<String>,
  pub year: i32,
  pub genre: Option<String>,
  pub url: Option<String>,
}

impl SongFormData {
  /// Formulario vacío para una canción nueva.
  ///
  /// El año por defecto lo decide quien llama (normalmente el año en curso).
  pub fn blank(year: i32) -> Self {
    Self { title: String::new(), artist: String::new(), album: None, year, genre: None, url: None }
  }

  /// Pre-carga el formulario de edición con los valores actuales de la canción.
  pub fn from_song(song: &Song) -> Self {
    Self {
      title: song.title.clone(),
      artist: song.artist.clone(),
      album: song.album.clone(),
      year: song.year,
      genre: song.genre.clone(),
      url: song.url.clone(),
    }
  }

  /// Título y artista no pueden quedar vacíos tras recortar espacios.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if self.title.trim().is_empty() || self.artist.trim().is_empty() {
      return Err(ValidationError::MissingRequired);
    }
    Ok(())
  }

  /// Interpreta el año tal como lo escribe el usuario.
  pub fn parse_year(input: &str) -> Result<i32, ValidationError> {
    input.trim().parse::<i32>().map_err(|_| ValidationError::InvalidYear(input.trim().to_string()))
  }
}

impl From<&Song> for SongFormData {
  fn from(song: &Song) -> Self {
    SongFormData::from_song(song)
  }
}
