use crate::domain::ids::SongId;
use serde::{Deserialize, Serialize};

/// La Canción (Song): un registro del catálogo tal como lo devuelve el backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador asignado por el backend. Inmutable.
  pub id: SongId,
  /// El título de la canción.
  pub title: String,
  /// El intérprete principal.
  pub artist: String,
  /// El álbum, si se conoce.
  pub album: Option<String>,
  /// Año de publicación. Sin rango impuesto.
  #[serde(default)]
  pub year: i32,
  /// Género libre, usado para filtrar por categoría.
  pub genre: Option<String>,
  /// Enlace a un video reproducible (normalmente YouTube).
  pub url: Option<String>,
}

impl Song {
  /// Texto usado como cabecera del panel de video: `"Título — Artista"`.
  pub fn display_title(&self) -> String {
    format!("{} — {}", self.title, self.artist)
  }

  /// `true` cuando la canción trae un enlace de video no vacío.
  pub fn has_video(&self) -> bool {
    self.video_url().is_some()
  }

  pub fn video_url(&self) -> Option<&str> {
    self.url.as_deref().filter(|u| !u.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_backend_payload_with_missing_and_null_fields() {
    let json = r#"{"id": 3, "title": "Lamento Boliviano", "artist": "Enanitos Verdes", "album": null, "year": 1994}"#;
    let song: Song = serde_json::from_str(json).unwrap();

    assert_eq!(song.id, SongId::new(3));
    assert_eq!(song.album, None);
    assert_eq!(song.genre, None);
    assert_eq!(song.url, None);
    assert_eq!(song.year, 1994);
  }

  #[test]
  fn blank_url_is_not_a_video() {
    let mut song = Song {
      id: SongId::new(1),
      title: "A".into(),
      artist: "X".into(),
      album: None,
      year: 2000,
      genre: None,
      url: Some("   ".into()),
    };
    assert!(!song.has_video());

    song.url = Some("https://youtu.be/abc".into());
    assert!(song.has_video());
    assert_eq!(song.display_title(), "A — X");
  }
}
