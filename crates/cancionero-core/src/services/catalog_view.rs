use std::collections::BTreeSet;

use crate::domain::Song;

/// Criterios de filtrado de la vista de catálogo.
///
/// Cada criterio vacío se ignora; los activos se combinan con AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
  /// Subcadena, sin distinguir mayúsculas, buscada en título o artista.
  pub search: String,
  /// Género exacto.
  pub genre: String,
  /// Artista exacto.
  pub artist: String,
}

impl CatalogFilter {
  pub fn is_active(&self) -> bool {
    !self.search.is_empty() || !self.genre.is_empty() || !self.artist.is_empty()
  }

  pub fn reset(&mut self) {
    *self = CatalogFilter::default();
  }

  pub fn matches(&self, song: &Song) -> bool {
    Matcher::new(self).matches(song)
  }
}

/// Filtro con la búsqueda ya pasada a minúsculas, para no repetirlo por canción.
struct Matcher<'f> {
  needle: Option<String>,
  filter: &'f CatalogFilter,
}

impl<'f> Matcher<'f> {
  fn new(filter: &'f CatalogFilter) -> Self {
    let needle = (!filter.search.is_empty()).then(|| filter.search.to_lowercase());
    Self { needle, filter }
  }

  fn matches(&self, song: &Song) -> bool {
    let search_ok = match &self.needle {
      None => true,
      Some(n) => song.title.to_lowercase().contains(n) || song.artist.to_lowercase().contains(n),
    };
    let genre_ok = self.filter.genre.is_empty() || song.genre.as_deref() == Some(self.filter.genre.as_str());
    let artist_ok = self.filter.artist.is_empty() || song.artist == self.filter.artist;

    search_ok && genre_ok && artist_ok
  }
}

/// Subconjunto visible, en el mismo orden que la colección de origen.
pub fn filter_songs<'a>(songs: &'a [Song], filter: &CatalogFilter) -> Vec<&'a Song> {
  let matcher = Matcher::new(filter);
  songs.iter().filter(|s| matcher.matches(s)).collect()
}

/// Géneros distintos, ordenados y sin vacíos.
pub fn distinct_genres(songs: &[Song]) -> Vec<String> {
  distinct(songs.iter().filter_map(|s| s.genre.as_deref()))
}

/// Artistas distintos, ordenados y sin vacíos.
pub fn distinct_artists(songs: &[Song]) -> Vec<String> {
  distinct(songs.iter().map(|s| s.artist.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
  values.filter(|v| !v.is_empty()).collect::<BTreeSet<_>>().into_iter().map(str::to_string).collect()
}

/// Proyección completa que consume la pantalla del catálogo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView<'a> {
  pub visible: Vec<&'a Song>,
  pub total: usize,
  pub genres: Vec<String>,
  pub artists: Vec<String>,
  pub filtered: bool,
}

impl<'a> CatalogView<'a> {
  pub fn build(songs: &'a [Song], filter: &CatalogFilter) -> Self {
    Self {
      visible: filter_songs(songs, filter),
      total: songs.len(),
      genres: distinct_genres(songs),
      artists: distinct_artists(songs),
      filtered: filter.is_active(),
    }
  }

  /// `"3"` cuando se ven todas, `"3/10"` cuando el filtro oculta alguna.
  pub fn count_label(&self) -> String {
    if self.visible.len() == self.total {
      self.visible.len().to_string()
    } else {
      format!("{}/{}", self.visible.len(), self.total)
    }
  }

  /// Canción en la posición `n` (1-based) de la lista visible.
  pub fn nth(&self, n: usize) -> Option<&'a Song> {
    n.checked_sub(1).and_then(|i| self.visible.get(i).copied())
  }
}
