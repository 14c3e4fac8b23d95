use cancionero_core::domain::SongId;
use cancionero_core::services::{CatalogFilter, CatalogView, StoreState};

use crate::presentation::song_row;

pub const LOADING: &str = "Cargando canciones...";
pub const EMPTY_CATALOG: &str = "No hay canciones aún";
pub const EMPTY_FILTERED: &str = "No hay canciones que coincidan con los filtros";
pub const CONNECTION_ERROR: &str = "Error de conexión";

/// Full catalog screen for the current store state and filter.
///
/// A failed reload keeps the previously loaded rows under the error banner.
pub fn render(
  state: &StoreState,
  view: &CatalogView<'_>,
  filter: &CatalogFilter,
  playing: Option<SongId>,
) -> String {
  let mut lines: Vec<String> = Vec::new();

  if state.loading {
    lines.push(LOADING.to_string());
    return lines.join("\n");
  }

  if let Some(error) = &state.error {
    lines.push(format!("{CONNECTION_ERROR}: {error}"));
    lines.push("Reintentar: `refresh`".to_string());
    if state.songs.is_empty() {
      return lines.join("\n");
    }
    lines.push(String::new());
  }

  lines.push(format!("Canciones {}", view.count_label()));
  if filter.is_active() {
    lines.push(describe_filter(filter));
  }

  if view.visible.is_empty() {
    if view.filtered {
      lines.push(EMPTY_FILTERED.to_string());
    } else {
      lines.push(EMPTY_CATALOG.to_string());
      lines.push("Agregar primera canción: `add`".to_string());
    }
    return lines.join("\n");
  }

  lines.push(song_row::header());
  for (i, song) in view.visible.iter().enumerate() {
    lines.push(song_row::render_row(i, song, playing == Some(song.id)));
  }

  lines.join("\n")
}

pub fn describe_filter(filter: &CatalogFilter) -> String {
  let mut parts = Vec::new();
  if !filter.search.is_empty() {
    parts.push(format!("búsqueda \"{}\"", filter.search));
  }
  if !filter.genre.is_empty() {
    parts.push(format!("género {}", filter.genre));
  }
  if !filter.artist.is_empty() {
    parts.push(format!("artista {}", filter.artist));
  }
  format!("Filtros: {}", parts.join(", "))
}

/// One value per line, or a placeholder when there is nothing to choose from.
pub fn render_options(title: &str, options: &[String]) -> String {
  if options.is_empty() {
    return format!("{title}: (ninguno)");
  }
  let mut out = format!("{title}:");
  for option in options {
    out.push_str("\n  ");
    out.push_str(option);
  }
  out
}
