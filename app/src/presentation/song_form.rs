use std::io::{self, BufRead, Write};

use cancionero_core::domain::SongFormData;

use crate::infrastructure::terminal::Terminal;

/// Answer that clears an optional field.
const CLEAR: &str = "-";

/// Fills a song form interactively, starting from `initial`.
///
/// Validation runs before anything leaves the form: on error the message is
/// shown and the form is asked again with the values typed so far. Returns
/// `None` when input ends (the user cancelled).
pub fn fill<R: BufRead, W: Write>(
  term: &mut Terminal<R, W>,
  initial: SongFormData,
  editing: bool,
) -> io::Result<Option<SongFormData>> {
  term.print(if editing { "Editar canción" } else { "Nueva canción" })?;
  term.print(&format!("(Enter conserva el valor, `{CLEAR}` borra un campo opcional)"))?;

  let mut form = initial;
  loop {
    let Some(next) = ask_all(term, &form)? else {
      return Ok(None);
    };
    form = next;

    match form.validate() {
      Ok(()) => return Ok(Some(form)),
      Err(e) => term.print(&e.to_string())?,
    }
  }
}

fn ask_all<R: BufRead, W: Write>(
  term: &mut Terminal<R, W>,
  current: &SongFormData,
) -> io::Result<Option<SongFormData>> {
  let Some(title) = term.ask("Título *", &current.title)? else { return Ok(None) };
  let Some(artist) = term.ask("Artista *", &current.artist)? else { return Ok(None) };
  let Some(album) = ask_optional(term, "Álbum", &current.album)? else { return Ok(None) };
  let Some(year) = ask_year(term, current.year)? else { return Ok(None) };
  let Some(genre) = ask_optional(term, "Género", &current.genre)? else { return Ok(None) };
  let Some(url) = ask_optional(term, "URL de YouTube (opcional)", &current.url)? else {
    return Ok(None);
  };

  Ok(Some(SongFormData { title, artist, album, year, genre, url }))
}

fn ask_optional<R: BufRead, W: Write>(
  term: &mut Terminal<R, W>,
  label: &str,
  current: &Option<String>,
) -> io::Result<Option<Option<String>>> {
  let shown = current.as_deref().unwrap_or("");
  Ok(term.ask(label, shown)?.map(|answer| match answer.trim() {
    CLEAR | "" => None,
    _ => Some(answer),
  }))
}

fn ask_year<R: BufRead, W: Write>(term: &mut Terminal<R, W>, current: i32) -> io::Result<Option<i32>> {
  loop {
    let Some(answer) = term.ask("Año", &current.to_string())? else { return Ok(None) };
    match SongFormData::parse_year(&answer) {
      Ok(year) => return Ok(Some(year)),
      Err(e) => term.print(&e.to_string())?,
    }
  }
}
