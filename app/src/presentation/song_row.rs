use cancionero_core::domain::Song;

const TITLE_WIDTH: usize = 40;
const ALBUM_WIDTH: usize = 24;
const GENRE_WIDTH: usize = 14;

pub const NO_ALBUM: &str = "—";
pub const NO_GENRE: &str = "Sin género";

/// Column header matching [`render_row`].
pub fn header() -> String {
  format!(
    "   {:<2}  {}  {}  {}",
    "#",
    fit("Título / Artista", TITLE_WIDTH),
    fit("Álbum", ALBUM_WIDTH),
    "Género / Año"
  )
}

/// One catalog line: position, title/artist, album, genre and year, plus a
/// marker when the song has a video and when it is the one playing.
///
/// `index` is the 0-based position in the visible list.
pub fn render_row(index: usize, song: &Song, playing: bool) -> String {
  let marker = if playing { "▶" } else { " " };
  let album = song.album.as_deref().filter(|a| !a.is_empty()).unwrap_or(NO_ALBUM);
  let genre = song.genre.as_deref().filter(|g| !g.is_empty()).unwrap_or(NO_GENRE);
  let video = if song.has_video() { "  [video]" } else { "" };

  format!(
    "{marker}  {:02}  {}  {}  {} {}{video}",
    index + 1,
    fit(&format!("{} / {}", song.title, song.artist), TITLE_WIDTH),
    fit(album, ALBUM_WIDTH),
    fit(genre, GENRE_WIDTH),
    song.year,
  )
}

/// Every field of one song, one per line.
pub fn render_detail(song: &Song) -> String {
  let or_dash = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).unwrap_or(NO_ALBUM).to_string();
  [
    format!("#{}  {}", song.id, song.title),
    format!("Artista: {}", song.artist),
    format!("Álbum:   {}", or_dash(&song.album)),
    format!("Año:     {}", song.year),
    format!("Género:  {}", song.genre.as_deref().filter(|g| !g.is_empty()).unwrap_or(NO_GENRE)),
    format!("Video:   {}", or_dash(&song.url)),
  ]
  .join("\n")
}

/// Pads or truncates to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
  let count = text.chars().count();
  if count <= width {
    let mut s = text.to_string();
    s.extend(std::iter::repeat_n(' ', width - count));
    s
  } else {
    let mut s: String = text.chars().take(width - 1).collect();
    s.push('…');
    s
  }
}
