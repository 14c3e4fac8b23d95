use std::io::{self, BufRead, Write};

use cancionero_core::domain::Song;

use crate::infrastructure::terminal::Terminal;

pub fn confirmation_text(song: &Song) -> String {
  format!("¿Eliminar canción?\n\"{}\" de {} será eliminada permanentemente.", song.title, song.artist)
}

/// Asks before deleting. Anything but an explicit yes cancels.
pub fn confirm<R: BufRead, W: Write>(term: &mut Terminal<R, W>, song: &Song) -> io::Result<bool> {
  term.print(&confirmation_text(song))?;
  term.confirm("Eliminar")
}
