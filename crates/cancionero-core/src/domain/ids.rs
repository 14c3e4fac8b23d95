use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identificador de una canción.
///
/// Lo asigna el backend al crear la canción y nunca cambia después.
/// Aquí sólo se transporta: el cliente jamás genera ids propios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(i64);

impl SongId {
  pub fn new(raw: i64) -> Self {
    SongId(raw)
  }

  /// Devuelve el entero tal como lo conoce el backend.
  pub fn get(&self) -> i64 {
    self.0
  }
}

impl From<i64> for SongId {
  fn from(raw: i64) -> Self {
    SongId(raw)
  }
}

impl From<SongId> for i64 {
  fn from(id: SongId) -> Self {
    id.0
  }
}

impl FromStr for SongId {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.trim().parse::<i64>().map(SongId)
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
