// crates/cancionero-core/src/errors.rs
use thiserror::Error;

use crate::domain::{SongId, ValidationError};
use crate::ports::GatewayError;

/// Error genérico del núcleo de Cancionero.
///
/// Las capas superiores (CLI, shell) lo muestran tal cual: los mensajes del
/// servidor y de validación se propagan sin envoltorio.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
  #[error(transparent)]
  Gateway(#[from] GatewayError),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("Canción {0} no encontrada")]
  NotFound(SongId),
}
