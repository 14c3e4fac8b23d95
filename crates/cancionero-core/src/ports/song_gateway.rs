use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Song, SongFormData, SongId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
  /// La petición nunca se completó (conexión rechazada, timeout, DNS...).
  #[error("network error: {0}")]
  Network(String),

  /// Respuesta no-2xx. El mensaje es el `message` del cuerpo, o `HTTP {status}`.
  #[error("{message}")]
  Http { status: u16, message: String },

  /// Respuesta 2xx con un cuerpo que no es el JSON esperado.
  #[error("invalid response body: {0}")]
  Decode(String),
}

impl GatewayError {
  /// Construye el error HTTP a partir del mensaje del servidor, si lo hubo.
  pub fn http(status: u16, server_message: Option<String>) -> Self {
    let message = server_message
      .filter(|m| !m.trim().is_empty())
      .unwrap_or_else(|| format!("HTTP {status}"));
    GatewayError::Http { status, message }
  }

  pub fn status(&self) -> Option<u16> {
    match self {
      GatewayError::Http { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(404)
  }
}

/// Respuesta de `DELETE /songs/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
  pub message: String,
}

/// Port hacia el servicio remoto de canciones.
///
/// Cada operación corresponde 1:1 con una acción REST sobre la colección
/// `songs`. No hay reintentos: un fallo se propaga tal cual al llamador.
///
/// Implementaciones:
/// - HTTP/JSON (`cancionero-http`)
/// - dobles en memoria para tests
#[async_trait]
pub trait SongGateway: Send + Sync {
  async fn list(&self) -> Result<Vec<Song>, GatewayError>;
  async fn get(&self, id: SongId) -> Result<Song, GatewayError>;
  async fn create(&self, data: &SongFormData) -> Result<Song, GatewayError>;
  async fn update(&self, id: SongId, data: &SongFormData) -> Result<Song, GatewayError>;
  async fn delete(&self, id: SongId) -> Result<DeleteConfirmation, GatewayError>;
}
