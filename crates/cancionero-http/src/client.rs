//! Adapter HTTP/JSON del `SongGateway`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use cancionero_core::domain::{Song, SongFormData, SongId};
use cancionero_core::ports::{DeleteConfirmation, GatewayError, SongGateway};

use crate::config::ApiConfig;

const USER_AGENT: &str = concat!("cancionero/", env!("CARGO_PKG_VERSION"));

/// Cuerpo de error del backend: `{"message": "..."}`. Cualquier otra forma se ignora.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: Option<String>,
}

/// Cliente del servicio remoto de canciones.
///
/// Un único `reqwest::Client` reutilizado para todas las peticiones. No hay
/// reintentos ni cancelación: cada llamada termina en éxito o en error.
#[derive(Debug, Clone)]
pub struct HttpSongGateway {
  http_client: reqwest::Client,
  api_root: String,
}

impl HttpSongGateway {
  pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let http_client = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .default_headers(headers)
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| GatewayError::Network(e.to_string()))?;

    Ok(Self { http_client, api_root: config.api_root() })
  }

  pub fn api_root(&self) -> &str {
    &self.api_root
  }

  fn songs_url(&self) -> String {
    format!("{}/songs", self.api_root)
  }

  fn song_url(&self, id: SongId) -> String {
    format!("{}/songs/{}", self.api_root, id)
  }

  /// Envía la petición y decodifica el cuerpo 2xx como `T`.
  async fn request<T: DeserializeOwned>(
    &self,
    method: Method,
    url: String,
    builder: RequestBuilder,
  ) -> Result<T, GatewayError> {
    debug!(%method, %url, "sending request");

    let response = builder.send().await.map_err(|e| {
      warn!(%method, %url, error = %e, "request did not complete");
      GatewayError::Network(e.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
      let err = error_from_response(response).await;
      warn!(%method, %url, status = status.as_u16(), error = %err, "request rejected");
      return Err(err);
    }

    response.json::<T>().await.map_err(|e| GatewayError::Decode(e.to_string()))
  }

  async fn send<T: DeserializeOwned>(&self, method: Method, url: String) -> Result<T, GatewayError> {
    let builder = self.http_client.request(method.clone(), &url);
    self.request(method, url, builder).await
  }

  async fn send_json<T: DeserializeOwned>(
    &self,
    method: Method,
    url: String,
    body: &SongFormData,
  ) -> Result<T, GatewayError> {
    let builder = self.http_client.request(method.clone(), &url).json(body);
    self.request(method, url, builder).await
  }
}

/// Convierte una respuesta no-2xx en `GatewayError::Http`.
///
/// El cuerpo se interpreta como JSON sólo si se puede; si no, queda `HTTP {status}`.
async fn error_from_response(response: Response) -> GatewayError {
  let status = response.status().as_u16();
  let text = response.text().await.unwrap_or_default();
  let message = serde_json::from_str::<ErrorBody>(&text).ok().and_then(|b| b.message);
  GatewayError::http(status, message)
}

#[async_trait]
impl SongGateway for HttpSongGateway {
  async fn list(&self) -> Result<Vec<Song>, GatewayError> {
    self.send(Method::GET, self.songs_url()).await
  }

  async fn get(&self, id: SongId) -> Result<Song, GatewayError> {
    self.send(Method::GET, self.song_url(id)).await
  }

  async fn create(&self, data: &SongFormData) -> Result<Song, GatewayError> {
    self.send_json(Method::POST, self.songs_url(), data).await
  }

  async fn update(&self, id: SongId, data: &SongFormData) -> Result<Song, GatewayError> {
    self.send_json(Method::PUT, self.song_url(id), data).await
  }

  async fn delete(&self, id: SongId) -> Result<DeleteConfirmation, GatewayError> {
    self.send(Method::DELETE, self.song_url(id)).await
  }
}
