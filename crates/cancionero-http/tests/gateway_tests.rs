//! Integration tests for `HttpSongGateway` against an in-process mock API.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use cancionero_core::domain::{Song, SongFormData, SongId};
use cancionero_core::ports::{GatewayError, SongGateway};
use cancionero_http::{ApiConfig, HttpSongGateway};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

#[derive(Clone, Default)]
struct MockApi {
  songs: Arc<Mutex<Vec<Song>>>,
  next_id: Arc<Mutex<i64>>,
  content_types: Arc<Mutex<Vec<Option<String>>>>,
}

impl MockApi {
  fn seeded(songs: Vec<Song>) -> Self {
    let next = songs.iter().map(|s| s.id.get()).max().unwrap_or(0) + 1;
    Self { songs: Arc::new(Mutex::new(songs)), next_id: Arc::new(Mutex::new(next)), ..Default::default() }
  }

  fn record(&self, headers: &HeaderMap) {
    let ct = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_string);
    self.content_types.lock().unwrap().push(ct);
  }
}

fn not_found() -> (StatusCode, Json<Value>) {
  (StatusCode::NOT_FOUND, Json(json!({ "message": "Canción no encontrada" })))
}

fn from_form(id: i64, data: SongFormData) -> Song {
  Song {
    id: SongId::new(id),
    title: data.title,
    artist: data.artist,
    album: data.album,
    year: data.year,
    genre: data.genre,
    url: data.url,
  }
}

async fn list(State(api): State<MockApi>, headers: HeaderMap) -> Json<Vec<Song>> {
  api.record(&headers);
  Json(api.songs.lock().unwrap().clone())
}

async fn get_one(State(api): State<MockApi>, headers: HeaderMap, Path(id): Path<i64>) -> ApiResult<Song> {
  api.record(&headers);
  let songs = api.songs.lock().unwrap();
  songs.iter().find(|s| s.id.get() == id).cloned().map(Json).ok_or_else(not_found)
}

async fn create(State(api): State<MockApi>, headers: HeaderMap, Json(data): Json<SongFormData>) -> ApiResult<Song> {
  api.record(&headers);
  if data.title.trim().is_empty() || data.artist.trim().is_empty() {
    return Err((StatusCode::BAD_REQUEST, Json(json!({ "message": "Título y artista son requeridos." }))));
  }
  let id = {
    let mut next = api.next_id.lock().unwrap();
    let id = *next;
    *next += 1;
    id
  };
  let song = from_form(id, data);
  api.songs.lock().unwrap().insert(0, song.clone());
  Ok(Json(song))
}

async fn update(
  State(api): State<MockApi>,
  headers: HeaderMap,
  Path(id): Path<i64>,
  Json(data): Json<SongFormData>,
) -> ApiResult<Song> {
  api.record(&headers);
  let mut songs = api.songs.lock().unwrap();
  let slot = songs.iter_mut().find(|s| s.id.get() == id).ok_or_else(not_found)?;
  *slot = from_form(id, data);
  Ok(Json(slot.clone()))
}

async fn remove(State(api): State<MockApi>, headers: HeaderMap, Path(id): Path<i64>) -> ApiResult<Value> {
  api.record(&headers);
  let mut songs = api.songs.lock().unwrap();
  let before = songs.len();
  songs.retain(|s| s.id.get() != id);
  if songs.len() == before {
    return Err(not_found());
  }
  Ok(Json(json!({ "message": "Canción eliminada" })))
}

/// Levanta el mock en un puerto efímero y devuelve su URL base.
async fn spawn(api: MockApi) -> String {
  let app = Router::new()
    .route("/api/songs", get(list).post(create))
    .route("/api/songs/:id", get(get_one).put(update).delete(remove))
    .route("/plain/api/songs", get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }))
    .route(
      "/blank/api/songs",
      get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "" }))) }),
    )
    .route("/garbage/api/songs", get(|| async { "definitely not json" }))
    .with_state(api);

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{addr}")
}

fn gateway(base_url: &str) -> HttpSongGateway {
  HttpSongGateway::new(&ApiConfig::default().with_base_url(base_url)).unwrap()
}

fn seed() -> Vec<Song> {
  vec![
    Song {
      id: SongId::new(2),
      title: "Ojalá".into(),
      artist: "Silvio Rodríguez".into(),
      album: Some("Al final de este viaje".into()),
      year: 1978,
      genre: Some("Trova".into()),
      url: Some("https://youtu.be/abc123".into()),
    },
    Song {
      id: SongId::new(1),
      title: "Gracias a la Vida".into(),
      artist: "Violeta Parra".into(),
      album: None,
      year: 1966,
      genre: None,
      url: None,
    },
  ]
}

fn form(title: &str, artist: &str) -> SongFormData {
  SongFormData { title: title.into(), artist: artist.into(), ..SongFormData::blank(2024) }
}

#[tokio::test]
async fn list_and_get_return_backend_songs() {
  let base = spawn(MockApi::seeded(seed())).await;
  let gw = gateway(&base);

  assert_eq!(gw.list().await.unwrap(), seed());
  assert_eq!(gw.get(SongId::new(1)).await.unwrap(), seed()[1]);
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
  let base = spawn(MockApi::seeded(seed())).await;

  let err = gateway(&base).get(SongId::new(40)).await.unwrap_err();

  assert!(err.is_not_found());
  assert_eq!(err.to_string(), "Canción no encontrada");
}

#[tokio::test]
async fn create_update_delete_roundtrip() {
  let api = MockApi::seeded(seed());
  let base = spawn(api.clone()).await;
  let gw = gateway(&base);

  let created = gw.create(&form("Como la cigarra", "Mercedes Sosa")).await.unwrap();
  assert_eq!(created.id, SongId::new(3));
  assert_eq!(api.songs.lock().unwrap().len(), 3);

  let mut edit = SongFormData::from_song(&created);
  edit.genre = Some("Folklore".into());
  let updated = gw.update(created.id, &edit).await.unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.genre.as_deref(), Some("Folklore"));

  let confirmation = gw.delete(created.id).await.unwrap();
  assert_eq!(confirmation.message, "Canción eliminada");
  assert_eq!(api.songs.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn rejected_create_carries_server_message() {
  let base = spawn(MockApi::seeded(seed())).await;

  let err = gateway(&base).create(&form(" ", "")).await.unwrap_err();

  assert_eq!(err, GatewayError::Http { status: 400, message: "Título y artista son requeridos.".into() });
}

#[tokio::test]
async fn update_and_delete_of_unknown_id_fail() {
  let base = spawn(MockApi::seeded(seed())).await;
  let gw = gateway(&base);

  assert!(gw.update(SongId::new(99), &form("T", "A")).await.unwrap_err().is_not_found());
  assert!(gw.delete(SongId::new(99)).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn every_request_sends_json_content_type() {
  let api = MockApi::seeded(seed());
  let base = spawn(api.clone()).await;
  let gw = gateway(&base);

  gw.list().await.unwrap();
  gw.get(SongId::new(1)).await.unwrap();
  let created = gw.create(&form("T", "A")).await.unwrap();
  gw.update(created.id, &form("T2", "A")).await.unwrap();
  gw.delete(created.id).await.unwrap();

  let seen = api.content_types.lock().unwrap().clone();
  assert_eq!(seen.len(), 5);
  assert!(seen.iter().all(|ct| ct.as_deref() == Some("application/json")), "{seen:?}");
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
  let base = spawn(MockApi::default()).await;

  let err = gateway(&format!("{base}/plain")).list().await.unwrap_err();

  assert_eq!(err, GatewayError::Http { status: 503, message: "HTTP 503".into() });
}

#[tokio::test]
async fn empty_server_message_falls_back_to_status() {
  let base = spawn(MockApi::default()).await;

  let err = gateway(&format!("{base}/blank")).list().await.unwrap_err();

  assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
  let base = spawn(MockApi::default()).await;

  let err = gateway(&format!("{base}/garbage")).list().await.unwrap_err();

  assert!(matches!(err, GatewayError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let err = gateway(&format!("http://{addr}")).list().await.unwrap_err();

  assert!(matches!(err, GatewayError::Network(_)), "{err:?}");
}
