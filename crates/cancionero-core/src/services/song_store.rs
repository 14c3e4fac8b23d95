use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::domain::{Song, SongFormData, SongId};
use crate::errors::CoreError;
use crate::ports::{DeleteConfirmation, SongGateway};

/// Estado observable del store.
///
/// `songs` y `error` no son excluyentes: un `refresh` fallido deja visible la
/// última colección cargada junto al mensaje de error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
  /// Colección en memoria, la más reciente primero.
  pub songs: Vec<Song>,
  pub loading: bool,
  pub error: Option<String>,
  /// Al menos un `list` terminó bien durante esta sesión.
  pub loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStatus {
  Idle,
  Loading,
  Ready,
  Failed(String),
}

impl StoreState {
  pub fn status(&self) -> StoreStatus {
    if self.loading {
      StoreStatus::Loading
    } else if let Some(message) = &self.error {
      StoreStatus::Failed(message.clone())
    } else if self.loaded {
      StoreStatus::Ready
    } else {
      StoreStatus::Idle
    }
  }
}

/// Dueño único de la colección de canciones de la sesión.
///
/// Todas las mutaciones pasan primero por el gateway y sólo se reflejan en
/// memoria cuando el backend las confirma. El lock nunca se mantiene durante
/// una llamada al gateway: operaciones concurrentes se intercalan y la última
/// respuesta en llegar determina el estado final.
pub struct SongStore<G>
where
  G: SongGateway,
{
  gateway: G,
  state: Mutex<StoreState>,
}

impl<G> SongStore<G>
where
  G: SongGateway,
{
  pub fn new(gateway: G) -> Self {
    Self { gateway, state: Mutex::new(StoreState::default()) }
  }

  /// Crea el store y hace la carga inicial, como al montar la vista.
  pub async fn mount(gateway: G) -> Self {
    let store = Self::new(gateway);
    store.refresh().await;
    store
  }

  /// Adaptador detrás del store; lo que pase por él no toca la colección.
  pub fn gateway(&self) -> &G {
    &self.gateway
  }

  fn state(&self) -> MutexGuard<'_, StoreState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  // -------- QUERY (read) --------

  pub fn snapshot(&self) -> StoreState {
    self.state().clone()
  }

  pub fn songs(&self) -> Vec<Song> {
    self.state().songs.clone()
  }

  pub fn len(&self) -> usize {
    self.state().songs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn status(&self) -> StoreStatus {
    self.state().status()
  }

  pub fn find(&self, id: SongId) -> Option<Song> {
    self.state().songs.iter().find(|s| s.id == id).cloned()
  }

  /// Pide una canción al backend sin tocar la colección local.
  pub async fn fetch(&self, id: SongId) -> Result<Song, CoreError> {
    debug!(%id, "fetching song");
    Ok(self.gateway.get(id).await?)
  }

  /// Busca primero en memoria y sólo si no está consulta al backend.
  pub async fn find_or_fetch(&self, id: SongId) -> Result<Song, CoreError> {
    if let Some(song) = self.find(id) {
      return Ok(song);
    }
    match self.gateway.get(id).await {
      Ok(song) => Ok(song),
      Err(e) if e.is_not_found() => Err(CoreError::NotFound(id)),
      Err(e) => Err(e.into()),
    }
  }

  // -------- COMMAND (write) --------

  /// Recarga la colección completa.
  ///
  /// El error queda guardado en el estado en lugar de devolverse; las
  /// canciones previas siguen visibles. No deduplica recargas concurrentes.
  pub async fn refresh(&self) {
    {
      let mut st = self.state();
      st.loading = true;
      st.error = None;
    }
    debug!("refreshing song collection");

    let result = self.gateway.list().await;

    let mut st = self.state();
    st.loading = false;
    match result {
      Ok(songs) => {
        st.songs = dedup_by_id(songs);
        st.loaded = true;
        debug!(count = st.songs.len(), "song collection loaded");
      }
      Err(e) => {
        warn!(error = %e, "failed to load songs");
        st.error = Some(e.to_string());
      }
    }
  }

  /// Da de alta una canción y la coloca al principio de la colección.
  pub async fn create(&self, data: &SongFormData) -> Result<Song, CoreError> {
    let created = self.gateway.create(data).await.inspect_err(|e| warn!(error = %e, "create rejected"))?;

    let mut st = self.state();
    st.songs.retain(|s| s.id != created.id);
    st.songs.insert(0, created.clone());
    debug!(id = %created.id, "song created");

    Ok(created)
  }

  /// Actualiza una canción manteniendo su posición.
  pub async fn update(&self, id: SongId, data: &SongFormData) -> Result<Song, CoreError> {
    let updated =
      self.gateway.update(id, data).await.inspect_err(|e| warn!(%id, error = %e, "update rejected"))?;

    let mut st = self.state();
    match st.songs.iter_mut().find(|s| s.id == id) {
      Some(slot) => *slot = updated.clone(),
      None => debug!(%id, "updated song is not in the local collection"),
    }

    Ok(updated)
  }

  pub async fn delete(&self, id: SongId) -> Result<DeleteConfirmation, CoreError> {
    let confirmation =
      self.gateway.delete(id).await.inspect_err(|e| warn!(%id, error = %e, "delete rejected"))?;

    self.state().songs.retain(|s| s.id != id);
    debug!(%id, "song deleted");

    Ok(confirmation)
  }
}

fn dedup_by_id(songs: Vec<Song>) -> Vec<Song> {
  let mut seen = HashSet::with_capacity(songs.len());
  let before = songs.len();
  let unique: Vec<Song> = songs.into_iter().filter(|s| seen.insert(s.id)).collect();
  if unique.len() != before {
    warn!(dropped = before - unique.len(), "backend returned duplicated song ids");
  }
  unique
}
