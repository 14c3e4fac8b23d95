//! One handler per user action. Each one reads from the store or goes
//! through one of its operations; none of them touches the gateway directly.

use std::io::{BufRead, Write};

use anyhow::{Context, anyhow};

use cancionero_core::CoreError;
use cancionero_core::domain::{SongFormData, SongId};
use cancionero_core::ports::{GatewayError, SongGateway};
use cancionero_core::services::{CatalogFilter, CatalogView, SongStore, StoreState};

use crate::cli::SongArgs;
use crate::infrastructure::terminal::Terminal;
use crate::presentation::{catalog_page, delete_prompt, song_form, song_row, video_panel};

pub const CANCELLED: &str = "Cancelado.";

/// A one-shot command cannot go on without the catalog.
fn ensure_loaded(state: &StoreState) -> anyhow::Result<()> {
  match &state.error {
    Some(error) => Err(anyhow!("could not load songs: {error}")),
    None => Ok(()),
  }
}

pub fn list<G, R, W>(
  store: &SongStore<G>,
  term: &mut Terminal<R, W>,
  filter: CatalogFilter,
  json: bool,
) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let state = store.snapshot();
  let view = CatalogView::build(&state.songs, &filter);

  if json {
    ensure_loaded(&state)?;
    term.print(&serde_json::to_string_pretty(&view.visible)?)?;
    return Ok(());
  }

  term.print(&catalog_page::render(&state, &view, &filter, None))?;
  ensure_loaded(&state)
}

pub fn genres<G, R, W>(store: &SongStore<G>, term: &mut Terminal<R, W>) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let state = store.snapshot();
  ensure_loaded(&state)?;
  let view = CatalogView::build(&state.songs, &CatalogFilter::default());
  term.print(&catalog_page::render_options("Géneros", &view.genres))?;
  Ok(())
}

pub fn artists<G, R, W>(store: &SongStore<G>, term: &mut Terminal<R, W>) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let state = store.snapshot();
  ensure_loaded(&state)?;
  let view = CatalogView::build(&state.songs, &CatalogFilter::default());
  term.print(&catalog_page::render_options("Artistas", &view.artists))?;
  Ok(())
}

pub async fn show<G, R, W>(store: &SongStore<G>, term: &mut Terminal<R, W>, id: SongId) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let song = store.find_or_fetch(id).await?;
  term.print(&song_row::render_detail(&song))?;
  Ok(())
}

pub async fn add<G, R, W>(
  store: &SongStore<G>,
  term: &mut Terminal<R, W>,
  fields: SongArgs,
  default_year: i32,
) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let interactive = fields.is_empty();
  let Some(mut form) = collect_form(term, SongFormData::blank(default_year), fields, false)? else {
    term.print(CANCELLED)?;
    return Ok(());
  };

  loop {
    let result = store.create(&form).await;
    match result {
      Ok(created) => {
        term.print(&format!("Canción agregada (#{}): {}", created.id, created.display_title()))?;
        return Ok(());
      }
      Err(CoreError::Gateway(e)) if interactive => match retry_form(term, form, &e, false)? {
        Some(retry) => form = retry,
        None => return Ok(()),
      },
      Err(e) => return Err(e.into()),
    }
  }
}

pub async fn edit<G, R, W>(
  store: &SongStore<G>,
  term: &mut Terminal<R, W>,
  id: SongId,
  fields: SongArgs,
) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let song = store.find_or_fetch(id).await?;
  let interactive = fields.is_empty();
  let Some(mut form) = collect_form(term, SongFormData::from_song(&song), fields, true)? else {
    term.print(CANCELLED)?;
    return Ok(());
  };

  loop {
    let result = store.update(id, &form).await;
    match result {
      Ok(updated) => {
        term.print(&format!("Cambios guardados (#{}): {}", updated.id, updated.display_title()))?;
        return Ok(());
      }
      Err(CoreError::Gateway(e)) if interactive => match retry_form(term, form, &e, true)? {
        Some(retry) => form = retry,
        None => return Ok(()),
      },
      Err(e) => return Err(e.into()),
    }
  }
}

/// The backend refused the form: show why and reopen it with what was typed.
/// `None` means the user gave up (end of input).
fn retry_form<R: BufRead, W: Write>(
  term: &mut Terminal<R, W>,
  rejected: SongFormData,
  error: &GatewayError,
  editing: bool,
) -> anyhow::Result<Option<SongFormData>> {
  term.print(&format!("No se pudo guardar: {error}"))?;
  let retry = song_form::fill(term, rejected, editing)?;
  if retry.is_none() {
    term.print(CANCELLED)?;
  }
  Ok(retry)
}

/// Flags win; without any flag the form is filled interactively.
fn collect_form<R: BufRead, W: Write>(
  term: &mut Terminal<R, W>,
  mut form: SongFormData,
  fields: SongArgs,
  editing: bool,
) -> anyhow::Result<Option<SongFormData>> {
  if fields.is_empty() {
    return Ok(song_form::fill(term, form, editing)?);
  }
  fields.apply_to(&mut form);
  form.validate()?;
  Ok(Some(form))
}

pub async fn delete<G, R, W>(
  store: &SongStore<G>,
  term: &mut Terminal<R, W>,
  id: SongId,
  skip_confirmation: bool,
) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let song = store.find_or_fetch(id).await?;
  if !skip_confirmation && !delete_prompt::confirm(term, &song)? {
    term.print(CANCELLED)?;
    return Ok(());
  }

  let confirmation = store.delete(id).await?;
  term.print(&confirmation.message)?;
  Ok(())
}

pub async fn play<G, R, W>(
  store: &SongStore<G>,
  term: &mut Terminal<R, W>,
  id: SongId,
  open_browser: bool,
) -> anyhow::Result<()>
where
  G: SongGateway,
  R: BufRead,
  W: Write,
{
  let song = store.find_or_fetch(id).await?;
  term.print(&video_panel::render(&song))?;

  if open_browser {
    if let Some(link) = video_panel::link_for(&song) {
      video_panel::open_in_browser(&link).context("could not open the browser")?;
    }
  }
  Ok(())
}
