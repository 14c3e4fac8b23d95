//! Interactive session: one store loaded once, a filter and a now-playing
//! selection that live for the whole session.

use std::io::{BufRead, Write};

use anyhow::anyhow;

use cancionero_core::domain::{Song, SongId};
use cancionero_core::ports::SongGateway;
use cancionero_core::services::{CatalogFilter, CatalogView, SongStore};

use crate::cli::SongArgs;
use crate::commands;
use crate::infrastructure::terminal::Terminal;
use crate::presentation::{catalog_page, video_panel};

const PROMPT: &str = "cancionero> ";

const HELP: &str = "\
Comandos:
  list                 muestra el catálogo con los filtros actuales
  search <texto>       filtra por título o artista (vacío para quitar)
  genre <género>       filtra por género exacto (vacío para quitar)
  artist <artista>     filtra por artista exacto (vacío para quitar)
  reset                quita todos los filtros
  genres | artists     opciones disponibles para los filtros
  refresh              recarga el catálogo
  add                  agrega una canción
  edit <n>             edita la canción de la fila n
  delete <n>           elimina la canción de la fila n
  play <n>             reproduce o detiene el video de la fila n
  stop                 detiene la reproducción
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
  List,
  Search(String),
  Genre(String),
  Artist(String),
  Reset,
  Genres,
  Artists,
  Refresh,
  Add,
  Edit(usize),
  Delete(usize),
  Play(usize),
  Stop,
  Help,
  Quit,
}

impl ShellCommand {
  /// `Ok(None)` for a blank line.
  pub fn parse(line: &str) -> Result<Option<Self>, String> {
    let line = line.trim();
    if line.is_empty() {
      return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
      Some((word, rest)) => (word, rest.trim()),
      None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
      "list" | "ls" => ShellCommand::List,
      "search" | "buscar" => ShellCommand::Search(rest.to_string()),
      "genre" | "genero" | "género" => ShellCommand::Genre(rest.to_string()),
      "artist" | "artista" => ShellCommand::Artist(rest.to_string()),
      "reset" => ShellCommand::Reset,
      "genres" | "generos" | "géneros" => ShellCommand::Genres,
      "artists" | "artistas" => ShellCommand::Artists,
      "refresh" | "recargar" => ShellCommand::Refresh,
      "add" | "agregar" => ShellCommand::Add,
      "edit" | "editar" => ShellCommand::Edit(row_number(rest)?),
      "delete" | "rm" | "eliminar" => ShellCommand::Delete(row_number(rest)?),
      "play" | "reproducir" => ShellCommand::Play(row_number(rest)?),
      "stop" => ShellCommand::Stop,
      "help" | "?" | "ayuda" => ShellCommand::Help,
      "quit" | "exit" | "salir" => ShellCommand::Quit,
      other => return Err(format!("Comando desconocido: {other}. Escribe `help`.")),
    };
    Ok(Some(command))
  }
}

fn row_number(arg: &str) -> Result<usize, String> {
  arg.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| format!("Se esperaba un número de fila, no `{arg}`."))
}

pub struct Shell<'s, G>
where
  G: SongGateway,
{
  store: &'s SongStore<G>,
  filter: CatalogFilter,
  playing: Option<SongId>,
  open_videos: bool,
  default_year: i32,
}

impl<'s, G> Shell<'s, G>
where
  G: SongGateway,
{
  pub fn new(store: &'s SongStore<G>, open_videos: bool, default_year: i32) -> Self {
    Self { store, filter: CatalogFilter::default(), playing: None, open_videos, default_year }
  }

  pub async fn run<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> anyhow::Result<()> {
    self.show_catalog(term)?;
    term.print("Escribe `help` para ver los comandos.")?;

    while let Some(line) = term.prompt(PROMPT)? {
      let command = match ShellCommand::parse(&line) {
        Ok(Some(command)) => command,
        Ok(None) => continue,
        Err(message) => {
          term.print(&message)?;
          continue;
        }
      };
      if command == ShellCommand::Quit {
        break;
      }

      // Ningún fallo termina la sesión: se muestra y se sigue.
      if let Err(e) = self.execute(command, term).await {
        term.print(&format!("Error: {e}"))?;
      }
    }
    Ok(())
  }

  async fn execute<R: BufRead, W: Write>(
    &mut self,
    command: ShellCommand,
    term: &mut Terminal<R, W>,
  ) -> anyhow::Result<()> {
    match command {
      ShellCommand::List => self.show_catalog(term)?,
      ShellCommand::Search(text) => {
        self.filter.search = text;
        self.show_catalog(term)?;
      }
      ShellCommand::Genre(genre) => {
        let options = self.view_options(|view| view.genres.clone());
        self.filter.genre = pick(genre, &options, "Género")?;
        self.show_catalog(term)?;
      }
      ShellCommand::Artist(artist) => {
        let options = self.view_options(|view| view.artists.clone());
        self.filter.artist = pick(artist, &options, "Artista")?;
        self.show_catalog(term)?;
      }
      ShellCommand::Reset => {
        self.filter.reset();
        self.show_catalog(term)?;
      }
      ShellCommand::Genres => {
        let options = self.view_options(|view| view.genres.clone());
        term.print(&catalog_page::render_options("Géneros", &options))?;
      }
      ShellCommand::Artists => {
        let options = self.view_options(|view| view.artists.clone());
        term.print(&catalog_page::render_options("Artistas", &options))?;
      }
      ShellCommand::Refresh => {
        self.store.refresh().await;
        self.show_catalog(term)?;
      }
      ShellCommand::Add => {
        commands::add(self.store, term, SongArgs::default(), self.default_year).await?;
        self.show_catalog(term)?;
      }
      ShellCommand::Edit(n) => {
        let song = self.row(n)?;
        commands::edit(self.store, term, song.id, SongArgs::default()).await?;
        self.show_catalog(term)?;
      }
      ShellCommand::Delete(n) => {
        let song = self.row(n)?;
        commands::delete(self.store, term, song.id, false).await?;
        if self.store.find(song.id).is_none() && self.playing == Some(song.id) {
          self.playing = None;
        }
        self.show_catalog(term)?;
      }
      ShellCommand::Play(n) => {
        let song = self.row(n)?;
        self.play(&song, term)?;
      }
      ShellCommand::Stop => {
        self.playing = None;
        term.print("Reproducción detenida.")?;
      }
      ShellCommand::Help => term.print(HELP)?,
      ShellCommand::Quit => {}
    }
    Ok(())
  }

  fn play<R: BufRead, W: Write>(&mut self, song: &Song, term: &mut Terminal<R, W>) -> anyhow::Result<()> {
    let Some(link) = video_panel::link_for(song) else {
      term.print(video_panel::NO_VIDEO)?;
      return Ok(());
    };

    self.playing = video_panel::toggle(self.playing, song);
    if self.playing.is_none() {
      term.print("Reproducción detenida.")?;
      return Ok(());
    }

    term.print(&video_panel::render(song))?;
    if self.open_videos {
      video_panel::open_in_browser(&link)?;
    }
    Ok(())
  }

  fn show_catalog<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> anyhow::Result<()> {
    let state = self.store.snapshot();
    let view = CatalogView::build(&state.songs, &self.filter);
    term.print(&catalog_page::render(&state, &view, &self.filter, self.playing))?;
    Ok(())
  }

  fn view_options(&self, select: impl Fn(&CatalogView<'_>) -> Vec<String>) -> Vec<String> {
    let songs = self.store.songs();
    select(&CatalogView::build(&songs, &CatalogFilter::default()))
  }

  /// Song at visible row `n` under the current filter.
  fn row(&self, n: usize) -> anyhow::Result<Song> {
    let songs = self.store.songs();
    let view = CatalogView::build(&songs, &self.filter);
    view.nth(n).cloned().ok_or_else(|| anyhow!("no hay fila {n} (hay {})", view.visible.len()))
  }
}

/// Filter values come from the catalog's own options, like a select box. Empty clears.
fn pick(value: String, options: &[String], label: &str) -> anyhow::Result<String> {
  if value.is_empty() || options.contains(&value) {
    return Ok(value);
  }
  Err(anyhow!("{label} desconocido: {value}. Opciones: {}", options.join(", ")))
}
