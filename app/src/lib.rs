mod cli;
mod commands;
mod config;
mod infrastructure;
mod presentation;
mod shell;

use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use tracing::info;

use cancionero_core::services::SongStore;
use cancionero_http::HttpSongGateway;

use crate::cli::{Cli, Command};
use crate::infrastructure::{logging, terminal};
use crate::shell::Shell;

fn connect(api_url: Option<String>) -> anyhow::Result<HttpSongGateway> {
  let api = config::resolve_api_config(api_url);
  info!(api_root = %api.api_root(), "using songs API");
  HttpSongGateway::new(&api).context("could not build the HTTP client")
}

/// Entry point: parse arguments, wire config → gateway → store, dispatch.
///
/// Commands that show the catalog mount the store (initial full load). The
/// rest start from an empty store and only fetch the song they act on.
pub async fn run() -> anyhow::Result<()> {
  let Cli { api_url, verbose, command } = Cli::parse();
  logging::init(verbose);
  info!("Starting cancionero v{}", env!("CARGO_PKG_VERSION"));

  let mut term = terminal::stdio();
  let year = chrono::Local::now().year();

  match command {
    Command::List { filter, json } => {
      let store = SongStore::mount(connect(api_url)?).await;
      commands::list(&store, &mut term, filter.into(), json)
    }
    Command::Genres => {
      let store = SongStore::mount(connect(api_url)?).await;
      commands::genres(&store, &mut term)
    }
    Command::Artists => {
      let store = SongStore::mount(connect(api_url)?).await;
      commands::artists(&store, &mut term)
    }
    Command::Show { id } => {
      let store = SongStore::new(connect(api_url)?);
      commands::show(&store, &mut term, id).await
    }
    Command::Add { fields } => {
      let store = SongStore::new(connect(api_url)?);
      commands::add(&store, &mut term, fields, year).await
    }
    Command::Edit { id, fields } => {
      let store = SongStore::new(connect(api_url)?);
      commands::edit(&store, &mut term, id, fields).await
    }
    Command::Delete { id, yes } => {
      let store = SongStore::new(connect(api_url)?);
      commands::delete(&store, &mut term, id, yes).await
    }
    Command::Play { id, open } => {
      let store = SongStore::new(connect(api_url)?);
      commands::play(&store, &mut term, id, open).await
    }
    Command::Shell { open } => {
      let store = SongStore::mount(connect(api_url)?).await;
      Shell::new(&store, open, year).run(&mut term).await
    }
    Command::Config { action } => config::handle(action, api_url, &mut term),
  }
}
