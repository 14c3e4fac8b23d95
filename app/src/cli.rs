use clap::{Args, Parser, Subcommand};

use cancionero_core::domain::{SongFormData, SongId};
use cancionero_core::services::CatalogFilter;
use cancionero_http::API_URL_ENV;

/// Terminal catalog browser for a remote song library.
#[derive(Debug, Parser)]
#[command(name = "cancionero", version, about)]
pub struct Cli {
  /// Base URL of the songs API (the `/api` prefix is added automatically).
  #[arg(long, global = true, env = API_URL_ENV)]
  pub api_url: Option<String>,

  /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// List songs, optionally filtered.
  List {
    #[command(flatten)]
    filter: FilterArgs,
    /// Print the visible songs as JSON.
    #[arg(long)]
    json: bool,
  },
  /// List the distinct genres in the catalog.
  Genres,
  /// List the distinct artists in the catalog.
  Artists,
  /// Show one song.
  Show { id: SongId },
  /// Add a song. Without field flags the form is filled interactively.
  Add {
    #[command(flatten)]
    fields: SongArgs,
  },
  /// Edit a song. Without field flags the form is filled interactively.
  Edit {
    id: SongId,
    #[command(flatten)]
    fields: SongArgs,
  },
  /// Delete a song after confirmation.
  Delete {
    id: SongId,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },
  /// Show the video panel of a song.
  Play {
    id: SongId,
    /// Open the video in the default browser.
    #[arg(long)]
    open: bool,
  },
  /// Interactive session over a single loaded catalog.
  Shell {
    /// Open videos in the browser when `play` is used.
    #[arg(long)]
    open: bool,
  },
  /// Inspect or change the persisted configuration.
  Config {
    #[command(subcommand)]
    action: ConfigAction,
  },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
  /// Print the effective configuration.
  Show {
    #[arg(long)]
    json: bool,
  },
  /// Persist new values in the `[api]` section.
  Set {
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
  },
}

#[derive(Debug, Default, Clone, Args)]
pub struct FilterArgs {
  /// Case-insensitive text matched against title or artist.
  #[arg(short, long)]
  pub search: Option<String>,
  /// Exact genre.
  #[arg(short, long)]
  pub genre: Option<String>,
  /// Exact artist.
  #[arg(short, long)]
  pub artist: Option<String>,
}

impl From<FilterArgs> for CatalogFilter {
  fn from(args: FilterArgs) -> Self {
    CatalogFilter {
      search: args.search.unwrap_or_default(),
      genre: args.genre.unwrap_or_default(),
      artist: args.artist.unwrap_or_default(),
    }
  }
}

/// Form fields given on the command line. An empty value clears an optional field.
#[derive(Debug, Default, Clone, Args)]
pub struct SongArgs {
  #[arg(long)]
  pub title: Option<String>,
  #[arg(long)]
  pub artist: Option<String>,
  #[arg(long)]
  pub album: Option<String>,
  #[arg(long, allow_negative_numbers = true)]
  pub year: Option<i32>,
  #[arg(long)]
  pub genre: Option<String>,
  #[arg(long)]
  pub url: Option<String>,
}

impl SongArgs {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.artist.is_none()
      && self.album.is_none()
      && self.year.is_none()
      && self.genre.is_none()
      && self.url.is_none()
  }

  /// Overwrites only the fields that were given.
  pub fn apply_to(self, form: &mut SongFormData) {
    if let Some(title) = self.title {
      form.title = title;
    }
    if let Some(artist) = self.artist {
      form.artist = artist;
    }
    if let Some(year) = self.year {
      form.year = year;
    }
    if let Some(album) = self.album {
      form.album = non_blank(album);
    }
    if let Some(genre) = self.genre {
      form.genre = non_blank(genre);
    }
    if let Some(url) = self.url {
      form.url = non_blank(url);
    }
  }
}

fn non_blank(value: String) -> Option<String> {
  if value.trim().is_empty() { None } else { Some(value) }
}
