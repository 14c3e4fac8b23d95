use cancionero_core::domain::{Song, SongId, VideoLink};

pub const NO_VIDEO: &str = "Esta canción no tiene video.";

/// Selecting the song that is already playing stops it; any other song replaces it.
pub fn toggle(current: Option<SongId>, song: &Song) -> Option<SongId> {
  if current == Some(song.id) { None } else { Some(song.id) }
}

/// The link to show for a song, if it has a video at all.
pub fn link_for(song: &Song) -> Option<VideoLink> {
  song.video_url().map(VideoLink::parse)
}

pub fn render(song: &Song) -> String {
  match link_for(song) {
    Some(VideoLink::Embeddable { embed_url, .. }) => format!("▶ {}\n{embed_url}", song.display_title()),
    Some(VideoLink::External(url)) => format!("No se pudo cargar el video\nAbrir en YouTube → {url}"),
    None => NO_VIDEO.to_string(),
  }
}

pub fn open_in_browser(link: &VideoLink) -> std::io::Result<()> {
  tracing::debug!(target_url = link.target(), "opening video");
  open::that(link.target())
}
