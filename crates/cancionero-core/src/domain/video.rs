use once_cell::sync::Lazy;
use regex::Regex;

const EMBED_BASE: &str = "https://www.youtube.com/embed";

// Se prueban en orden: la forma corta primero, luego `watch?` con `v=` en cualquier posición.
static YOUTUBE_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
  [
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
      .expect("static regex"),
    Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").expect("static regex"),
  ]
});

/// Extrae el identificador de video de un enlace de YouTube.
///
/// Reconoce `youtube.com/watch?v=ID`, `youtu.be/ID`, `youtube.com/embed/ID` y
/// `youtube.com/watch?...&v=ID`. Devuelve `None` para cualquier otro enlace.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
  YOUTUBE_PATTERNS
    .iter()
    .find_map(|re| re.captures(url).and_then(|caps| caps.get(1)).map(|m| m.as_str()))
}

/// Cómo mostrar el video de una canción.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoLink {
  /// Se pudo extraer el id: se puede incrustar el reproductor.
  Embeddable { video_id: String, embed_url: String },
  /// Enlace no reconocido: sólo se ofrece abrirlo fuera.
  External(String),
}

impl VideoLink {
  pub fn parse(url: &str) -> Self {
    match extract_youtube_id(url) {
      Some(id) => VideoLink::Embeddable { video_id: id.to_string(), embed_url: embed_url(id) },
      None => VideoLink::External(url.to_string()),
    }
  }

  /// URL que conviene abrir: el embed si existe, si no el enlace original.
  pub fn target(&self) -> &str {
    match self {
      VideoLink::Embeddable { embed_url, .. } => embed_url,
      VideoLink::External(url) => url,
    }
  }
}

pub fn embed_url(video_id: &str) -> String {
  format!("{EMBED_BASE}/{video_id}?autoplay=1&rel=0")
}
