pub mod ids;
pub mod song;
pub mod song_form;
pub mod video;

pub use ids::SongId;
pub use song::Song;
pub use song_form::{SongFormData, ValidationError};
pub use video::VideoLink;
