pub mod catalog_view;
pub mod song_store;

pub use catalog_view::{CatalogFilter, CatalogView, distinct_artists, distinct_genres, filter_songs};
pub use song_store::{SongStore, StoreState, StoreStatus};
