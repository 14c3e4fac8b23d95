pub mod client;
pub mod config;

pub use client::HttpSongGateway;
pub use config::{API_URL_ENV, ApiConfig};
