pub mod song_gateway;

pub use song_gateway::{DeleteConfirmation, GatewayError, SongGateway};
