pub mod animation;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod player;
pub mod powerup;
pub mod session;
pub mod snapshot;
pub mod world;

pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use session::Game;
