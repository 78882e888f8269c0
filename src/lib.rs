pub mod config;
pub mod connectivity;
pub mod corridors;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod rooms;
pub mod smoothing;

pub use config::{
    CorridorSettings, CorridorStrategy, GeneratorConfig, RoomSettings, SmoothingSettings,
};
pub use error::ConfigError;
pub use generator::{GenerationState, GenerationSummary, MapGenerator};
pub use grid::{Grid, Point, Tile};
pub use rooms::Room;
