// Library exports for the flood-fill Battlesnake
// The server binary, the replay tool and the tests all share this decision core.

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod flood_fill;
pub mod grid;
pub mod position;
pub mod replay;
pub mod scoring;
pub mod types;
