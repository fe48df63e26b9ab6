mod config;
mod env;
mod error;
mod grid;
/// Fixed maze layouts and the named variants built from them
///
/// Layouts use the tile grammar of [`tile`]: `S` agent start, `G` goal, `#` fixed wall,
/// `0`-`9` obstacle groups, `.` empty.
pub mod levels;
mod populate;
mod select;
pub mod tile;

pub use config::{MazeConfig, ObstacleKind};
pub use env::{Action, ObstacleMaze, Observation};
pub use error::MazeError;
pub use grid::{Color, Direction, Grid, Object};
pub use populate::{populate, Layout, MISSION};
pub use select::select_obstacle_groups;
pub use tile::{parse_tile_array, Pos, TileMap};
