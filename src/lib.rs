/// Environment
pub mod env;

/// Grid-world mazes built from ASCII tile arrays
///
/// A tile array is parsed once into per-symbol coordinate sets ([`maze::TileMap`]). Every reset
/// then draws a fresh [`maze::Layout`]: outer walls, a random subset of the numbered obstacle
/// groups, fixed walls, an agent pose and a goal.
///
/// ```
/// use gridlab::env::Environment;
/// use gridlab::maze::{MazeConfig, ObstacleMaze};
///
/// let config = MazeConfig::new(&["S.0", "11G"]).with_obstacles(1, Some(2));
/// let mut env = ObstacleMaze::with_seed(config, 0).unwrap();
/// let state = env.reset();
/// assert_eq!(state.agent_pos, (1, 1));
/// ```
pub mod maze;

/// Export smoothed training curves from scalar event logs
///
/// [`metrics::export_run`] loads a fixed set of series from the event files of one run, checks
/// that they were logged at identical steps, smooths them with an exponentially weighted moving
/// average and renders one line plot per (x, y) series pair.
pub mod metrics;

/// Terminal preview of exported figures
#[cfg(feature = "viz")]
pub mod viz;

mod util;
