use thiserror::Error;

/// Ways a maze configuration can be unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("tile array has no rows or an empty first row")]
    EmptyLayout,

    #[error("tile row {row} has width {found}, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile array has no `{0}` cell but the configuration requires one")]
    MissingSymbol(char),

    #[error("cannot place at least {min} obstacle groups, at most {max} of {available} may be used")]
    InvalidObstacleBounds {
        min: usize,
        max: usize,
        available: usize,
    },

    #[error("unknown obstacle type `{0}`, expected `wall` or `lava`")]
    UnknownObstacleKind(String),

    #[error("layout needs at least two open cells for the agent and goal")]
    NotEnoughOpenCells,

    #[error("no scenario named `{0}`")]
    UnknownScenario(String),
}
