use super::grid::Coord;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("grid size {0} is not positive")]
    BadGridSize(i32),

    #[error("flat coordinate list has odd length {0}")]
    OddCoordinates(usize),

    #[error("target at ({row}, {col}) lies outside a {size}x{size} grid")]
    TargetOutOfBounds { row: i32, col: i32, size: usize },

    #[error("knight count {0} is negative")]
    BadKnightCount(i32),

    #[error("{0} knights but no princesses or monsters to visit")]
    NoTargets(usize),
}

/// What a knight is currently doing. Replaces the judge-era convention of
/// multiplexing princess/monster indices and two sentinels into one signed
/// integer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Task {
    /// Walking to the princess with this index.
    Rescue(usize),
    /// Walking to the monster with this index.
    Hunt(usize),
    /// Heading to the grid center to regroup before leaving.
    Gather,
    /// Walking to the nearest exit. Terminal.
    Exit,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Knight {
    pub pos: Coord,
    pub task: Task,
}

impl Knight {
    pub fn new(pos: Coord, task: Task) -> Self {
        Knight { pos, task }
    }
}

/// Validated description of one dungeon: grid size, target coordinates and
/// fleet size. Construction is the only place malformed judge input can
/// surface, so everything downstream works on indices it can trust.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub size: usize,
    pub princesses: Vec<Coord>,
    pub monsters: Vec<Coord>,
    pub knights: usize,
}

impl Scenario {
    pub fn new(
        size: usize,
        princesses: Vec<Coord>,
        monsters: Vec<Coord>,
        knights: usize,
    ) -> Result<Self, ScenarioError> {
        if size == 0 {
            return Err(ScenarioError::BadGridSize(0));
        }
        for target in princesses.iter().chain(monsters.iter()) {
            if target.row >= size || target.col >= size {
                return Err(ScenarioError::TargetOutOfBounds {
                    row: target.row as i32,
                    col: target.col as i32,
                    size,
                });
            }
        }
        if knights > 0 && princesses.is_empty() && monsters.is_empty() {
            return Err(ScenarioError::NoTargets(knights));
        }
        Ok(Scenario {
            size,
            princesses,
            monsters,
            knights,
        })
    }

    /// Builds a scenario from the judge's wire shape: coordinates arrive as
    /// flat `[row0, col0, row1, col1, ..]` integer lists.
    pub fn from_flat(
        size: i32,
        princesses: &[i32],
        monsters: &[i32],
        knights: i32,
    ) -> Result<Self, ScenarioError> {
        if size <= 0 {
            return Err(ScenarioError::BadGridSize(size));
        }
        if knights < 0 {
            return Err(ScenarioError::BadKnightCount(knights));
        }
        let size = size as usize;
        let princesses = parse_pairs(princesses, size)?;
        let monsters = parse_pairs(monsters, size)?;
        Scenario::new(size, princesses, monsters, knights as usize)
    }
}

fn parse_pairs(flat: &[i32], size: usize) -> Result<Vec<Coord>, ScenarioError> {
    if flat.len() % 2 != 0 {
        return Err(ScenarioError::OddCoordinates(flat.len()));
    }
    let mut coords = Vec::with_capacity(flat.len() / 2);
    for pair in flat.chunks_exact(2) {
        let (row, col) = (pair[0], pair[1]);
        if row < 0 || col < 0 || row as usize >= size || col as usize >= size {
            return Err(ScenarioError::TargetOutOfBounds { row, col, size });
        }
        coords.push(Coord::new(row as usize, col as usize));
    }
    Ok(coords)
}
