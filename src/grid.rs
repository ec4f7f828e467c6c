#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    pub fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn step(self, dir: Dir) -> Coord {
        match dir {
            Dir::Up => Coord::new(self.row - 1, self.col),
            Dir::Down => Coord::new(self.row + 1, self.col),
            Dir::Left => Coord::new(self.row, self.col - 1),
            Dir::Right => Coord::new(self.row, self.col + 1),
            Dir::Stay => self,
        }
    }
}

/// Per-turn movement command, in the judge's single-character encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
    Stay,
}

impl Dir {
    pub fn code(self) -> char {
        match self {
            Dir::Up => 'N',
            Dir::Down => 'S',
            Dir::Left => 'W',
            Dir::Right => 'E',
            Dir::Stay => '0',
        }
    }

    pub fn from_code(code: char) -> Option<Dir> {
        match code {
            'N' => Some(Dir::Up),
            'S' => Some(Dir::Down),
            'W' => Some(Dir::Left),
            'E' => Some(Dir::Right),
            '0' => Some(Dir::Stay),
            _ => None,
        }
    }
}

/// One of the four corner exits, enumerated clockwise from the top-left.
/// Entry labels reuse the compass letters clockwise, so the bottom-right
/// corner is reported as 'S'.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exit {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Exit {
    pub fn label(self) -> char {
        match self {
            Exit::TopLeft => 'N',
            Exit::TopRight => 'E',
            Exit::BottomRight => 'S',
            Exit::BottomLeft => 'W',
        }
    }

    pub fn from_label(label: char) -> Option<Exit> {
        match label {
            'N' => Some(Exit::TopLeft),
            'E' => Some(Exit::TopRight),
            'S' => Some(Exit::BottomRight),
            'W' => Some(Exit::BottomLeft),
            _ => None,
        }
    }

    pub fn corner(self, size: usize) -> Coord {
        match self {
            Exit::TopLeft => Coord::new(0, 0),
            Exit::TopRight => Coord::new(0, size - 1),
            Exit::BottomRight => Coord::new(size - 1, size - 1),
            Exit::BottomLeft => Coord::new(size - 1, 0),
        }
    }
}

pub fn nearest_exit(pos: Coord, size: usize) -> Exit {
    match (pos.row < size / 2, pos.col < size / 2) {
        (true, true) => Exit::TopLeft,
        (true, false) => Exit::TopRight,
        (false, false) => Exit::BottomRight,
        (false, true) => Exit::BottomLeft,
    }
}

pub fn nearest_exit_distance(pos: Coord, size: usize) -> usize {
    pos.manhattan(nearest_exit(pos, size).corner(size))
}

/// Single-axis greedy step: close the column gap first, then the row gap.
/// Paths come out L-shaped, losing one unit of Manhattan distance per step.
pub fn step_toward(from: Coord, to: Coord) -> Dir {
    if from.col > to.col {
        Dir::Left
    } else if from.col < to.col {
        Dir::Right
    } else if from.row > to.row {
        Dir::Up
    } else if from.row < to.row {
        Dir::Down
    } else {
        Dir::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_exit_picks_the_quadrant_corner() {
        assert_eq!(nearest_exit(Coord::new(1, 2), 10), Exit::TopLeft);
        assert_eq!(nearest_exit(Coord::new(0, 9), 10), Exit::TopRight);
        assert_eq!(nearest_exit(Coord::new(9, 9), 10), Exit::BottomRight);
        assert_eq!(nearest_exit(Coord::new(7, 3), 10), Exit::BottomLeft);
        // boundary rows/cols belong to the bottom/right half
        assert_eq!(nearest_exit(Coord::new(5, 5), 10), Exit::BottomRight);
    }

    #[test]
    fn exit_distance_is_manhattan_to_the_corner() {
        assert_eq!(nearest_exit_distance(Coord::new(2, 3), 10), 5);
        assert_eq!(nearest_exit_distance(Coord::new(2, 7), 10), 4);
        assert_eq!(nearest_exit_distance(Coord::new(8, 1), 10), 2);
        assert_eq!(nearest_exit_distance(Coord::new(6, 6), 10), 6);
        assert_eq!(nearest_exit_distance(Coord::new(0, 0), 10), 0);
    }

    #[test]
    fn step_toward_closes_columns_before_rows() {
        let dest = Coord::new(4, 7);
        assert_eq!(step_toward(Coord::new(0, 2), dest), Dir::Right);
        assert_eq!(step_toward(Coord::new(0, 9), dest), Dir::Left);
        assert_eq!(step_toward(Coord::new(9, 7), dest), Dir::Up);
        assert_eq!(step_toward(Coord::new(1, 7), dest), Dir::Down);
        assert_eq!(step_toward(dest, dest), Dir::Stay);
    }

    #[test]
    fn steps_lose_exactly_one_unit_of_distance() {
        let dest = Coord::new(3, 1);
        let mut pos = Coord::new(8, 6);
        while pos != dest {
            let dir = step_toward(pos, dest);
            let next = pos.step(dir);
            assert_eq!(next.manhattan(dest) + 1, pos.manhattan(dest));
            pos = next;
        }
    }

    #[test]
    fn command_codes_round_trip() {
        for dir in [Dir::Up, Dir::Down, Dir::Left, Dir::Right, Dir::Stay] {
            assert_eq!(Dir::from_code(dir.code()), Some(dir));
        }
        assert_eq!(Dir::from_code('x'), None);
    }

    #[test]
    fn entry_labels_run_clockwise() {
        assert_eq!(Exit::TopLeft.label(), 'N');
        assert_eq!(Exit::TopRight.label(), 'E');
        assert_eq!(Exit::BottomRight.label(), 'S');
        assert_eq!(Exit::BottomLeft.label(), 'W');
        for exit in [
            Exit::TopLeft,
            Exit::TopRight,
            Exit::BottomRight,
            Exit::BottomLeft,
        ] {
            assert_eq!(Exit::from_label(exit.label()), Some(exit));
        }
        assert_eq!(Exit::from_label('0'), None);
    }
}
