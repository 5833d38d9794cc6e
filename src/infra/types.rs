use std::fmt;

use super::error::PolicyError;

/// Discrete move actions, numbered as the simulator expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'L' => Some(Direction::Left),
            'D' => Some(Direction::Down),
            'R' => Some(Direction::Right),
            'U' => Some(Direction::Up),
            _ => None,
        }
    }

    pub fn as_str_name(self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Down => "DOWN",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
        }
    }

    /// The two directions at right angles to this one (slip targets).
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
            Direction::Down | Direction::Up => [Direction::Left, Direction::Right],
        }
    }

    /// Index reached by moving from `index` in this direction, or `None` when
    /// the move would leave the grid.
    pub fn apply(self, index: usize, shape: GridShape) -> Option<usize> {
        if !shape.contains(index) {
            return None;
        }
        let (row, col) = shape.row_col(index);
        match self {
            Direction::Left if col > 0 => Some(index - 1),
            Direction::Right if col + 1 < shape.width => Some(index + 1),
            Direction::Up if row > 0 => Some(index - shape.width),
            Direction::Down if row + 1 < shape.height => Some(index + shape.width),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str_name())
    }
}

/// Dimensions of a rectangular lake, tiles indexed row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
}

impl GridShape {
    pub const FOUR_BY_FOUR: GridShape = GridShape {
        width: 4,
        height: 4,
    };

    pub fn new(width: usize, height: usize) -> Result<Self, PolicyError> {
        if width < 2 || height < 2 {
            return Err(PolicyError::InvalidShape { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The goal is always the bottom-right tile.
    pub fn goal(&self) -> usize {
        self.len() - 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.len()
    }

    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn is_last_column(&self, index: usize) -> bool {
        index % self.width == self.width - 1
    }

    pub fn is_last_row(&self, index: usize) -> bool {
        index / self.width == self.height - 1
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self::FOUR_BY_FOUR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_numbering_matches_simulator_actions() {
        assert_eq!(Direction::Left.index(), 0);
        assert_eq!(Direction::Down.index(), 1);
        assert_eq!(Direction::Right.index(), 2);
        assert_eq!(Direction::Up.index(), 3);
        assert_eq!(Direction::from_index(2), Some(Direction::Right));
        assert_eq!(Direction::from_index(4), None);
    }

    #[test]
    fn test_apply_stays_inside_grid() {
        let shape = GridShape::FOUR_BY_FOUR;
        assert_eq!(Direction::Down.apply(0, shape), Some(4));
        assert_eq!(Direction::Right.apply(3, shape), None);
        assert_eq!(Direction::Left.apply(4, shape), None);
        assert_eq!(Direction::Up.apply(2, shape), None);
        assert_eq!(Direction::Down.apply(13, shape), None);
        assert_eq!(Direction::Up.apply(13, shape), Some(9));
    }

    #[test]
    fn test_shape_rejects_degenerate_grids() {
        assert!(GridShape::new(1, 4).is_err());
        assert!(GridShape::new(4, 1).is_err());
        let shape = GridShape::new(5, 3).unwrap();
        assert_eq!(shape.goal(), 14);
        assert!(shape.is_last_column(9));
        assert!(shape.is_last_row(10));
        assert!(!shape.is_last_row(9));
    }

    #[test]
    fn test_perpendicular() {
        assert_eq!(
            Direction::Down.perpendicular(),
            [Direction::Left, Direction::Right]
        );
        assert_eq!(
            Direction::Right.perpendicular(),
            [Direction::Up, Direction::Down]
        );
    }
}
