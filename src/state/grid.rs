use std::fmt;

use crate::infra::{GridShape, PolicyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileType {
    Start,
    Frozen,
    Hole,
    Goal,
}

impl TileType {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'S' => Some(TileType::Start),
            'F' => Some(TileType::Frozen),
            'H' => Some(TileType::Hole),
            'G' => Some(TileType::Goal),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            TileType::Start => 'S',
            TileType::Frozen => 'F',
            TileType::Hole => 'H',
            TileType::Goal => 'G',
        }
    }

    /// Hole and goal tiles end an episode.
    pub fn is_terminal(self) -> bool {
        matches!(self, TileType::Hole | TileType::Goal)
    }
}

/// Immutable tile layout of one lake, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    shape: GridShape,
    tiles: Vec<TileType>,
}

impl Grid {
    /// Decode a rendered map into tile types.
    ///
    /// Whitespace, ANSI colour escapes and a parenthesised action header line
    /// (`  (Down)`) are ignored so that a simulator's render output can be fed in
    /// directly. Every other character must be one of `S`, `F`, `H`, `G`, and the
    /// map must hold exactly `shape.len()` tiles.
    pub fn parse(rendered: &str, shape: GridShape) -> Result<Self, PolicyError> {
        let shape = GridShape::new(shape.width, shape.height)?;
        let mut tiles = Vec::with_capacity(shape.len());

        for line in rendered.lines() {
            if is_action_header(line) {
                continue;
            }

            let mut chars = line.chars();
            while let Some(c) = chars.next() {
                if c == '\x1b' {
                    skip_escape_sequence(&mut chars)?;
                    continue;
                }
                if c.is_whitespace() {
                    continue;
                }
                match TileType::from_char(c) {
                    Some(tile) => tiles.push(tile),
                    None => {
                        return Err(PolicyError::MalformedMap {
                            reason: format!("unrecognized character {:?}", c),
                        });
                    }
                }
            }
        }

        if tiles.len() != shape.len() {
            return Err(PolicyError::MalformedMap {
                reason: format!(
                    "expected {} tiles for a {}x{} grid, found {}",
                    shape.len(),
                    shape.width,
                    shape.height,
                    tiles.len()
                ),
            });
        }

        Ok(Self { shape, tiles })
    }

    pub fn parse_default(rendered: &str) -> Result<Self, PolicyError> {
        Self::parse(rendered, GridShape::FOUR_BY_FOUR)
    }

    pub fn from_rows(rows: &[&str], shape: GridShape) -> Result<Self, PolicyError> {
        Self::parse(&rows.join("\n"), shape)
    }

    /// Build a grid whose shape is taken from the rows themselves.
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Result<Self, PolicyError> {
        let width = rows.first().map(|row| row.as_ref().trim().len()).unwrap_or(0);
        if let Some(row) = rows.iter().find(|row| row.as_ref().trim().len() != width) {
            return Err(PolicyError::MalformedMap {
                reason: format!("row {:?} is not {} tiles wide", row.as_ref(), width),
            });
        }
        let shape = GridShape::new(width, rows.len())?;
        let joined = rows.iter().map(|row| row.as_ref()).collect::<Vec<_>>().join("\n");
        Self::parse(&joined, shape)
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn goal(&self) -> usize {
        self.shape.goal()
    }

    pub fn tile(&self, index: usize) -> Option<TileType> {
        self.tiles.get(index).copied()
    }

    pub fn is_hole(&self, index: usize) -> bool {
        self.tile(index) == Some(TileType::Hole)
    }

    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn hole_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == TileType::Hole)
            .map(|(index, _)| index)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.tiles.chunks(self.shape.width).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for tile in chunk {
                write!(f, "{}", tile.as_char())?;
            }
        }
        Ok(())
    }
}

fn is_action_header(line: &str) -> bool {
    matches!(line.trim(), "(Left)" | "(Down)" | "(Right)" | "(Up)")
}

// Consumes `[ ... m` after an ESC.
fn skip_escape_sequence(chars: &mut std::str::Chars<'_>) -> Result<(), PolicyError> {
    if chars.next() != Some('[') {
        return Err(PolicyError::MalformedMap {
            reason: "unsupported escape sequence".to_string(),
        });
    }
    for c in chars.by_ref() {
        if c == 'm' {
            return Ok(());
        }
        if !(c.is_ascii_digit() || c == ';') {
            break;
        }
    }
    Err(PolicyError::MalformedMap {
        reason: "unterminated colour escape".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: [&str; 4] = ["SFFF", "FHFH", "FFFH", "HFFG"];

    #[test]
    fn test_parse_reference_map() {
        let grid = Grid::from_rows(&REFERENCE, GridShape::FOUR_BY_FOUR).unwrap();
        use TileType::*;
        assert_eq!(
            grid.tiles(),
            &[
                Start, Frozen, Frozen, Frozen, Frozen, Hole, Frozen, Hole, Frozen, Frozen, Frozen,
                Hole, Hole, Frozen, Frozen, Goal
            ]
        );
        assert_eq!(grid.hole_indices().collect::<Vec<_>>(), vec![5, 7, 11, 12]);
        assert_eq!(grid.goal(), 15);
    }

    #[test]
    fn test_parse_rejects_wrong_tile_count() {
        let err = Grid::parse_default("SFFF\nFHFH\nFFFH\nHFF").unwrap_err();
        assert!(matches!(err, PolicyError::MalformedMap { .. }));

        let err = Grid::parse_default("SFFF\nFHFH\nFFFH\nHFFGF").unwrap_err();
        assert!(matches!(err, PolicyError::MalformedMap { .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_character() {
        let err = Grid::parse_default("SFFF\nFHXH\nFFFH\nHFFG").unwrap_err();
        match err {
            PolicyError::MalformedMap { reason } => assert!(reason.contains("'X'")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_accepts_rendered_output() {
        let rendered = "  (Down)\n\x1b[41mS\x1b[0mFFF\nFHFH\nFFFH\nHFFG\n";
        let grid = Grid::parse_default(rendered).unwrap();
        assert_eq!(grid.to_string(), "SFFF\nFHFH\nFFFH\nHFFG");
    }

    #[test]
    fn test_parse_rejects_degenerate_shape() {
        let err = Grid::parse("", GridShape { width: 0, height: 4 }).unwrap_err();
        assert_eq!(err, PolicyError::InvalidShape { width: 0, height: 4 });

        let err = Grid::parse("SG", GridShape { width: 2, height: 1 }).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidShape { .. }));
    }

    #[test]
    fn test_only_direction_headers_are_skipped() {
        for header in ["(Left)", "(Down)", "(Right)", "  (Up)"] {
            let rendered = format!("{}\nSFFF\nFHFH\nFFFH\nHFFG\n", header);
            assert!(Grid::parse_default(&rendered).is_ok(), "{}", header);
        }

        let err = Grid::parse_default("(SFFF)\nFHFH\nFFFH\nHFFG").unwrap_err();
        assert!(matches!(err, PolicyError::MalformedMap { .. }));
    }

    #[test]
    fn test_parse_rejects_unterminated_escape() {
        let err = Grid::parse_default("\x1b[41SFFF\nFHFH\nFFFH\nHFFG").unwrap_err();
        assert!(matches!(err, PolicyError::MalformedMap { .. }));
    }

    #[test]
    fn test_from_layout_infers_shape() {
        let grid = Grid::from_layout(&["SFFFF", "FFHFF", "FFFFG"]).unwrap();
        assert_eq!(grid.shape(), GridShape { width: 5, height: 3 });
        assert!(grid.is_hole(7));

        assert!(Grid::from_layout(&["SFF", "FG"]).is_err());
    }
}
