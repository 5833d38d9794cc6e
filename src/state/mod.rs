mod grid;

pub use grid::{Grid, TileType};
