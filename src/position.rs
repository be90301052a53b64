#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// All eight surrounding positions in row-major order, without any bounds
    /// applied. Callers filter against their grid.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(Position::new(self.x + dx, self.y + dy))
                }
            })
        })
    }

    pub fn is_adjacent(&self, other: Position) -> bool {
        *self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// Row-major `[row, column]` index into a grid. Only meaningful for
    /// in-bounds positions.
    pub(crate) fn to_nd_index(self) -> [usize; 2] {
        [self.y as usize, self.x as usize]
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
