use serde::{Deserialize, Serialize};

/// Grid cell coordinate. Bounds are enforced by [`GridSize`], not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction.unit_vector())
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Screen coordinates: y grows downwards.
    pub fn unit_vector(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    /// The 90 degree turns available while travelling in this direction.
    pub fn allowed_turns(&self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    pub fn can_turn_to(&self, requested: Direction) -> bool {
        self.allowed_turns().contains(&requested)
    }
}

/// Largest accepted width or height. Keeps every coordinate a snake can
/// reach, one step past any border included, well inside `i32`.
pub const MAX_GRID_DIMENSION: i32 = 1 << 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    width: i32,
    height: i32,
}

impl GridSize {
    pub fn new(width: i32, height: i32) -> Result<Self, String> {
        if width <= 0 || height <= 0 {
            return Err(format!("Grid dimensions must be positive, got {}x{}", width, height));
        }
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(format!(
                "Grid dimensions must not exceed {}, got {}x{}",
                MAX_GRID_DIMENSION, width, height
            ));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    /// Half-up rounded centre cell.
    pub fn center(&self) -> Position {
        Position::new(self.width / 2 + self.width % 2, self.height / 2 + self.height % 2)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_vectors() {
        let origin = Position::new(50, 50);
        assert_eq!(origin.step(Direction::Up), Position::new(50, 49));
        assert_eq!(origin.step(Direction::Down), Position::new(50, 51));
        assert_eq!(origin.step(Direction::Left), Position::new(49, 50));
        assert_eq!(origin.step(Direction::Right), Position::new(51, 50));
    }

    #[test]
    fn test_turn_table() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let expected = requested != current && !requested.is_opposite(&current);
                assert_eq!(current.can_turn_to(requested), expected, "{:?} -> {:?}", current, requested);
            }
        }
    }

    #[test]
    fn test_center_rounds_half_up() {
        assert_eq!(GridSize::new(75, 100).unwrap().center(), Position::new(38, 50));
        assert_eq!(GridSize::new(58, 78).unwrap().center(), Position::new(29, 39));
    }

    #[test]
    fn test_contains_is_half_open() {
        let grid = GridSize::new(10, 5).unwrap();
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(9, 4)));
        assert!(!grid.contains(Position::new(10, 4)));
        assert!(!grid.contains(Position::new(9, 5)));
        assert!(!grid.contains(Position::new(-1, 0)));
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(GridSize::new(0, 10).is_err());
        assert!(GridSize::new(10, -1).is_err());
    }

    #[test]
    fn test_dimension_bound() {
        assert!(GridSize::new(i32::MAX, 20).is_err());
        assert!(GridSize::new(20, MAX_GRID_DIMENSION + 1).is_err());

        let grid = GridSize::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION).unwrap();
        assert_eq!(grid.center(), Position::new(MAX_GRID_DIMENSION / 2, MAX_GRID_DIMENSION / 2));

        let corner = Position::new(MAX_GRID_DIMENSION - 1, MAX_GRID_DIMENSION - 1);
        assert!(grid.contains(corner));
        assert!(!grid.contains(corner.step(Direction::Right)));
        assert!(!grid.contains(corner.step(Direction::Down)));
    }

    #[test]
    fn test_center_of_single_cell_rounds_up() {
        assert_eq!(GridSize::new(1, 1).unwrap().center(), Position::new(1, 1));
        assert_eq!(GridSize::new(7, 4).unwrap().center(), Position::new(4, 2));
    }
}
