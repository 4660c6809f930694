/// Direction the snake can move.
///
/// The discriminants are load-bearing: horizontal directions are `-1`/`1`
/// and vertical directions are `2`/`-2`, so opposite directions are numeric
/// negations of each other and the corner-sprite lookup can key off the
/// signed difference between two consecutive directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Direction {
    Left = -1,
    Right = 1,
    Up = 2,
    Down = -2,
}

impl Direction {
    /// The signed encoding used by the turn-classification rule.
    pub fn code(self) -> i8 {
        self as i8
    }

    /// Returns true if turning from self to other would be a 180-degree turn.
    pub fn is_opposite(self, other: Direction) -> bool {
        self.code() == -other.code()
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Returns the delta (dx, dy) in grid cells. The world is y-up:
    /// `Up` increases y and `Down` decreases it.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }
}

/// One frame's worth of directional input, as polled from the host.
///
/// The engine evaluates the pressed flags in the fixed order left, right,
/// up, down; combined with the one-turn-per-tick latch this means the
/// first differing direction in that order wins the tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl InputSnapshot {
    /// Mark a direction as pressed.
    pub fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
        }
    }

    pub fn any_pressed(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}
