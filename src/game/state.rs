use std::collections::VecDeque;

use super::clock::TickClock;
use super::config::GameConfig;
use super::direction::Direction;
use super::sprite::{self, SheetRegion};

/// A position in world units; always a multiple of the cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one step of `step` units in a direction.
    pub fn moved_in(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

/// A trailing unit of the snake.
///
/// The region tag is purely visual; only the position participates in
/// collision. The direction records which way the segment was moving when
/// it last took its cell, which the next segment's corner classification
/// reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodySegment {
    pub pos: Position,
    pub region: SheetRegion,
    pub direction: Direction,
}

/// The snake: head state plus the ring of body segments.
///
/// The body is a queue whose front is the tail-most segment. Each tick the
/// front is popped, repositioned to the cell the head just vacated, and
/// pushed at the back, so the back of the queue always sits adjacent to
/// the head. This reuses segments instead of allocating per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Head position after the most recent move.
    pub head: Position,
    /// Head position before the most recent move; the cell the popped
    /// segment snaps to.
    pub head_before_update: Position,
    pub direction: Direction,
    pub head_region: SheetRegion,
    /// One-turn-per-tick latch; reset when a tick fires.
    pub direction_set: bool,
    pub body: VecDeque<BodySegment>,
}

impl Snake {
    /// The starting snake: head two cells in, facing right, with the tail
    /// at the corner cell and the neck one cell behind the head.
    pub fn starting(config: &GameConfig) -> Self {
        let cell = config.cell_size;
        let head = config.initial_head();
        let direction = config.initial_direction();

        let mut body = VecDeque::with_capacity(8);
        body.push_back(BodySegment {
            pos: Position::new(0, 0),
            region: sprite::tail_region(direction),
            direction,
        });
        body.push_back(BodySegment {
            pos: Position::new(cell, 0),
            region: sprite::BODY_HORIZONTAL,
            direction,
        });

        Self {
            head,
            head_before_update: head,
            direction,
            head_region: sprite::head_region(direction),
            direction_set: false,
            body,
        }
    }

    /// True if any body segment occupies the given cell.
    pub fn body_occupies(&self, pos: Position) -> bool {
        self.body.iter().any(|segment| segment.pos == pos)
    }

    /// Total length including the head.
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }
}

/// Round phase. GameOver freezes the simulation until an explicit restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Playing,
    GameOver,
}

/// Complete state of one round, a plain value owned by the host loop.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// At most one apple is pending at a time.
    pub apple: Option<Position>,
    pub phase: RoundPhase,
    pub clock: TickClock,
    /// Apples eaten this round.
    pub score: u32,
    /// Fired ticks this round.
    pub ticks: u32,
}

impl GameState {
    /// A fresh round. Restart must construct one of these, never revert
    /// mutations piecemeal.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            snake: Snake::starting(config),
            apple: None,
            phase: RoundPhase::Playing,
            clock: TickClock::new(config.tick_interval),
            score: 0,
            ticks: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing
    }
}
