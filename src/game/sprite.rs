//! Sprite-sheet regions and the turn-classification rule.
//!
//! Regions are addressed in sheet-cell coordinates on the classic 5x4
//! snake-graphics sheet; multiply by the cell size for pixel offsets.

use super::direction::Direction;

/// A region of the sprite sheet, in sheet-cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetRegion {
    pub sx: u16,
    pub sy: u16,
}

impl SheetRegion {
    pub const fn new(sx: u16, sy: u16) -> Self {
        Self { sx, sy }
    }

    /// Pixel offset of this region for a given cell size.
    pub fn pixel_offset(self, cell_size: i32) -> (i32, i32) {
        (self.sx as i32 * cell_size, self.sy as i32 * cell_size)
    }
}

pub const APPLE: SheetRegion = SheetRegion::new(0, 3);

pub const BODY_HORIZONTAL: SheetRegion = SheetRegion::new(1, 0);
pub const BODY_VERTICAL: SheetRegion = SheetRegion::new(2, 1);

/// Head region for the direction the head is moving in.
pub fn head_region(direction: Direction) -> SheetRegion {
    match direction {
        Direction::Right => SheetRegion::new(4, 0),
        Direction::Left => SheetRegion::new(3, 1),
        Direction::Up => SheetRegion::new(3, 0),
        Direction::Down => SheetRegion::new(4, 1),
    }
}

/// Tail region for the tail-most segment, keyed by its movement direction.
pub fn tail_region(direction: Direction) -> SheetRegion {
    match direction {
        Direction::Right => SheetRegion::new(4, 2),
        Direction::Left => SheetRegion::new(3, 3),
        Direction::Up => SheetRegion::new(3, 2),
        Direction::Down => SheetRegion::new(4, 3),
    }
}

/// Classify the sprite for a segment given the direction of the segment
/// ahead of it and the direction it is now moving in.
///
/// The signed difference of the two direction codes is one of five cases:
/// `+1`/`-1` and `+3`/`-3` select the four corner pieces (the `3`s arise
/// from the wraparound between the horizontal and vertical code ranges),
/// and anything else is straight motion, horizontal or vertical by the
/// new direction. Opposite directions never meet here because 180-degree
/// turns are rejected at input time.
pub fn turn_region(prev: Direction, new: Direction) -> SheetRegion {
    match prev.code() - new.code() {
        1 => SheetRegion::new(0, 0),
        3 => SheetRegion::new(2, 0),
        -3 => SheetRegion::new(0, 1),
        -1 => SheetRegion::new(2, 2),
        _ => {
            if new.is_horizontal() {
                BODY_HORIZONTAL
            } else {
                BODY_VERTICAL
            }
        }
    }
}
