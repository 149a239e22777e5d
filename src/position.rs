// Coordinate normalization against the board bounds

use crate::types::{Coord, Direction};

/// Normalizes `pos` against a `width` x `height` board.
///
/// Without wrap, anything outside `[0, width) x [0, height)` is invalid and yields `None`.
/// With wrap, each axis is taken modulo its dimension.
pub fn adjust(pos: Coord, width: i32, height: i32, wrap: bool) -> Option<Coord> {
    if width <= 0 || height <= 0 {
        return None;
    }

    if wrap {
        return Some(Coord {
            x: pos.x.rem_euclid(width),
            y: pos.y.rem_euclid(height),
        });
    }

    if pos.x < 0 || pos.x >= width || pos.y < 0 || pos.y >= height {
        None
    } else {
        Some(pos)
    }
}

/// The four orthogonal neighbors of `pos`, unadjusted, in right/left/up/down order
pub fn surrounding(pos: Coord) -> [(Direction, Coord); 4] {
    let dirs = Direction::all();
    [
        (dirs[0], dirs[0].apply(&pos)),
        (dirs[1], dirs[1].apply(&pos)),
        (dirs[2], dirs[2].apply(&pos)),
        (dirs[3], dirs[3].apply(&pos)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_in_bounds_is_identity() {
        let pos = Coord { x: 3, y: 4 };
        assert_eq!(adjust(pos, 5, 5, false), Some(pos));
        assert_eq!(adjust(pos, 5, 5, true), Some(pos));
    }

    #[test]
    fn test_adjust_rejects_out_of_bounds_without_wrap() {
        assert_eq!(adjust(Coord { x: -1, y: 0 }, 5, 5, false), None);
        assert_eq!(adjust(Coord { x: 5, y: 0 }, 5, 5, false), None);
        assert_eq!(adjust(Coord { x: 0, y: -1 }, 5, 5, false), None);
        assert_eq!(adjust(Coord { x: 0, y: 5 }, 5, 5, false), None);
    }

    #[test]
    fn test_adjust_wraps_each_axis() {
        assert_eq!(adjust(Coord { x: -1, y: 2 }, 5, 7, true), Some(Coord { x: 4, y: 2 }));
        assert_eq!(adjust(Coord { x: 5, y: 2 }, 5, 7, true), Some(Coord { x: 0, y: 2 }));
        assert_eq!(adjust(Coord { x: 2, y: -1 }, 5, 7, true), Some(Coord { x: 2, y: 6 }));
        assert_eq!(adjust(Coord { x: 2, y: 7 }, 5, 7, true), Some(Coord { x: 2, y: 0 }));
    }

    #[test]
    fn test_surrounding_order_and_offsets() {
        let around = surrounding(Coord { x: 2, y: 2 });
        assert_eq!(around[0], (Direction::Right, Coord { x: 3, y: 2 }));
        assert_eq!(around[1], (Direction::Left, Coord { x: 1, y: 2 }));
        assert_eq!(around[2], (Direction::Up, Coord { x: 2, y: 3 }));
        assert_eq!(around[3], (Direction::Down, Coord { x: 2, y: 1 }));
    }
}
