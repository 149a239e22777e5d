// Per-turn occupancy grid built from a board snapshot
//
// The grid is built once per decision and only read afterwards.

use log::warn;

use crate::position;
use crate::types::{Battlesnake, Board, Coord, RulesetKind};

/// Occupancy flags for one board position. The flags are independent:
/// a cell can be food and hazard at the same time, and snake occupancy
/// does not clear either of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Index into the snapshot's snake list
    pub snake: Option<usize>,
    pub hazard: bool,
    pub food: bool,
}

#[derive(Debug)]
pub struct Grid<'a> {
    width: i32,
    height: i32,
    ruleset: RulesetKind,
    cells: Vec<Cell>,
    snakes: &'a [Battlesnake],
}

impl<'a> Grid<'a> {
    /// Tags every snake segment, hazard and food on `board`.
    ///
    /// Tail segments are always marked, even when they may vacate this turn;
    /// callers decide whether a tail is passable via `is_passable_tail`.
    pub fn build(board: &'a Board, ruleset: RulesetKind) -> Self {
        let width = board.width.max(0);
        let height = board.height.max(0);
        let mut grid = Grid {
            width,
            height,
            ruleset,
            cells: vec![Cell::default(); (width * height) as usize],
            snakes: &board.snakes,
        };

        for (idx, snake) in board.snakes.iter().enumerate() {
            for part in &snake.body {
                if let Some(cell) = grid.cell_mut(*part) {
                    cell.snake = Some(idx);
                } else {
                    warn!("Snake {} has a segment off the board at {:?}", snake.id, part);
                }
            }
        }

        for hazard in &board.hazards {
            match grid.cell_mut(*hazard) {
                Some(cell) => cell.hazard = true,
                None => warn!("Ignoring hazard off the board at {:?}", hazard),
            }
        }

        for food in &board.food {
            match grid.cell_mut(*food) {
                Some(cell) => cell.food = true,
                None => warn!("Ignoring food off the board at {:?}", food),
            }
        }

        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Normalizes a coordinate under this grid's wrap rule
    pub fn adjust(&self, pos: Coord) -> Option<Coord> {
        position::adjust(pos, self.width, self.height, self.ruleset.wraps())
    }

    fn index(&self, pos: Coord) -> Option<usize> {
        let pos = self.adjust(pos)?;
        Some((pos.y * self.width + pos.x) as usize)
    }

    /// Snapshot entities must already lie on the board, even under wrap
    fn cell_mut(&mut self, pos: Coord) -> Option<&mut Cell> {
        let pos = position::adjust(pos, self.width, self.height, false)?;
        let idx = (pos.y * self.width + pos.x) as usize;
        self.cells.get_mut(idx)
    }

    pub fn cell(&self, pos: Coord) -> Option<&Cell> {
        let idx = self.index(pos)?;
        self.cells.get(idx)
    }

    /// The snake occupying `pos`, if any
    pub fn snake_at(&self, pos: Coord) -> Option<&'a Battlesnake> {
        let idx = self.cell(pos)?.snake?;
        self.snakes.get(idx)
    }

    pub fn is_hazard(&self, pos: Coord) -> bool {
        self.cell(pos).map_or(false, |c| c.hazard)
    }

    /// True when `pos` is the last body segment of the snake occupying it
    pub fn is_tail(&self, pos: Coord) -> bool {
        let pos = match self.adjust(pos) {
            Some(p) => p,
            None => return false,
        };
        self.snake_at(pos)
            .and_then(|snake| snake.body.last())
            .map_or(false, |tail| *tail == pos)
    }

    /// Tails can be entered outside constrictor, since they normally move away
    pub fn is_passable_tail(&self, pos: Coord) -> bool {
        !self.ruleset.constricts() && self.is_tail(pos)
    }

    /// Occupied by a snake segment that cannot be entered
    pub fn is_blocked(&self, pos: Coord) -> bool {
        self.snake_at(pos).is_some() && !self.is_passable_tail(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: Vec<Coord>) -> Battlesnake {
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: None,
            shout: None,
        }
    }

    fn board() -> Board {
        Board {
            width: 5,
            height: 4,
            food: vec![Coord { x: 0, y: 0 }, Coord { x: 4, y: 3 }],
            hazards: vec![Coord { x: 4, y: 3 }, Coord { x: 2, y: 1 }],
            snakes: vec![snake(
                "a",
                vec![Coord { x: 2, y: 2 }, Coord { x: 2, y: 1 }, Coord { x: 1, y: 1 }],
            )],
        }
    }

    #[test]
    fn test_grid_dimensions_match_board() {
        let board = board();
        let grid = Grid::build(&board, RulesetKind::Standard);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.area(), 20);
    }

    #[test]
    fn test_flags_are_independent() {
        let board = board();
        let grid = Grid::build(&board, RulesetKind::Standard);

        let both = grid.cell(Coord { x: 4, y: 3 }).unwrap();
        assert!(both.hazard && both.food);
        assert!(both.snake.is_none());

        let snake_on_hazard = grid.cell(Coord { x: 2, y: 1 }).unwrap();
        assert_eq!(snake_on_hazard.snake, Some(0));
        assert!(snake_on_hazard.hazard);

        assert_eq!(*grid.cell(Coord { x: 3, y: 3 }).unwrap(), Cell::default());
    }

    #[test]
    fn test_tail_is_marked_and_passable_outside_constrictor() {
        let board = board();
        let tail = Coord { x: 1, y: 1 };

        let standard = Grid::build(&board, RulesetKind::Standard);
        assert!(standard.snake_at(tail).is_some());
        assert!(standard.is_tail(tail));
        assert!(standard.is_passable_tail(tail));
        assert!(!standard.is_blocked(tail));
        assert!(standard.is_blocked(Coord { x: 2, y: 1 }));

        let constrictor = Grid::build(&board, RulesetKind::Constrictor);
        assert!(constrictor.is_tail(tail));
        assert!(!constrictor.is_passable_tail(tail));
        assert!(constrictor.is_blocked(tail));
    }

    #[test]
    fn test_off_board_entities_are_skipped() {
        let mut board = board();
        board.food.push(Coord { x: 9, y: 9 });
        board.hazards.push(Coord { x: -1, y: 0 });

        let standard = Grid::build(&board, RulesetKind::Standard);
        assert!(standard.cell(Coord { x: 9, y: 9 }).is_none());
        assert!(standard.cell(Coord { x: -1, y: 0 }).is_none());

        // Wrapping applies to movement, not to where the snapshot puts things
        let wrapped = Grid::build(&board, RulesetKind::Wrapped);
        assert_eq!(wrapped.cell(Coord { x: 4, y: 1 }), Some(&Cell::default()));
        assert_eq!(wrapped.cell(Coord { x: 4, y: 0 }), Some(&Cell::default()));
        assert!(!wrapped.is_hazard(Coord { x: -1, y: 0 }));
    }

    #[test]
    fn test_wrapped_grid_reads_through_edges() {
        let board = board();
        let grid = Grid::build(&board, RulesetKind::Wrapped);
        assert!(grid.cell(Coord { x: -1, y: -1 }).unwrap().food);
        assert!(grid.cell(Coord { x: 5, y: 0 }).unwrap().food);
    }
}
