// Breadth-first traversal over the grid driven by a per-cell visitor

use std::collections::{HashSet, VecDeque};

use crate::grid::Grid;
use crate::position::surrounding;
use crate::types::Coord;

/// What the traversal should do after visiting a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit<T> {
    /// Queue this cell's neighbors
    Continue,
    /// Count the visit, but don't expand past this cell
    SkipNeighbors,
    /// End the traversal and yield the value
    Stop(T),
}

/// Visits every reachable coordinate from `start` in BFS order, at most once each.
///
/// Returns the value of the first `Visit::Stop`, or `None` once the queue drains.
/// Because cells come off the queue ring by ring, the first stop is at minimal
/// step distance from `start`.
pub fn flood_fill<T, F>(grid: &Grid, start: Coord, mut visitor: F) -> Option<T>
where
    F: FnMut(&Grid, Coord) -> Visit<T>,
{
    let mut queue = VecDeque::new();
    let mut visited = HashSet::with_capacity(grid.area());
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        let pos = match grid.adjust(pos) {
            Some(p) => p,
            None => continue,
        };

        if !visited.insert(pos) {
            continue;
        }

        match visitor(grid, pos) {
            Visit::Continue => {
                for (_, next) in surrounding(pos).iter() {
                    queue.push_back(*next);
                }
            }
            Visit::SkipNeighbors => {}
            Visit::Stop(value) => return Some(value),
        }
    }

    None
}
