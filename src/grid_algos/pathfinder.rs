use crate::collections::PriorityQueue;
use crate::errors::PathError;
use crate::geometry::{Coord, manhattan_distance};
use crate::grid::{Grid, Status};

use super::SearchMode;
use super::jps;
use super::smoothing::{smooth_astar_path, smooth_jps_path};


/// Entry on the open queue: a cell plus the f score it was queued with
///
/// Equality covers both fields so that `PriorityQueue::replace` can locate
/// the exact stale entry during a decrease-key.
#[derive(Clone, Copy, Debug, PartialEq)]
struct OpenEntry {
    id: Coord,
    f_score: u32,
}

fn lower_f_score(a: &OpenEntry, b: &OpenEntry) -> bool {
    a.f_score < b.f_score
}


/// Grid shortest-path engine
///
/// Owns the grid and all per-search state: the open queue and the search
/// epoch. Rather than wiping every cell between searches, each search gets
/// a fresh epoch number; a cell whose stamp is `+epoch` is on the open
/// list, `-epoch` on the closed list, and any other value means the cell
/// has not been touched this search. Membership tests are O(1) and no
/// full-grid reset ever happens.
///
/// A `find_path` call runs to completion before returning and leaves the
/// queue drained and the epoch advanced, so the engine is immediately
/// reusable. Searches are not reentrant: concurrent searches need separate
/// engines.
pub struct Pathfinder {
    grid: Grid,
    queue: PriorityQueue<OpenEntry>,
    epoch: i32,
    mode: SearchMode,
}

impl Pathfinder {

    /// Engine over a fresh all-walkable grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            queue: PriorityQueue::new(lower_f_score),
            epoch: 1,
            mode: SearchMode::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, for obstacle editing between searches
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Select the strategy used by subsequent searches. Affects both
    /// neighbor generation and the smoothing flavor.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Shortest path from `start` to `goal`, inclusive
    ///
    /// An empty vector means no path exists; that is a normal outcome, not
    /// an error. With `smoothing` the raw path is post-processed by the
    /// strategy matching the current mode.
    pub fn find_path(
        &mut self,
        start: Coord,
        goal: Coord,
        corner_cutting: bool,
        smoothing: bool,
    ) -> Vec<Coord> {
        let mut path = Vec::new();

        // The start node is its own parent; reconstruction stops on that
        // sentinel.
        self.add_to_open_list(start, start, goal);

        while !self.on_closed_list(goal) && !self.queue.is_empty() {
            let current = self.queue.pop_and_get().id;
            self.add_to_closed_list(current);

            for neighbour in self.neighbours(current, goal, corner_cutting) {
                if self.on_closed_list(neighbour) {
                    continue;
                }
                if !self.on_open_list(neighbour) {
                    self.add_to_open_list(neighbour, current, goal);
                } else if self.calc_gscore(current, neighbour) < self.grid.cell(neighbour).g_score {
                    self.update_open_list(neighbour, current);
                }
            }
        }

        if self.on_closed_list(goal) {
            let mut node = goal;
            loop {
                path.push(node);
                let parent = self.grid.cell(node).parent;
                if parent == node {
                    break;
                }
                node = parent;
            }
            path.reverse();
        }

        // Whatever the outcome, flush leftover open entries and advance the
        // epoch so the next search starts from a clean logical slate.
        self.queue.clear();
        self.epoch += 1;

        if !smoothing || path.len() <= 2 {
            return path;
        }
        match self.mode {
            SearchMode::AStar => smooth_astar_path(&self.grid, &path),
            SearchMode::JumpPoint => smooth_jps_path(&self.grid, &path),
        }
    }

    /// `find_path` with endpoint validation and a typed error for callers
    /// that want one
    pub fn plan(
        &mut self,
        start: Coord,
        goal: Coord,
        corner_cutting: bool,
        smoothing: bool,
    ) -> Result<Vec<Coord>, PathError> {
        for id in [start, goal] {
            if !self.grid.is_valid(id.x, id.y) {
                return Err(PathError::OutOfBounds(id));
            }
            if self.grid.cell(id).status == Status::Blocked {
                return Err(PathError::BlockedEndpoint(id));
            }
        }

        let path = self.find_path(start, goal, corner_cutting, smoothing);
        if path.is_empty() {
            return Err(PathError::NoPathFound);
        }
        Ok(path)
    }

    /// Plan a path and stamp its cells `Walked` for display. Returns
    /// whether a path was found. `Grid::clear_walked` resets the stamps.
    pub fn walk(
        &mut self,
        from: Coord,
        to: Coord,
        corner_cutting: bool,
        smoothing: bool,
    ) -> bool {
        match self.plan(from, to, corner_cutting, smoothing) {
            Ok(path) => {
                for id in path {
                    self.grid.cell_mut(id).status = Status::Walked;
                }
                true
            }
            Err(_) => false,
        }
    }

    /// Neighbor generation, the point where A* and JPS diverge: plain
    /// adjacency versus pruned successors reached through jump scans. The
    /// start node has no direction of travel, so JPS falls back to plain
    /// adjacency there.
    fn neighbours(&self, current: Coord, goal: Coord, corner_cutting: bool) -> Vec<Coord> {
        match self.mode {
            SearchMode::AStar => adjacent(&self.grid, current, corner_cutting),
            SearchMode::JumpPoint => {
                if self.grid.cell(current).parent == current {
                    adjacent(&self.grid, current, corner_cutting)
                } else {
                    jps::successors(&self.grid, current, goal, corner_cutting)
                }
            }
        }
    }

    fn on_open_list(&self, id: Coord) -> bool {
        self.grid.is_valid(id.x, id.y) && self.grid.cell(id).list == self.epoch
    }

    fn on_closed_list(&self, id: Coord) -> bool {
        self.grid.is_valid(id.x, id.y) && self.grid.cell(id).list == -self.epoch
    }

    /// Open a newly discovered cell: stamp it, record its parent and
    /// scores, queue it. Out-of-grid targets are silently dropped.
    fn add_to_open_list(&mut self, target: Coord, parent: Coord, goal: Coord) {
        if !self.grid.is_valid(target.x, target.y) {
            return;
        }

        let g = self.calc_gscore(parent, target);
        let h = self.calc_hscore(target, goal);
        let epoch = self.epoch;

        let cell = self.grid.cell_mut(target);
        cell.list = epoch;
        cell.parent = parent;
        cell.g_score = g;
        cell.h_score = h;

        self.queue.push(OpenEntry { id: target, f_score: g + h });
    }

    /// Move a popped cell to the closed list. Closing a cell that is not
    /// currently open is an invariant violation and panics.
    fn add_to_closed_list(&mut self, id: Coord) {
        let epoch = self.epoch;
        let cell = self.grid.cell_mut(id);
        if cell.list == epoch {
            cell.list = -epoch;
        } else {
            panic!("closing cell ({}, {}) that was never opened", id.x, id.y);
        }
    }

    /// Decrease-key: a cheaper path to an open cell was found. Rewrites
    /// parent and g score and repositions the queue entry in place.
    fn update_open_list(&mut self, target: Coord, new_parent: Coord) {
        let cell = self.grid.cell(target);
        let h = cell.h_score;
        let old = OpenEntry { id: target, f_score: cell.g_score + h };

        let g = self.calc_gscore(new_parent, target);
        let cell = self.grid.cell_mut(target);
        cell.parent = new_parent;
        cell.g_score = g;

        self.queue.replace(&old, OpenEntry { id: target, f_score: g + h });
    }

    /// Heuristic: Manhattan distance at the straight-move unit cost of 10.
    /// Admissible and consistent for 8-directional movement.
    fn calc_hscore(&self, from: Coord, to: Coord) -> u32 {
        (manhattan_distance(from.x, from.y, to.x, to.y) * 10) as u32
    }

    /// Cost from the start through `from` to `to`: 10 per orthogonal step,
    /// 14 per diagonal step, and for non-adjacent JPS jumps the rounded
    /// Euclidean distance at the same scale. A node whose parent is itself
    /// is the root and costs nothing.
    fn calc_gscore(&self, from: Coord, to: Coord) -> u32 {
        if from == to {
            return 0;
        }

        let base = self.grid.cell(from).g_score;
        if !from.is_adjacent(&to) {
            return base + (from.distance(&to) * 10.0).round() as u32;
        }
        if from.is_diagonal_to(&to) {
            base + 14
        } else {
            base + 10
        }
    }
}

/// All walkable cells among the up to 8 neighbours of `id`
///
/// With corner cutting disallowed, a diagonal neighbour is skipped when
/// either of its two flanking orthogonal cells is blocked, so paths cannot
/// squeeze through a diagonal gap.
pub(crate) fn adjacent(grid: &Grid, id: Coord, corner_cutting: bool) -> Vec<Coord> {
    let mut out = Vec::new();
    for i in -1..=1 {
        for j in -1..=1 {
            if i == 0 && j == 0 {
                continue;
            }
            if grid.is_blocked(id.x + i, id.y + j) {
                continue;
            }
            if !corner_cutting
                && i != 0
                && j != 0
                && (grid.is_blocked(id.x + i, id.y) || grid.is_blocked(id.x, id.y + j))
            {
                continue;
            }
            out.push(Coord::new(id.x + i, id.y + j));
        }
    }
    out
}
