use crate::geometry::Coord;


/// Cell status
///
/// `Walked` is a transient marker stamped on the cells of the most recently
/// walked path. It exists for display purposes only and is ignored by the
/// search: only `Blocked` makes a cell impassable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Walkable,
    Blocked,
    Walked,
}

/// One grid cell
///
/// `status` and `marked` are the user-facing state. The remaining fields are
/// search bookkeeping owned by the pathfinder: `list` is a signed search
/// epoch stamp (+epoch = open, -epoch = closed, anything else = untouched in
/// the current search), `parent` the predecessor on the best known path, and
/// `g_score`/`h_score` the usual A* costs. Stale search fields from earlier
/// searches are never cleared; the epoch stamp makes them unreadable instead.
#[derive(Clone, Debug)]
pub struct Cell {
    pub status: Status,
    pub marked: bool,
    pub(crate) list: i32,
    pub(crate) parent: Coord,
    pub(crate) g_score: u32,
    pub(crate) h_score: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            status: Status::Walkable,
            marked: false,
            list: 0,
            parent: Coord::new(0, 0),
            g_score: 0,
            h_score: 0,
        }
    }
}


/// Fixed-size rectangular grid of cells
///
/// Cells are allocated once at construction and live for the lifetime of the
/// grid; searches mutate their bookkeeping fields in place.
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {

    /// Fresh all-walkable grid
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bounds check
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// True if the cell is an obstacle. Out-of-bounds coordinates count as
    /// blocked, so neighbor and jump logic never needs a separate bounds
    /// test.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if !self.is_valid(x, y) {
            return true;
        }
        self.cell(Coord::new(x, y)).status == Status::Blocked
    }

    /// Set or clear an obstacle. Ignored outside the grid. Does not touch
    /// any in-flight search state.
    pub fn set_blocked(&mut self, x: i32, y: i32, blocked: bool) {
        if !self.is_valid(x, y) {
            return;
        }
        self.cell_mut(Coord::new(x, y)).status =
            if blocked { Status::Blocked } else { Status::Walkable };
    }

    /// Flip a cell between walkable and blocked. Ignored outside the grid.
    pub fn toggle_blocked(&mut self, x: i32, y: i32) {
        if !self.is_valid(x, y) {
            return;
        }
        let cell = self.cell_mut(Coord::new(x, y));
        cell.status = match cell.status {
            Status::Blocked => Status::Walkable,
            _ => Status::Blocked,
        };
    }

    /// Shared access to a cell
    ///
    /// Precondition: the coordinate is on the grid.
    pub fn cell(&self, id: Coord) -> &Cell {
        assert!(self.is_valid(id.x, id.y), "cell ({}, {}) is outside the grid", id.x, id.y);
        &self.cells[(id.y * self.width + id.x) as usize]
    }

    /// Mutable access to a cell, same precondition as `cell`
    pub fn cell_mut(&mut self, id: Coord) -> &mut Cell {
        assert!(self.is_valid(id.x, id.y), "cell ({}, {}) is outside the grid", id.x, id.y);
        &mut self.cells[(id.y * self.width + id.x) as usize]
    }

    /// Highlight every cell in the rectangle spanned by `a` and `b`
    /// (inclusive, any corner order). Marks are display state only.
    pub fn mark_region(&mut self, a: Coord, b: Coord) {
        self.for_region(a, b, |cell| cell.marked = true);
    }

    /// Drop all highlights
    pub fn clear_marks(&mut self) {
        for cell in &mut self.cells {
            cell.marked = false;
        }
    }

    /// Toggle the blocked state of every cell in the rectangle spanned by
    /// `a` and `b` (inclusive, any corner order)
    pub fn toggle_region(&mut self, a: Coord, b: Coord) {
        self.for_region(a, b, |cell| {
            cell.status = match cell.status {
                Status::Blocked => Status::Walkable,
                _ => Status::Blocked,
            };
        });
    }

    /// Reset `Walked` stamps back to walkable
    pub fn clear_walked(&mut self) {
        for cell in &mut self.cells {
            if cell.status == Status::Walked {
                cell.status = Status::Walkable;
            }
        }
    }

    /// Apply `f` to each cell of a rectangle, clamped to the grid
    fn for_region<F: FnMut(&mut Cell)>(&mut self, a: Coord, b: Coord, mut f: F) {
        let x0 = a.x.min(b.x).max(0);
        let x1 = a.x.max(b.x).min(self.width - 1);
        let y0 = a.y.min(b.y).max(0);
        let y1 = a.y.max(b.y).min(self.height - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                f(&mut self.cells[(y * self.width + x) as usize]);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_walkable() {
        let g = Grid::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                assert!(!g.is_blocked(x, y));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let g = Grid::new(4, 3);
        assert!(!g.is_valid(-1, 0));
        assert!(!g.is_valid(4, 0));
        assert!(!g.is_valid(0, 3));
        assert!(g.is_blocked(-1, 0));
        assert!(g.is_blocked(4, 2));
        assert!(g.is_blocked(0, -5));
    }

    #[test]
    fn test_set_and_toggle_blocked() {
        let mut g = Grid::new(4, 4);
        g.set_blocked(2, 2, true);
        assert!(g.is_blocked(2, 2));
        g.toggle_blocked(2, 2);
        assert!(!g.is_blocked(2, 2));
        g.toggle_blocked(2, 2);
        assert!(g.is_blocked(2, 2));

        // Edits outside the grid are silently ignored
        g.set_blocked(-1, -1, true);
        g.toggle_blocked(99, 0);
    }

    #[test]
    fn test_region_marking_any_corner_order() {
        let mut g = Grid::new(5, 5);
        g.mark_region(Coord::new(3, 3), Coord::new(1, 1));
        assert!(g.cell(Coord::new(1, 1)).marked);
        assert!(g.cell(Coord::new(2, 3)).marked);
        assert!(!g.cell(Coord::new(0, 0)).marked);
        assert!(!g.cell(Coord::new(4, 4)).marked);

        g.clear_marks();
        assert!(!g.cell(Coord::new(2, 2)).marked);
    }

    #[test]
    fn test_toggle_region_flips_blocked_state() {
        let mut g = Grid::new(4, 4);
        g.set_blocked(0, 0, true);
        g.toggle_region(Coord::new(0, 0), Coord::new(1, 1));
        assert!(!g.is_blocked(0, 0));
        assert!(g.is_blocked(1, 0));
        assert!(g.is_blocked(0, 1));
        assert!(g.is_blocked(1, 1));
        assert!(!g.is_blocked(2, 2));
    }

    #[test]
    fn test_region_clamped_to_grid() {
        let mut g = Grid::new(3, 3);
        g.mark_region(Coord::new(-5, -5), Coord::new(10, 0));
        assert!(g.cell(Coord::new(0, 0)).marked);
        assert!(g.cell(Coord::new(2, 0)).marked);
        assert!(!g.cell(Coord::new(0, 1)).marked);
    }

    #[test]
    fn test_clear_walked_resets_only_walked_cells() {
        let mut g = Grid::new(3, 3);
        g.cell_mut(Coord::new(1, 1)).status = Status::Walked;
        g.set_blocked(2, 2, true);
        g.clear_walked();
        assert_eq!(g.cell(Coord::new(1, 1)).status, Status::Walkable);
        assert!(g.is_blocked(2, 2));
    }
}
