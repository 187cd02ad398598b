use crate::geometry::Coord;
use crate::grid::Grid;


/// One slot of the 3x3 probe window around a node: the cell's coordinates
/// and whether it can be stepped on.
#[derive(Clone, Copy, Debug)]
struct Probe {
    x: i32,
    y: i32,
    ok: bool,
}

/// Probe window centred on `id`, indexed
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
/// with row 0 above the node (decreasing y).
fn probe_window(grid: &Grid, id: Coord) -> [Probe; 9] {
    let mut window = [Probe { x: 0, y: 0, ok: false }; 9];
    for (i, probe) in window.iter_mut().enumerate() {
        let dx = (i as i32 % 3) - 1;
        let dy = (i as i32 / 3) - 1;
        probe.x = id.x + dx;
        probe.y = id.y + dy;
        probe.ok = !grid.is_blocked(probe.x, probe.y);
    }
    window
}

fn rotate_180(w: [Probe; 9]) -> [Probe; 9] {
    let mut out = w;
    for i in 0..9 {
        out[i] = w[8 - i];
    }
    out
}

fn rotate_ccw(w: [Probe; 9]) -> [Probe; 9] {
    let mut out = w;
    for i in 0..3 {
        out[i * 3] = w[2 - i];
        out[1 + i * 3] = w[5 - i];
        out[2 + i * 3] = w[8 - i];
    }
    out
}

fn rotate_cw(w: [Probe; 9]) -> [Probe; 9] {
    let mut out = w;
    for i in 0..3 {
        out[i * 3] = w[6 + i];
        out[1 + i * 3] = w[3 + i];
        out[2 + i * 3] = w[i];
    }
    out
}

/// JPS successors of `target`
///
/// The caller guarantees `target` has a parent other than itself; the
/// direction of travel is derived from that parent. The 8 surrounding cells
/// are classified through the probe window, which is first rotated so that
/// the travel direction matches a canonical frame: arriving from the left
/// for straight movement, from the bottom-left for diagonal movement. That
/// leaves exactly two cases to evaluate instead of eight.
///
/// Candidate directions that survive pruning are then handed to the jump
/// scan; only directions whose jump lands somewhere become successors.
pub(crate) fn successors(
    grid: &Grid,
    target: Coord,
    goal: Coord,
    corner_cutting: bool,
) -> Vec<Coord> {
    let parent = grid.cell(target).parent;
    debug_assert!(parent != target, "successors of a root node");

    let mut window = probe_window(grid, target);

    // The parent may be a distant jump point, but it always lies on a
    // straight or diagonal line from the target, so only the signs matter.
    let dx = target.x - parent.x;
    let dy = target.y - parent.y;

    let mut candidates: Vec<Coord> = Vec::new();

    if dx == 0 || dy == 0 {
        // Straight arrival. Canonical frame: coming from the left (dx > 0).
        if dx < 0 {
            window = rotate_180(window);
        } else if dy > 0 {
            window = rotate_ccw(window);
        } else if dy < 0 {
            window = rotate_cw(window);
        }

        // Forced diagonal above the lane:
        // . x 2
        // . N 5
        // . . .
        if window[2].ok && !window[1].ok && (corner_cutting || window[5].ok) {
            candidates.push(Coord::new(window[2].x, window[2].y));
        }
        // Forced diagonal below the lane, mirror of the one above
        if window[8].ok && !window[7].ok && (corner_cutting || window[5].ok) {
            candidates.push(Coord::new(window[8].x, window[8].y));
        }
        // The single natural neighbour: straight ahead
        if window[5].ok {
            candidates.push(Coord::new(window[5].x, window[5].y));
        }
    } else {
        // Diagonal arrival. Canonical frame: coming from the bottom-left
        // (dx > 0, dy < 0).
        if dx > 0 && dy > 0 {
            window = rotate_ccw(window);
        } else if dx < 0 && dy < 0 {
            window = rotate_cw(window);
        } else if dx < 0 && dy > 0 {
            window = rotate_180(window);
        }

        // Natural neighbours: both orthogonal components and the diagonal
        // continuation.
        for slot in [1, 2, 5] {
            if window[slot].ok {
                candidates.push(Coord::new(window[slot].x, window[slot].y));
            }
        }
        // Forced neighbours behind the blocked flanks
        if window[0].ok && !window[3].ok && (corner_cutting || window[1].ok) {
            candidates.push(Coord::new(window[0].x, window[0].y));
        }
        if window[8].ok && !window[7].ok && (corner_cutting || window[5].ok) {
            candidates.push(Coord::new(window[8].x, window[8].y));
        }
    }

    let mut found = Vec::new();
    for candidate in candidates {
        let dx = candidate.x - target.x;
        let dy = candidate.y - target.y;
        debug_assert!(dx.abs() <= 1 && dy.abs() <= 1);
        if let Some(point) = jump(grid, target, dx, dy, goal, corner_cutting) {
            found.push(point);
        }
    }
    found
}

/// Jump scan: walk from `current` one cell at a time in direction
/// `(dx, dy)` and return the first jump point, or `None` if the scan dies
/// against an obstacle or the grid edge.
///
/// A landing cell is a jump point if it is the goal, if it has a forced
/// neighbour, or (diagonal scans only) if a purely horizontal or purely
/// vertical scan sent out from it finds one. Recursion depth is bounded by
/// the grid extent.
pub(crate) fn jump(
    grid: &Grid,
    current: Coord,
    dx: i32,
    dy: i32,
    goal: Coord,
    corner_cutting: bool,
) -> Option<Coord> {
    let n = Coord::new(current.x + dx, current.y + dy);

    if grid.is_blocked(n.x, n.y) {
        return None;
    }

    if n == goal {
        return Some(n);
    }

    // A diagonal scan cannot slip between two blocked cells
    if !corner_cutting
        && dx != 0
        && dy != 0
        && grid.is_blocked(n.x + dx, n.y)
        && grid.is_blocked(n.x, n.y + dy)
    {
        return None;
    }

    if has_forced_neighbour(grid, n, dx, dy) {
        return Some(n);
    }

    // Diagonal scans spawn straight scans; if either finds a jump point,
    // the landing cell itself is one.
    if dx != 0 && dy != 0 {
        if jump(grid, n, 0, dy, goal, corner_cutting).is_some() {
            return Some(n);
        }
        if jump(grid, n, dx, 0, goal, corner_cutting).is_some() {
            return Some(n);
        }
    }

    jump(grid, n, dx, dy, goal, corner_cutting)
}

/// Forced-neighbour test for a cell reached while scanning in `(dx, dy)`
///
/// Per direction class there are exactly two blocked/open corner patterns
/// that make a neighbour unreachable by any other scan line; each arm below
/// spells out its pair. Probe-window slot numbers are noted for
/// cross-reference with `successors`.
pub(crate) fn has_forced_neighbour(grid: &Grid, id: Coord, dx: i32, dy: i32) -> bool {
    let (x, y) = (id.x, id.y);
    let blocked = |x: i32, y: i32| grid.is_blocked(x, y);

    if dy == 0 {
        if dx == 1 {
            // left to right
            return (!blocked(x + 1, y - 1) && blocked(x, y - 1)) // 2 open, 1 blocked
                || (!blocked(x + 1, y + 1) && blocked(x, y + 1)); // 8 open, 7 blocked
        }
        if dx == -1 {
            // right to left
            return (!blocked(x - 1, y - 1) && blocked(x, y - 1)) // 0 open, 1 blocked
                || (!blocked(x - 1, y + 1) && blocked(x, y + 1)); // 6 open, 7 blocked
        }
    }

    if dx == 0 {
        if dy == 1 {
            // top to bottom
            return (!blocked(x + 1, y + 1) && blocked(x + 1, y)) // 8 open, 5 blocked
                || (!blocked(x - 1, y + 1) && blocked(x - 1, y)); // 6 open, 3 blocked
        }
        if dy == -1 {
            // bottom to top
            return (!blocked(x - 1, y - 1) && blocked(x - 1, y)) // 0 open, 3 blocked
                || (!blocked(x + 1, y - 1) && blocked(x + 1, y)); // 2 open, 5 blocked
        }
    }

    if dx > 0 && dy < 0 {
        return (!blocked(x - 1, y - 1) && blocked(x - 1, y)) // 0 open, 3 blocked
            || (!blocked(x + 1, y + 1) && blocked(x, y + 1)); // 8 open, 7 blocked
    }

    if dx > 0 && dy > 0 {
        return (!blocked(x + 1, y - 1) && blocked(x, y - 1)) // 2 open, 1 blocked
            || (!blocked(x - 1, y + 1) && blocked(x - 1, y)); // 6 open, 3 blocked
    }

    if dx < 0 && dy > 0 {
        return (!blocked(x - 1, y - 1) && blocked(x, y - 1)) // 0 open, 1 blocked
            || (!blocked(x + 1, y + 1) && blocked(x + 1, y)); // 8 open, 5 blocked
    }

    if dx < 0 && dy < 0 {
        return (!blocked(x + 1, y - 1) && blocked(x + 1, y)) // 2 open, 5 blocked
            || (!blocked(x - 1, y + 1) && blocked(x, y + 1)); // 6 open, 7 blocked
    }

    false
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_reaches_goal_along_open_corridor() {
        let g = Grid::new(10, 1);
        let found = jump(&g, Coord::new(0, 0), 1, 0, Coord::new(9, 0), false);
        assert_eq!(found, Some(Coord::new(9, 0)));
    }

    #[test]
    fn test_jump_dies_against_obstacle_and_edge() {
        let mut g = Grid::new(10, 1);
        g.set_blocked(4, 0, true);
        assert_eq!(jump(&g, Coord::new(0, 0), 1, 0, Coord::new(9, 0), false), None);

        // Scanning away from the goal runs off the grid
        assert_eq!(jump(&g, Coord::new(0, 0), -1, 0, Coord::new(9, 0), false), None);
    }

    #[test]
    fn test_forced_neighbour_beside_wall() {
        let mut g = Grid::new(8, 8);
        g.set_blocked(3, 1, true);

        // Moving right along y = 2: cell above (3, 2) is blocked while the
        // diagonal ahead is open
        assert!(has_forced_neighbour(&g, Coord::new(3, 2), 1, 0));
        assert!(!has_forced_neighbour(&g, Coord::new(1, 2), 1, 0));
        // Same wall seen from the other scan direction
        assert!(has_forced_neighbour(&g, Coord::new(3, 2), -1, 0));
    }

    #[test]
    fn test_jump_stops_at_forced_neighbour() {
        let mut g = Grid::new(10, 3);
        g.set_blocked(4, 0, true);
        let found = jump(&g, Coord::new(0, 1), 1, 0, Coord::new(9, 1), false);
        assert_eq!(found, Some(Coord::new(4, 1)));
    }

    #[test]
    fn test_diagonal_jump_honours_corner_cutting_policy() {
        let mut g = Grid::new(10, 10);
        g.set_blocked(2, 1, true);
        g.set_blocked(1, 2, true);

        // Without corner cutting the diagonal scan cannot squeeze past
        // (2, 1)/(1, 2)
        assert_eq!(jump(&g, Coord::new(0, 0), 1, 1, Coord::new(9, 9), false), None);

        // With corner cutting it slips through and stops right behind the
        // corner, where (2, 2) has a forced neighbour
        assert_eq!(
            jump(&g, Coord::new(0, 0), 1, 1, Coord::new(9, 9), true),
            Some(Coord::new(2, 2))
        );
    }

    #[test]
    fn test_diagonal_jump_reaches_goal_on_its_line() {
        let g = Grid::new(10, 10);
        let found = jump(&g, Coord::new(0, 0), 1, 1, Coord::new(5, 5), false);
        assert_eq!(found, Some(Coord::new(5, 5)));
    }

    #[test]
    fn test_successors_keep_only_successful_jumps() {
        let mut g = Grid::new(10, 10);
        // Straight arrival at (4, 4) from the left; the only natural
        // neighbour is straight ahead, and on an empty grid that scan only
        // lands if the goal sits on it.
        g.cell_mut(Coord::new(4, 4)).parent = Coord::new(3, 4);

        let found = successors(&g, Coord::new(4, 4), Coord::new(7, 4), false);
        assert_eq!(found, vec![Coord::new(7, 4)]);

        let none = successors(&g, Coord::new(4, 4), Coord::new(0, 0), false);
        assert!(none.is_empty());
    }

    #[test]
    fn test_successors_include_forced_direction() {
        let mut g = Grid::new(10, 10);
        g.cell_mut(Coord::new(4, 4)).parent = Coord::new(3, 4);
        // Wall segment above the lane forces the up-right diagonal
        g.set_blocked(4, 3, true);

        let found = successors(&g, Coord::new(4, 4), Coord::new(5, 3), false);
        assert!(found.contains(&Coord::new(5, 3)));
    }
}
