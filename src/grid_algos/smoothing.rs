use crate::collections::FxIndexMap;
use crate::geometry::Coord;
use crate::grid::Grid;


/// Rasterize the straight line from `start` to `end` across the grid
///
/// Returns every traversed cell in order, endpoints included, or an empty
/// vector as soon as any cell on the line (endpoints too) is blocked.
///
/// Shallow (dx-dominant) and steep (dy-dominant) lines are stepped along
/// different major axes. Collapsing the two cases produces the wrong cell
/// count for lines like (9, 10) -> (11, 20), which must traverse 11 cells.
pub fn walkable(grid: &Grid, start: Coord, end: Coord) -> Vec<Coord> {
    let step = start.step_towards(&end);
    let adx = (end.x - start.x).abs();
    let ady = (end.y - start.y).abs();

    let mut current = start;
    let mut line = Vec::new();

    if adx > ady {
        // Shallow: step along x, accumulate error towards a y step
        let mut err = adx / 2;
        while current != end {
            if grid.is_blocked(current.x, current.y) {
                return Vec::new();
            }
            line.push(current);
            current.x += step.x;
            err += ady;
            if err >= adx {
                err -= adx;
                current.y += step.y;
            }
        }
    } else {
        // Steep: step along y, accumulate error towards an x step
        let mut err = ady / 2;
        while current != end {
            if grid.is_blocked(current.x, current.y) {
                return Vec::new();
            }
            line.push(current);
            current.y += step.y;
            err += adx;
            if err > ady {
                err -= ady;
                current.x += step.x;
            }
        }
    }

    if grid.is_blocked(end.x, end.y) {
        return Vec::new();
    }
    line.push(end);
    line
}

/// Smooth a plain-A* path by eliding waypoints
///
/// A waypoint is a cell where the step direction changes. Waypoints are
/// visited left to right; for each one, the line between its two neighbour
/// waypoints is redrawn, and if that line is clear the waypoint is dropped
/// and the redrawn cells take over its two legs. After a successful elision
/// the following waypoint is skipped, so the pass is greedy rather than
/// exhaustive.
pub(crate) fn smooth_astar_path(grid: &Grid, path: &[Coord]) -> Vec<Coord> {
    let len = path.len();
    if len <= 2 {
        return path.to_vec();
    }

    // Collect turning points, keeping both endpoints
    let mut waypoints: Vec<usize> = vec![0];
    for i in 1..len - 1 {
        let incoming = path[i] - path[i - 1];
        let outgoing = path[i + 1] - path[i];
        if incoming != outgoing {
            waypoints.push(i);
        }
    }
    waypoints.push(len - 1);

    // Redrawn segments, keyed by the path indices they now connect
    let mut redrawn: FxIndexMap<(usize, usize), Vec<Coord>> = FxIndexMap::default();
    let mut k = 1;
    while k + 1 < waypoints.len() {
        let prev = waypoints[k - 1];
        let next = waypoints[k + 1];
        let line = walkable(grid, path[prev], path[next]);
        if !line.is_empty() {
            redrawn.insert((prev, next), line);
            waypoints.remove(k);
        }
        k += 1;
    }

    // Stitch the surviving segments together. Segments share their border
    // cell, so each appended segment drops its first entry.
    let mut smoothed = vec![path[0]];
    for pair in waypoints.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if let Some(line) = redrawn.get(&(from, to)) {
            smoothed.extend_from_slice(&line[1..]);
        } else {
            smoothed.extend_from_slice(&path[from + 1..=to]);
        }
    }
    smoothed
}

/// Smooth a raw jump-point path by greedy line-of-sight jumps
///
/// From each position, the line of sight is extended as far forward along
/// the path as it stays clear; the longest clear line replaces the skipped
/// waypoints. Where no jump is possible the single next segment is
/// rasterized instead, so the result is always a full per-cell path.
pub(crate) fn smooth_jps_path(grid: &Grid, path: &[Coord]) -> Vec<Coord> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut smoothed = vec![path[0]];
    let mut i = 0;

    while i + 1 < path.len() {
        // Reach past the immediate neighbor for as long as the line holds
        let mut jump: Option<(usize, Vec<Coord>)> = None;
        let mut j = i + 2;
        while j < path.len() {
            let line = walkable(grid, path[i], path[j]);
            if line.is_empty() {
                break;
            }
            jump = Some((j, line));
            j += 1;
        }

        match jump {
            Some((j, line)) => {
                smoothed.extend_from_slice(&line[1..]);
                i = j;
            }
            None => {
                // The jump scan that produced the path guarantees this
                // segment is clear
                let line = walkable(grid, path[i], path[i + 1]);
                if line.is_empty() {
                    smoothed.push(path[i + 1]);
                } else {
                    smoothed.extend_from_slice(&line[1..]);
                }
                i += 1;
            }
        }
    }
    smoothed
}


#[cfg(test)]
mod tests {
    use super::*;

    // Total cost of a per-cell path under the 10/14 metric
    fn octile_cost(path: &[Coord]) -> u32 {
        path.windows(2)
            .map(|w| {
                let dx = (w[1].x - w[0].x).abs() as u32;
                let dy = (w[1].y - w[0].y).abs() as u32;
                14 * dx.min(dy) + 10 * (dx.max(dy) - dx.min(dy))
            })
            .sum()
    }

    #[test]
    fn test_walkable_cell_counts() {
        let g = Grid::new(30, 30);

        // Steep line: must traverse one cell per y step
        let steep = walkable(&g, Coord::new(9, 10), Coord::new(11, 20));
        assert_eq!(steep.len(), 11);

        let straight = walkable(&g, Coord::new(0, 0), Coord::new(5, 0));
        assert_eq!(straight.len(), 6);

        let diagonal = walkable(&g, Coord::new(0, 0), Coord::new(4, 4));
        assert_eq!(
            diagonal,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 1),
                Coord::new(2, 2),
                Coord::new(3, 3),
                Coord::new(4, 4),
            ]
        );

        let point = walkable(&g, Coord::new(3, 3), Coord::new(3, 3));
        assert_eq!(point, vec![Coord::new(3, 3)]);
    }

    #[test]
    fn test_walkable_fails_on_blocked_cells() {
        let mut g = Grid::new(10, 10);
        g.set_blocked(2, 2, true);
        assert!(walkable(&g, Coord::new(0, 0), Coord::new(4, 4)).is_empty());

        // A blocked endpoint fails too
        let mut g = Grid::new(10, 10);
        g.set_blocked(3, 0, true);
        assert!(walkable(&g, Coord::new(0, 0), Coord::new(3, 0)).is_empty());
        assert!(walkable(&g, Coord::new(3, 0), Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn test_walkable_direction_consistent_on_axis_and_diagonal() {
        let g = Grid::new(20, 20);

        for (a, b) in [
            (Coord::new(2, 2), Coord::new(9, 2)),
            (Coord::new(4, 1), Coord::new(4, 9)),
            (Coord::new(1, 1), Coord::new(8, 8)),
        ] {
            let forward = walkable(&g, a, b);
            let mut backward = walkable(&g, b, a);
            backward.reverse();
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn test_astar_smoothing_elides_a_corner() {
        let g = Grid::new(5, 5);
        // Two straight legs around an empty corner
        let raw = vec![
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(2, 0),
            Coord::new(2, 1),
            Coord::new(2, 2),
        ];

        let smoothed = smooth_astar_path(&g, &raw);
        assert_eq!(
            smoothed,
            vec![Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)]
        );
        assert!(octile_cost(&smoothed) <= octile_cost(&raw));
    }

    #[test]
    fn test_astar_smoothing_keeps_obstructed_corners() {
        let mut g = Grid::new(5, 5);
        g.set_blocked(1, 1, true);
        let raw = vec![
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(2, 0),
            Coord::new(2, 1),
            Coord::new(2, 2),
        ];

        assert_eq!(smooth_astar_path(&g, &raw), raw);
    }

    #[test]
    fn test_trivial_paths_pass_through() {
        let g = Grid::new(5, 5);
        let two = vec![Coord::new(0, 0), Coord::new(1, 1)];
        assert_eq!(smooth_astar_path(&g, &two), two);
        assert_eq!(smooth_jps_path(&g, &two), two);
    }

    #[test]
    fn test_jps_smoothing_rasterizes_jump_segments() {
        let g = Grid::new(10, 10);
        let raw = vec![Coord::new(0, 0), Coord::new(2, 0), Coord::new(4, 0)];

        let smoothed = smooth_jps_path(&g, &raw);
        assert_eq!(
            smoothed,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(3, 0),
                Coord::new(4, 0),
            ]
        );
        assert_eq!(octile_cost(&smoothed), octile_cost(&raw));
    }

    #[test]
    fn test_jps_smoothing_shortens_detours() {
        let g = Grid::new(10, 10);
        // A dog-leg that has a clear direct line
        let raw = vec![Coord::new(0, 0), Coord::new(4, 4), Coord::new(8, 4)];

        let smoothed = smooth_jps_path(&g, &raw);
        assert_eq!(smoothed.first(), Some(&Coord::new(0, 0)));
        assert_eq!(smoothed.last(), Some(&Coord::new(8, 4)));
        assert!(octile_cost(&smoothed) <= octile_cost(&raw));
    }

    #[test]
    fn test_jps_smoothing_respects_obstacles() {
        let mut g = Grid::new(10, 10);
        // Wall between the first and last waypoint, with a gap the raw
        // path already routes through
        for y in 0..4 {
            g.set_blocked(4, y, true);
        }
        let raw = vec![Coord::new(0, 0), Coord::new(4, 4), Coord::new(8, 0)];

        let smoothed = smooth_jps_path(&g, &raw);
        assert_eq!(smoothed.first(), Some(&Coord::new(0, 0)));
        assert_eq!(smoothed.last(), Some(&Coord::new(8, 0)));
        for c in &smoothed {
            assert!(!g.is_blocked(c.x, c.y));
        }
    }
}
