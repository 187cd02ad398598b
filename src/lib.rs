//! Grid-based shortest path search
//!
//! A fixed-size rectangular grid of walkable/blocked cells, searched with
//! classical A* or Jump Point Search under an octile (10/14) cost model,
//! with optional corner cutting and post-hoc path smoothing.
//!
//! ```
//! use gridpath::{Coord, Pathfinder, SearchMode};
//!
//! let mut p = Pathfinder::new(10, 10);
//! p.grid_mut().set_blocked(5, 5, true);
//! p.set_mode(SearchMode::JumpPoint);
//!
//! let path = p.find_path(Coord::new(0, 0), Coord::new(9, 9), false, true);
//! assert_eq!(path.first(), Some(&Coord::new(0, 0)));
//! ```

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod grid;
pub mod grid_algos;

pub use errors::PathError;
pub use geometry::Coord;
pub use grid::{Cell, Grid, Status};
pub use grid_algos::{Pathfinder, SearchMode, walkable};
