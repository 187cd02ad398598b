use std::fmt;

use crate::geometry::Coord;


#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    NoPathFound, // Unable to find a path to the goal
    OutOfBounds(Coord), // Endpoint does not address a cell on the grid
    BlockedEndpoint(Coord), // Endpoint cell is an obstacle
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NoPathFound => write!(f, "no path found"),
            PathError::OutOfBounds(c) => write!(f, "coordinate ({}, {}) is outside the grid", c.x, c.y),
            PathError::BlockedEndpoint(c) => write!(f, "cell ({}, {}) is blocked", c.x, c.y),
        }
    }
}

impl std::error::Error for PathError {}
