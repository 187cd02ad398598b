use std::ops::{Add, Sub};

use num_traits::{Float, Num, Signed};


/// Manhattan distance
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
{
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
{
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}


/// Grid coordinate, addressing one cell
///
/// Coordinates are signed so that neighbor arithmetic can step outside the
/// grid; the grid itself treats out-of-bounds coordinates as blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Unit step towards `other`: each component is -1, 0 or 1
    pub fn step_towards(&self, other: &Coord) -> Coord {
        Coord {
            x: (other.x - self.x).signum(),
            y: (other.y - self.y).signum(),
        }
    }

    /// True if `other` is one of the up to 8 surrounding cells (or this cell)
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }

    /// True if `other` differs in both components, i.e. lies diagonally
    pub fn is_diagonal_to(&self, other: &Coord) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// Euclidean distance to `other`
    pub fn distance(&self, other: &Coord) -> f64 {
        euclidean(self.x as f64, self.y as f64, other.x as f64, other.y as f64)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}
