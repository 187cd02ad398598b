pub mod jps;
pub mod pathfinder;
pub mod smoothing;

pub use pathfinder::Pathfinder;
pub use smoothing::walkable;


/// Search strategy used by the pathfinder
///
/// The mode picks both the neighbor generation (plain 8-adjacency versus
/// JPS-pruned successors) and the smoothing flavor applied afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Classical A* over the adjacent cells
    #[default]
    AStar,
    /// Jump Point Search: successors found by jump scans, usually far apart
    JumpPoint,
}
