use rand::{SeedableRng, rngs::StdRng};

mod eller;
pub mod path_set;

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// The operations the row-sweep engine needs from a topology: how to walk
/// the board one row at a time, how to open a wall, and where a cell can
/// reach into the next row. Nothing else about a topology leaks into the
/// engine, so new grid shapes plug in without touching it.
pub trait RowTopology {
    /// Sweep-front rows in traversal order (grid rows top to bottom, or
    /// rings innermost to outermost). Together the rows partition every cell
    /// index exactly once.
    fn rows(&self) -> Vec<Vec<usize>>;

    /// Remove the wall between two neighbouring cells, symmetrically on
    /// both sides.
    fn remove_wall_between(&mut self, a: usize, b: usize);

    /// Candidate cells in the next row that `index` may open a wall to: one
    /// for uniform rows, two where a ring doubles. Empty only for cells of
    /// the final row.
    fn next_row_neighbours(&self, index: usize) -> Vec<usize>;
}

/// Generation failure. Generation has no external resources and no partial
/// results: on error the board is left in whatever intermediate state the
/// sweep reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// A cell chosen to carry its set into the next row had no next-row
    /// neighbour candidates; its set would become unreachable from the next
    /// row onward.
    NoAdvance { index: usize },
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::NoAdvance { index } => {
                write!(f, "cell {index} has no neighbours in the next row to advance to")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Generates a perfect maze on `board`: removes walls until the open
/// passages form a spanning tree over all cells (every cell reachable from
/// every other, no cycles). Pass a seed for reproducible output.
pub fn generate_maze<B: RowTopology>(board: &mut B, seed: Option<u64>) -> Result<(), GenerateError> {
    eller::row_sweep(board, &mut get_rng(seed))
}
