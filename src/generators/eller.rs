use rand::{Rng, rngs::StdRng, seq::SliceRandom};

use super::path_set::PathSet;
use super::{GenerateError, RowTopology};

/// Row-sweep maze generation, a variant of Eller's algorithm.
///
/// The board is walked one row at a time while a [`PathSet`] tracks which
/// cells are already connected. Each row gets an intra-row pass (coin-flip
/// merges between lateral neighbours) and an advance pass (every set opens
/// at least one wall into the next row). A final unconditional merge pass
/// over the last row closes the remaining forest into a single tree.
pub fn row_sweep<B: RowTopology>(board: &mut B, rng: &mut StdRng) -> Result<(), GenerateError> {
    let rows = board.rows();
    if rows.is_empty() {
        return Ok(());
    }
    tracing::debug!(
        "[gen] starting row sweep over {} rows ({} cells)",
        rows.len(),
        rows.iter().map(Vec::len).sum::<usize>()
    );

    let mut sets = PathSet::new();
    for &cell in &rows[0] {
        sets.insert_singleton(cell);
    }

    for row_index in 0..rows.len() - 1 {
        intra_row_pass(board, &rows[row_index], false, &mut sets, rng);
        advance_row(board, &rows[row_index], &mut sets, rng)?;
    }

    // Every set still alive has at least one member in the last row (the
    // advance pass guarantees it), so force-merging along that row leaves a
    // single connected component.
    if let Some(last_row) = rows.last() {
        intra_row_pass(board, last_row, true, &mut sets, rng);
    }

    tracing::debug!("[gen] row sweep finished with {} path set(s)", sets.len());
    debug_assert_eq!(sets.len(), 1, "generation must end with one connected set");
    Ok(())
}

/// Scan adjacent cell pairs of `row` in order. Pairs already in the same set
/// are skipped (a wall removal there would close a cycle); other pairs merge
/// with probability 1/2, or unconditionally when `merge_all`. Every cell
/// leaves the pass tracked by exactly one set.
fn intra_row_pass<B: RowTopology>(
    board: &mut B,
    row: &[usize],
    merge_all: bool,
    sets: &mut PathSet,
    rng: &mut StdRng,
) {
    for pair in row.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if sets.same_set(a, b) {
            continue;
        }
        if merge_all || rng.random_bool(0.5) {
            board.remove_wall_between(a, b);
            sets.join(a, b);
        } else {
            sets.insert_singleton(a);
            sets.insert_singleton(b);
        }
    }
}

/// For every set, shuffle its members in the current row and advance a
/// random number of them — at least one — into the next row: each advancing
/// cell opens the wall to one random next-row candidate, which then joins
/// the set. The lower bound of one is what keeps every set reachable from
/// the rows still to come.
fn advance_row<B: RowTopology>(
    board: &mut B,
    row: &[usize],
    sets: &mut PathSet,
    rng: &mut StdRng,
) -> Result<(), GenerateError> {
    for set_index in 0..sets.len() {
        let mut members: Vec<usize> = sets
            .members(set_index)
            .iter()
            .copied()
            .filter(|cell| row.contains(cell))
            .collect();
        if members.is_empty() {
            continue;
        }
        members.shuffle(rng);
        let advance_count = rng.random_range(1..=members.len());
        for &cell in members.iter().take(advance_count) {
            let candidates = board.next_row_neighbours(cell);
            if candidates.is_empty() {
                return Err(GenerateError::NoAdvance { index: cell });
            }
            let next = candidates[rng.random_range(0..candidates.len())];
            debug_assert!(
                sets.find(next).is_none(),
                "next-row cell {next} is already tracked"
            );
            board.remove_wall_between(cell, next);
            sets.join(cell, next);
        }
    }
    Ok(())
}
