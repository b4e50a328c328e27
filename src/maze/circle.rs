use std::f64::consts::PI;

use super::cell::Cell;
use super::topology::{Direction, Topology};
use crate::generators::RowTopology;

/// Directions of the concentric-ring grid, one bit each in a 5-bit wall
/// field. Outward neighbours need two directions because a ring may hold
/// twice as many cells as the ring inside it: each cell then fans out to a
/// clockwise and a counter-clockwise child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CircleDirection {
    /// Outward, toward the even-offset child.
    TopCw = 0b00001,
    /// Outward, toward the odd-offset child.
    TopCcw = 0b00010,
    Right = 0b00100,
    /// Inward, toward the single parent cell.
    Bottom = 0b01000,
    Left = 0b10000,
}

impl CircleDirection {
    pub const ALL: [CircleDirection; 5] = [
        CircleDirection::TopCw,
        CircleDirection::TopCcw,
        CircleDirection::Right,
        CircleDirection::Bottom,
        CircleDirection::Left,
    ];

    /// Mask with every direction bit set; the initial state of a cell.
    pub const WALLED: u8 = 0b11111;
}

impl Direction for CircleDirection {
    fn bit(self) -> u8 {
        self as u8
    }

    /// Opposing direction by fixed lookup. Both outward directions oppose
    /// `Bottom`, so `Bottom` itself has no single opposing direction: the
    /// source material answers with the bitwise AND of the two top flags,
    /// which matches no direction at all. That asymmetry is surfaced here as
    /// `None` instead of silently picking a side; the compound wall
    /// operations never consult `opposite` and derive each side's direction
    /// from the cell pair instead.
    fn opposite(self) -> Option<Self> {
        match self {
            CircleDirection::TopCw | CircleDirection::TopCcw => Some(CircleDirection::Bottom),
            CircleDirection::Right => Some(CircleDirection::Left),
            CircleDirection::Left => Some(CircleDirection::Right),
            CircleDirection::Bottom => None,
        }
    }
}

/// Position on a concentric-ring board: ring number (counted from the board
/// centre) and offset within the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CirclePos {
    pub ring: usize,
    pub offset: usize,
}

impl CirclePos {
    pub fn new(ring: usize, offset: usize) -> Self {
        CirclePos { ring, offset }
    }
}

/// A cell's circumference share may stretch this far past its radial depth
/// before the next ring doubles its cell count.
const DOUBLING_THRESHOLD: f64 = 2.0;

/// A polar grid of concentric rings from `inner_radius` (inclusive) to
/// `radius` (exclusive), stored flat in ring order. Rings inside
/// `inner_radius` are excluded from the cell array entirely; positions in
/// them are structurally inactive, so wall mutations touching them are
/// no-ops rather than errors.
pub struct CircleBoard {
    data: Box<[Cell]>,
    /// Cells per ring, indexed by absolute ring number. Rings below
    /// `inner_radius` take part in the doubling recurrence but own no cells.
    counts: Vec<usize>,
    inner_radius: usize,
    radius: usize,
}

/// Per-ring cell counts for rings `0..radius`. Ring 0 holds one cell; a
/// ring's count doubles whenever its circumference-per-cell ratio would
/// exceed the threshold, and is carried over otherwise. Only doubling (never
/// halving or arbitrary scaling) keeps ring-to-ring adjacency computable.
fn ring_counts(radius: usize) -> Vec<usize> {
    let mut counts = Vec::with_capacity(radius);
    let mut count = 1usize;
    for ring in 0..radius {
        if ring > 0 && 2.0 * PI * ring as f64 / count as f64 > DOUBLING_THRESHOLD {
            count *= 2;
        }
        counts.push(count);
    }
    counts
}

impl CircleBoard {
    /// Creates a fully walled board covering rings
    /// `inner_radius..radius`. An `inner_radius >= radius` yields an empty
    /// board.
    pub fn new(radius: usize, inner_radius: usize) -> Self {
        let counts = ring_counts(radius);
        let total: usize = counts[inner_radius.min(radius)..].iter().sum();
        CircleBoard {
            data: vec![Cell::walled(CircleDirection::WALLED); total].into_boxed_slice(),
            counts,
            inner_radius,
            radius,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn inner_radius(&self) -> usize {
        self.inner_radius
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The active rings, innermost first.
    pub fn rings(&self) -> std::ops::Range<usize> {
        self.inner_radius.min(self.radius)..self.radius
    }

    /// Number of cells in the given ring (also defined for excluded rings).
    pub fn ring_count(&self, ring: usize) -> usize {
        self.counts[ring]
    }

    /// Linear index of the first cell of an active ring.
    fn ring_start(&self, ring: usize) -> usize {
        self.counts[self.inner_radius..ring].iter().sum()
    }

    /// Whether `ring` holds twice as many cells as the ring inside it.
    fn doubled_at(&self, ring: usize) -> bool {
        self.counts[ring] == 2 * self.counts[ring - 1]
    }

    /// Offset of the single inward neighbour of `pos`.
    fn inward_offset(&self, pos: CirclePos) -> usize {
        if self.doubled_at(pos.ring) {
            pos.offset / 2
        } else {
            pos.offset
        }
    }
}

impl Topology for CircleBoard {
    type Position = CirclePos;
    type Direction = CircleDirection;

    fn cell_count(&self) -> usize {
        self.data.len()
    }

    fn to_index(&self, pos: CirclePos) -> Option<usize> {
        if pos.ring < self.inner_radius || pos.ring >= self.radius {
            return None;
        }
        if pos.offset >= self.counts[pos.ring] {
            return None;
        }
        Some(self.ring_start(pos.ring) + pos.offset)
    }

    fn to_position(&self, index: usize) -> CirclePos {
        let mut remainder = index;
        for ring in self.rings() {
            let count = self.counts[ring];
            if remainder < count {
                return CirclePos::new(ring, remainder);
            }
            remainder -= count;
        }
        panic!("cell index {index} out of range");
    }

    fn relative_direction(&self, from: CirclePos, to: CirclePos) -> CircleDirection {
        if from.ring == to.ring {
            let count = self.counts[from.ring];
            if count > 1 {
                if (from.offset + 1) % count == to.offset {
                    return CircleDirection::Right;
                }
                if (to.offset + 1) % count == from.offset {
                    return CircleDirection::Left;
                }
            }
        } else if from.ring == to.ring + 1 && self.inward_offset(from) == to.offset {
            return CircleDirection::Bottom;
        } else if to.ring == from.ring + 1 && self.inward_offset(to) == from.offset {
            // The outward fan is disambiguated by the outer cell's offset
            // parity: even offset means the clockwise top.
            return if to.offset % 2 == 0 {
                CircleDirection::TopCw
            } else {
                CircleDirection::TopCcw
            };
        }
        panic!("{from:?} and {to:?} are not neighbouring cells");
    }

    fn cell(&self, index: usize) -> Cell {
        self.data[index]
    }

    fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.data[index]
    }

    fn neighbours(&self, pos: CirclePos) -> Vec<(CircleDirection, CirclePos)> {
        if self.to_index(pos).is_none() {
            return Vec::new();
        }
        let count = self.counts[pos.ring];
        let mut neighbours = Vec::with_capacity(5);
        if pos.ring + 1 < self.radius {
            if self.doubled_at(pos.ring + 1) {
                neighbours.push((
                    CircleDirection::TopCw,
                    CirclePos::new(pos.ring + 1, pos.offset * 2),
                ));
                neighbours.push((
                    CircleDirection::TopCcw,
                    CirclePos::new(pos.ring + 1, pos.offset * 2 + 1),
                ));
            } else {
                let outward = CirclePos::new(pos.ring + 1, pos.offset);
                let direction = if outward.offset % 2 == 0 {
                    CircleDirection::TopCw
                } else {
                    CircleDirection::TopCcw
                };
                neighbours.push((direction, outward));
            }
        }
        if count > 1 {
            neighbours.push((
                CircleDirection::Right,
                CirclePos::new(pos.ring, (pos.offset + 1) % count),
            ));
        }
        if pos.ring > self.inner_radius {
            neighbours.push((
                CircleDirection::Bottom,
                CirclePos::new(pos.ring - 1, self.inward_offset(pos)),
            ));
        }
        // A two-cell ring has a single logical lateral wall; listing the
        // same neighbour under Left as well would double-count it.
        if count > 2 {
            neighbours.push((
                CircleDirection::Left,
                CirclePos::new(pos.ring, (pos.offset + count - 1) % count),
            ));
        }
        neighbours
    }
}

impl RowTopology for CircleBoard {
    fn rows(&self) -> Vec<Vec<usize>> {
        let mut rows = Vec::with_capacity(self.rings().len());
        let mut start = 0;
        for ring in self.rings() {
            let count = self.counts[ring];
            rows.push((start..start + count).collect());
            start += count;
        }
        rows
    }

    fn remove_wall_between(&mut self, a: usize, b: usize) {
        let (pos_a, pos_b) = (self.to_position(a), self.to_position(b));
        self.remove_inter_wall(pos_a, pos_b);
    }

    fn next_row_neighbours(&self, index: usize) -> Vec<usize> {
        let pos = self.to_position(index);
        if pos.ring + 1 >= self.radius {
            return Vec::new();
        }
        let start = self.ring_start(pos.ring + 1);
        if self.doubled_at(pos.ring + 1) {
            vec![start + pos.offset * 2, start + pos.offset * 2 + 1]
        } else {
            vec![start + pos.offset]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_counts_follow_the_doubling_rule() {
        let counts = ring_counts(4);
        assert_eq!(counts, vec![1, 2, 4, 8]);
        // Each step either carries the count over or doubles it
        let counts = ring_counts(12);
        for ring in 1..counts.len() {
            let ratio = counts[ring] / counts[ring - 1];
            assert!(ratio == 1 || ratio == 2, "ring {ring} scaled by {ratio}");
            assert_eq!(counts[ring] % counts[ring - 1], 0);
        }
        // Once wide enough, rings stop doubling
        assert!(counts[10] == counts[11] || counts[10] * 2 == counts[11]);
    }

    #[test]
    fn test_board_size() {
        let board = CircleBoard::new(4, 1);
        assert_eq!(board.rings().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(
            board.rings().map(|r| board.ring_count(r)).collect::<Vec<_>>(),
            vec![2, 4, 8]
        );
        assert_eq!(board.cell_count(), 14);

        assert!(CircleBoard::new(2, 2).is_empty());
    }

    #[test]
    fn test_index_position_roundtrip() {
        let board = CircleBoard::new(5, 1);
        for index in 0..board.cell_count() {
            let pos = board.to_position(index);
            assert_eq!(board.to_index(pos), Some(index));
        }
        // Excluded inner ring and out-of-range positions have no index
        assert_eq!(board.to_index(CirclePos::new(0, 0)), None);
        assert_eq!(board.to_index(CirclePos::new(5, 0)), None);
        assert_eq!(board.to_index(CirclePos::new(1, 2)), None);
    }

    #[test]
    fn test_opposite_flags_the_bottom_asymmetry() {
        assert_eq!(
            CircleDirection::TopCw.opposite(),
            Some(CircleDirection::Bottom)
        );
        assert_eq!(
            CircleDirection::TopCcw.opposite(),
            Some(CircleDirection::Bottom)
        );
        assert_eq!(
            CircleDirection::Left.opposite(),
            Some(CircleDirection::Right)
        );
        assert_eq!(
            CircleDirection::Right.opposite(),
            Some(CircleDirection::Left)
        );
        // Two directions oppose Bottom, so Bottom opposes no single one
        assert_eq!(CircleDirection::Bottom.opposite(), None);
    }

    #[test]
    fn test_relative_direction_parity_tie_break() {
        let board = CircleBoard::new(4, 1);
        // Ring 2 doubles ring 1: cell (1, 0) fans out to (2, 0) and (2, 1)
        assert_eq!(
            board.relative_direction(CirclePos::new(1, 0), CirclePos::new(2, 0)),
            CircleDirection::TopCw
        );
        assert_eq!(
            board.relative_direction(CirclePos::new(1, 0), CirclePos::new(2, 1)),
            CircleDirection::TopCcw
        );
        // Inward is always Bottom
        assert_eq!(
            board.relative_direction(CirclePos::new(2, 1), CirclePos::new(1, 0)),
            CircleDirection::Bottom
        );
        // Lateral within a ring
        assert_eq!(
            board.relative_direction(CirclePos::new(2, 0), CirclePos::new(2, 1)),
            CircleDirection::Right
        );
        assert_eq!(
            board.relative_direction(CirclePos::new(2, 0), CirclePos::new(2, 3)),
            CircleDirection::Left
        );
    }

    #[test]
    #[should_panic(expected = "not neighbouring")]
    fn test_relative_direction_rejects_non_neighbours() {
        let board = CircleBoard::new(4, 1);
        board.relative_direction(CirclePos::new(1, 0), CirclePos::new(3, 0));
    }

    #[test]
    fn test_inter_wall_symmetry_across_the_fan() {
        let mut board = CircleBoard::new(4, 1);
        let parent = CirclePos::new(1, 0);
        let even_child = CirclePos::new(2, 0);
        let odd_child = CirclePos::new(2, 1);

        board.remove_inter_wall(parent, even_child);
        assert!(!board.has_inter_wall(parent, even_child));
        assert!(!board.has_inter_wall(even_child, parent));
        // The odd child's wall to the same parent is untouched
        assert!(board.has_inter_wall(parent, odd_child));
        assert!(board.has_wall(parent, CircleDirection::TopCcw));
        assert!(!board.has_wall(parent, CircleDirection::TopCw));
        assert!(!board.has_wall(even_child, CircleDirection::Bottom));
    }

    #[test]
    fn test_wall_ops_on_excluded_rings_are_noops() {
        let mut board = CircleBoard::new(4, 2);
        let inactive = CirclePos::new(1, 0);
        let innermost = CirclePos::new(2, 0);
        let before: Vec<u8> = (0..board.cell_count()).map(|i| board.cell(i).walls()).collect();

        board.remove_inter_wall(innermost, inactive);
        board.set_inter_wall(innermost, inactive);

        let after: Vec<u8> = (0..board.cell_count()).map(|i| board.cell(i).walls()).collect();
        assert_eq!(before, after);
        // The excluded region reads as solid
        assert!(board.has_wall(inactive, CircleDirection::TopCw));
        assert!(board.has_inter_wall(innermost, inactive));
    }

    #[test]
    fn test_neighbours() {
        let board = CircleBoard::new(4, 1);
        // (2, 0): outward fan of two, lateral both ways, one parent
        let neighbours = board.neighbours(CirclePos::new(2, 0));
        assert_eq!(
            neighbours,
            vec![
                (CircleDirection::TopCw, CirclePos::new(3, 0)),
                (CircleDirection::TopCcw, CirclePos::new(3, 1)),
                (CircleDirection::Right, CirclePos::new(2, 1)),
                (CircleDirection::Bottom, CirclePos::new(1, 0)),
                (CircleDirection::Left, CirclePos::new(2, 3)),
            ]
        );
        // Innermost active ring has no inward neighbour, and a two-cell
        // ring exposes a single lateral wall
        let neighbours = board.neighbours(CirclePos::new(1, 0));
        assert_eq!(
            neighbours,
            vec![
                (CircleDirection::TopCw, CirclePos::new(2, 0)),
                (CircleDirection::TopCcw, CirclePos::new(2, 1)),
                (CircleDirection::Right, CirclePos::new(1, 1)),
            ]
        );
        // Outermost ring has no outward neighbours
        assert!(board.neighbours(CirclePos::new(3, 0)).iter().all(|(d, _)| {
            !matches!(d, CircleDirection::TopCw | CircleDirection::TopCcw)
        }));
    }

    #[test]
    fn test_neighbour_symmetry() {
        let board = CircleBoard::new(5, 1);
        for index in 0..board.cell_count() {
            let pos = board.to_position(index);
            for (_, neighbour) in board.neighbours(pos) {
                assert!(
                    board
                        .neighbours(neighbour)
                        .iter()
                        .any(|&(_, back)| back == pos),
                    "{neighbour:?} does not list {pos:?} back"
                );
                assert_eq!(
                    board.has_inter_wall(pos, neighbour),
                    board.has_inter_wall(neighbour, pos)
                );
            }
        }
    }

    #[test]
    fn test_next_row_neighbours() {
        let board = CircleBoard::new(4, 1);
        // Ring 1 starts at 0, ring 2 at 2, ring 3 at 6
        assert_eq!(board.next_row_neighbours(0), vec![2, 3]);
        assert_eq!(board.next_row_neighbours(1), vec![4, 5]);
        assert_eq!(board.next_row_neighbours(2), vec![6, 7]);
        assert_eq!(board.next_row_neighbours(5), vec![12, 13]);
        // Outermost ring fans nowhere
        assert!(board.next_row_neighbours(6).is_empty());
    }

    #[test]
    fn test_rows_partition_the_board() {
        let board = CircleBoard::new(5, 2);
        let rows = board.rows();
        assert_eq!(rows.len(), 3);
        let mut all: Vec<usize> = rows.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..board.cell_count()).collect::<Vec<_>>());
    }
}
