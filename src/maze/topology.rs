use super::cell::Cell;

/// A single compass/radial direction of one topology, represented as a bit
/// flag in that topology's cell wall mask.
pub trait Direction: Copy + PartialEq + std::fmt::Debug {
    /// The wall bit this direction occupies in a cell's mask.
    fn bit(self) -> u8;

    /// The direction pointing back from a neighbour reached via `self`.
    ///
    /// Returns `None` where the topology has no single opposing direction
    /// (the circular board's inward direction is opposed by two distinct
    /// outward directions).
    fn opposite(self) -> Option<Self>;
}

/// The contract every concrete board topology satisfies. The generation
/// engine and all read-side consumers (rendering, movement) rely only on
/// these operations, with identical semantics across topologies.
///
/// Wall mutations always apply symmetrically to both cells sharing a wall,
/// and are no-ops when either position falls outside the active domain
/// (e.g. the circular board's excluded inner rings).
pub trait Topology {
    type Position: Copy + PartialEq + std::fmt::Debug;
    type Direction: Direction;

    /// Number of active cells on the board.
    fn cell_count(&self) -> usize;

    /// Linear cell index for a position, or `None` if the position is
    /// outside the active domain. Exact inverse of `to_position` over the
    /// valid coordinate space.
    fn to_index(&self, pos: Self::Position) -> Option<usize>;

    /// Position for a linear cell index.
    ///
    /// # Panics
    /// If `index` is out of range.
    fn to_position(&self, index: usize) -> Self::Position;

    /// The direction from `from` pointing toward the neighbouring `to`.
    ///
    /// # Panics
    /// If the two positions are not topological neighbours. The engine never
    /// crosses non-neighbours, so hitting this indicates a topology or
    /// row-enumeration bug rather than a recoverable runtime condition.
    fn relative_direction(&self, from: Self::Position, to: Self::Position) -> Self::Direction;

    fn cell(&self, index: usize) -> Cell;

    fn cell_mut(&mut self, index: usize) -> &mut Cell;

    /// All geometrically adjacent, structurally active neighbours of `pos`,
    /// keyed by the direction leading to each.
    fn neighbours(&self, pos: Self::Position) -> Vec<(Self::Direction, Self::Position)>;

    /// Whether `pos` has a wall on side `direction`. Positions outside the
    /// active domain read as solid.
    fn has_wall(&self, pos: Self::Position, direction: Self::Direction) -> bool {
        match self.to_index(pos) {
            Some(index) => self.cell(index).has_wall(direction.bit()),
            None => true,
        }
    }

    /// Whether the wall between the neighbouring cells `a` and `b` is
    /// present. Symmetric in its arguments.
    fn has_inter_wall(&self, a: Self::Position, b: Self::Position) -> bool {
        let (Some(ia), Some(ib)) = (self.to_index(a), self.to_index(b)) else {
            return true;
        };
        let wall_a = self.cell(ia).has_wall(self.relative_direction(a, b).bit());
        let wall_b = self.cell(ib).has_wall(self.relative_direction(b, a).bit());
        debug_assert_eq!(
            wall_a, wall_b,
            "wall bits of a neighbour pair must agree ({a:?} / {b:?})"
        );
        wall_a || wall_b
    }

    /// Remove the wall between the neighbouring cells `a` and `b`, clearing
    /// the matching bit on both sides. No-op if either cell is inactive.
    fn remove_inter_wall(&mut self, a: Self::Position, b: Self::Position) {
        let (Some(ia), Some(ib)) = (self.to_index(a), self.to_index(b)) else {
            return;
        };
        let bit_a = self.relative_direction(a, b).bit();
        let bit_b = self.relative_direction(b, a).bit();
        self.cell_mut(ia).remove_wall(bit_a);
        self.cell_mut(ib).remove_wall(bit_b);
    }

    /// Set the wall between the neighbouring cells `a` and `b` on both
    /// sides. No-op if either cell is inactive.
    fn set_inter_wall(&mut self, a: Self::Position, b: Self::Position) {
        let (Some(ia), Some(ib)) = (self.to_index(a), self.to_index(b)) else {
            return;
        };
        let bit_a = self.relative_direction(a, b).bit();
        let bit_b = self.relative_direction(b, a).bit();
        self.cell_mut(ia).set_wall(bit_a);
        self.cell_mut(ib).set_wall(bit_b);
    }

    /// Neighbours of `pos`, optionally filtered to those reachable through
    /// an open passage (no wall between them and `pos`).
    fn neighbour_cells(
        &self,
        pos: Self::Position,
        visitable_only: bool,
    ) -> Vec<(Self::Direction, Self::Position)> {
        let mut neighbours = self.neighbours(pos);
        if visitable_only {
            neighbours.retain(|&(_, neighbour)| !self.has_inter_wall(pos, neighbour));
        }
        neighbours
    }
}
