/// Wall state of a single cell: one bit per direction of the owning
/// topology, plus a flag for cells that sit in a structurally absent region
/// of a sparse topology.
///
/// Boards start fully walled; generation only ever clears bits. All wall
/// primitives are no-ops on inactive cells so pair-wise wall code can run
/// uniformly without special-casing them at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    active: bool,
    walls: u8,
}

impl Cell {
    /// A cell that is not part of the board's active domain.
    pub const INACTIVE: Cell = Cell {
        active: false,
        walls: 0,
    };

    /// An active cell with the given wall bits set.
    pub const fn walled(walls: u8) -> Self {
        Cell {
            active: true,
            walls,
        }
    }

    pub fn is_active(self) -> bool {
        self.active
    }

    /// Raw wall bitmask. Always 0 for inactive cells.
    pub fn walls(self) -> u8 {
        self.walls
    }

    /// Whether the wall bit(s) in `bit` are present on this cell.
    pub fn has_wall(self, bit: u8) -> bool {
        self.active && self.walls & bit != 0
    }

    pub fn set_wall(&mut self, bit: u8) {
        if self.active {
            self.walls |= bit;
        }
    }

    pub fn remove_wall(&mut self, bit: u8) {
        if self.active {
            self.walls &= !bit;
        }
    }
}
