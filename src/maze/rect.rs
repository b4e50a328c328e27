use super::cell::Cell;
use super::topology::{Direction, Topology};
use crate::generators::RowTopology;

/// Directions of the 4-neighbour rectangular grid, one bit each in a 4-bit
/// wall field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RectDirection {
    Top = 0b0001,
    Right = 0b0010,
    Bottom = 0b0100,
    Left = 0b1000,
}

impl RectDirection {
    pub const ALL: [RectDirection; 4] = [
        RectDirection::Top,
        RectDirection::Right,
        RectDirection::Bottom,
        RectDirection::Left,
    ];

    /// Mask with every direction bit set; the initial state of a cell.
    pub const WALLED: u8 = 0b1111;

    fn from_bit(bit: u8) -> RectDirection {
        match bit {
            0b0001 => RectDirection::Top,
            0b0010 => RectDirection::Right,
            0b0100 => RectDirection::Bottom,
            0b1000 => RectDirection::Left,
            _ => panic!("{bit:#06b} is not a rectangular direction bit"),
        }
    }
}

impl Direction for RectDirection {
    fn bit(self) -> u8 {
        self as u8
    }

    /// The opposing direction is a 2-bit rotation within the 4-bit field.
    fn opposite(self) -> Option<Self> {
        let d = self as u8;
        Some(RectDirection::from_bit(((d << 2) | (d >> 2)) & 0b1111))
    }
}

/// A uniform width x height grid of cells, stored row-major.
pub struct RectBoard {
    data: Box<[Cell]>,
    width: u16,
    height: u16,
}

impl RectBoard {
    /// Creates a fully walled board. Every direction bit of every cell
    /// starts set, so generation has walls to remove and the outer boundary
    /// stays intact afterwards.
    pub fn new(width: u16, height: u16) -> Self {
        let data = vec![Cell::walled(RectDirection::WALLED); width as usize * height as usize]
            .into_boxed_slice();
        RectBoard {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_in_bounds(&self, (x, y): (u16, u16)) -> bool {
        x < self.width && y < self.height
    }
}

impl Topology for RectBoard {
    type Position = (u16, u16);
    type Direction = RectDirection;

    fn cell_count(&self) -> usize {
        self.data.len()
    }

    fn to_index(&self, pos: (u16, u16)) -> Option<usize> {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        self.is_in_bounds(pos)
            .then(|| pos.1 as usize * self.width as usize + pos.0 as usize)
    }

    fn to_position(&self, index: usize) -> (u16, u16) {
        assert!(index < self.data.len(), "cell index {index} out of range");
        let width = self.width as usize;
        ((index % width) as u16, (index / width) as u16)
    }

    fn relative_direction(&self, from: (u16, u16), to: (u16, u16)) -> RectDirection {
        let dx = to.0 as i32 - from.0 as i32;
        let dy = to.1 as i32 - from.1 as i32;
        match (dx, dy) {
            (0, -1) => RectDirection::Top,
            (1, 0) => RectDirection::Right,
            (0, 1) => RectDirection::Bottom,
            (-1, 0) => RectDirection::Left,
            _ => panic!("{from:?} and {to:?} are not neighbouring cells"),
        }
    }

    fn cell(&self, index: usize) -> Cell {
        self.data[index]
    }

    fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.data[index]
    }

    fn neighbours(&self, pos: (u16, u16)) -> Vec<(RectDirection, (u16, u16))> {
        // Boundary checks go through index arithmetic so they cannot drift
        // from to_index.
        let Some(index) = self.to_index(pos) else {
            return Vec::new();
        };
        let width = self.width as usize;
        let mut neighbours = Vec::with_capacity(4);
        if index / width > 0 {
            neighbours.push((RectDirection::Top, self.to_position(index - width)));
        }
        if index % width + 1 < width {
            neighbours.push((RectDirection::Right, self.to_position(index + 1)));
        }
        if index / width + 1 < self.height as usize {
            neighbours.push((RectDirection::Bottom, self.to_position(index + width)));
        }
        if index % width > 0 {
            neighbours.push((RectDirection::Left, self.to_position(index - 1)));
        }
        neighbours
    }
}

impl RowTopology for RectBoard {
    fn rows(&self) -> Vec<Vec<usize>> {
        let width = self.width as usize;
        (0..self.height as usize)
            .map(|y| (y * width..(y + 1) * width).collect())
            .collect()
    }

    fn remove_wall_between(&mut self, a: usize, b: usize) {
        let (pos_a, pos_b) = (self.to_position(a), self.to_position(b));
        self.remove_inter_wall(pos_a, pos_b);
    }

    fn next_row_neighbours(&self, index: usize) -> Vec<usize> {
        let below = index + self.width as usize;
        if below < self.data.len() {
            vec![below]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_position_roundtrip() {
        let board = RectBoard::new(5, 3);
        for index in 0..board.cell_count() {
            let pos = board.to_position(index);
            assert_eq!(board.to_index(pos), Some(index));
        }
        for y in 0..3 {
            for x in 0..5 {
                let index = board.to_index((x, y)).unwrap();
                assert_eq!(board.to_position(index), (x, y));
            }
        }
        assert_eq!(board.to_index((5, 0)), None);
        assert_eq!(board.to_index((0, 3)), None);
    }

    #[test]
    fn test_opposite_is_an_involution() {
        for d in RectDirection::ALL {
            let opposite = d.opposite().unwrap();
            assert_ne!(opposite, d);
            assert_eq!(opposite.opposite(), Some(d));
        }
        assert_eq!(RectDirection::Top.opposite(), Some(RectDirection::Bottom));
        assert_eq!(RectDirection::Right.opposite(), Some(RectDirection::Left));
    }

    #[test]
    fn test_relative_direction() {
        let board = RectBoard::new(4, 4);
        assert_eq!(
            board.relative_direction((1, 1), (1, 0)),
            RectDirection::Top
        );
        assert_eq!(
            board.relative_direction((1, 1), (2, 1)),
            RectDirection::Right
        );
        assert_eq!(
            board.relative_direction((1, 1), (1, 2)),
            RectDirection::Bottom
        );
        assert_eq!(
            board.relative_direction((1, 1), (0, 1)),
            RectDirection::Left
        );
    }

    #[test]
    #[should_panic(expected = "not neighbouring")]
    fn test_relative_direction_rejects_non_neighbours() {
        let board = RectBoard::new(4, 4);
        board.relative_direction((0, 0), (2, 0));
    }

    #[test]
    fn test_inter_wall_is_symmetric() {
        let mut board = RectBoard::new(3, 3);
        assert!(board.has_inter_wall((0, 0), (1, 0)));
        assert!(board.has_inter_wall((1, 0), (0, 0)));

        board.remove_inter_wall((0, 0), (1, 0));
        assert!(!board.has_inter_wall((0, 0), (1, 0)));
        assert!(!board.has_inter_wall((1, 0), (0, 0)));
        // Only the shared wall went away
        assert!(board.has_wall((0, 0), RectDirection::Bottom));
        assert!(board.has_wall((1, 0), RectDirection::Right));

        board.set_inter_wall((0, 0), (1, 0));
        assert!(board.has_inter_wall((0, 0), (1, 0)));
    }

    #[test]
    fn test_neighbours_at_boundaries() {
        let board = RectBoard::new(3, 3);
        let corner = board.neighbours((0, 0));
        assert_eq!(
            corner,
            vec![
                (RectDirection::Right, (1, 0)),
                (RectDirection::Bottom, (0, 1)),
            ]
        );
        assert_eq!(board.neighbours((1, 1)).len(), 4);
        assert_eq!(board.neighbours((2, 2)).len(), 2);
    }

    #[test]
    fn test_visitable_neighbours_follow_open_walls() {
        let mut board = RectBoard::new(3, 3);
        assert!(board.neighbour_cells((1, 1), true).is_empty());
        board.remove_inter_wall((1, 1), (1, 2));
        assert_eq!(
            board.neighbour_cells((1, 1), true),
            vec![(RectDirection::Bottom, (1, 2))]
        );
        assert_eq!(board.neighbour_cells((1, 1), false).len(), 4);
    }

    #[test]
    fn test_rows_partition_the_board() {
        let board = RectBoard::new(4, 3);
        let rows = board.rows();
        assert_eq!(rows.len(), 3);
        let mut all: Vec<usize> = rows.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_next_row_neighbours() {
        let board = RectBoard::new(4, 3);
        assert_eq!(board.next_row_neighbours(0), vec![4]);
        assert_eq!(board.next_row_neighbours(7), vec![11]);
        // bottom row has no next row
        assert!(board.next_row_neighbours(8).is_empty());
    }
}
