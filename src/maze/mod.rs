pub mod cell;
pub mod circle;
pub mod rect;
pub mod topology;

pub use cell::Cell;
pub use circle::{CircleBoard, CircleDirection, CirclePos};
pub use rect::{RectBoard, RectDirection};
pub use topology::{Direction, Topology};
