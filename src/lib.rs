//! Perfect maze generation over rectangular and concentric-ring grids.
//!
//! A maze is grown by a row-sweep union-find procedure (a variant of
//! Eller's algorithm) that talks to its board only through a small
//! per-topology adapter, so new grid shapes plug in without touching the
//! engine. Finished boards are read through wall and neighbour queries.

pub mod generators;
pub mod maze;
pub mod render;
