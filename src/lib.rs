//! **ndmazes** is an n-dimensional maze generation, rendering and route finding library.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod renderers;
pub mod units;
