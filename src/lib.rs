//! Perfect maze generation and a race between stepwise pathfinding brains.
//!
//! [`generators::generate`] carves a maze, [`agent::Agent`] drives one [`brains::Brain`] across
//! it a move at a time, and [`app::App`] runs many such trials and collects step counts.

pub mod agent;
pub mod app;
pub mod brains;
pub mod generators;
pub mod maze;

pub use agent::Agent;
pub use brains::{Brain, BrainError, BrainKind};
pub use maze::{Cell, Coord, Grid, MazeError};
