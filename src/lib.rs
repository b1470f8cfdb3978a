//! State representation and successor generation for a single-agent
//! box-pushing puzzle with pushes and pulls.

pub mod action;
pub mod boxes;
pub mod configuration;
pub mod expand;
pub mod geometry;
pub mod grid;
pub mod level;
pub mod solver;
pub mod zobrist;

pub use action::{Action, ActionCatalog, Direction};
pub use boxes::Boxes;
pub use configuration::Configuration;
pub use expand::Expander;
pub use geometry::Geometry;
pub use grid::{Grid, Position};
pub use level::{Level, LevelError};
pub use solver::{SearchOptions, SolveResult, Solver, Strategy};
