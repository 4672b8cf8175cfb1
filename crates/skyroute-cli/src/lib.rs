//! CLI tools for the skyroute flight planner.
//!
//! All file and terminal surface lives here; the routing core stays pure.

pub mod matrix;

pub use matrix::{load_matrix, parse_matrix, DurationTable, FlightMatrix};
