//! Board support for the control loop
pub mod board;
pub mod resources;
pub mod tuning;
