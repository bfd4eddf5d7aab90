//! Schema module - Configuration and palette types for Lenia Trails simulations.

mod config;
mod palette;

pub use config::*;
pub use palette::*;
